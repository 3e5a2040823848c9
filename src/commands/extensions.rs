//! Registered contributions.

use serde::Serialize;
use tabled::Tabled;

use ide_core::config::IdeConfig;
use ide_core::error::AppError;
use ide_core::types::BootData;
use ide_plugin::{ExtensionConfig, ExtensionKind};

use crate::output::{self, OutputFormat};

/// Contribution display row
#[derive(Debug, Serialize, Tabled)]
struct ExtensionRow {
    /// Kind
    kind: String,
    /// Name
    name: String,
    /// Priority
    priority: i32,
    /// Label
    label: String,
    /// Action
    action: String,
}

/// Execute the extensions command
pub fn execute(config: &IdeConfig, data: &BootData, format: OutputFormat) -> Result<(), AppError> {
    let (session, report) = super::open_session(config, data)?;
    tracing::debug!(loaded = ?report.loaded_extensions, "Extensions loaded");

    let registry = session.context().extensions();
    let rows: Vec<ExtensionRow> = [ExtensionKind::ToolbarButton, ExtensionKind::ActivityPanel]
        .into_iter()
        .flat_map(|kind| registry.sorted_entries(kind))
        .map(|entry| {
            let (label, action) = match &entry.config {
                ExtensionConfig::ToolbarButton(button) => {
                    (button.label.clone(), format!("{:?}", button.command))
                }
                ExtensionConfig::ActivityPanel(panel) => (panel.title.clone(), "panel".to_string()),
            };
            ExtensionRow {
                kind: entry.config.kind().to_string(),
                name: entry.name,
                priority: entry.priority,
                label,
                action,
            }
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
