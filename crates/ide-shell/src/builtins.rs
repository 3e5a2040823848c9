//! Core contributions, loaded through the same entry point as third-party
//! extensions.

use std::sync::Arc;

use ide_core::result::AppResult;
use ide_plugin::{ActivityPanelConfig, DEFAULT_PRIORITY, ToolbarButtonConfig, ToolbarCommand};

use crate::context::IdeContext;
use crate::loader::IdeExtension;

/// Activity panel for building queries by pointing at schema fields.
#[derive(Debug, Default)]
pub struct QueryComposerPanel;

impl IdeExtension for QueryComposerPanel {
    fn name(&self) -> &str {
        "query-composer"
    }

    fn init(&self, context: &IdeContext) -> AppResult<()> {
        let mut panel = ActivityPanelConfig::new("Query Composer").with_icon("explorer");
        panel.description = Some("Build queries by selecting fields from the schema".to_string());
        context.register_panel("query-composer", panel, DEFAULT_PRIORITY);
        Ok(())
    }
}

/// Activity panel with links to documentation and support.
#[derive(Debug, Default)]
pub struct HelpPanel;

impl IdeExtension for HelpPanel {
    fn name(&self) -> &str {
        "help"
    }

    fn init(&self, context: &IdeContext) -> AppResult<()> {
        context.register_panel(
            "help",
            ActivityPanelConfig::new("Help").with_icon("help"),
            DEFAULT_PRIORITY + 10,
        );
        Ok(())
    }
}

/// The editor toolbar buttons.
#[derive(Debug, Default)]
pub struct CoreToolbarButtons;

impl IdeExtension for CoreToolbarButtons {
    fn name(&self) -> &str {
        "core-toolbar-buttons"
    }

    fn init(&self, context: &IdeContext) -> AppResult<()> {
        let buttons = [
            (
                "prettify",
                ToolbarButtonConfig::new("Prettify", ToolbarCommand::Prettify)
                    .with_title("Prettify query (Shift-Ctrl-P)"),
            ),
            (
                "copy-query",
                ToolbarButtonConfig::new("Copy query", ToolbarCommand::CopyQuery)
                    .with_title("Copy query (Shift-Ctrl-C)"),
            ),
            (
                "merge-fragments",
                ToolbarButtonConfig::new("Merge fragments", ToolbarCommand::MergeFragments)
                    .with_title("Merge fragments into query (Shift-Ctrl-M)"),
            ),
            (
                "toggle-auth",
                ToolbarButtonConfig::new("Toggle auth", ToolbarCommand::ToggleAuth)
                    .with_title("Switch between authenticated and public requests"),
            ),
        ];

        for (priority, (name, config)) in buttons.into_iter().enumerate() {
            context.register_button(name, config, DEFAULT_PRIORITY + priority as i32);
        }
        Ok(())
    }
}

/// Returns the built-in extensions in load order.
pub fn builtin_extensions() -> Vec<Arc<dyn IdeExtension>> {
    vec![
        Arc::new(QueryComposerPanel),
        Arc::new(HelpPanel),
        Arc::new(CoreToolbarButtons),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::ExtensionLoader;
    use ide_plugin::ExtensionKind;

    #[test]
    fn test_builtins_register_in_order() {
        let context = IdeContext::in_memory();
        let loader = ExtensionLoader::new(context.clone());
        assert_eq!(loader.load_all(&builtin_extensions()), 3);

        let buttons: Vec<String> = context
            .extensions()
            .sorted_entries(ExtensionKind::ToolbarButton)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(
            buttons,
            vec!["prettify", "copy-query", "merge-fragments", "toggle-auth"]
        );

        let panels: Vec<String> = context
            .extensions()
            .sorted_entries(ExtensionKind::ActivityPanel)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(panels, vec!["query-composer", "help"]);

        let state = context.state();
        let mirrored: Vec<&str> = state.registered_extensions.keys().map(String::as_str).collect();
        assert_eq!(mirrored, vec!["query-composer", "help"]);
    }
}
