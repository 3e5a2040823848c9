//! Contribution types accepted by the extension registry.

use std::fmt;

use serde::{Deserialize, Serialize};

use ide_core::error::AppError;

/// Kind of UI affordance an extension contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionKind {
    /// A button in the document editor toolbar.
    ToolbarButton,
    /// A side panel in the activity bar.
    ActivityPanel,
}

impl ExtensionKind {
    /// Returns the string name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToolbarButton => "toolbar_button",
            Self::ActivityPanel => "activity_panel",
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a toolbar button does when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarCommand {
    /// Reformat the current query.
    Prettify,
    /// Hand the current query to the clipboard.
    CopyQuery,
    /// Inline fragment spreads into the current query.
    MergeFragments,
    /// Flip between authenticated and public requests.
    ToggleAuth,
    /// Drop the cached schema so it is fetched again.
    RefetchSchema,
    /// Extension-defined command, surfaced through the `toolbar_command` hook.
    Custom(String),
}

/// Toolbar button descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolbarButtonConfig {
    /// Visible label.
    pub label: String,
    /// Tooltip.
    #[serde(default)]
    pub title: Option<String>,
    /// Icon identifier.
    #[serde(default)]
    pub icon: Option<String>,
    /// Command run on press.
    pub command: ToolbarCommand,
}

impl ToolbarButtonConfig {
    /// Creates a button with a label and command.
    pub fn new(label: &str, command: ToolbarCommand) -> Self {
        Self {
            label: label.to_string(),
            title: None,
            icon: None,
            command,
        }
    }

    /// Sets the tooltip.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }
}

/// Activity-bar panel descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPanelConfig {
    /// Panel title.
    pub title: String,
    /// Icon identifier.
    #[serde(default)]
    pub icon: Option<String>,
    /// Short description shown in the panel header.
    #[serde(default)]
    pub description: Option<String>,
}

impl ActivityPanelConfig {
    /// Creates a panel with a title.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            icon: None,
            description: None,
        }
    }

    /// Sets the icon.
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }
}

/// A contribution, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtensionConfig {
    /// Toolbar button.
    ToolbarButton(ToolbarButtonConfig),
    /// Activity panel.
    ActivityPanel(ActivityPanelConfig),
}

impl ExtensionConfig {
    /// Returns the kind of this contribution.
    pub fn kind(&self) -> ExtensionKind {
        match self {
            Self::ToolbarButton(_) => ExtensionKind::ToolbarButton,
            Self::ActivityPanel(_) => ExtensionKind::ActivityPanel,
        }
    }

    /// Checks the shape required for this kind.
    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            Self::ToolbarButton(button) => {
                if button.label.trim().is_empty() {
                    return Err(AppError::validation("Toolbar button label must not be empty"));
                }
                if let ToolbarCommand::Custom(command) = &button.command
                    && command.trim().is_empty()
                {
                    return Err(AppError::validation("Custom toolbar command must be named"));
                }
            }
            Self::ActivityPanel(panel) => {
                if panel.title.trim().is_empty() {
                    return Err(AppError::validation("Activity panel title must not be empty"));
                }
            }
        }
        Ok(())
    }

    /// Returns the toolbar button config, if this is one.
    pub fn as_toolbar_button(&self) -> Option<&ToolbarButtonConfig> {
        match self {
            Self::ToolbarButton(button) => Some(button),
            Self::ActivityPanel(_) => None,
        }
    }

    /// Returns the activity panel config, if this is one.
    pub fn as_activity_panel(&self) -> Option<&ActivityPanelConfig> {
        match self {
            Self::ActivityPanel(panel) => Some(panel),
            Self::ToolbarButton(_) => None,
        }
    }
}

impl From<ToolbarButtonConfig> for ExtensionConfig {
    fn from(config: ToolbarButtonConfig) -> Self {
        Self::ToolbarButton(config)
    }
}

impl From<ActivityPanelConfig> for ExtensionConfig {
    fn from(config: ActivityPanelConfig) -> Self {
        Self::ActivityPanel(config)
    }
}

/// A stored contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionEntry {
    /// Unique name within its kind.
    pub name: String,
    /// Contribution config.
    pub config: ExtensionConfig,
    /// Priority (lower = earlier).
    pub priority: i32,
}
