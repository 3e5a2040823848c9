//! Hook names and their typed payloads.

use std::fmt;

use ide_core::error::AppError;
use ide_core::types::BootContext;

use crate::extension::{ExtensionConfig, ExtensionKind};

/// Name of a hook that listeners subscribe to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HookName {
    // ── Registration ──
    /// Fired after a toolbar button was registered.
    AfterRegisterToolbarButton,
    /// Fired after an activity panel was registered.
    AfterRegisterActivityPanel,
    /// Fired when registering a toolbar button failed.
    ToolbarButtonRegisterError,
    /// Fired when registering an activity panel failed.
    ActivityPanelRegisterError,

    // ── Lifecycle ──
    /// Fired once after the boot context is resolved, before the editor mounts.
    BeforeRender,
    /// Fired when an extension's init entry point failed.
    ExtensionInitError,
    /// Fired when a toolbar button with a custom command is pressed.
    ToolbarCommand,

    // ── Bus ──
    /// Fired when a listener failed while handling another event.
    ListenerError,

    /// Any other name, defined by extensions.
    Custom(String),
}

impl HookName {
    /// Returns the string name of this hook.
    pub fn as_str(&self) -> &str {
        match self {
            Self::AfterRegisterToolbarButton => "after_register_toolbar_button",
            Self::AfterRegisterActivityPanel => "after_register_activity_panel",
            Self::ToolbarButtonRegisterError => "toolbar_button_register_error",
            Self::ActivityPanelRegisterError => "activity_panel_register_error",
            Self::BeforeRender => "before_render",
            Self::ExtensionInitError => "extension_init_error",
            Self::ToolbarCommand => "toolbar_command",
            Self::ListenerError => "listener_error",
            Self::Custom(name) => name,
        }
    }

    /// Success hook fired for a registration of `kind`.
    pub fn after_register(kind: ExtensionKind) -> Self {
        match kind {
            ExtensionKind::ToolbarButton => Self::AfterRegisterToolbarButton,
            ExtensionKind::ActivityPanel => Self::AfterRegisterActivityPanel,
        }
    }

    /// Failure hook fired for a registration of `kind`.
    pub fn register_error(kind: ExtensionKind) -> Self {
        match kind {
            ExtensionKind::ToolbarButton => Self::ToolbarButtonRegisterError,
            ExtensionKind::ActivityPanel => Self::ActivityPanelRegisterError,
        }
    }
}

impl From<&str> for HookName {
    fn from(name: &str) -> Self {
        match name {
            "after_register_toolbar_button" => Self::AfterRegisterToolbarButton,
            "after_register_activity_panel" => Self::AfterRegisterActivityPanel,
            "toolbar_button_register_error" => Self::ToolbarButtonRegisterError,
            "activity_panel_register_error" => Self::ActivityPanelRegisterError,
            "before_render" => Self::BeforeRender,
            "extension_init_error" => Self::ExtensionInitError,
            "toolbar_command" => Self::ToolbarCommand,
            "listener_error" => Self::ListenerError,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An event delivered to hook listeners, carrying its declared payload.
#[derive(Debug, Clone)]
pub enum HookEvent {
    /// A contribution was stored in the extension registry.
    AfterRegister {
        /// Kind of contribution.
        kind: ExtensionKind,
        /// Contribution name.
        name: String,
        /// Contribution config.
        config: ExtensionConfig,
        /// Priority it was registered with.
        priority: i32,
    },
    /// A contribution was rejected by the extension registry.
    RegisterError {
        /// Kind of contribution.
        kind: ExtensionKind,
        /// Contribution name.
        name: String,
        /// Contribution config as submitted.
        config: ExtensionConfig,
        /// Requested priority.
        priority: i32,
        /// Why registration failed.
        error: AppError,
    },
    /// Pre-render extension point.
    BeforeRender(BootContext),
    /// An extension failed to initialise.
    ExtensionInitError {
        /// Extension name.
        extension: String,
        /// Error returned by the extension.
        error: AppError,
    },
    /// A custom toolbar command was triggered.
    ToolbarCommand {
        /// Name of the pressed button.
        button: String,
        /// Command identifier from the button config.
        command: String,
    },
    /// A listener failed while handling `payload`.
    ListenerError {
        /// Name of the event being dispatched when the failure happened.
        event: String,
        /// The original event, unchanged.
        payload: Box<HookEvent>,
        /// Id of the failing listener.
        listener: String,
        /// The caught error.
        error: AppError,
    },
    /// Extension-defined event with free-form arguments.
    Custom {
        /// Event name.
        name: String,
        /// Arguments, passed through unchanged.
        args: Vec<serde_json::Value>,
    },
}

impl HookEvent {
    /// Creates a custom event.
    pub fn custom(name: &str, args: Vec<serde_json::Value>) -> Self {
        Self::Custom {
            name: name.to_string(),
            args,
        }
    }

    /// Returns the hook this event is dispatched under.
    pub fn name(&self) -> HookName {
        match self {
            Self::AfterRegister { kind, .. } => HookName::after_register(*kind),
            Self::RegisterError { kind, .. } => HookName::register_error(*kind),
            Self::BeforeRender(_) => HookName::BeforeRender,
            Self::ExtensionInitError { .. } => HookName::ExtensionInitError,
            Self::ToolbarCommand { .. } => HookName::ToolbarCommand,
            Self::ListenerError { .. } => HookName::ListenerError,
            Self::Custom { name, .. } => HookName::from(name.as_str()),
        }
    }
}
