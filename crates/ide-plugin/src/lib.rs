//! # ide-plugin
//!
//! Extension framework for the GraphQL IDE. Provides:
//!
//! - Hook bus with priority-ordered, fault-isolated listener dispatch
//! - Typed hook events for registration and lifecycle moments
//! - Extension registry for toolbar buttons and activity panels with
//!   deterministic (priority, registration order) read views

pub mod extension;
pub mod hooks;
pub mod registry;
pub mod traits;

pub use extension::{
    ActivityPanelConfig, ExtensionConfig, ExtensionEntry, ExtensionKind, ToolbarButtonConfig,
    ToolbarCommand,
};
pub use hooks::definitions::{HookEvent, HookName};
pub use hooks::dispatcher::HookBus;
pub use hooks::registry::HookRegistry;
pub use registry::ExtensionRegistry;
pub use traits::{ClosureListener, HookListener};

/// Priority used when a caller does not pick one. Lower runs first.
pub const DEFAULT_PRIORITY: i32 = 10;
