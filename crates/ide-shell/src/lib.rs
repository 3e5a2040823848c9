//! # ide-shell
//!
//! Wires the IDE crates into a running session:
//!
//! - [`IdeContext`] owns the hook bus, extension registry and store, and is
//!   passed explicitly to every extension
//! - [`ExtensionLoader`] initialises extensions, built-in ones included
//! - [`boot`] runs the start-up sequence for a page
//! - [`Session`] executes operations and toolbar commands

pub mod boot;
pub mod builtins;
pub mod commands;
pub mod context;
pub mod loader;
pub mod session;

pub use boot::{BootReport, boot};
pub use builtins::builtin_extensions;
pub use commands::CommandOutcome;
pub use context::IdeContext;
pub use loader::{ExtensionLoader, IdeExtension};
pub use session::Session;
