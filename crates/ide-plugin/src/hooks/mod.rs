//! Hook system: listener registry, dispatcher, and typed event definitions.

pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use definitions::{HookEvent, HookName};
pub use dispatcher::HookBus;
pub use registry::HookRegistry;
