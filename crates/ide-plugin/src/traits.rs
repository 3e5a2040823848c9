//! Listener traits for hook subscribers.

use std::sync::Arc;

use ide_core::result::AppResult;

use crate::hooks::definitions::HookEvent;

/// A subscriber to hook events.
///
/// Returning an error (or panicking) does not stop delivery to the
/// remaining listeners; the failure is reported as a `listener_error` event.
pub trait HookListener: Send + Sync + std::fmt::Debug {
    /// Identifier used in logs and failure reports.
    fn listener_id(&self) -> &str;

    /// Handles one event.
    fn handle(&self, event: &HookEvent) -> AppResult<()>;
}

/// A closure-based listener for quick subscriptions.
pub struct ClosureListener {
    /// Listener id.
    id: String,
    /// Handler function.
    handler: Arc<dyn Fn(&HookEvent) -> AppResult<()> + Send + Sync>,
}

impl std::fmt::Debug for ClosureListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureListener")
            .field("id", &self.id)
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ClosureListener {
    /// Creates a new closure-based listener.
    pub fn new<F>(listener_id: &str, handler: F) -> Self
    where
        F: Fn(&HookEvent) -> AppResult<()> + Send + Sync + 'static,
    {
        Self {
            id: listener_id.to_string(),
            handler: Arc::new(handler),
        }
    }

    /// Wraps a closure into an `Arc<dyn HookListener>`.
    pub fn wrap<F>(listener_id: &str, handler: F) -> Arc<dyn HookListener>
    where
        F: Fn(&HookEvent) -> AppResult<()> + Send + Sync + 'static,
    {
        Arc::new(Self::new(listener_id, handler))
    }
}

impl HookListener for ClosureListener {
    fn listener_id(&self) -> &str {
        &self.id
    }

    fn handle(&self, event: &HookEvent) -> AppResult<()> {
        (self.handler)(event)
    }
}
