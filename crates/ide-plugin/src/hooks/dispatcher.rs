//! Hook bus: synchronous, priority-ordered delivery with per-listener
//! fault isolation.
//!
//! - Listeners run in ascending priority, ties in subscription order.
//! - A listener that returns an error or panics does not stop delivery to
//!   the remaining listeners.
//! - Each failure is logged and re-dispatched as a `listener_error` event
//!   carrying the original event. Failures while delivering a
//!   `listener_error` event are only logged.
//! - Nothing is aggregated from listeners; dispatch is fire-and-forget.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::{debug, error};

use ide_core::error::AppError;
use ide_core::result::AppResult;

use super::definitions::{HookEvent, HookName};
use super::registry::HookRegistry;
use crate::traits::{ClosureListener, HookListener};

/// Dispatches hook events to subscribed listeners.
#[derive(Debug, Default)]
pub struct HookBus {
    /// Listener registry.
    registry: Arc<HookRegistry>,
}

impl HookBus {
    /// Creates a bus with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bus over an existing registry.
    pub fn with_registry(registry: Arc<HookRegistry>) -> Self {
        Self { registry }
    }

    /// Subscribes a listener to `hook`.
    pub fn subscribe(
        &self,
        hook: impl Into<HookName>,
        priority: i32,
        listener: Arc<dyn HookListener>,
    ) {
        self.registry.subscribe(&hook.into(), listener, priority);
    }

    /// Subscribes a closure to `hook`.
    pub fn on<F>(&self, hook: impl Into<HookName>, listener_id: &str, priority: i32, handler: F)
    where
        F: Fn(&HookEvent) -> AppResult<()> + Send + Sync + 'static,
    {
        self.subscribe(hook, priority, ClosureListener::wrap(listener_id, handler));
    }

    /// Delivers `event` to every listener of its hook.
    pub fn dispatch(&self, event: &HookEvent) {
        let hook = event.name();
        let listeners = self.registry.listeners(&hook);

        if listeners.is_empty() {
            return;
        }

        debug!(
            hook = %hook,
            listener_count = listeners.len(),
            "Dispatching hook"
        );

        for listener in &listeners {
            let error = match catch_unwind(AssertUnwindSafe(|| listener.handle(event))) {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e,
                Err(panic) => AppError::extension(format!(
                    "Listener panicked: {}",
                    panic_message(panic.as_ref())
                )),
            };

            error!(
                hook = %hook,
                listener_id = %listener.listener_id(),
                error = %error,
                "Hook listener failed"
            );

            if hook == HookName::ListenerError {
                continue;
            }

            self.dispatch(&HookEvent::ListenerError {
                event: hook.to_string(),
                payload: Box::new(event.clone()),
                listener: listener.listener_id().to_string(),
                error,
            });
        }
    }

    /// Returns a reference to the listener registry.
    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
