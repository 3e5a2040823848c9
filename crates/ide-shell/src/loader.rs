//! Extension loader: initialises extensions against a context.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, info};

use ide_core::error::AppError;
use ide_core::result::AppResult;
use ide_plugin::HookEvent;

use crate::context::IdeContext;

/// A unit of third-party (or built-in) functionality.
///
/// `init` runs once, with the session context, and typically registers
/// toolbar buttons, activity panels and hook listeners.
pub trait IdeExtension: Send + Sync + std::fmt::Debug {
    /// Unique extension name.
    fn name(&self) -> &str;

    /// Registers the extension's contributions.
    fn init(&self, context: &IdeContext) -> AppResult<()>;
}

/// Initialises extensions in order, isolating their failures.
#[derive(Debug)]
pub struct ExtensionLoader {
    /// Session context.
    context: IdeContext,
    /// Names of extensions whose `init` succeeded.
    loaded: RwLock<Vec<String>>,
}

impl ExtensionLoader {
    /// Creates a loader for `context`.
    pub fn new(context: IdeContext) -> Self {
        Self {
            context,
            loaded: RwLock::new(Vec::new()),
        }
    }

    /// Initialises one extension.
    ///
    /// A failing or panicking `init` is logged and reported through an
    /// `extension_init_error` event; contributions it made before failing
    /// stay registered.
    pub fn load(&self, extension: &dyn IdeExtension) -> bool {
        let name = extension.name().to_string();

        let result = match catch_unwind(AssertUnwindSafe(|| extension.init(&self.context))) {
            Ok(result) => result,
            Err(_) => Err(AppError::extension(format!(
                "Extension '{name}' panicked during init"
            ))),
        };

        match result {
            Ok(()) => {
                info!(extension = %name, "Extension loaded");
                self.loaded.write().push(name);
                true
            }
            Err(e) => {
                error!(extension = %name, error = %e, "Extension init failed");
                self.context.fire(&HookEvent::ExtensionInitError {
                    extension: name,
                    error: e,
                });
                false
            }
        }
    }

    /// Initialises every extension, in order. Returns how many succeeded.
    pub fn load_all(&self, extensions: &[Arc<dyn IdeExtension>]) -> usize {
        let loaded = extensions
            .iter()
            .filter(|extension| self.load(extension.as_ref()))
            .count();

        info!(
            loaded = loaded,
            failed = extensions.len() - loaded,
            "Extensions initialised"
        );
        loaded
    }

    /// Names of the extensions loaded so far.
    pub fn loaded(&self) -> Vec<String> {
        self.loaded.read().clone()
    }

    /// Returns the context extensions are loaded into.
    pub fn context(&self) -> &IdeContext {
        &self.context
    }
}
