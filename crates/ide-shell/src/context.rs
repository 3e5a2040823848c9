//! The IDE context: services available to extensions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use ide_core::error::AppError;
use ide_core::result::AppResult;
use ide_plugin::{
    ActivityPanelConfig, ExtensionRegistry, HookBus, HookEvent, HookName, ToolbarButtonConfig,
};
use ide_store::{Action, AuthPreference, EditorState, LocalStorage, MemoryStorage, Store};

/// Listener id of the panel-to-store mirror.
const PANEL_MIRROR_LISTENER: &str = "ide-shell:panel-mirror";

/// Everything an extension may touch.
///
/// Built once per session and handed to extensions by reference. Panel
/// registrations are mirrored into the store as `RegisterExtension`
/// actions, and every change of the authenticated toggle is written to
/// client-local storage.
#[derive(Clone)]
pub struct IdeContext {
    /// Hook bus.
    hooks: Arc<HookBus>,
    /// Toolbar buttons and activity panels.
    extensions: Arc<ExtensionRegistry>,
    /// Editor state.
    store: Arc<Store>,
    /// Persisted authenticated/public toggle.
    auth: AuthPreference,
}

impl std::fmt::Debug for IdeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdeContext")
            .field("extensions", &self.extensions)
            .field("store", &self.store)
            .finish()
    }
}

impl IdeContext {
    /// Creates a context whose preferences live in `storage`.
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        let hooks = Arc::new(HookBus::new());
        let extensions = Arc::new(ExtensionRegistry::new(hooks.clone()));
        let store = Arc::new(Store::new());
        let auth = AuthPreference::new(storage);

        let context = Self {
            hooks,
            extensions,
            store,
            auth,
        };
        context.mirror_panels();
        context.persist_auth();
        context
    }

    /// Creates a context with in-memory preferences.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Returns the hook bus.
    pub fn hooks(&self) -> &Arc<HookBus> {
        &self.hooks
    }

    /// Returns the extension registry.
    pub fn extensions(&self) -> &Arc<ExtensionRegistry> {
        &self.extensions
    }

    /// Returns the store.
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Returns the persisted auth preference.
    pub fn auth(&self) -> &AuthPreference {
        &self.auth
    }

    /// Returns the current editor state.
    pub fn state(&self) -> Arc<EditorState> {
        self.store.state()
    }

    /// Registers a toolbar button.
    pub fn register_button(&self, name: &str, config: ToolbarButtonConfig, priority: i32) {
        self.extensions.register_button(name, config, priority);
    }

    /// Registers an activity panel.
    pub fn register_panel(&self, name: &str, config: ActivityPanelConfig, priority: i32) {
        self.extensions.register_panel(name, config, priority);
    }

    /// Subscribes a closure to `hook`.
    pub fn on<F>(&self, hook: impl Into<HookName>, listener_id: &str, priority: i32, handler: F)
    where
        F: Fn(&HookEvent) -> AppResult<()> + Send + Sync + 'static,
    {
        self.hooks.on(hook, listener_id, priority, handler);
    }

    /// Fires a hook event.
    pub fn fire(&self, event: &HookEvent) {
        self.hooks.dispatch(event);
    }

    fn mirror_panels(&self) {
        let store = self.store.clone();
        self.hooks.on(
            HookName::AfterRegisterActivityPanel,
            PANEL_MIRROR_LISTENER,
            i32::MIN,
            move |event| {
                let HookEvent::AfterRegister { name, config, .. } = event else {
                    return Ok(());
                };
                let panel = config.as_activity_panel().ok_or_else(|| {
                    AppError::internal(format!("Panel '{name}' registered with a non-panel config"))
                })?;
                store.dispatch(Action::RegisterExtension {
                    name: name.clone(),
                    config: serde_json::to_value(panel)?,
                });
                Ok(())
            },
        );
    }

    fn persist_auth(&self) {
        let auth = self.auth.clone();
        let last = AtomicBool::new(self.store.state().is_authenticated);
        self.store.subscribe(move |state| {
            if last.swap(state.is_authenticated, Ordering::SeqCst) == state.is_authenticated {
                return;
            }
            if let Err(e) = auth.save(state.is_authenticated) {
                warn!(error = %e, "Failed to persist auth preference");
            }
        });
    }
}
