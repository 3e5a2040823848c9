//! Extension registry: named, prioritized contributions per kind.
//!
//! Registration never fails past the caller. Success fires
//! `after_register_<kind>`; failure is logged and fires
//! `<kind>_register_error` with the rejected contribution and the error.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{error, info};

use ide_core::error::AppError;

use crate::extension::{
    ActivityPanelConfig, ExtensionConfig, ExtensionEntry, ExtensionKind, ToolbarButtonConfig,
};
use crate::hooks::definitions::HookEvent;
use crate::hooks::dispatcher::HookBus;

/// Registry of toolbar buttons and activity panels.
///
/// Entries are stored per kind in registration order. Re-registering a
/// name replaces its config and priority in place, keeping its original
/// position for tie-breaking.
#[derive(Debug)]
pub struct ExtensionRegistry {
    /// Kind → entries in registration order.
    entries: RwLock<HashMap<ExtensionKind, Vec<ExtensionEntry>>>,
    /// Bus notified about registration outcomes.
    hooks: Arc<HookBus>,
}

impl ExtensionRegistry {
    /// Creates an empty registry reporting to `hooks`.
    pub fn new(hooks: Arc<HookBus>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hooks,
        }
    }

    /// Registers a contribution of `kind`.
    pub fn register(&self, kind: ExtensionKind, name: &str, config: ExtensionConfig, priority: i32) {
        match self.try_register(kind, name, &config, priority) {
            Ok(()) => {
                info!(kind = %kind, name = %name, priority = priority, "Extension registered");
                self.hooks.dispatch(&HookEvent::AfterRegister {
                    kind,
                    name: name.to_string(),
                    config,
                    priority,
                });
            }
            Err(err) => {
                error!(kind = %kind, name = %name, error = %err, "Failed to register extension");
                self.hooks.dispatch(&HookEvent::RegisterError {
                    kind,
                    name: name.to_string(),
                    config,
                    priority,
                    error: err,
                });
            }
        }
    }

    /// Registers a toolbar button.
    pub fn register_button(&self, name: &str, config: ToolbarButtonConfig, priority: i32) {
        self.register(ExtensionKind::ToolbarButton, name, config.into(), priority);
    }

    /// Registers an activity panel.
    pub fn register_panel(&self, name: &str, config: ActivityPanelConfig, priority: i32) {
        self.register(ExtensionKind::ActivityPanel, name, config.into(), priority);
    }

    fn try_register(
        &self,
        kind: ExtensionKind,
        name: &str,
        config: &ExtensionConfig,
        priority: i32,
    ) -> Result<(), AppError> {
        if name.trim().is_empty() {
            return Err(AppError::validation(format!("A {kind} needs a name")));
        }
        if config.kind() != kind {
            return Err(AppError::validation(format!(
                "Config for '{name}' describes a {} but was registered as a {kind}",
                config.kind()
            )));
        }
        config.validate()?;

        let mut entries = self.entries.write();
        let list = entries.entry(kind).or_default();

        match list.iter_mut().find(|e| e.name == name) {
            Some(existing) => {
                existing.config = config.clone();
                existing.priority = priority;
            }
            None => list.push(ExtensionEntry {
                name: name.to_string(),
                config: config.clone(),
                priority,
            }),
        }

        Ok(())
    }

    /// Removes a contribution, returning it if it existed.
    pub fn unregister(&self, kind: ExtensionKind, name: &str) -> Option<ExtensionEntry> {
        let mut entries = self.entries.write();
        let list = entries.get_mut(&kind)?;
        let index = list.iter().position(|e| e.name == name)?;
        let removed = list.remove(index);

        info!(kind = %kind, name = %name, "Extension unregistered");

        Some(removed)
    }

    /// Returns whether a contribution is registered.
    pub fn has(&self, kind: ExtensionKind, name: &str) -> bool {
        let entries = self.entries.read();
        entries
            .get(&kind)
            .map(|list| list.iter().any(|e| e.name == name))
            .unwrap_or(false)
    }

    /// Gets a contribution by key.
    pub fn get(&self, kind: ExtensionKind, name: &str) -> Option<ExtensionEntry> {
        let entries = self.entries.read();
        entries
            .get(&kind)
            .and_then(|list| list.iter().find(|e| e.name == name).cloned())
    }

    /// Returns entries ordered by priority, then registration order.
    ///
    /// Recomputed on every call.
    pub fn sorted_entries(&self, kind: ExtensionKind) -> Vec<ExtensionEntry> {
        let mut list = {
            let entries = self.entries.read();
            entries.get(&kind).cloned().unwrap_or_default()
        };
        list.sort_by_key(|e| e.priority);
        list
    }

    /// Returns configs ordered by priority, then registration order.
    pub fn sorted(&self, kind: ExtensionKind) -> Vec<ExtensionConfig> {
        self.sorted_entries(kind)
            .into_iter()
            .map(|e| e.config)
            .collect()
    }

    /// Returns the number of contributions of a kind.
    pub fn count(&self, kind: ExtensionKind) -> usize {
        let entries = self.entries.read();
        entries.get(&kind).map(Vec::len).unwrap_or(0)
    }

    /// Returns the bus this registry reports to.
    pub fn hooks(&self) -> &Arc<HookBus> {
        &self.hooks
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::extension::ToolbarCommand;
    use crate::hooks::definitions::HookName;

    fn registry() -> ExtensionRegistry {
        ExtensionRegistry::new(Arc::new(HookBus::new()))
    }

    fn button(label: &str) -> ToolbarButtonConfig {
        ToolbarButtonConfig::new(label, ToolbarCommand::Custom(label.to_lowercase()))
    }

    fn labels(registry: &ExtensionRegistry) -> Vec<String> {
        registry
            .sorted(ExtensionKind::ToolbarButton)
            .iter()
            .filter_map(|c| c.as_toolbar_button().map(|b| b.label.clone()))
            .collect()
    }

    #[test]
    fn test_sorted_by_priority_then_registration() {
        let registry = registry();
        registry.register_button("c", button("C"), 20);
        registry.register_button("a", button("A"), 10);
        registry.register_button("z", button("Z"), 5);
        registry.register_button("b", button("B"), 10);

        assert_eq!(labels(&registry), vec!["Z", "A", "B", "C"]);
    }

    #[test]
    fn test_reregister_overwrites_in_place() {
        let registry = registry();
        registry.register_button("a", button("A"), 10);
        registry.register_button("b", button("B"), 10);
        registry.register_button("a", button("A2"), 10);

        assert_eq!(registry.count(ExtensionKind::ToolbarButton), 2);
        assert_eq!(labels(&registry), vec!["A2", "B"]);

        registry.register_button("a", button("A3"), 50);
        assert_eq!(labels(&registry), vec!["B", "A3"]);
        assert_eq!(registry.get(ExtensionKind::ToolbarButton, "a").unwrap().priority, 50);
    }

    #[test]
    fn test_names_are_unique_per_kind() {
        let registry = registry();
        registry.register_button("help", button("Help"), 10);
        registry.register_panel("help", ActivityPanelConfig::new("Help"), 10);

        assert!(registry.has(ExtensionKind::ToolbarButton, "help"));
        assert!(registry.has(ExtensionKind::ActivityPanel, "help"));
        assert_eq!(registry.count(ExtensionKind::ToolbarButton), 1);
    }

    #[test]
    fn test_success_fires_after_register() {
        let hooks = Arc::new(HookBus::new());
        let registry = ExtensionRegistry::new(hooks.clone());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        hooks.on(HookName::AfterRegisterToolbarButton, "test", 10, move |event| {
            if let HookEvent::AfterRegister { name, priority, .. } = event {
                sink.lock().push((name.clone(), *priority));
            }
            Ok(())
        });

        registry.register_button("copy", button("Copy"), 3);

        assert_eq!(*seen.lock(), vec![("copy".to_string(), 3)]);
    }

    type Rejection = (String, ExtensionConfig, i32, ide_core::error::ErrorKind);

    fn record_rejections(hooks: &HookBus, hook: HookName) -> Arc<Mutex<Vec<Rejection>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        hooks.on(hook, "test", 10, move |event| {
            if let HookEvent::RegisterError {
                name,
                config,
                priority,
                error,
                ..
            } = event
            {
                sink.lock()
                    .push((name.clone(), config.clone(), *priority, error.kind));
            }
            Ok(())
        });
        seen
    }

    #[test]
    fn test_invalid_config_fires_register_error() {
        let hooks = Arc::new(HookBus::new());
        let registry = ExtensionRegistry::new(hooks.clone());
        let seen = record_rejections(&hooks, HookName::ToolbarButtonRegisterError);

        registry.register_button("blank", button(""), 7);

        assert!(!registry.has(ExtensionKind::ToolbarButton, "blank"));
        assert_eq!(
            *seen.lock(),
            vec![(
                "blank".to_string(),
                ExtensionConfig::from(button("")),
                7,
                ide_core::error::ErrorKind::Validation,
            )]
        );
    }

    #[test]
    fn test_invalid_panel_fires_panel_register_error() {
        let hooks = Arc::new(HookBus::new());
        let registry = ExtensionRegistry::new(hooks.clone());
        let panel_errors = record_rejections(&hooks, HookName::ActivityPanelRegisterError);
        let button_errors = record_rejections(&hooks, HookName::ToolbarButtonRegisterError);

        let panel = ActivityPanelConfig::new("  ").with_icon("explorer");
        registry.register_panel("untitled", panel.clone(), 42);

        assert!(!registry.has(ExtensionKind::ActivityPanel, "untitled"));
        assert_eq!(
            *panel_errors.lock(),
            vec![(
                "untitled".to_string(),
                ExtensionConfig::from(panel),
                42,
                ide_core::error::ErrorKind::Validation,
            )]
        );
        assert!(button_errors.lock().is_empty());
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let registry = registry();
        registry.register(
            ExtensionKind::ActivityPanel,
            "oops",
            button("Oops").into(),
            10,
        );

        assert!(!registry.has(ExtensionKind::ActivityPanel, "oops"));
        assert!(!registry.has(ExtensionKind::ToolbarButton, "oops"));
    }

    #[test]
    fn test_unregister_removes_by_key() {
        let registry = registry();
        registry.register_panel("help", ActivityPanelConfig::new("Help"), 10);

        let removed = registry.unregister(ExtensionKind::ActivityPanel, "help").unwrap();
        assert_eq!(removed.name, "help");
        assert!(!registry.has(ExtensionKind::ActivityPanel, "help"));
        assert!(registry.unregister(ExtensionKind::ActivityPanel, "help").is_none());
    }
}
