//! Start-up sequence for one page load.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use ide_core::types::{AdminBarEntry, BootData};
use ide_plugin::HookEvent;
use ide_store::Action;

use crate::context::IdeContext;
use crate::loader::{ExtensionLoader, IdeExtension};

/// What the shell decided while booting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootReport {
    /// Extensions whose `init` succeeded, in load order.
    pub loaded_extensions: Vec<String>,
    /// Credential toggle restored from storage.
    pub is_authenticated: bool,
    /// Whether the IDE renders as a full page instead of a drawer.
    pub should_render_standalone: bool,
    /// Admin-bar control the host shows for this page.
    pub admin_bar_entry: AdminBarEntry,
}

/// Boots the IDE for a page.
///
/// 1. initialises `extensions` in order
/// 2. restores the authenticated toggle from client-local storage
/// 3. picks standalone or drawer rendering from the boot data
/// 4. fires `before_render` with the boot context
/// 5. latches `isInitialStateLoaded`
pub fn boot(
    context: &IdeContext,
    extensions: &[Arc<dyn IdeExtension>],
    data: &BootData,
) -> BootReport {
    let loader = ExtensionLoader::new(context.clone());
    loader.load_all(extensions);

    let store = context.store();
    store.dispatch(Action::SetAuthenticated {
        is_authenticated: context.auth().load(),
    });
    store.dispatch(Action::SetRenderStandalone {
        should_render_standalone: data.is_dedicated_ide_page,
    });

    context.fire(&HookEvent::BeforeRender(data.context.clone()));

    let state = store.dispatch(Action::SetInitialStateLoaded);

    let report = BootReport {
        loaded_extensions: loader.loaded(),
        is_authenticated: state.is_authenticated,
        should_render_standalone: state.should_render_standalone,
        admin_bar_entry: data.link_behavior.admin_bar_entry(data.is_dedicated_ide_page),
    };

    info!(
        extensions = report.loaded_extensions.len(),
        is_authenticated = report.is_authenticated,
        standalone = report.should_render_standalone,
        "IDE booted"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::builtin_extensions;
    use ide_core::types::LinkBehavior;
    use ide_plugin::HookName;
    use ide_store::{LocalStorage, MemoryStorage, persistence::AUTH_STORAGE_KEY};
    use parking_lot::Mutex;

    #[test]
    fn test_boot_sequence() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(AUTH_STORAGE_KEY, "false").unwrap();
        let context = IdeContext::new(storage);

        let observed = Arc::new(Mutex::new(None));
        let sink = observed.clone();
        let store = context.store().clone();
        context.on(HookName::BeforeRender, "observer", 10, move |event| {
            if let HookEvent::BeforeRender(boot) = event {
                let state = store.state();
                *sink.lock() = Some((
                    boot.drawer_button_label.clone(),
                    state.is_initial_state_loaded,
                    state.is_authenticated,
                ));
            }
            Ok(())
        });

        let data = BootData::from_json(
            r#"{
                "graphqlEndpoint": "https://example.test/graphql",
                "isDedicatedIdePage": true,
                "linkBehavior": "drawer",
                "context": { "drawerButtonLabel": "Query" }
            }"#,
        )
        .unwrap();

        let report = boot(&context, &builtin_extensions(), &data);

        assert_eq!(report.loaded_extensions.len(), 3);
        assert!(!report.is_authenticated);
        assert!(report.should_render_standalone);
        assert_eq!(report.admin_bar_entry, AdminBarEntry::PageLink);
        assert_eq!(data.link_behavior, LinkBehavior::Drawer);
        assert_eq!(
            *observed.lock(),
            Some(("Query".to_string(), false, false))
        );
        assert!(context.state().is_initial_state_loaded);
    }

    #[test]
    fn test_boot_defaults_to_authenticated_drawer() {
        let context = IdeContext::in_memory();
        let report = boot(&context, &[], &BootData::default());

        assert!(report.is_authenticated);
        assert!(!report.should_render_standalone);
        assert_eq!(report.admin_bar_entry, AdminBarEntry::DrawerToggle);
        assert!(report.loaded_extensions.is_empty());
    }
}
