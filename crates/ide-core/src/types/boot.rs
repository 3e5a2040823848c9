//! Boot data constructed by the host and consumed read-only by the shell.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Host-provided context describing the running IDE.
///
/// Delivered to extensions with the pre-render hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootContext {
    /// Version of the IDE package.
    #[serde(default)]
    pub plugin_version: Option<String>,
    /// Display name of the IDE package.
    #[serde(default)]
    pub plugin_name: Option<String>,
    /// Query fragments supplied by third parties.
    #[serde(default)]
    pub external_fragments: Vec<String>,
    /// Avatar of the current viewer; empty when nobody is logged in.
    #[serde(default)]
    pub avatar_url: String,
    /// Label of the control that opens the IDE.
    #[serde(default = "default_drawer_button_label")]
    pub drawer_button_label: String,
}

impl Default for BootContext {
    fn default() -> Self {
        Self {
            plugin_version: None,
            plugin_name: None,
            external_fragments: Vec::new(),
            avatar_url: String::new(),
            drawer_button_label: default_drawer_button_label(),
        }
    }
}

fn default_drawer_button_label() -> String {
    "GraphQL IDE".to_string()
}

/// Everything the host hands over before the editor mounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootData {
    /// GraphQL endpoint URL.
    #[serde(default)]
    pub graphql_endpoint: Option<String>,
    /// DOM id the editor mounts into.
    #[serde(default)]
    pub root_element_id: Option<String>,
    /// Resolved boot context.
    #[serde(default)]
    pub context: BootContext,
    /// Whether the editor lives on its own page rather than in the drawer.
    #[serde(default)]
    pub is_dedicated_ide_page: bool,
    /// URL of the dedicated IDE page.
    #[serde(default)]
    pub dedicated_ide_base_url: Option<String>,
    /// Sitewide admin-bar link setting.
    #[serde(default, deserialize_with = "deserialize_link_behavior")]
    pub link_behavior: LinkBehavior,
}

fn deserialize_link_behavior<'de, D>(deserializer: D) -> Result<LinkBehavior, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(LinkBehavior::sanitize(&raw))
}

impl BootData {
    /// Parses boot data from its JSON form.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// How the host's admin-bar entry opens the IDE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkBehavior {
    /// Slide-up drawer available on every page.
    #[default]
    Drawer,
    /// Direct link to the dedicated IDE page.
    DedicatedPage,
    /// No admin-bar entry.
    Disabled,
}

impl LinkBehavior {
    /// Sanitizes a stored setting value. Unknown values fall back to `Drawer`.
    pub fn sanitize(value: &str) -> Self {
        match value {
            "drawer" => Self::Drawer,
            "dedicated_page" => Self::DedicatedPage,
            "disabled" => Self::Disabled,
            _ => Self::Drawer,
        }
    }

    /// Returns the stored setting value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drawer => "drawer",
            Self::DedicatedPage => "dedicated_page",
            Self::Disabled => "disabled",
        }
    }

    /// Resolves which admin-bar entry the host shows on the current page.
    ///
    /// The drawer toggle is never shown on the dedicated page itself.
    pub fn admin_bar_entry(&self, is_dedicated_ide_page: bool) -> AdminBarEntry {
        match self {
            Self::Drawer if !is_dedicated_ide_page => AdminBarEntry::DrawerToggle,
            Self::Disabled => AdminBarEntry::Hidden,
            _ => AdminBarEntry::PageLink,
        }
    }
}

/// Admin-bar control resolved from [`LinkBehavior`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminBarEntry {
    /// Button that opens the drawer in place.
    DrawerToggle,
    /// Link to the dedicated IDE page.
    PageLink,
    /// Nothing is shown.
    Hidden,
}

impl std::fmt::Display for LinkBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_data_from_host_json() {
        let raw = r#"{
            "graphqlEndpoint": "https://example.test/index.php?graphql",
            "rootElementId": "wpgraphql-ide-root",
            "context": {
                "pluginVersion": "2.1.2",
                "pluginName": "WPGraphQL IDE",
                "externalFragments": ["fragment A on Post { id }"],
                "avatarUrl": "https://example.test/avatar.png",
                "drawerButtonLabel": "GraphQL IDE"
            },
            "isDedicatedIdePage": true,
            "dedicatedIdeBaseUrl": "https://example.test/wp-admin/admin.php?page=graphql-ide"
        }"#;

        let data = BootData::from_json(raw).unwrap();
        assert!(data.is_dedicated_ide_page);
        assert_eq!(data.context.plugin_version.as_deref(), Some("2.1.2"));
        assert_eq!(data.context.external_fragments.len(), 1);
    }

    #[test]
    fn test_boot_data_defaults() {
        let data = BootData::from_json("{}").unwrap();
        assert!(!data.is_dedicated_ide_page);
        assert_eq!(data.context.drawer_button_label, "GraphQL IDE");
        assert!(data.context.avatar_url.is_empty());
    }

    #[test]
    fn test_link_behavior_sanitize() {
        assert_eq!(LinkBehavior::sanitize("dedicated_page"), LinkBehavior::DedicatedPage);
        assert_eq!(LinkBehavior::sanitize("disabled"), LinkBehavior::Disabled);
        assert_eq!(LinkBehavior::sanitize("popup"), LinkBehavior::Drawer);
        assert_eq!(LinkBehavior::sanitize(""), LinkBehavior::Drawer);
    }

    #[test]
    fn test_unknown_link_behavior_in_boot_data() {
        let data = BootData::from_json(r#"{"linkBehavior": "sideways"}"#).unwrap();
        assert_eq!(data.link_behavior, LinkBehavior::Drawer);
    }

    #[test]
    fn test_admin_bar_entry() {
        assert_eq!(LinkBehavior::Drawer.admin_bar_entry(false), AdminBarEntry::DrawerToggle);
        assert_eq!(LinkBehavior::Drawer.admin_bar_entry(true), AdminBarEntry::PageLink);
        assert_eq!(LinkBehavior::DedicatedPage.admin_bar_entry(false), AdminBarEntry::PageLink);
        assert_eq!(LinkBehavior::Disabled.admin_bar_entry(false), AdminBarEntry::Hidden);
    }
}
