use aggregate_fetch::RestResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

id_type!(
    /// Identifier of a [`SiteSettings`] record.
    SettingsId
);

/// The banner at the top of the landing page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hero {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub button_link: Option<String>,
}

/// The "about us" section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct About {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// One card of the "what we do" grid, also used for service teasers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Highlight {
    #[serde(default)]
    pub id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Contact details and links shown in the footer and navbar.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SiteSettings {
    #[serde(default)]
    pub id: Option<SettingsId>,
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub social_links: BTreeMap<String, String>,
}

/// Payload for creating or editing the site settings. Unset fields are left
/// out of the request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsUpsert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<BTreeMap<String, String>>,
}

impl RestResource for SiteSettings {
    type Id = SettingsId;
    type Create = SettingsUpsert;
    type Update = SettingsUpsert;
    const PATH: &'static str = "site-settings";
}
