//! Restaurant Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Per-restaurant settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSettings {
    /// Currency symbol shown to customers
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Prefix used by the order numbering service
    #[serde(default = "default_order_prefix")]
    pub order_prefix: String,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_order_prefix() -> String {
    "ORD".to_string()
}

impl Default for RestaurantSettings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            timezone: default_timezone(),
            order_prefix: default_order_prefix(),
        }
    }
}

/// Restaurant entity — the tenant root (租户)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    /// URL-safe identifier derived from the name
    pub slug: String,
    pub subdomain: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Superadmin who provisioned this restaurant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub settings: RestaurantSettings,
    /// Epoch milliseconds
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

impl Restaurant {
    /// Derive a URL-safe slug from a display name
    ///
    /// Lowercases, strips everything but word characters/spaces/hyphens,
    /// collapses whitespace and repeated hyphens.
    pub fn generate_slug(name: &str) -> String {
        let lowered = name.to_lowercase();
        let mut slug = String::with_capacity(lowered.len());
        let mut last_was_hyphen = false;
        for c in lowered.chars() {
            if c.is_alphanumeric() || c == '_' {
                slug.push(c);
                last_was_hyphen = false;
            } else if (c.is_whitespace() || c == '-') && !last_was_hyphen && !slug.is_empty() {
                slug.push('-');
                last_was_hyphen = true;
            }
        }
        slug.trim_end_matches('-').to_string()
    }

    /// "restaurant:key" form of the id, empty before persistence
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|r| r.to_string()).unwrap_or_default()
    }
}
