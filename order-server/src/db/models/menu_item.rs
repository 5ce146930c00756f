//! Menu Item Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::MenuCategory;
use surrealdb::RecordId;

/// Menu item entity (菜品)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Owning restaurant, "restaurant:key" form
    pub restaurant: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: MenuCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// AR asset for Android viewers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_glb: Option<String>,
    /// AR asset for iOS viewers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_usdz: Option<String>,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
    /// 0-5
    #[serde(default)]
    pub spice_level: i32,
    /// Minutes
    #[serde(default = "default_preparation_time")]
    pub preparation_time: i32,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_preparation_time() -> i32 {
    15
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|r| r.to_string()).unwrap_or_default()
    }
}
