//! Request DTOs shared between the server and its clients

use crate::menu::MenuCategory;
use crate::order::OrderStatus;
use crate::table::{TableLocation, TableStatus};
use serde::Deserialize;
use validator::Validate;

/// Password login (staff/admin/superadmin)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Provision a restaurant together with its admin account
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RestaurantCreate {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 63))]
    pub subdomain: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1))]
    pub admin_username: String,
    #[validate(length(min = 8))]
    pub admin_password: String,
    #[validate(length(min = 1))]
    pub admin_name: String,
}

/// Update restaurant metadata and settings
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RestaurantUpdate {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 63))]
    pub subdomain: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub currency: Option<String>,
    pub timezone: Option<String>,
    pub order_prefix: Option<String>,
}

/// Create a table
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TableCreate {
    #[validate(length(min = 1, max = 16))]
    pub table_number: String,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub location: TableLocation,
    #[serde(default)]
    pub notes: String,
}

/// Update a table
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TableUpdate {
    #[validate(length(min = 1, max = 16))]
    pub table_number: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    pub location: Option<TableLocation>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

/// Manual table status override
#[derive(Debug, Clone, Deserialize)]
pub struct TableStatusUpdate {
    pub status: TableStatus,
}

/// Create a menu item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub category: MenuCategory,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub model_glb: Option<String>,
    #[serde(default)]
    pub model_usdz: Option<String>,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub is_gluten_free: bool,
    #[validate(range(min = 0, max = 5))]
    #[serde(default)]
    pub spice_level: i32,
    #[validate(range(min = 0))]
    #[serde(default = "default_preparation_time")]
    pub preparation_time: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_preparation_time() -> i32 {
    15
}

/// Update a menu item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub category: Option<MenuCategory>,
    pub image: Option<String>,
    pub model_glb: Option<String>,
    pub model_usdz: Option<String>,
    pub is_vegetarian: Option<bool>,
    pub is_vegan: Option<bool>,
    pub is_gluten_free: Option<bool>,
    #[validate(range(min = 0, max = 5))]
    pub spice_level: Option<i32>,
    #[validate(range(min = 0))]
    pub preparation_time: Option<i32>,
    pub is_available: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub allergens: Option<Vec<String>>,
    pub sort_order: Option<i32>,
}

/// Create a staff account
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StaffCreate {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Update a staff account
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StaffUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: Option<bool>,
}

/// Drive the order status workflow
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Filters for the staff order list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListQuery {
    /// Filter by status; absent or "all" means every status
    pub status: Option<String>,
    /// Filter by table id
    pub table: Option<String>,
    /// Include orders from all days, not just today
    #[serde(default)]
    pub all_days: bool,
}

/// Bind a browsing session to a restaurant and table
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SessionEnterRequest {
    #[validate(length(min = 1))]
    pub restaurant_slug: String,
    #[validate(length(min = 1))]
    pub table_number: String,
}

/// Add a menu item to the session cart
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CartAddRequest {
    #[validate(length(min = 1))]
    pub menu_item_id: String,
    #[validate(range(min = 1))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub notes: String,
}

fn default_quantity() -> i32 {
    1
}

/// Change the quantity of a cart line; zero or below removes it
#[derive(Debug, Clone, Deserialize)]
pub struct CartUpdateRequest {
    pub quantity: i32,
}

/// Place the order from the session cart
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 1))]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
}
