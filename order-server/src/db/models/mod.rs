//! Database models
//!
//! Entities persisted in SurrealDB. Record ids serialize as "table:key"
//! strings (see [`serde_helpers`]); cross-entity references are stored in
//! the same string form.

pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod restaurant;
pub mod serde_helpers;
pub mod user;

pub use dining_table::DiningTable;
pub use menu_item::MenuItem;
pub use order::{Order, OrderItem, StatusHistoryEntry, TAX_RATE};
pub use restaurant::{Restaurant, RestaurantSettings};
pub use user::User;
