//! User Model
//!
//! One entity for all four roles. Customers carry a phone and no password
//! hash; the other roles carry a hash and authenticate by password.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::Role;
use surrealdb::RecordId;

/// User entity (员工/顾客)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub username: String,
    /// Argon2 PHC string; always None for customers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    /// Tenant binding, "restaurant:key" form; None only for superadmin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Epoch milliseconds of the last successful login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|r| r.to_string()).unwrap_or_default()
    }

    /// Customer display name derived from a phone number
    pub fn customer_display_name(phone: &str) -> String {
        let last4 = if phone.len() > 4 {
            &phone[phone.len() - 4..]
        } else {
            phone
        };
        format!("Customer {}", last4)
    }

    /// Customer username derived from a phone number
    pub fn customer_username(phone: &str) -> String {
        format!("customer_{}", phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_naming() {
        assert_eq!(User::customer_display_name("5551234567"), "Customer 4567");
        assert_eq!(User::customer_display_name("123"), "Customer 123");
        assert_eq!(User::customer_username("5551234567"), "customer_5551234567");
    }
}
