//! Dining Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::{TableLocation, TableStatus};
use surrealdb::RecordId;

/// Dining table entity (桌台)
///
/// Invariant: at most one non-terminal order may be referenced by
/// `current_order` at any time; the order workflow maintains it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Owning restaurant, "restaurant:key" form
    pub restaurant: String,
    /// Unique within the restaurant
    pub table_number: String,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
    #[serde(default)]
    pub location: TableLocation,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Presently active order, "order:key" form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_order: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_capacity() -> i32 {
    4
}

fn default_true() -> bool {
    true
}

impl DiningTable {
    /// Canonical QR payload for this table
    ///
    /// Consumed by an external QR-image generator.
    pub fn qr_url(&self, base_url: &str, restaurant_slug: &str) -> String {
        format!(
            "{}/r/{}/table/{}",
            base_url.trim_end_matches('/'),
            restaurant_slug,
            self.table_number
        )
    }

    /// Whether the table can take a new party
    pub fn is_available(&self) -> bool {
        self.status == TableStatus::Available && self.is_active
    }

    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|r| r.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::now_millis;

    fn table(number: &str) -> DiningTable {
        DiningTable {
            id: None,
            restaurant: "restaurant:r1".to_string(),
            table_number: number.to_string(),
            capacity: 4,
            location: TableLocation::Indoor,
            status: TableStatus::Available,
            is_active: true,
            current_order: None,
            notes: String::new(),
            created_at: now_millis(),
            updated_at: now_millis(),
        }
    }

    #[test]
    fn test_qr_url_format() {
        let t = table("5");
        assert_eq!(
            t.qr_url("http://localhost:3000", "golden-dragon"),
            "http://localhost:3000/r/golden-dragon/table/5"
        );
        // Trailing slash on the base URL must not double up
        assert_eq!(
            t.qr_url("https://tabletap.example/", "golden-dragon"),
            "https://tabletap.example/r/golden-dragon/table/5"
        );
    }

    #[test]
    fn test_availability() {
        let mut t = table("5");
        assert!(t.is_available());
        t.status = TableStatus::Occupied;
        assert!(!t.is_available());
        t.status = TableStatus::Available;
        t.is_active = false;
        assert!(!t.is_available());
    }
}
