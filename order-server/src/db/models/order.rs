//! Order Model
//!
//! The durable aggregate created from a cart at checkout. Totals are never
//! trusted from the wire: every persist path calls [`Order::recompute_totals`]
//! first.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::{OrderStatus, PaymentMethod, PaymentStatus};
use surrealdb::RecordId;

/// Flat platform tax rate applied to every order subtotal.
// TODO: wire per-restaurant tax from settings once product decides whether
// the flat rate is intentional.
pub const TAX_RATE: f64 = 0.10;

/// One line within an order, with price captured at order time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Menu item reference, "menu_item:key" form
    pub menu_item: String,
    /// Name snapshot at order time
    pub name: String,
    /// Price snapshot at order time
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub notes: String,
    /// price * quantity, recomputed on every persist
    #[serde(default)]
    pub subtotal: f64,
}

/// Append-only status history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: OrderStatus,
    /// Epoch milliseconds
    pub timestamp: i64,
    /// Acting user, "user:key" form; None for the initial system entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// Order entity (订单)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Owning restaurant, "restaurant:key" form
    pub restaurant: String,
    /// Table the order was placed from, "dining_table:key" form
    pub table: String,
    /// Customer reference, "user:key" form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    pub customer_phone: String,
    /// Unique per restaurant, `{prefix}-{YYYYMMDD}-{seq}` form
    pub order_number: String,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total: f64,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
    /// Epoch milliseconds
    pub placed_at: i64,
    /// Set exactly once, when status first becomes done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl Order {
    /// Recompute line subtotals and the aggregate totals
    ///
    /// subtotal = Σ line.price × line.quantity
    /// tax      = subtotal × TAX_RATE
    /// total    = subtotal + tax
    pub fn recompute_totals(&mut self) {
        self.subtotal = self
            .items
            .iter_mut()
            .map(|item| {
                item.subtotal = item.price * item.quantity as f64;
                item.subtotal
            })
            .sum();
        self.tax = self.subtotal * TAX_RATE;
        self.total = self.subtotal + self.tax;
    }

    /// Minutes from placement to completion, if completed
    pub fn preparation_minutes(&self) -> Option<i64> {
        self.completed_at
            .map(|done| ((done - self.placed_at) as f64 / 1000.0 / 60.0).round() as i64)
    }

    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|r| r.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, price: f64, quantity: i32) -> OrderItem {
        OrderItem {
            menu_item: format!("menu_item:{}", name),
            name: name.to_string(),
            price,
            quantity,
            notes: String::new(),
            subtotal: 0.0,
        }
    }

    fn order_with(items: Vec<OrderItem>) -> Order {
        Order {
            id: None,
            restaurant: "restaurant:r1".to_string(),
            table: "dining_table:t5".to_string(),
            customer: None,
            customer_phone: "5550001111".to_string(),
            order_number: "ORD-20260807-0001".to_string(),
            items,
            subtotal: 0.0,
            tax: 0.0,
            total: 0.0,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: PaymentMethod::Cash,
            notes: String::new(),
            status_history: Vec::new(),
            placed_at: 0,
            completed_at: None,
        }
    }

    #[test]
    fn test_totals_scenario() {
        // Item A: 10.00 x2, Item B: 5.00 x1 -> 25.00 / 2.50 / 27.50
        let mut order = order_with(vec![line("a", 10.0, 2), line("b", 5.0, 1)]);
        order.recompute_totals();
        assert!((order.subtotal - 25.0).abs() < 1e-9);
        assert!((order.tax - 2.5).abs() < 1e-9);
        assert!((order.total - 27.5).abs() < 1e-9);
        assert!((order.items[0].subtotal - 20.0).abs() < 1e-9);
        assert!((order.items[1].subtotal - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_totals_invariant_after_mutation() {
        let mut order = order_with(vec![line("a", 3.25, 1)]);
        order.recompute_totals();
        order.items.push(line("b", 1.75, 4));
        order.recompute_totals();
        assert!((order.subtotal - (3.25 + 7.0)).abs() < 1e-9);
        assert!((order.total - (order.subtotal + order.tax)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_order_totals() {
        let mut order = order_with(vec![]);
        order.recompute_totals();
        assert_eq!(order.subtotal, 0.0);
        assert_eq!(order.tax, 0.0);
        assert_eq!(order.total, 0.0);
    }

    #[test]
    fn test_preparation_minutes() {
        let mut order = order_with(vec![]);
        order.placed_at = 1_000_000;
        assert_eq!(order.preparation_minutes(), None);
        order.completed_at = Some(1_000_000 + 23 * 60 * 1000);
        assert_eq!(order.preparation_minutes(), Some(23));
    }
}
