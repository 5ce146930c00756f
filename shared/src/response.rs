//! Response DTOs shared between the server and its clients

use crate::order::OrderStatus;
use serde::{Deserialize, Serialize};

/// Successful login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub role: crate::role::Role,
    /// Tenant binding; absent for superadmin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,
}

/// Session token handed to a customer after scanning a table QR
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEnterResponse {
    pub session_token: String,
    pub restaurant_name: String,
    pub table_number: String,
}

/// Checkout result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub order_number: String,
}

/// Pollable order status view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusView {
    pub order_id: String,
    pub order_number: String,
    pub status: OrderStatus,
}

/// Canonical QR payload for a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableQrResponse {
    pub table_number: String,
    pub url: String,
}

/// Admin dashboard statistics for today
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    pub pending_orders: u64,
    pub preparing_orders: u64,
    pub served_orders: u64,
    pub completed_orders: u64,
    pub cancelled_orders: u64,
    /// Revenue from today's non-cancelled orders
    pub revenue: f64,
    pub occupied_tables: u64,
    pub total_tables: u64,
}
