//! Order creation
//!
//! Turns a session cart into a durable order: resolves the customer by
//! phone, obtains an order number, persists the order and occupies the
//! table in one transaction, retrying the numbering race a bounded number
//! of times.

use crate::db::models::{DiningTable, Order, OrderItem, Restaurant, User};
use crate::db::repository::{OrderRepository, RepoError, UserRepository};
use crate::orders::cart::Cart;
use crate::orders::numbering::{MAX_NUMBER_ATTEMPTS, next_order_number};
use crate::utils::now_millis;
use chrono::Utc;
use shared::{AppError, AppResult, ErrorCode, OrderStatus, PaymentMethod, PaymentStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

/// Checkout orchestration
#[derive(Clone)]
pub struct CheckoutService {
    orders: OrderRepository,
    users: UserRepository,
}

impl CheckoutService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    /// Place an order from a cart
    ///
    /// Preconditions: non-empty cart, phone supplied, restaurant and table
    /// resolved and active. On success the order is `pending`, its table is
    /// `occupied` referencing it, and the caller should clear the cart.
    pub async fn place_order(
        &self,
        restaurant: &Restaurant,
        table: &DiningTable,
        cart: &Cart,
        phone: &str,
        notes: &str,
    ) -> AppResult<(Order, User)> {
        if cart.is_empty() {
            return Err(AppError::new(ErrorCode::CartEmpty));
        }
        if phone.trim().is_empty() {
            return Err(AppError::new(ErrorCode::PhoneRequired));
        }
        if !restaurant.is_active {
            return Err(AppError::new(ErrorCode::RestaurantInactive));
        }
        if !table.is_active {
            return Err(AppError::new(ErrorCode::TableInactive));
        }

        let restaurant_id = restaurant.id_string();
        if table.restaurant != restaurant_id {
            return Err(AppError::not_found("Table"));
        }
        let phone = phone.trim();

        let customer = self
            .users
            .find_or_create_customer(&restaurant_id, phone)
            .await
            .map_err(AppError::from)?;

        // Count-then-insert races with concurrent checkouts; the unique
        // index rejects the loser, which recounts and tries again.
        let mut attempt = 0;
        loop {
            attempt += 1;
            let order_number = next_order_number(
                &self.orders,
                &restaurant_id,
                &restaurant.settings.order_prefix,
                Utc::now(),
            )
            .await
            .map_err(AppError::from)?;

            let mut order = Order {
                id: None,
                restaurant: restaurant_id.clone(),
                table: table.id_string(),
                customer: Some(customer.id_string()),
                customer_phone: phone.to_string(),
                order_number,
                items: cart
                    .items
                    .iter()
                    .map(|line| OrderItem {
                        menu_item: line.menu_item.clone(),
                        name: line.name.clone(),
                        price: line.price,
                        quantity: line.quantity,
                        notes: line.notes.clone(),
                        subtotal: line.subtotal,
                    })
                    .collect(),
                subtotal: 0.0,
                tax: 0.0,
                total: 0.0,
                status: OrderStatus::Pending,
                payment_status: PaymentStatus::Pending,
                payment_method: PaymentMethod::Cash,
                notes: notes.to_string(),
                status_history: Vec::new(),
                placed_at: now_millis(),
                completed_at: None,
            };
            order.recompute_totals();

            let order_key = Uuid::new_v4().simple().to_string();
            match self
                .orders
                .create_with_table_occupy(&order_key, order)
                .await
            {
                Ok(created) => {
                    tracing::info!(
                        order_number = %created.order_number,
                        table = %created.table,
                        total = created.total,
                        "Order placed"
                    );
                    return Ok((created, customer));
                }
                Err(RepoError::Duplicate(msg)) if msg.contains("uniq_order_number") => {
                    if attempt >= MAX_NUMBER_ATTEMPTS {
                        tracing::error!(
                            restaurant = %restaurant_id,
                            attempts = attempt,
                            "Order number collision persisted after retries"
                        );
                        return Err(AppError::new(ErrorCode::OrderNumberConflict));
                    }
                    tracing::warn!(
                        restaurant = %restaurant_id,
                        attempt,
                        "Order number collision, recounting"
                    );
                }
                Err(e) => return Err(AppError::from(e)),
            }
        }
    }
}
