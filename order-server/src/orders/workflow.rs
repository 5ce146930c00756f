//! Order Status Workflow
//!
//! Enforces the legal-transition table and drives the coupled table state:
//! a terminal status releases the order's table in the same transaction as
//! the order write.

use crate::db::models::{Order, StatusHistoryEntry};
use crate::db::repository::{OrderRepository, TenantScope};
use crate::utils::now_millis;
use shared::{AppError, AppResult, OrderStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Status workflow orchestration
#[derive(Clone)]
pub struct OrderWorkflow {
    orders: OrderRepository,
}

impl OrderWorkflow {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db),
        }
    }

    /// Transition an order to a new status
    ///
    /// Rejects any target outside the current status's allowed set with no
    /// mutation. On acceptance: sets the status, appends exactly one
    /// history entry, stamps the completion timestamp on first entry into
    /// `done`, recomputes totals, and persists — releasing the table
    /// atomically when the new status is terminal.
    pub async fn transition(
        &self,
        scope: &TenantScope,
        order_id: &str,
        new_status: OrderStatus,
        acting_user: &str,
    ) -> AppResult<Order> {
        let mut order = self
            .orders
            .find_by_id(scope, order_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found("Order"))?;

        if !order.status.can_transition_to(new_status) {
            return Err(AppError::invalid_transition(
                order.status.as_str(),
                new_status.as_str(),
            ));
        }

        order.status = new_status;
        order.status_history.push(StatusHistoryEntry {
            status: new_status,
            timestamp: now_millis(),
            updated_by: Some(acting_user.to_string()),
        });
        if new_status == OrderStatus::Done && order.completed_at.is_none() {
            order.completed_at = Some(now_millis());
        }
        order.recompute_totals();

        let persisted = if new_status.is_terminal() {
            self.orders.update_with_table_release(&order).await
        } else {
            self.orders.update(&order).await
        }
        .map_err(AppError::from)?;

        tracing::info!(
            order_number = %persisted.order_number,
            status = %persisted.status,
            acting_user = %acting_user,
            "Order status updated"
        );
        Ok(persisted)
    }
}
