//! Order Repository
//!
//! Order reads plus the two cross-aggregate writes that must stay atomic
//! with the owning table: checkout (create + occupy) and terminal status
//! (update + release). Both run as single SurrealDB transactions so an
//! order can never be observed terminal while its table is still occupied,
//! or vice versa.

use super::{BaseRepository, RepoError, RepoResult, TenantScope};
use crate::db::models::Order;
use crate::utils::now_millis;
use serde::Deserialize;
use shared::{OrderStatus, TableStatus};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Deserialize)]
struct SumRow {
    sum: f64,
}

/// Filters for the staff order list
#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// "dining_table:key" form
    pub table: Option<String>,
    /// Only orders placed at or after this instant (epoch ms)
    pub placed_since: Option<i64>,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find order by id within the scope
    pub async fn find_by_id(&self, scope: &TenantScope, id: &str) -> RepoResult<Option<Order>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order.filter(|o| scope.permits(&o.restaurant)))
    }

    /// Orders visible in the scope, newest first
    pub async fn list(&self, scope: &TenantScope, filter: &OrderFilter) -> RepoResult<Vec<Order>> {
        let mut conditions: Vec<&str> = Vec::new();
        if scope.restaurant_id().is_some() {
            conditions.push("restaurant = $restaurant");
        }
        if filter.status.is_some() {
            conditions.push("status = $status");
        }
        if filter.table.is_some() {
            conditions.push("table = $table");
        }
        if filter.placed_since.is_some() {
            conditions.push("placed_at >= $placed_since");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!("SELECT * FROM order{} ORDER BY placed_at DESC", where_clause);

        let mut query = self.base.db().query(sql);
        if let Some(restaurant) = scope.restaurant_id() {
            query = query.bind(("restaurant", restaurant.to_string()));
        }
        if let Some(status) = filter.status {
            query = query.bind(("status", status));
        }
        if let Some(table) = &filter.table {
            query = query.bind(("table", table.clone()));
        }
        if let Some(since) = filter.placed_since {
            query = query.bind(("placed_since", since));
        }

        let orders: Vec<Order> = query.await?.take(0)?;
        Ok(orders)
    }

    /// A customer's own orders within one restaurant, newest first
    pub async fn find_by_customer(
        &self,
        restaurant: &str,
        customer: &str,
        limit: usize,
    ) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE restaurant = $restaurant AND customer = $customer \
                 ORDER BY placed_at DESC LIMIT $limit",
            )
            .bind(("restaurant", restaurant.to_string()))
            .bind(("customer", customer.to_string()))
            .bind(("limit", limit as i64))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Count a restaurant's orders placed within [start, end] (epoch ms)
    ///
    /// Feeds the order numbering service.
    pub async fn count_in_window(
        &self,
        restaurant: &str,
        start: i64,
        end: i64,
    ) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() FROM order WHERE restaurant = $restaurant \
                 AND placed_at >= $start AND placed_at <= $end GROUP ALL",
            )
            .bind(("restaurant", restaurant.to_string()))
            .bind(("start", start))
            .bind(("end", end))
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Checkout write: persist the order and occupy its table atomically
    ///
    /// The caller supplies the pre-generated record key so the table's
    /// current-order reference can be written in the same transaction.
    /// An order-number collision (unique index) aborts the whole
    /// transaction and surfaces as [`RepoError::Duplicate`].
    pub async fn create_with_table_occupy(
        &self,
        order_key: &str,
        mut order: Order,
    ) -> RepoResult<Order> {
        order.id = None;
        let order_thing = RecordId::from_table_key("order", order_key);
        let order_ref = order_thing.to_string();
        let table_thing: RecordId = order
            .table
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid table ID: {}", order.table)))?;

        let mut response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 CREATE $order_thing CONTENT $order; \
                 UPDATE $table_thing SET status = $occupied, current_order = $order_ref, \
                     updated_at = $now; \
                 COMMIT TRANSACTION;",
            )
            .bind(("order_thing", order_thing))
            .bind(("order", order))
            .bind(("table_thing", table_thing))
            .bind(("occupied", TableStatus::Occupied))
            .bind(("order_ref", order_ref))
            .bind(("now", now_millis()))
            .await?
            .check()
            .map_err(RepoError::from)?;

        let created: Vec<Order> = response.take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Persist an order mutation with no table side effect
    pub async fn update(&self, order: &Order) -> RepoResult<Order> {
        let thing = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Order has no id".to_string()))?;
        let mut content = order.clone();
        content.id = None;
        let updated: Option<Order> = self.base.db().update(thing).content(content).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", order.id_string())))
    }

    /// Terminal-status write: persist the order and release its table
    /// atomically
    ///
    /// The table comes back to `available` with its current-order
    /// reference cleared.
    pub async fn update_with_table_release(&self, order: &Order) -> RepoResult<Order> {
        let order_thing = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Order has no id".to_string()))?;
        let table_thing: RecordId = order
            .table
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid table ID: {}", order.table)))?;
        let mut content = order.clone();
        content.id = None;

        let mut response = self
            .base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 UPDATE $order_thing CONTENT $order; \
                 UPDATE $table_thing SET status = $available, current_order = NONE, \
                     updated_at = $now; \
                 COMMIT TRANSACTION;",
            )
            .bind(("order_thing", order_thing))
            .bind(("order", content))
            .bind(("table_thing", table_thing))
            .bind(("available", TableStatus::Available))
            .bind(("now", now_millis()))
            .await?
            .check()
            .map_err(RepoError::from)?;

        let updated: Vec<Order> = response.take(0)?;
        updated
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", order.id_string())))
    }

    /// Count a restaurant's orders in one status since an instant
    pub async fn count_by_status(
        &self,
        restaurant: &str,
        status: OrderStatus,
        since: i64,
    ) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() FROM order WHERE restaurant = $restaurant \
                 AND status = $status AND placed_at >= $since GROUP ALL",
            )
            .bind(("restaurant", restaurant.to_string()))
            .bind(("status", status))
            .bind(("since", since))
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Revenue from non-cancelled orders since an instant
    pub async fn revenue_since(&self, restaurant: &str, since: i64) -> RepoResult<f64> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT math::sum(total) AS sum FROM order WHERE restaurant = $restaurant \
                 AND status != $cancelled AND placed_at >= $since GROUP ALL",
            )
            .bind(("restaurant", restaurant.to_string()))
            .bind(("cancelled", OrderStatus::Cancelled))
            .bind(("since", since))
            .await?;
        let rows: Vec<SumRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.sum).unwrap_or(0.0))
    }
}
