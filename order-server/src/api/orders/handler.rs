//! Order API Handlers
//!
//! Staff read the order board and drive the status workflow. All access is
//! tenant-scoped; another restaurant's order is indistinguishable from a
//! missing one.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Order;
use crate::db::repository::order::OrderFilter;
use crate::db::repository::{OrderRepository, TenantScope};
use crate::orders::OrderWorkflow;
use crate::orders::numbering::day_window;
use shared::request::{OrderListQuery, OrderStatusUpdate};
use shared::{AppError, AppResult, OrderStatus};

/// GET /api/orders - 订单列表
///
/// Today's orders by default; `status`, `table` and `all_days` narrow or
/// widen the window.
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let status = match query.status.as_deref() {
        None | Some("all") => None,
        Some(raw) => Some(
            serde_json::from_value::<OrderStatus>(serde_json::Value::String(raw.to_string()))
                .map_err(|_| AppError::validation(format!("Unknown status: {}", raw)))?,
        ),
    };

    let placed_since = if query.all_days {
        None
    } else {
        let (start, _, _) = day_window(chrono::Utc::now());
        Some(start)
    };

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .list(
            &TenantScope::from_user(&user),
            &OrderFilter {
                status,
                table: query.table,
                placed_since,
            },
        )
        .await
        .map_err(AppError::from)?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - 订单详情
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&TenantScope::from_user(&user), &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Order"))?;
    Ok(Json(order))
}

/// PUT /api/orders/{id}/status - 推进订单状态
///
/// Illegal transitions are rejected with no mutation; terminal statuses
/// release the table atomically.
pub async fn set_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let workflow = OrderWorkflow::new(state.db.clone());
    let order = workflow
        .transition(
            &TenantScope::from_user(&user),
            &id,
            payload.status,
            &user.id,
        )
        .await?;
    Ok(Json(order))
}
