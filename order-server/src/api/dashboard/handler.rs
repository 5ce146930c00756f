//! Dashboard API Handlers

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{DiningTableRepository, OrderRepository, TenantScope};
use crate::orders::numbering::day_window;
use shared::response::DashboardStats;
use shared::{AppError, AppResult, OrderStatus, TableStatus};

/// GET /api/dashboard - 今日统计
pub async fn stats(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<DashboardStats>> {
    let restaurant = user
        .restaurant
        .clone()
        .ok_or_else(|| AppError::invalid("Restaurant context required"))?;

    let orders = OrderRepository::new(state.db.clone());
    let tables = DiningTableRepository::new(state.db.clone());
    let (start_of_day, _, _) = day_window(chrono::Utc::now());

    let mut stats = DashboardStats::default();
    for (status, slot) in [
        (OrderStatus::Pending, &mut stats.pending_orders),
        (OrderStatus::Preparing, &mut stats.preparing_orders),
        (OrderStatus::Served, &mut stats.served_orders),
        (OrderStatus::Done, &mut stats.completed_orders),
        (OrderStatus::Cancelled, &mut stats.cancelled_orders),
    ] {
        *slot = orders
            .count_by_status(&restaurant, status, start_of_day)
            .await
            .map_err(AppError::from)? as u64;
    }
    stats.revenue = orders
        .revenue_since(&restaurant, start_of_day)
        .await
        .map_err(AppError::from)?;

    let all_tables = tables
        .find_all(&TenantScope::Restaurant(restaurant))
        .await
        .map_err(AppError::from)?;
    stats.total_tables = all_tables.len() as u64;
    stats.occupied_tables = all_tables
        .iter()
        .filter(|t| t.status == TableStatus::Occupied)
        .count() as u64;

    Ok(Json(stats))
}
