//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::DiningTable;
use crate::db::repository::{DiningTableRepository, RestaurantRepository, TenantScope};
use crate::utils::now_millis;
use shared::request::{TableCreate, TableStatusUpdate, TableUpdate};
use shared::response::TableQrResponse;
use shared::{AppError, AppResult};

fn tenant_of(user: &CurrentUser) -> AppResult<String> {
    user.restaurant
        .clone()
        .ok_or_else(|| AppError::invalid("Restaurant context required"))
}

/// GET /api/tables - 获取所有桌台
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo
        .find_all(&TenantScope::from_user(&user))
        .await
        .map_err(AppError::from)?;
    Ok(Json(tables))
}

/// GET /api/tables/{id} - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&TenantScope::from_user(&user), &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Table"))?;
    Ok(Json(table))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<TableCreate>,
) -> AppResult<Json<DiningTable>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let restaurant = tenant_of(&user)?;
    let repo = DiningTableRepository::new(state.db.clone());
    let now = now_millis();
    let table = repo
        .create(DiningTable {
            id: None,
            restaurant,
            table_number: payload.table_number,
            capacity: payload.capacity.unwrap_or(4),
            location: payload.location,
            status: shared::TableStatus::Available,
            is_active: true,
            current_order: None,
            notes: payload.notes,
            created_at: now,
            updated_at: now,
        })
        .await
        .map_err(AppError::from)?;

    Ok(Json(table))
}

/// PUT /api/tables/{id} - 更新桌台
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<TableUpdate>,
) -> AppResult<Json<DiningTable>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let scope = TenantScope::from_user(&user);
    let repo = DiningTableRepository::new(state.db.clone());
    let mut table = repo
        .find_by_id(&scope, &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Table"))?;

    if let Some(table_number) = payload.table_number {
        table.table_number = table_number;
    }
    if let Some(capacity) = payload.capacity {
        table.capacity = capacity;
    }
    if let Some(location) = payload.location {
        table.location = location;
    }
    if let Some(notes) = payload.notes {
        table.notes = notes;
    }
    if let Some(is_active) = payload.is_active {
        table.is_active = is_active;
    }

    let updated = repo.update(&scope, &id, table).await.map_err(AppError::from)?;
    Ok(Json(updated))
}

/// PUT /api/tables/{id}/status - 手动设置桌台状态
///
/// The manual override escape hatch: forcing `available` clears the
/// current-order reference no matter what the linked order says.
pub async fn set_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<TableStatusUpdate>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .set_status(&TenantScope::from_user(&user), &id, payload.status)
        .await
        .map_err(AppError::from)?;
    Ok(Json(table))
}

/// GET /api/tables/{id}/qr - 桌台二维码链接
///
/// Only the encoded URL; image rendering is the caller's concern.
pub async fn qr(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<TableQrResponse>> {
    let scope = TenantScope::from_user(&user);
    let tables = DiningTableRepository::new(state.db.clone());
    let restaurants = RestaurantRepository::new(state.db.clone());

    let table = tables
        .find_by_id(&scope, &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Table"))?;
    let restaurant = restaurants
        .find_by_id(&table.restaurant)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Restaurant"))?;

    Ok(Json(TableQrResponse {
        url: table.qr_url(&state.config.base_url, &restaurant.slug),
        table_number: table.table_number,
    }))
}

/// DELETE /api/tables/{id} - 删除桌台
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let deleted = repo
        .delete(&TenantScope::from_user(&user), &id)
        .await
        .map_err(AppError::from)?;
    if !deleted {
        return Err(AppError::not_found("Table"));
    }
    Ok(Json(true))
}
