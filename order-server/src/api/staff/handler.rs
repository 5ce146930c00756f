//! Staff API Handlers
//!
//! Admin-managed staff accounts within one restaurant. Deletion is a soft
//! toggle; password hashes never leave the server.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use validator::Validate;

use crate::auth::{CurrentUser, hash_password};
use crate::core::ServerState;
use crate::db::models::User;
use crate::db::repository::{TenantScope, UserRepository};
use crate::utils::now_millis;
use shared::request::{StaffCreate, StaffUpdate};
use shared::{AppError, AppResult, ErrorCode, Role};

/// Staff account without credential material
#[derive(Debug, Serialize)]
pub struct StaffView {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub last_login: Option<i64>,
    pub created_at: i64,
}

impl From<User> for StaffView {
    fn from(user: User) -> Self {
        Self {
            id: user.id_string(),
            username: user.username,
            name: user.name,
            email: user.email,
            phone: user.phone,
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

fn tenant_of(user: &CurrentUser) -> AppResult<String> {
    user.restaurant
        .clone()
        .ok_or_else(|| AppError::invalid("Restaurant context required"))
}

/// GET /api/staff - 本店员工
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<StaffView>>> {
    let restaurant = tenant_of(&user)?;
    let repo = UserRepository::new(state.db.clone());
    let staff = repo.find_staff(&restaurant).await.map_err(AppError::from)?;
    Ok(Json(staff.into_iter().map(StaffView::from).collect()))
}

/// POST /api/staff - 创建员工账号
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<StaffView>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let restaurant = tenant_of(&user)?;
    let repo = UserRepository::new(state.db.clone());

    if repo
        .find_by_username(&payload.username)
        .await
        .map_err(AppError::from)?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::UsernameExists));
    }

    let now = now_millis();
    let created = repo
        .create(User {
            id: None,
            username: payload.username,
            password_hash: Some(hash_password(&payload.password)?),
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            role: Role::Staff,
            restaurant: Some(restaurant),
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .map_err(AppError::from)?;

    Ok(Json(StaffView::from(created)))
}

/// PUT /api/staff/{id} - 更新员工账号
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<StaffUpdate>,
) -> AppResult<Json<StaffView>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let scope = TenantScope::from_user(&user);
    let repo = UserRepository::new(state.db.clone());
    let mut staff = repo
        .find_by_id(&scope, &id)
        .await
        .map_err(AppError::from)?
        .filter(|u| u.role == Role::Staff)
        .ok_or_else(|| AppError::not_found("Staff member"))?;

    if let Some(name) = payload.name {
        staff.name = name;
    }
    if let Some(password) = payload.password {
        staff.password_hash = Some(hash_password(&password)?);
    }
    if let Some(email) = payload.email {
        staff.email = Some(email);
    }
    if let Some(phone) = payload.phone {
        staff.phone = Some(phone);
    }
    if let Some(is_active) = payload.is_active {
        staff.is_active = is_active;
    }

    let updated = repo.update(&scope, &id, staff).await.map_err(AppError::from)?;
    Ok(Json(StaffView::from(updated)))
}

/// DELETE /api/staff/{id} - 停用员工账号 (软删除)
pub async fn deactivate(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<StaffView>> {
    let scope = TenantScope::from_user(&user);
    let repo = UserRepository::new(state.db.clone());
    repo.find_by_id(&scope, &id)
        .await
        .map_err(AppError::from)?
        .filter(|u| u.role == Role::Staff)
        .ok_or_else(|| AppError::not_found("Staff member"))?;

    let updated = repo
        .set_active(&scope, &id, false)
        .await
        .map_err(AppError::from)?;
    Ok(Json(StaffView::from(updated)))
}
