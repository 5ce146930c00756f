//! Auth API Handlers

use axum::{Json, extract::State};
use validator::Validate;

use crate::auth::verify_password;
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;
use shared::request::LoginRequest;
use shared::response::LoginResponse;
use shared::{AppError, AppResult, ErrorCode};

/// POST /api/auth/login - 用户名密码登录
///
/// Password roles only; customers never log in here. Credential failures
/// are reported uniformly so usernames cannot be probed.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_username(&payload.username)
        .await
        .map_err(AppError::from)?
        .ok_or_else(AppError::invalid_credentials)?;

    let hash = user
        .password_hash
        .as_deref()
        .ok_or_else(AppError::invalid_credentials)?;
    if !verify_password(&payload.password, hash) {
        security_log!("WARN", "login_failed", username = payload.username.clone());
        return Err(AppError::invalid_credentials());
    }
    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let user_id = user.id_string();
    repo.touch_last_login(&user_id)
        .await
        .map_err(AppError::from)?;

    let token = state
        .jwt_service()
        .generate_token(
            &user_id,
            &user.username,
            &user.name,
            user.role,
            user.restaurant.as_deref(),
        )
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    security_log!("INFO", "login_ok", username = user.username.clone());

    Ok(Json(LoginResponse {
        token,
        user_id,
        username: user.username,
        name: user.name,
        role: user.role,
        restaurant_id: user.restaurant,
    }))
}
