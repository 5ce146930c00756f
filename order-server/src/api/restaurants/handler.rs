//! Restaurant API Handlers
//!
//! Provisioning creates the tenant root together with its admin account,
//! mirroring how an operator onboards a new restaurant in one step.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::{CurrentUser, hash_password};
use crate::core::ServerState;
use crate::db::models::{Restaurant, RestaurantSettings, User};
use crate::db::repository::{RestaurantRepository, UserRepository};
use crate::utils::now_millis;
use shared::request::{RestaurantCreate, RestaurantUpdate};
use shared::{AppError, AppResult, ErrorCode, Role};

/// GET /api/restaurants - 所有餐厅
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Restaurant>>> {
    let repo = RestaurantRepository::new(state.db.clone());
    let restaurants = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(restaurants))
}

/// GET /api/restaurants/{id} - 单个餐厅
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    let repo = RestaurantRepository::new(state.db.clone());
    let restaurant = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Restaurant"))?;
    Ok(Json(restaurant))
}

/// POST /api/restaurants - 创建餐厅 (连同 admin 账号)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<Restaurant>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let users = UserRepository::new(state.db.clone());

    if restaurants
        .find_by_subdomain(&payload.subdomain)
        .await
        .map_err(AppError::from)?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::SubdomainExists));
    }
    if users
        .find_by_username(&payload.admin_username)
        .await
        .map_err(AppError::from)?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::UsernameExists));
    }

    let now = now_millis();
    let restaurant = restaurants
        .create(Restaurant {
            id: None,
            slug: Restaurant::generate_slug(&payload.name),
            name: payload.name,
            subdomain: payload.subdomain.to_lowercase(),
            address: payload.address,
            phone: payload.phone,
            email: payload.email,
            is_active: true,
            created_by: Some(user.id.clone()),
            settings: RestaurantSettings::default(),
            created_at: now,
            updated_at: now,
        })
        .await
        .map_err(AppError::from)?;

    users
        .create(User {
            id: None,
            username: payload.admin_username,
            password_hash: Some(hash_password(&payload.admin_password)?),
            name: payload.admin_name,
            email: None,
            phone: None,
            role: Role::Admin,
            restaurant: Some(restaurant.id_string()),
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        restaurant = %restaurant.name,
        slug = %restaurant.slug,
        "Restaurant provisioned"
    );
    Ok(Json(restaurant))
}

/// PUT /api/restaurants/{id} - 更新餐厅
///
/// A renamed restaurant gets a freshly derived slug.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let repo = RestaurantRepository::new(state.db.clone());
    let mut restaurant = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Restaurant"))?;

    if let Some(subdomain) = payload.subdomain {
        let subdomain = subdomain.to_lowercase();
        if subdomain != restaurant.subdomain {
            if repo
                .find_by_subdomain(&subdomain)
                .await
                .map_err(AppError::from)?
                .is_some()
            {
                return Err(AppError::new(ErrorCode::SubdomainExists));
            }
            restaurant.subdomain = subdomain;
        }
    }
    if let Some(name) = payload.name {
        restaurant.slug = Restaurant::generate_slug(&name);
        restaurant.name = name;
    }
    if let Some(address) = payload.address {
        restaurant.address = address;
    }
    if let Some(phone) = payload.phone {
        restaurant.phone = phone;
    }
    if let Some(email) = payload.email {
        restaurant.email = email;
    }
    if let Some(is_active) = payload.is_active {
        restaurant.is_active = is_active;
    }
    if let Some(currency) = payload.currency {
        restaurant.settings.currency = currency;
    }
    if let Some(timezone) = payload.timezone {
        restaurant.settings.timezone = timezone;
    }
    if let Some(order_prefix) = payload.order_prefix {
        restaurant.settings.order_prefix = order_prefix;
    }

    let updated = repo.update(&id, restaurant).await.map_err(AppError::from)?;
    Ok(Json(updated))
}

/// DELETE /api/restaurants/{id} - 删除餐厅
///
/// Rejected while orders reference the restaurant; deactivate instead.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = RestaurantRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Restaurant"))?;

    if repo.has_orders(&id).await.map_err(AppError::from)? {
        return Err(AppError::new(ErrorCode::RestaurantHasOrders));
    }

    let deleted = repo.delete(&id).await.map_err(AppError::from)?;
    Ok(Json(deleted))
}
