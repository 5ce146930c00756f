//! Menu Item API Handlers
//!
//! Admin CRUD. The customer-facing menu read lives in the session API and
//! filters unavailable items there.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::MenuItem;
use crate::db::repository::{MenuItemRepository, TenantScope};
use crate::utils::now_millis;
use shared::request::{MenuItemCreate, MenuItemUpdate};
use shared::{AppError, AppResult};

fn tenant_of(user: &CurrentUser) -> AppResult<String> {
    user.restaurant
        .clone()
        .ok_or_else(|| AppError::invalid("Restaurant context required"))
}

/// GET /api/menu-items - 全部菜品 (含下架)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo
        .find_all(&TenantScope::from_user(&user))
        .await
        .map_err(AppError::from)?;
    Ok(Json(items))
}

/// GET /api/menu-items/{id} - 单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&TenantScope::from_user(&user), &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Menu item"))?;
    Ok(Json(item))
}

/// POST /api/menu-items - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let restaurant = tenant_of(&user)?;
    let repo = MenuItemRepository::new(state.db.clone());
    let now = now_millis();
    let item = repo
        .create(MenuItem {
            id: None,
            restaurant,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            category: payload.category,
            image: payload.image,
            model_glb: payload.model_glb,
            model_usdz: payload.model_usdz,
            is_vegetarian: payload.is_vegetarian,
            is_vegan: payload.is_vegan,
            is_gluten_free: payload.is_gluten_free,
            spice_level: payload.spice_level,
            preparation_time: payload.preparation_time,
            is_available: true,
            tags: payload.tags,
            allergens: payload.allergens,
            sort_order: payload.sort_order,
            created_at: now,
            updated_at: now,
        })
        .await
        .map_err(AppError::from)?;

    Ok(Json(item))
}

/// PUT /api/menu-items/{id} - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let scope = TenantScope::from_user(&user);
    let repo = MenuItemRepository::new(state.db.clone());
    let mut item = repo
        .find_by_id(&scope, &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Menu item"))?;

    if let Some(name) = payload.name {
        item.name = name;
    }
    if let Some(description) = payload.description {
        item.description = description;
    }
    if let Some(price) = payload.price {
        item.price = price;
    }
    if let Some(category) = payload.category {
        item.category = category;
    }
    if let Some(image) = payload.image {
        item.image = Some(image);
    }
    if let Some(model_glb) = payload.model_glb {
        item.model_glb = Some(model_glb);
    }
    if let Some(model_usdz) = payload.model_usdz {
        item.model_usdz = Some(model_usdz);
    }
    if let Some(is_vegetarian) = payload.is_vegetarian {
        item.is_vegetarian = is_vegetarian;
    }
    if let Some(is_vegan) = payload.is_vegan {
        item.is_vegan = is_vegan;
    }
    if let Some(is_gluten_free) = payload.is_gluten_free {
        item.is_gluten_free = is_gluten_free;
    }
    if let Some(spice_level) = payload.spice_level {
        item.spice_level = spice_level;
    }
    if let Some(preparation_time) = payload.preparation_time {
        item.preparation_time = preparation_time;
    }
    if let Some(is_available) = payload.is_available {
        item.is_available = is_available;
    }
    if let Some(tags) = payload.tags {
        item.tags = tags;
    }
    if let Some(allergens) = payload.allergens {
        item.allergens = allergens;
    }
    if let Some(sort_order) = payload.sort_order {
        item.sort_order = sort_order;
    }

    let updated = repo.update(&scope, &id, item).await.map_err(AppError::from)?;
    Ok(Json(updated))
}

/// DELETE /api/menu-items/{id} - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let deleted = repo
        .delete(&TenantScope::from_user(&user), &id)
        .await
        .map_err(AppError::from)?;
    if !deleted {
        return Err(AppError::not_found("Menu item"));
    }
    Ok(Json(true))
}
