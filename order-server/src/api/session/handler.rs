//! Customer Session API Handlers
//!
//! Everything here runs inside a browsing session created by scanning a
//! table QR. The session token is the only credential; the session itself
//! pins the restaurant and table, so every lookup is implicitly scoped to
//! that tenant.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::Serialize;
use validator::Validate;

use super::SESSION_TOKEN_HEADER;
use crate::core::ServerState;
use crate::db::models::{MenuItem, Order};
use crate::db::repository::{
    DiningTableRepository, MenuItemRepository, OrderRepository, RestaurantRepository, TenantScope,
};
use crate::orders::{Cart, CheckoutService};
use crate::session::{CustomerSession, SessionCustomer};
use shared::request::{CartAddRequest, CartUpdateRequest, CheckoutRequest, SessionEnterRequest};
use shared::response::{CheckoutResponse, OrderStatusView, SessionEnterResponse};
use shared::{AppError, AppResult, MenuCategory};

fn session_of(state: &ServerState, headers: &HeaderMap) -> AppResult<CustomerSession> {
    let token = headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::session_expired)?;
    state
        .sessions()
        .get(token)
        .ok_or_else(AppError::session_expired)
}

/// POST /api/session/enter - 扫码进入桌台
///
/// Resolves the restaurant by slug and the table by number, both active,
/// and opens a fresh session with an empty cart. Scanning a different
/// table later simply opens another session.
pub async fn enter(
    State(state): State<ServerState>,
    Json(payload): Json<SessionEnterRequest>,
) -> AppResult<Json<SessionEnterResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let tables = DiningTableRepository::new(state.db.clone());

    let restaurant = restaurants
        .find_active_by_slug(&payload.restaurant_slug)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Restaurant"))?;
    let table = tables
        .find_active_by_number(&restaurant.id_string(), &payload.table_number)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Table"))?;

    let session = state.sessions().create(
        restaurant.id_string(),
        restaurant.slug.clone(),
        restaurant.name.clone(),
        table.id_string(),
        table.table_number.clone(),
    );

    Ok(Json(SessionEnterResponse {
        session_token: session.token,
        restaurant_name: restaurant.name,
        table_number: table.table_number,
    }))
}

/// One category block of the customer menu
#[derive(Debug, Serialize)]
pub struct MenuSection {
    pub category: MenuCategory,
    pub display_name: &'static str,
    pub items: Vec<MenuItem>,
}

/// GET /api/session/menu - 当前餐厅菜单
///
/// Available items only, grouped by category in menu order.
pub async fn menu(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<MenuSection>>> {
    let session = session_of(&state, &headers)?;
    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo
        .find_available(&session.restaurant_id)
        .await
        .map_err(AppError::from)?;

    let mut sections: Vec<MenuSection> = Vec::new();
    for item in items {
        match sections.last_mut() {
            Some(section) if section.category == item.category => section.items.push(item),
            _ => sections.push(MenuSection {
                category: item.category,
                display_name: item.category.display_name(),
                items: vec![item],
            }),
        }
    }
    Ok(Json(sections))
}

/// GET /api/session/cart - 当前购物车
pub async fn cart(State(state): State<ServerState>, headers: HeaderMap) -> AppResult<Json<Cart>> {
    let session = session_of(&state, &headers)?;
    Ok(Json(session.cart))
}

/// POST /api/session/cart/items - 加入购物车
///
/// The menu item must exist, be available, and belong to the session's
/// restaurant; anything else reads as missing.
pub async fn cart_add(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(payload): Json<CartAddRequest>,
) -> AppResult<Json<Cart>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = session_of(&state, &headers)?;
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_available_by_id(&session.restaurant_id, &payload.menu_item_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Menu item"))?;

    let mut add_result = Ok(());
    let updated = state.sessions().update(&session.token, |s| {
        add_result = s.cart.add_item(
            &item.id_string(),
            &item.name,
            item.price,
            payload.quantity,
            &payload.notes,
        );
    })?;
    add_result?;

    Ok(Json(updated.cart))
}

/// PUT /api/session/cart/items/{menu_item_id} - 修改购物车数量
///
/// Zero or negative removes the line.
pub async fn cart_update(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Path(menu_item_id): Path<String>,
    Json(payload): Json<CartUpdateRequest>,
) -> AppResult<Json<Cart>> {
    let session = session_of(&state, &headers)?;

    let mut update_result = Ok(());
    let updated = state.sessions().update(&session.token, |s| {
        update_result = s.cart.update_item(&menu_item_id, payload.quantity);
    })?;
    update_result?;

    Ok(Json(updated.cart))
}

/// POST /api/session/checkout - 下单
///
/// Places the order from the session cart; on success the cart is cleared
/// and the resolved customer identity is remembered in the session.
pub async fn checkout(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = session_of(&state, &headers)?;

    let restaurants = RestaurantRepository::new(state.db.clone());
    let tables = DiningTableRepository::new(state.db.clone());
    let restaurant = restaurants
        .find_by_id(&session.restaurant_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Restaurant"))?;
    let table = tables
        .find_by_id(
            &TenantScope::Restaurant(session.restaurant_id.clone()),
            &session.table_id,
        )
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Table"))?;

    let checkout_service = CheckoutService::new(state.db.clone());
    let (order, customer) = checkout_service
        .place_order(
            &restaurant,
            &table,
            &session.cart,
            &payload.phone,
            &payload.notes,
        )
        .await?;

    state.sessions().update(&session.token, |s| {
        s.cart.clear();
        s.customer = Some(SessionCustomer {
            id: customer.id_string(),
            phone: customer.phone.clone().unwrap_or_default(),
            name: customer.name.clone(),
        });
    })?;

    Ok(Json(CheckoutResponse {
        order_id: order.id_string(),
        order_number: order.order_number,
    }))
}

/// GET /api/session/orders/{id} - 订单状态轮询
pub async fn order_status(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> AppResult<Json<OrderStatusView>> {
    let session = session_of(&state, &headers)?;
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&TenantScope::Restaurant(session.restaurant_id), &id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Order"))?;

    Ok(Json(OrderStatusView {
        order_id: order.id_string(),
        order_number: order.order_number,
        status: order.status,
    }))
}

/// GET /api/session/orders - 本店我的订单
pub async fn my_orders(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<Vec<Order>>> {
    let session = session_of(&state, &headers)?;
    let Some(customer) = session.customer else {
        return Ok(Json(Vec::new()));
    };

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_by_customer(&session.restaurant_id, &customer.id, 20)
        .await
        .map_err(AppError::from)?;
    Ok(Json(orders))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_session_token_rejected() {
        let headers = HeaderMap::new();
        let err = headers
            .get(SESSION_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(AppError::session_expired)
            .err()
            .unwrap();
        assert_eq!(err.code, shared::ErrorCode::SessionExpired);
    }
}
