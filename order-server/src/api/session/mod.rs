//! Customer Session API 模块
//!
//! 扫码点餐流程: enter -> menu -> cart -> checkout -> order status.
//! Authenticated by the session token alone, never by JWT.

mod handler;

use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::ServerState;

/// Header carrying the customer session token
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/session", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/enter", post(handler::enter))
        .route("/menu", get(handler::menu))
        .route("/cart", get(handler::cart))
        .route("/cart/items", post(handler::cart_add))
        .route("/cart/items/{menu_item_id}", put(handler::cart_update))
        .route("/checkout", post(handler::checkout))
        .route("/orders", get(handler::my_orders))
        .route("/orders/{id}", get(handler::order_status))
}
