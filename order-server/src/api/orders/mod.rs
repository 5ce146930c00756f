//! Order API 模块

mod handler;

use axum::{Router, middleware, routing::get, routing::put};

use crate::auth::require_permission;
use crate::core::ServerState;
use shared::Permission;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(
            Permission::ViewOrders,
        )));

    let transition_routes = Router::new()
        .route("/{id}/status", put(handler::set_status))
        .layer(middleware::from_fn(require_permission(
            Permission::UpdateOrderStatus,
        )));

    read_routes.merge(transition_routes)
}
