//! Dining Table API 模块

mod handler;

use axum::{Router, middleware, routing::get, routing::put};

use crate::auth::require_permission;
use crate::core::ServerState;
use shared::Permission;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    // Staff read tables to filter the order board; management is admin-only
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(
            Permission::ViewOrders,
        )));

    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .route("/{id}/status", put(handler::set_status))
        .route("/{id}/qr", get(handler::qr))
        .layer(middleware::from_fn(require_permission(
            Permission::ManageTables,
        )));

    read_routes.merge(manage_routes)
}
