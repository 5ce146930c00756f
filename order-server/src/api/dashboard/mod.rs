//! Dashboard API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;
use shared::Permission;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/dashboard", get(handler::stats))
        .layer(middleware::from_fn(require_permission(
            Permission::ViewDashboard,
        )))
}
