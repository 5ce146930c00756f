//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`restaurants`] - 餐厅管理接口 (superadmin)
//! - [`tables`] - 桌台管理接口
//! - [`menu_items`] - 菜单管理接口
//! - [`staff`] - 员工管理接口
//! - [`orders`] - 订单管理接口
//! - [`dashboard`] - 统计接口
//! - [`session`] - customer session 接口 (扫码点餐)

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod menu_items;
pub mod orders;
pub mod restaurants;
pub mod session;
pub mod staff;
pub mod tables;

use crate::core::ServerState;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Assemble the full application router
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(restaurants::router())
        .merge(tables::router())
        .merge(menu_items::router())
        .merge(staff::router())
        .merge(orders::router())
        .merge(dashboard::router())
        .merge(session::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
