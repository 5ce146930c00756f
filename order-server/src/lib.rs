//! TableTap Order Server - 多租户扫码点餐平台服务端
//!
//! # Architecture
//!
//! - **HTTP API** (`api`): RESTful admin/staff API plus the customer session API
//! - **数据库** (`db`): embedded SurrealDB storage with per-entity repositories
//! - **认证** (`auth`): JWT + Argon2 for password roles, closed role/permission model
//! - **Sessions** (`session`): in-process customer browsing sessions with TTL
//! - **Orders** (`orders`): cart accumulator, order numbering, checkout, status workflow
//!
//! # Module structure
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、权限
//! ├── session/       # customer browsing sessions
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! ├── orders/        # order/table coordination core
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod session;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use db::repository::TenantScope;
pub use orders::{Cart, CheckoutService, OrderWorkflow};
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
  ______      __    __     ______
 /_  __/___ _/ /_  / /__  /_  __/___ _____
  / / / __ `/ __ \/ / _ \  / / / __ `/ __ \
 / / / /_/ / /_/ / /  __/ / / / /_/ / /_/ /
/_/  \__,_/_.___/_/\___/ /_/  \__,_/ .___/
                                  /_/
    "#
    );
}
