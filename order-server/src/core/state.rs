use std::path::PathBuf;
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::{DbService, seed};
use crate::session::SessionStore;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是服务端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | sessions | Arc<SessionStore> | customer session 存储 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// Customer browsing sessions
    pub sessions: Arc<SessionStore>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 数据目录
    /// 2. 数据库 (data_dir/tabletap.db)
    /// 3. JWT 服务和 session 存储
    /// 4. 引导数据 (superadmin)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        let data_dir = PathBuf::from(&config.data_dir);
        std::fs::create_dir_all(&data_dir).expect("Failed to create data directory");

        let db_path = data_dir.join("tabletap.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let state = Self::with_db(config.clone(), db_service.db);

        seed::ensure_superadmin(state.db.clone(), config)
            .await
            .expect("Failed to seed superadmin account");

        state
    }

    /// 使用内存数据库初始化 (测试场景)
    pub async fn initialize_in_memory(config: &Config) -> Self {
        let db_service = DbService::memory()
            .await
            .expect("Failed to initialize in-memory database");
        Self::with_db(config.clone(), db_service.db)
    }

    fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let sessions = Arc::new(SessionStore::new(config.session_ttl_hours));
        Self {
            config,
            db,
            jwt_service,
            sessions,
        }
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// 获取 session 存储
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}
