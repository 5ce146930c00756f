//! Database Module
//!
//! Embedded SurrealDB storage and schema definition.

pub mod models;
pub mod repository;
pub mod seed;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "tabletap";
const DATABASE: &str = "platform";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database under the data directory
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::initialize(db).await
    }

    /// Open an in-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::initialize(db).await
    }

    async fn initialize(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;
        tracing::info!("Database ready (ns={}, db={})", NAMESPACE, DATABASE);

        Ok(Self { db })
    }
}

/// Idempotent schema definition
///
/// The unique indexes carry the conflict detection the domain relies on:
/// order numbers and table numbers per restaurant, usernames and
/// restaurant slugs/subdomains globally.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS restaurant SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS dining_table SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS order SCHEMALESS;

        DEFINE INDEX IF NOT EXISTS uniq_restaurant_slug
            ON TABLE restaurant COLUMNS slug UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_restaurant_subdomain
            ON TABLE restaurant COLUMNS subdomain UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_user_username
            ON TABLE user COLUMNS username UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_table_number
            ON TABLE dining_table COLUMNS restaurant, table_number UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_order_number
            ON TABLE order COLUMNS restaurant, order_number UNIQUE;

        DEFINE INDEX IF NOT EXISTS idx_order_restaurant_status
            ON TABLE order COLUMNS restaurant, status;
        DEFINE INDEX IF NOT EXISTS idx_order_placed_at
            ON TABLE order COLUMNS placed_at;
        DEFINE INDEX IF NOT EXISTS idx_user_phone
            ON TABLE user COLUMNS restaurant, phone;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
    Ok(())
}
