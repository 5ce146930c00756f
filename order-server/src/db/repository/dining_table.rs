//! Dining Table Repository

use super::{BaseRepository, RepoError, RepoResult, TenantScope};
use crate::db::models::DiningTable;
use crate::utils::now_millis;
use shared::TableStatus;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All tables visible in the scope, ordered by table number
    pub async fn find_all(&self, scope: &TenantScope) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = match scope.restaurant_id() {
            Some(restaurant) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM dining_table WHERE restaurant = $restaurant \
                         ORDER BY table_number",
                    )
                    .bind(("restaurant", restaurant.to_string()))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM dining_table ORDER BY table_number")
                    .await?
                    .take(0)?
            }
        };
        Ok(tables)
    }

    /// Find table by id within the scope
    ///
    /// Out-of-scope tables resolve to `None`, exactly like missing ones.
    pub async fn find_by_id(
        &self,
        scope: &TenantScope,
        id: &str,
    ) -> RepoResult<Option<DiningTable>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let table: Option<DiningTable> = self.base.db().select(thing).await?;
        Ok(table.filter(|t| scope.permits(&t.restaurant)))
    }

    /// Active table by number within a restaurant — the customer entry path
    pub async fn find_active_by_number(
        &self,
        restaurant: &str,
        table_number: &str,
    ) -> RepoResult<Option<DiningTable>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE restaurant = $restaurant \
                 AND table_number = $table_number AND is_active = true LIMIT 1",
            )
            .bind(("restaurant", restaurant.to_string()))
            .bind(("table_number", table_number.to_string()))
            .await?;
        let tables: Vec<DiningTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new dining table
    ///
    /// The per-restaurant table number uniqueness is enforced by the
    /// unique index and surfaces as [`RepoError::Duplicate`].
    pub async fn create(&self, mut table: DiningTable) -> RepoResult<DiningTable> {
        table.id = None;
        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    /// Replace a table record within the scope
    pub async fn update(
        &self,
        scope: &TenantScope,
        id: &str,
        mut table: DiningTable,
    ) -> RepoResult<DiningTable> {
        let existing = self
            .find_by_id(scope, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        // Tenant ownership is immutable
        table.restaurant = existing.restaurant;
        table.id = None;
        table.updated_at = now_millis();

        let updated: Option<DiningTable> = self.base.db().update(thing).content(table).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Manual status override
    ///
    /// Setting a table back to `available` always clears its current-order
    /// reference, regardless of the linked order's own status. This is the
    /// admin escape hatch for desynced state.
    pub async fn set_status(
        &self,
        scope: &TenantScope,
        id: &str,
        status: TableStatus,
    ) -> RepoResult<DiningTable> {
        let table = self
            .find_by_id(scope, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let clear_order = status == TableStatus::Available;
        let current_order = if clear_order { None } else { table.current_order };

        self.base
            .db()
            .query(
                "UPDATE $thing SET status = $status, current_order = $current_order, \
                 updated_at = $now",
            )
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("current_order", current_order))
            .bind(("now", now_millis()))
            .await?
            .check()?;

        self.find_by_id(scope, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Hard delete a dining table within the scope
    pub async fn delete(&self, scope: &TenantScope, id: &str) -> RepoResult<bool> {
        // Deliberately unconditional: no order-history guard at this layer
        let table = self.find_by_id(scope, id).await?;
        let Some(table) = table else {
            return Ok(false);
        };
        if let Some(thing) = table.id {
            let _: Option<DiningTable> = self.base.db().delete(thing).await?;
        }
        Ok(true)
    }
}
