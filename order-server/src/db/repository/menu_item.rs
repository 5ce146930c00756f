//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult, TenantScope};
use crate::db::models::MenuItem;
use crate::utils::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All items visible in the scope (admin view, unavailable included)
    pub async fn find_all(&self, scope: &TenantScope) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = match scope.restaurant_id() {
            Some(restaurant) => {
                self.base
                    .db()
                    .query(
                        "SELECT * FROM menu_item WHERE restaurant = $restaurant \
                         ORDER BY category, sort_order, name",
                    )
                    .bind(("restaurant", restaurant.to_string()))
                    .await?
                    .take(0)?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT * FROM menu_item ORDER BY category, sort_order, name")
                    .await?
                    .take(0)?
            }
        };
        Ok(items)
    }

    /// Customer-facing menu: available items only
    pub async fn find_available(&self, restaurant: &str) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query(
                "SELECT * FROM menu_item WHERE restaurant = $restaurant \
                 AND is_available = true ORDER BY category, sort_order, name",
            )
            .bind(("restaurant", restaurant.to_string()))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, scope: &TenantScope, id: &str) -> RepoResult<Option<MenuItem>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let item: Option<MenuItem> = self.base.db().select(thing).await?;
        Ok(item.filter(|i| scope.permits(&i.restaurant)))
    }

    /// Available item within a restaurant — the cart-add path
    ///
    /// Unavailable and cross-tenant items both resolve to `None`.
    pub async fn find_available_by_id(
        &self,
        restaurant: &str,
        id: &str,
    ) -> RepoResult<Option<MenuItem>> {
        let item = self
            .find_by_id(&TenantScope::Restaurant(restaurant.to_string()), id)
            .await?;
        Ok(item.filter(|i| i.is_available))
    }

    pub async fn create(&self, mut item: MenuItem) -> RepoResult<MenuItem> {
        if item.price < 0.0 {
            return Err(RepoError::Validation("Price must be non-negative".into()));
        }
        item.id = None;
        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    pub async fn update(
        &self,
        scope: &TenantScope,
        id: &str,
        mut item: MenuItem,
    ) -> RepoResult<MenuItem> {
        if item.price < 0.0 {
            return Err(RepoError::Validation("Price must be non-negative".into()));
        }
        let existing = self
            .find_by_id(scope, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        item.restaurant = existing.restaurant;
        item.id = None;
        item.updated_at = now_millis();

        let updated: Option<MenuItem> = self.base.db().update(thing).content(item).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    pub async fn delete(&self, scope: &TenantScope, id: &str) -> RepoResult<bool> {
        let Some(item) = self.find_by_id(scope, id).await? else {
            return Ok(false);
        };
        if let Some(thing) = item.id {
            let _: Option<MenuItem> = self.base.db().delete(thing).await?;
        }
        Ok(true)
    }
}
