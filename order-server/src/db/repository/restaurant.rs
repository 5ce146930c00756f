//! Restaurant Repository
//!
//! Tenant roots are superadmin-only territory, so there is no scope
//! parameter here; the route layer enforces the role.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Restaurant;
use crate::utils::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "restaurant";

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All restaurants, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Restaurant>> {
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query("SELECT * FROM restaurant ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(restaurants)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Restaurant>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let restaurant: Option<Restaurant> = self.base.db().select(thing).await?;
        Ok(restaurant)
    }

    /// Active restaurant by slug — the customer entry path
    pub async fn find_active_by_slug(&self, slug: &str) -> RepoResult<Option<Restaurant>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE slug = $slug AND is_active = true LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?;
        let restaurants: Vec<Restaurant> = result.take(0)?;
        Ok(restaurants.into_iter().next())
    }

    pub async fn find_by_subdomain(&self, subdomain: &str) -> RepoResult<Option<Restaurant>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM restaurant WHERE subdomain = $subdomain LIMIT 1")
            .bind(("subdomain", subdomain.to_string()))
            .await?;
        let restaurants: Vec<Restaurant> = result.take(0)?;
        Ok(restaurants.into_iter().next())
    }

    /// Create a new restaurant
    ///
    /// Slug and subdomain uniqueness is enforced by the unique indexes and
    /// surfaces as [`RepoError::Duplicate`].
    pub async fn create(&self, mut restaurant: Restaurant) -> RepoResult<Restaurant> {
        restaurant.id = None;
        let created: Option<Restaurant> =
            self.base.db().create(TABLE).content(restaurant).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create restaurant".to_string()))
    }

    /// Replace a restaurant record
    pub async fn update(&self, id: &str, mut restaurant: Restaurant) -> RepoResult<Restaurant> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        restaurant.id = None;
        restaurant.updated_at = now_millis();
        let updated: Option<Restaurant> = self.base.db().update(thing).content(restaurant).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Restaurant {} not found", id)))
    }

    /// Hard delete; callers must check [`Self::has_orders`] first
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let _: Option<Restaurant> = self.base.db().delete(thing).await?;
        Ok(true)
    }

    /// Whether any order references this restaurant
    pub async fn has_orders(&self, id: &str) -> RepoResult<bool> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            count: i64,
        }
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM order WHERE restaurant = $restaurant GROUP ALL")
            .bind(("restaurant", id.to_string()))
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.first().map(|r| r.count > 0).unwrap_or(false))
    }
}
