//! User Repository
//!
//! Staff/admin accounts plus the phone-identified customer variant.

use super::{BaseRepository, RepoError, RepoResult, TenantScope};
use crate::db::models::User;
use crate::utils::now_millis;
use shared::Role;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Global username lookup — the login path
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn find_by_id(&self, scope: &TenantScope, id: &str) -> RepoResult<Option<User>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let user: Option<User> = self.base.db().select(thing).await?;
        // Superadmins have no tenant binding and are only visible globally
        Ok(user.filter(|u| match &u.restaurant {
            Some(restaurant) => scope.permits(restaurant),
            None => *scope == TenantScope::Global,
        }))
    }

    /// Staff accounts of one restaurant
    pub async fn find_staff(&self, restaurant: &str) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query(
                "SELECT * FROM user WHERE restaurant = $restaurant AND role = $role \
                 ORDER BY username",
            )
            .bind(("restaurant", restaurant.to_string()))
            .bind(("role", Role::Staff))
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Create a user
    ///
    /// Username uniqueness is global and enforced by the unique index.
    pub async fn create(&self, mut user: User) -> RepoResult<User> {
        user.id = None;
        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    pub async fn update(&self, scope: &TenantScope, id: &str, mut user: User) -> RepoResult<User> {
        let existing = self
            .find_by_id(scope, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        // Role and tenant binding are immutable through this path
        user.role = existing.role;
        user.restaurant = existing.restaurant;
        user.id = None;
        user.updated_at = now_millis();

        let updated: Option<User> = self.base.db().update(thing).content(user).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Stamp a successful login
    pub async fn touch_last_login(&self, id: &str) -> RepoResult<()> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET last_login = $now")
            .bind(("thing", thing))
            .bind(("now", now_millis()))
            .await?
            .check()?;
        Ok(())
    }

    /// Find a restaurant's customer by phone
    pub async fn find_customer_by_phone(
        &self,
        restaurant: &str,
        phone: &str,
    ) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM user WHERE restaurant = $restaurant AND phone = $phone \
                 AND role = $role LIMIT 1",
            )
            .bind(("restaurant", restaurant.to_string()))
            .bind(("phone", phone.to_string()))
            .bind(("role", Role::Customer))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Find-or-create a customer by phone within one restaurant
    ///
    /// Never duplicates a phone within a restaurant. The derived username
    /// can collide with another tenant's customer for the same phone; in
    /// that case a restaurant-qualified username is used instead.
    pub async fn find_or_create_customer(
        &self,
        restaurant: &str,
        phone: &str,
    ) -> RepoResult<User> {
        if let Some(customer) = self.find_customer_by_phone(restaurant, phone).await? {
            return Ok(customer);
        }

        let now = now_millis();
        let customer = User {
            id: None,
            username: User::customer_username(phone),
            password_hash: None,
            name: User::customer_display_name(phone),
            email: None,
            phone: Some(phone.to_string()),
            role: Role::Customer,
            restaurant: Some(restaurant.to_string()),
            is_active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        };

        match self.create(customer.clone()).await {
            Ok(created) => Ok(created),
            Err(RepoError::Duplicate(_)) => {
                // Lost a race with a concurrent checkout, or the bare
                // username belongs to another restaurant's customer.
                if let Some(existing) = self.find_customer_by_phone(restaurant, phone).await? {
                    return Ok(existing);
                }
                let restaurant_key = restaurant.rsplit(':').next().unwrap_or(restaurant);
                let qualified = User {
                    username: format!("customer_{}_{}", restaurant_key, phone),
                    ..customer
                };
                self.create(qualified).await
            }
            Err(e) => Err(e),
        }
    }

    /// Soft-disable or re-enable an account
    pub async fn set_active(
        &self,
        scope: &TenantScope,
        id: &str,
        is_active: bool,
    ) -> RepoResult<User> {
        let user = self
            .find_by_id(scope, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET is_active = $is_active, updated_at = $now")
            .bind(("thing", thing))
            .bind(("is_active", is_active))
            .bind(("now", now_millis()))
            .await?
            .check()?;
        Ok(User { is_active, ..user })
    }
}
