//! Repository Module
//!
//! Per-entity CRUD over SurrealDB. Every read/write on tenant-owned
//! entities takes a [`TenantScope`] so cross-tenant access uniformly
//! resolves to `NotFound`.

pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod restaurant;
pub mod user;

// Re-exports
pub use dining_table::DiningTableRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;
pub use restaurant::RestaurantRepository;
pub use user::UserRepository;

use crate::auth::CurrentUser;
use shared::{AppError, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations surface as plain query errors; keep the
        // index name visible so callers can react to specific conflicts.
        if msg.contains("already contains") || msg.contains("uniq_") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => AppError::with_message(ErrorCode::ValidationFailed, msg),
            RepoError::Database(msg) => AppError::with_message(ErrorCode::DatabaseError, msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Tenant filter applied to every scoped query
///
/// Derived from the caller's identity: superadmin reads globally, every
/// other role is confined to its own restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantScope {
    /// No tenant filtering (superadmin)
    Global,
    /// Confined to one restaurant, "restaurant:key" form
    Restaurant(String),
}

impl TenantScope {
    pub fn from_user(user: &CurrentUser) -> Self {
        if user.is_superadmin() {
            TenantScope::Global
        } else {
            // Non-superadmin users always carry a tenant binding; an empty
            // one scopes to nothing rather than everything.
            TenantScope::Restaurant(user.restaurant.clone().unwrap_or_default())
        }
    }

    /// Whether an entity owned by `restaurant` is visible in this scope
    pub fn permits(&self, restaurant: &str) -> bool {
        match self {
            TenantScope::Global => true,
            TenantScope::Restaurant(own) => !own.is_empty() && own == restaurant,
        }
    }

    /// The concrete restaurant id, if scoped
    pub fn restaurant_id(&self) -> Option<&str> {
        match self {
            TenantScope::Global => None,
            TenantScope::Restaurant(id) => Some(id.as_str()),
        }
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Role;

    fn user(role: Role, restaurant: Option<&str>) -> CurrentUser {
        CurrentUser {
            id: "user:u1".to_string(),
            username: "u1".to_string(),
            name: "U1".to_string(),
            role,
            restaurant: restaurant.map(|r| r.to_string()),
        }
    }

    #[test]
    fn test_superadmin_scope_is_global() {
        let scope = TenantScope::from_user(&user(Role::SuperAdmin, None));
        assert_eq!(scope, TenantScope::Global);
        assert!(scope.permits("restaurant:any"));
        assert!(scope.restaurant_id().is_none());
    }

    #[test]
    fn test_tenant_scope_confines() {
        let scope = TenantScope::from_user(&user(Role::Staff, Some("restaurant:r1")));
        assert!(scope.permits("restaurant:r1"));
        assert!(!scope.permits("restaurant:r2"));
        assert_eq!(scope.restaurant_id(), Some("restaurant:r1"));
    }

    #[test]
    fn test_missing_tenant_binding_scopes_to_nothing() {
        let scope = TenantScope::from_user(&user(Role::Admin, None));
        assert!(!scope.permits("restaurant:r1"));
        assert!(!scope.permits(""));
        assert_eq!(scope, TenantScope::Restaurant(String::new()));
    }

    #[test]
    fn test_duplicate_detection_from_db_error() {
        let err = RepoError::Database("x".into());
        assert!(matches!(err, RepoError::Database(_)));

        let app: AppError = RepoError::Duplicate("order number taken".into()).into();
        assert_eq!(app.code, ErrorCode::AlreadyExists);
        let app: AppError = RepoError::NotFound("Order".into()).into();
        assert_eq!(app.code, ErrorCode::NotFound);
    }
}
