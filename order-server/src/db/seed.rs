//! Bootstrap data
//!
//! Ensures a superadmin account exists so a fresh deployment can be
//! administered at all.

use crate::auth::hash_password;
use crate::core::Config;
use crate::db::models::User;
use crate::db::repository::UserRepository;
use crate::utils::now_millis;
use shared::{AppError, AppResult, Role};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Create the superadmin account if it does not exist yet
pub async fn ensure_superadmin(db: Surreal<Db>, config: &Config) -> AppResult<()> {
    let repo = UserRepository::new(db);
    if repo
        .find_by_username(&config.superadmin_username)
        .await
        .map_err(AppError::from)?
        .is_some()
    {
        return Ok(());
    }

    let password = match &config.superadmin_password {
        Some(p) => p.clone(),
        None => {
            if config.is_production() {
                return Err(AppError::with_message(
                    shared::ErrorCode::ConfigError,
                    "SUPERADMIN_PASSWORD must be set in production",
                ));
            }
            let generated = crate::auth::jwt::generate_secure_jwt_secret();
            let generated = generated[..16].to_string();
            tracing::warn!(
                username = %config.superadmin_username,
                password = %generated,
                "SUPERADMIN_PASSWORD not set, generated a development password"
            );
            generated
        }
    };

    let now = now_millis();
    repo.create(User {
        id: None,
        username: config.superadmin_username.clone(),
        password_hash: Some(hash_password(&password)?),
        name: "Super Admin".to_string(),
        email: None,
        phone: None,
        role: Role::SuperAdmin,
        restaurant: None,
        is_active: true,
        last_login: None,
        created_at: now,
        updated_at: now,
    })
    .await
    .map_err(AppError::from)?;

    tracing::info!(username = %config.superadmin_username, "Superadmin account created");
    Ok(())
}
