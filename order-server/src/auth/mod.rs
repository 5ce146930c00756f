//! Authentication and authorization
//!
//! JWT tokens for the password-authenticated roles, Argon2 password hashing,
//! and middleware wiring the closed role/permission model into axum.

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentUserExt, require_auth, require_permission};
pub use password::{hash_password, verify_password};
