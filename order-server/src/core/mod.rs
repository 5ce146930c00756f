//! Core server components
//!
//! - [`Config`]: environment-driven configuration
//! - [`ServerState`]: shared service handles for handlers
//! - [`Server`]: HTTP server lifecycle

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
