//! Configuration module with per-concern sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing and refresh-secret lifetimes
//! - `cache` - Redis version-cache configuration
//! - `database` - Database connection and pool configuration
//! - `server` - HTTP server configuration

pub mod auth;
pub mod cache;
pub mod database;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Version-cache configuration
    pub cache: CacheConfig,

    /// Authentication configuration
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            auth: AuthConfig::from_env(),
        }
    }
}
