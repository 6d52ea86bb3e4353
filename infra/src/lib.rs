//! # Infrastructure Layer
//!
//! Concrete implementations of the core capability traits:
//! - **Database**: MySQL session store using SQLx
//! - **Cache**: Redis version cache behind a retrying client

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and the version cache
pub mod cache;

pub use cache::{RedisClient, RedisVersionCache};
pub use database::{DatabasePool, MySqlSessionStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
