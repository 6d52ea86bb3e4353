//! Shared configuration and common types for the SessionGate server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - API response envelopes and error codes

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, CacheConfig, DatabaseConfig, JwtConfig, ServerConfig};
pub use types::{error_codes, ApiResponse, ErrorResponse};
