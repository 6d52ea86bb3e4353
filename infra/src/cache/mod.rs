//! Cache access: retrying Redis client and the version cache

pub mod redis_client;
pub mod version_cache;

pub use redis_client::RedisClient;
pub use version_cache::RedisVersionCache;
