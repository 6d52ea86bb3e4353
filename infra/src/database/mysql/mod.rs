//! MySQL repository implementations

mod session_store_impl;

pub use session_store_impl::MySqlSessionStore;
