//! Security Module
//!
//! Response hardening applied to every route.

pub mod middleware;

pub use middleware::security_headers_middleware;
