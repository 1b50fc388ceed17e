//! HTTP middleware for request processing and protection.

pub mod api_key;
pub mod tracing;
