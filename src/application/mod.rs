//! Application layer services implementing the workflows.
//!
//! Services consume repository and cache traits and provide a clean API for
//! HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::ShortenService`] - Short token creation
//! - [`services::ResolveService`] - Cache-aside token resolution
//! - [`services::InfoService`] - Record metadata lookup
//! - [`services::ExpirySweeper`] - Removal of long-expired records

pub mod services;
