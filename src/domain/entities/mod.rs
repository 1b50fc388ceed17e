//! Core domain entities.
//!
//! - [`UrlRecord`] - A persisted short token to original URL mapping
//! - [`NewUrlRecord`] - Input for creating a record

pub mod url_record;

pub use url_record::{DEFAULT_VALIDITY_WINDOW, NewUrlRecord, UrlRecord};
