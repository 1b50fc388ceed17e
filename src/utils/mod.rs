//! Utility functions shared across layers.
//!
//! - [`token_generator`] - Short token generation
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod token_generator;
