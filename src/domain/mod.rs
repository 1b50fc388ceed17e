//! Domain layer containing business entities and contracts.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Durable store trait definitions
//! - [`click_event`] - Deferred click model
//! - [`click_recorder`] - Best-effort click recording seam
//! - [`click_worker`] - Background click processing
//!
//! # Click Processing Flow
//!
//! 1. A redirect is answered from the cache
//! 2. [`click_recorder::QueuedClickRecorder`] pushes a [`click_event::ClickEvent`]
//! 3. [`click_worker::run_click_worker`] applies the increment in the store

pub mod click_event;
pub mod click_recorder;
pub mod click_worker;
pub mod entities;
pub mod repositories;
