//! Business logic services for the application layer.

pub mod expiry_sweeper;
pub mod info_service;
mod priming;
pub mod resolve_service;
pub mod shorten_service;

pub use expiry_sweeper::ExpirySweeper;
pub use info_service::InfoService;
pub use resolve_service::ResolveService;
pub use shorten_service::ShortenService;
