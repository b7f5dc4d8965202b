pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use services::cache_service::{CacheService, RecordSource};
pub use services::sheet_service::SheetFetcher;
