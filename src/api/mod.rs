pub mod auth;
pub mod error;
pub mod sheets;

pub use error::FetchError;
