pub mod cache;
pub mod record;

pub use cache::CachedSnapshot;
pub use record::Record;
