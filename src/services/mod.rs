// Service exports
pub mod cache;
pub mod loader;
pub mod store;

pub use cache::{CacheKey, CacheManager, CacheStats};
pub use loader::{load_entities, load_record_sets, parse_entities, LoadError, RecordSets};
pub use store::SnapshotStore;
