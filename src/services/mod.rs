// Service exports
pub mod catalog;
pub mod fixtures;
pub mod kv;
pub mod preferences;
pub mod sessions;

pub use catalog::{Catalog, MessagingError};
pub use fixtures::{FixtureData, FixtureError};
pub use kv::{FileKvStore, KeyValueStore, KvError, MemoryKvStore};
pub use preferences::{PreferenceKey, PreferenceStore, DEFAULT_NAMESPACE};
pub use sessions::SessionManager;
