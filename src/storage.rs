pub mod local;
pub use local::{FileStore, KeyValueStore, MemoryStore};
pub mod draft_store;
pub use draft_store::DraftStore;
