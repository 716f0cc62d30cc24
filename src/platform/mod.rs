//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (held movement keys)
//! - Storage (LocalStorage on web)

pub mod input;
pub mod storage;

pub use input::{InputTracker, MoveKey};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use storage::{KeyValueStore, MemoryStore, StorageError};
