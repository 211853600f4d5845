//! Persistence adapters: the tokio file system and an in-memory store.

mod file_system;
mod memory_store;

pub use file_system::TokioFileSystem;
pub use memory_store::InMemoryCollectionStore;
