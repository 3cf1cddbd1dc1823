//! Storage abstractions for service layer
//!
//! A snapshot store holds the whole collection as one document: it is read
//! once when a store opens and rewritten in full after each mutation.

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod json_snapshot;
pub mod memory_snapshot;

pub use json_snapshot::JsonFileSnapshot;
pub use memory_snapshot::MemorySnapshot;

/// Full-collection persistence collaborator.
#[async_trait]
pub trait SnapshotStore<T>: Send + Sync {
    /// Load every stored record.
    async fn import_json(&self) -> Result<Vec<T>, ServiceError>;
    /// Replace the stored collection with `items`.
    async fn export_json(&self, items: &[T]) -> Result<(), ServiceError>;
}
