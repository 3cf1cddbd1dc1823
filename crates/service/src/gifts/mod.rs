//! Gift resource: the service abstraction callers program against.

use async_trait::async_trait;

use crate::errors::ServiceError;
use models::{Gift, GiftInput};

/// Trait abstraction for gift storage (list/create/read/update/delete).
/// Implementations can be file-backed, transient, or remote.
#[async_trait]
pub trait GiftService: Send + Sync {
    async fn list(&self, query_type: Option<&str>, query: Option<&str>, position: usize, size: usize) -> Vec<Gift>;
    async fn create(&self, input: GiftInput) -> Result<Gift, ServiceError>;
    async fn read(&self, id: &str) -> Result<Gift, ServiceError>;
    async fn update(&self, id: &str, input: GiftInput) -> Result<Gift, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
