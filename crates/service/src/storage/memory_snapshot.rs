use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::SnapshotStore;
use crate::errors::ServiceError;

/// In-memory snapshot for transient stores and tests.
///
/// Counts exports and can be switched into a failing mode to exercise
/// persistence error paths.
pub struct MemorySnapshot<T> {
    items: Mutex<Vec<T>>,
    exports: AtomicUsize,
    fail_exports: AtomicBool,
}

impl<T: Clone> MemorySnapshot<T> {
    pub fn new() -> Self {
        Self { items: Mutex::new(Vec::new()), exports: AtomicUsize::new(0), fail_exports: AtomicBool::new(false) }
    }

    /// Seed the snapshot with existing records.
    pub fn with_items(items: Vec<T>) -> Self {
        Self { items: Mutex::new(items), ..Self::new() }
    }

    /// Number of successful exports so far.
    pub fn exports(&self) -> usize {
        self.exports.load(Ordering::SeqCst)
    }

    pub fn set_fail_exports(&self, fail: bool) {
        self.fail_exports.store(fail, Ordering::SeqCst);
    }

    /// Last exported (or seeded) collection.
    pub async fn items(&self) -> Vec<T> {
        self.items.lock().await.clone()
    }
}

impl<T: Clone> Default for MemorySnapshot<T> {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl<T> SnapshotStore<T> for MemorySnapshot<T>
where
    T: Clone + Send + Sync,
{
    async fn import_json(&self) -> Result<Vec<T>, ServiceError> {
        Ok(self.items.lock().await.clone())
    }

    async fn export_json(&self, items: &[T]) -> Result<(), ServiceError> {
        if self.fail_exports.load(Ordering::SeqCst) {
            return Err(ServiceError::Persistence("snapshot export disabled".into()));
        }
        *self.items.lock().await = items.to_vec();
        self.exports.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_exports() -> Result<(), ServiceError> {
        let snap = MemorySnapshot::with_items(vec![1, 2]);
        assert_eq!(snap.import_json().await?, vec![1, 2]);
        snap.export_json(&[3]).await?;
        assert_eq!(snap.exports(), 1);
        assert_eq!(snap.items().await, vec![3]);
        Ok(())
    }

    #[tokio::test]
    async fn failing_mode_leaves_items_untouched() {
        let snap = MemorySnapshot::with_items(vec![1]);
        snap.set_fail_exports(true);
        assert!(matches!(snap.export_json(&[9]).await, Err(ServiceError::Persistence(_))));
        assert_eq!(snap.exports(), 0);
        assert_eq!(snap.items().await, vec![1]);
    }
}
