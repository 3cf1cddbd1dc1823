use std::{marker::PhantomData, path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::debug;

use super::SnapshotStore;
use crate::errors::ServiceError;

/// JSON file holding the collection as a single array.
pub struct JsonFileSnapshot<T> {
    file_path: PathBuf,
    // one export at a time: they share the temp file
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileSnapshot<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open the snapshot at `path`. Creates the file with an empty array if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        if fs::metadata(&file_path).await.is_err() {
            fs::write(&file_path, b"[]").await.map_err(io_err)?;
        }
        Ok(Arc::new(Self { file_path, write_lock: Mutex::new(()), _marker: PhantomData }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl<T> SnapshotStore<T> for JsonFileSnapshot<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn import_json(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_err(e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            ServiceError::Persistence(format!("{}: {e}", self.file_path.display()))
        })
    }

    async fn export_json(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items).map_err(|e| ServiceError::Persistence(e.to_string()))?;
        // rename over the target so readers never see a half-written file
        let tmp = self.tmp_path();
        let _guard = self.write_lock.lock().await;
        fs::write(&tmp, data).await.map_err(io_err)?;
        fs::rename(&tmp, &self.file_path).await.map_err(io_err)?;
        debug!(path = %self.file_path.display(), count = items.len(), "snapshot exported");
        Ok(())
    }
}

fn io_err(e: std::io::Error) -> ServiceError {
    ServiceError::Persistence(e.to_string())
}
