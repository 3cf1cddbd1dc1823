//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory exists, creating it when missing.
pub async fn ensure_data_dir(data_dir: &Path) -> anyhow::Result<()> {
    match tokio::fs::metadata(data_dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("{} exists but is not a directory", data_dir.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(data_dir = %data_dir.display(), "data directory not found; creating it");
            tokio::fs::create_dir_all(data_dir)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
            info!(data_dir = %data_dir.display(), "data directory created");
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("cannot inspect {}: {e}", data_dir.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("gifts_env_{}", uuid::Uuid::new_v4()));
        ensure_data_dir(&dir).await?;
        assert!(tokio::fs::metadata(&dir).await?.is_dir());
        // second call is a no-op
        ensure_data_dir(&dir).await?;
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn inspection_errors_are_not_treated_as_missing() -> anyhow::Result<()> {
        // a path below a regular file fails with NotADirectory, not NotFound
        let file = std::env::temp_dir().join(format!("gifts_env_{}.txt", uuid::Uuid::new_v4()));
        tokio::fs::write(&file, b"x").await?;
        let nested = file.join("data");
        let err = ensure_data_dir(&nested).await.unwrap_err();
        assert!(err.to_string().contains("cannot inspect"), "unexpected error: {err}");
        let _ = tokio::fs::remove_file(&file).await;
        Ok(())
    }

    #[tokio::test]
    async fn rejects_plain_file() -> anyhow::Result<()> {
        let file = std::env::temp_dir().join(format!("gifts_env_{}.txt", uuid::Uuid::new_v4()));
        tokio::fs::write(&file, b"x").await?;
        assert!(ensure_data_dir(&file).await.is_err());
        let _ = tokio::fs::remove_file(&file).await;
        Ok(())
    }
}
