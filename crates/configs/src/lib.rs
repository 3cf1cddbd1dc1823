use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default = "default_persistent")]
    pub persistent: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), file_name: default_file_name(), persistent: default_persistent() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_principal")]
    pub principal: String,
}

impl Default for IdentityConfig {
    fn default() -> Self { Self { principal: default_principal() } }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { format: default_log_format() } }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub default_size: usize,
}

impl Default for ListingConfig {
    fn default() -> Self { Self { default_size: default_page_size() } }
}

fn default_data_dir() -> String { "data".into() }
fn default_file_name() -> String { "gifts.json".into() }
fn default_persistent() -> bool { true }
fn default_principal() -> String { "DUMMY_USER".into() }
fn default_log_format() -> String { "compact".into() }
fn default_page_size() -> usize { 25 }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load from `CONFIG_PATH` (or `config.toml`), falling back to defaults
    /// when the file does not exist, then apply env overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        Self::load_and_validate_from(&config_path())
    }

    /// Like [`AppConfig::load_and_validate`] for an explicit path. Only a
    /// missing file falls back to defaults; unreadable, malformed or invalid
    /// files are errors.
    pub fn load_and_validate_from(path: &str) -> Result<Self> {
        let mut cfg = if std::path::Path::new(path).exists() {
            load_from_file(path)?
        } else {
            AppConfig::default()
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Override values from `GIFTS_*` variables resolved through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("GIFTS_DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Some(flag) = lookup("GIFTS_PERSISTENT") {
            match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.storage.persistent = true,
                "0" | "false" | "no" | "off" => self.storage.persistent = false,
                _ => {}
            }
        }
        if let Some(principal) = lookup("GIFTS_PRINCIPAL") {
            self.identity.principal = principal;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize()?;
        if self.identity.principal.trim().is_empty() {
            self.identity.principal = default_principal();
        }
        if self.listing.default_size == 0 {
            return Err(anyhow!("listing.default_size must be >= 1"));
        }
        Ok(())
    }
}

impl StorageConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
        let name = self.file_name.trim();
        if name.is_empty() {
            self.file_name = default_file_name();
        } else if name.contains('/') || name.contains('\\') {
            return Err(anyhow!("storage.file_name must not contain path separators"));
        }
        Ok(())
    }

    /// Full path of the JSON snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.file_name)
    }
}
