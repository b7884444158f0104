//! Configuration management for stroke2font

mod resolved;
pub mod schema;

pub use resolved::{BuildConfig, EffectiveOptions, Overrides, SCRATCH_DIR_NAME};
pub use schema::Config;

use crate::error::{StrokeError, StrokeResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Name of the project-local config file
pub const LOCAL_CONFIG_NAME: &str = "stroke2font.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a config manager for a specific file
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Find `stroke2font.toml` in `dir`
    pub fn find_local_config(dir: &Path) -> Option<PathBuf> {
        let candidate = dir.join(LOCAL_CONFIG_NAME);
        candidate.is_file().then_some(candidate)
    }

    /// Load the configuration file.
    ///
    /// Relative paths inside the file are resolved against the directory
    /// containing it.
    pub async fn load(&self) -> StrokeResult<Config> {
        if !self.config_path.exists() {
            return Err(StrokeError::ConfigNotFound(self.config_path.clone()));
        }

        let mut config = self.load_from_file(&self.config_path).await?;
        if let Some(base) = self.config_path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse a configuration file without resolving paths
    pub async fn load_from_file(&self, path: &Path) -> StrokeResult<Config> {
        debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| StrokeError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| StrokeError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}
