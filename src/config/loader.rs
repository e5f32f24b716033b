//! Target configuration loader.
//!
//! This module provides functionality to load the target configuration
//! (host, CDN blocks, resolver list) from JSON files or fall back to the
//! built-in tables.

use crate::config::targets::TargetConfig;
use crate::error::Result;
use std::path::Path;

/// Target configuration loader.
///
/// Provides methods to load the target configuration from an explicit
/// file, the user config directory, or the built-in defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a target configuration from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let config = ConfigLoader::load_from_file("targets.json")?;
    /// println!("host: {}", config.host);
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<TargetConfig> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: TargetConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// Lookup order:
    /// 1. The explicit `file` argument, if given (a failure here is an error)
    /// 2. `$CONFIG_DIR/edgemap/targets.json`
    /// 3. `targets.json` in the current directory
    /// 4. The built-in tables
    ///
    /// # Errors
    ///
    /// Returns an error only when an explicitly named file cannot be
    /// loaded; missing default-location files silently fall through.
    pub fn resolve<P: AsRef<Path>>(file: Option<P>) -> Result<TargetConfig> {
        if let Some(path) = file {
            let path = path.as_ref();
            return Self::load_from_file(path).map_err(|e| {
                crate::error::Error::config(format!(
                    "cannot load targets file {}: {e}",
                    path.display()
                ))
            });
        }

        let default_path = Self::config_dir().join("targets.json");
        if let Ok(config) = Self::load_from_file(&default_path) {
            tracing::debug!(path = %default_path.display(), "loaded targets from config dir");
            return Ok(config);
        }

        if let Ok(config) = Self::load_from_file("targets.json") {
            tracing::debug!("loaded targets from current directory");
            return Ok(config);
        }

        Ok(TargetConfig::builtin())
    }

    /// Get the config directory path.
    #[must_use]
    pub fn config_dir() -> std::path::PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("edgemap")
    }
}
