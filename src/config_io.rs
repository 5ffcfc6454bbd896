//! Runtime configuration I/O operations.
//!
//! Directory detection and layered config loading. Layers, lowest to highest
//! precedence: built-in defaults, the user file, an explicit `--config` file.

use crate::config::{Config, ConfigError};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Directories the shell reads from.
#[derive(Debug, Clone)]
pub struct DirectoryContext {
    /// Directory holding `config.json` (typically `~/.config/folio`)
    pub config_dir: PathBuf,
}

impl DirectoryContext {
    /// Resolve the platform config directory.
    pub fn from_system() -> Self {
        let config_dir = dirs::config_dir()
            .map(|d| d.join("folio"))
            .unwrap_or_else(|| std::env::temp_dir().join("folio-config"));
        Self { config_dir }
    }

    /// Use an arbitrary directory, for tests.
    pub fn for_testing(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }
}

/// Loads and merges the configuration layers.
pub struct ConfigResolver {
    dir_context: DirectoryContext,
    explicit_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(dir_context: DirectoryContext, explicit_path: Option<PathBuf>) -> Self {
        Self {
            dir_context,
            explicit_path,
        }
    }

    /// Merge all layers into a validated Config.
    ///
    /// A missing user file is skipped; a missing explicit file is an error.
    pub fn resolve(&self) -> Result<Config, ConfigError> {
        let mut merged = Value::Object(Default::default());

        let user_path = self.dir_context.config_path();
        if user_path.exists() {
            tracing::debug!("Loaded user config layer from {}", user_path.display());
            merge_json(&mut merged, load_layer(&user_path)?);
        }

        if let Some(path) = &self.explicit_path {
            tracing::debug!("Loaded explicit config layer from {}", path.display());
            merge_json(&mut merged, load_layer(path)?);
        }

        let config: Config = serde_json::from_value(merged)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

fn load_layer(path: &Path) -> Result<Value, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

    let value: Value = serde_json::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

    if !value.is_object() {
        return Err(ConfigError::ParseError(format!(
            "{}: top level must be a JSON object",
            path.display()
        )));
    }

    Ok(value)
}

/// Recursively overlay `overlay` onto `base`; objects merge, everything else replaces.
fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
