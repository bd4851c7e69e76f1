//! Configuration loading
//!
//! Handles loading configuration from multiple sources according to
//! precedence rules. Command-line flags are applied on top by the caller.

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Overrides `defaultNamespace`
pub const NAMESPACE_ENV: &str = "K8SVIZ_NAMESPACE";
/// Overrides `iconsDir`
pub const ICONS_DIR_ENV: &str = "K8SVIZ_ICONS_DIR";
/// Overrides `render.dotCommand`
pub const DOT_COMMAND_ENV: &str = "K8SVIZ_DOT";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers applied
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Config file (`path`, or the root config if it exists)
    /// 3. Built-in defaults
    ///
    /// An explicitly given `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config = match path {
            Some(path) => Self::load_file(path)?,
            None => {
                let root = paths::root_config_path();
                if root.exists() {
                    Self::load_file(&root)?
                } else {
                    tracing::debug!("No config file at {}, using defaults", root.display());
                    Self::load_defaults()
                }
            }
        };

        Ok(Self::apply_env_overrides(config, |key| {
            std::env::var(key).ok()
        }))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        // An empty file is a valid, empty configuration
        if contents.trim().is_empty() {
            return Ok(Self::load_defaults());
        }

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!("Loaded config file {}", path.display());
        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides read through `lookup`
    fn apply_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(namespace) = lookup(NAMESPACE_ENV) {
            config.default_namespace = namespace;
        }

        if let Some(icons_dir) = lookup(ICONS_DIR_ENV) {
            config.icons_dir = Some(PathBuf::from(icons_dir));
        }

        if let Some(dot) = lookup(DOT_COMMAND_ENV) {
            config.render.dot_command = dot;
        }

        config
    }
}
