//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde for
//! serialization. Every key is optional; missing keys take built-in defaults.

use crate::render::{DEFAULT_DOT_COMMAND, OutputType, RenderOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Namespace visualized when `--namespace` is not given
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// Output path when `--outfile` is not given
    #[serde(default = "default_out_file")]
    pub out_file: PathBuf,

    /// Output type when `--type` is not given (dot, ps, pdf, svg, png, gif, jpg)
    #[serde(default = "default_out_type")]
    pub out_type: String,

    /// Directory holding `<kind>-128.png` icons
    /// Defaults to `icons` next to the executable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icons_dir: Option<PathBuf>,

    /// Layout tool settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Layout tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    /// Program name or path of Graphviz `dot`
    #[serde(default = "default_dot_command")]
    pub dot_command: String,

    /// Seconds before a layout run is killed
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

// Default value functions
fn default_namespace() -> String {
    "default".to_string()
}

fn default_out_file() -> PathBuf {
    PathBuf::from("k8sviz.out")
}

fn default_out_type() -> String {
    "dot".to_string()
}

fn default_dot_command() -> String {
    DEFAULT_DOT_COMMAND.to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            out_file: default_out_file(),
            out_type: default_out_type(),
            icons_dir: None,
            render: RenderConfig::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dot_command: default_dot_command(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Config {
    /// Parsed `outType`
    pub fn output_type(&self) -> Result<OutputType, crate::error::RenderError> {
        self.out_type.parse()
    }
}

impl RenderConfig {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            dot_command: self.dot_command.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}
