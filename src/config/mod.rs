//! Configuration system for k8sviz
//!
//! Built-in defaults, an optional YAML file and environment overrides, in
//! increasing order of precedence.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, RenderConfig};
