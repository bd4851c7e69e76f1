//! CLI argument parsing and the visualize run
//!
//! Flags override configuration values, which override built-in defaults.

mod logging;

pub use logging::init_logging;

use crate::config::{Config, ConfigLoader, paths};
use crate::graph::{GraphOptions, build_graph};
use crate::kube::{KubeLister, ListQuery, create_client, ensure_namespace, fetch_snapshot};
use crate::render::{OutputType, RenderOptions, write_graph};
use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::PossibleValuesParser;
use std::path::PathBuf;

/// Error text of list calls against API groups missing on old clusters
const NOT_FOUND_TEXT: &str = "the server could not find the requested resource";

/// Printed after errors matching [`NOT_FOUND_TEXT`]
pub const OLD_CLUSTER_HINT: &str = "k8sviz 0.3.3 or later only support k8s 1.21 or later. \
If you are using older k8s cluster, try k8sviz 0.3.2 or earlier.";

/// k8sviz - Generate Graphviz diagrams of Kubernetes namespace resources
#[derive(Parser, Debug, Default)]
#[command(name = "k8sviz")]
#[command(version, about = "Generate Graphviz diagrams of the workload resources in a Kubernetes namespace", long_about = None)]
pub struct Args {
    /// Namespace to visualize [default: default]
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Output file [default: k8sviz.out]
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,

    /// Type of output [default: dot]
    #[arg(short = 't', long = "type", value_parser = PossibleValuesParser::new(["dot", "ps", "pdf", "svg", "png", "gif", "jpg"]))]
    pub output_type: Option<String>,

    /// Label selector applied to every list call (ex. app=web,tier!=db)
    #[arg(short = 'l', long)]
    pub selector: Option<String>,

    /// Field selector applied to every list call (ex. status.phase=Running)
    #[arg(long)]
    pub field_selector: Option<String>,

    /// Path to the kubeconfig file
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Directory holding <kind>-128.png icons [default: icons next to the executable]
    #[arg(long)]
    pub icons_dir: Option<PathBuf>,

    /// Configuration file [default: <config dir>/k8sviz/config.yaml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'd')]
    pub debug: bool,
}

/// Everything a run needs, after flags and configuration are merged
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub namespace: String,
    pub out_file: PathBuf,
    pub output_type: OutputType,
    pub query: ListQuery,
    pub kubeconfig: Option<PathBuf>,
    pub graph: GraphOptions,
    pub render: RenderOptions,
}

impl Args {
    /// Merge flags over `config`
    pub fn settings(&self, config: &Config) -> Result<Settings> {
        let output_type: OutputType = self
            .output_type
            .as_deref()
            .unwrap_or(config.out_type.as_str())
            .parse()
            .context("Invalid output type")?;

        let icons_dir = self
            .icons_dir
            .clone()
            .or_else(|| config.icons_dir.clone())
            .unwrap_or_else(paths::default_icons_dir);

        Ok(Settings {
            namespace: self
                .namespace
                .clone()
                .unwrap_or_else(|| config.default_namespace.clone()),
            out_file: self
                .outfile
                .clone()
                .unwrap_or_else(|| config.out_file.clone()),
            output_type,
            query: ListQuery {
                label_selector: self.selector.clone(),
                field_selector: self.field_selector.clone(),
            },
            kubeconfig: self.kubeconfig.clone(),
            graph: GraphOptions { icons_dir },
            render: config.render.options(),
        })
    }
}

/// Load configuration, fetch the namespace and write the graph
pub async fn run(args: &Args) -> Result<()> {
    let config = ConfigLoader::load(args.config.as_deref()).context("Failed to load configuration")?;
    let settings = args.settings(&config)?;
    tracing::debug!("Settings: {:?}", settings);

    let client = create_client(settings.kubeconfig.as_deref()).await?;
    ensure_namespace(&client, &settings.namespace).await?;

    let lister = KubeLister::new(client);
    let snapshot = fetch_snapshot(&lister, &settings.namespace, &settings.query)
        .await
        .context("Failed to get Kubernetes resources")?;

    let graph = build_graph(&snapshot, &settings.graph);
    write_graph(
        &graph,
        settings.output_type,
        &settings.out_file,
        &settings.render,
    )
    .await
    .with_context(|| format!("Failed to output {}", settings.out_file.display()))?;

    Ok(())
}

/// Hint for errors caused by a cluster older than the supported API versions
pub fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    err.chain()
        .any(|cause| cause.to_string().contains(NOT_FOUND_TEXT))
        .then_some(OLD_CLUSTER_HINT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderFormat;
    use std::time::Duration;

    #[test]
    fn test_flags_parse() {
        let args = Args::try_parse_from([
            "k8sviz", "-n", "ns1", "-t", "png", "-o", "out.png", "-l", "app=web", "-d",
        ])
        .unwrap();
        assert_eq!(args.namespace.as_deref(), Some("ns1"));
        assert_eq!(args.output_type.as_deref(), Some("png"));
        assert_eq!(args.outfile, Some(PathBuf::from("out.png")));
        assert_eq!(args.selector.as_deref(), Some("app=web"));
        assert!(args.debug);
    }

    #[test]
    fn test_unknown_type_is_rejected_by_parser() {
        assert!(Args::try_parse_from(["k8sviz", "--type", "bmp"]).is_err());
    }

    #[test]
    fn test_settings_from_defaults() {
        let args = Args::try_parse_from(["k8sviz"]).unwrap();
        let settings = args.settings(&Config::default()).unwrap();

        assert_eq!(settings.namespace, "default");
        assert_eq!(settings.out_file, PathBuf::from("k8sviz.out"));
        assert_eq!(settings.output_type, OutputType::Dot);
        assert_eq!(settings.query, ListQuery::default());
        assert!(settings.graph.icons_dir.ends_with("icons"));
        assert_eq!(settings.render, RenderOptions::default());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.default_namespace = "from-config".to_string();
        config.out_type = "svg".to_string();
        config.icons_dir = Some(PathBuf::from("/config/icons"));
        config.render.timeout_seconds = 3;

        let args = Args {
            namespace: Some("from-flag".to_string()),
            icons_dir: Some(PathBuf::from("/flag/icons")),
            ..Default::default()
        };
        let settings = args.settings(&config).unwrap();

        assert_eq!(settings.namespace, "from-flag");
        assert_eq!(settings.output_type, OutputType::Render(RenderFormat::Svg));
        assert_eq!(settings.graph.icons_dir, PathBuf::from("/flag/icons"));
        assert_eq!(settings.render.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_configured_type() {
        let mut config = Config::default();
        config.out_type = "bmp".to_string();
        let args = Args::default();
        assert!(args.settings(&config).is_err());
    }

    #[test]
    fn test_hint_for_old_clusters() {
        let err = anyhow::anyhow!("ApiError: the server could not find the requested resource (NotFound)")
            .context("Failed to get Kubernetes resources");
        assert_eq!(hint_for(&err), Some(OLD_CLUSTER_HINT));

        let err = anyhow::anyhow!("connection refused");
        assert_eq!(hint_for(&err), None);
    }
}
