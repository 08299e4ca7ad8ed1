//! CLI argument parsing and run wiring

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use storbench_backends::{ShellCluster, ShellFactory};
use storbench_core::{Cluster, OrchestratorBuilder, RunStatus};

use crate::settings::Settings;

/// Continuously run storage cluster benchmarks.
#[derive(Parser, Debug)]
#[command(name = "storbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory where the results should be archived.
    #[arg(short, long)]
    pub archive: PathBuf,

    /// Alternate cluster configuration file handed to cluster commands.
    #[arg(short, long)]
    pub conf: Option<PathBuf>,

    /// YAML config file.
    pub config_file: PathBuf,
}

impl Cli {
    /// Load settings, wire the collaborators, and drive the run.
    ///
    /// A returned error is fatal (unreadable config, invalid suite, or a
    /// setup-phase failure); execution-phase failures come back as
    /// [`RunStatus::Failed`] so the caller can exit non-zero after all
    /// earlier results were archived.
    pub fn run(&self) -> Result<RunStatus> {
        let settings = Settings::load(&self.config_file)?;
        tracing::debug!(cluster = ?settings.cluster, "loaded settings");

        let mut cluster_spec = settings.cluster.shell;
        if let Some(conf) = &self.conf {
            cluster_spec.conf_file = Some(conf.clone());
        }

        let cluster: Arc<dyn Cluster> = Arc::new(ShellCluster::new(cluster_spec));
        let factory =
            Arc::new(ShellFactory::new(settings.tests).context("invalid test suite")?);

        let orchestrator = OrchestratorBuilder::new()
            .config(settings.cluster.run)
            .archive_dir(self.archive.clone())
            .cluster(cluster)
            .factory(factory)
            .build()
            .context("failed to build orchestrator")?;

        orchestrator.run_all().context("benchmark setup failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_flag_is_required() {
        let result = Cli::try_parse_from(["storbench", "config.yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parses_required_arguments() {
        let cli = Cli::try_parse_from(["storbench", "-a", "/tmp/archive", "config.yaml"]).unwrap();

        assert_eq!(cli.archive, PathBuf::from("/tmp/archive"));
        assert!(cli.conf.is_none());
        assert_eq!(cli.config_file, PathBuf::from("config.yaml"));
    }

    #[test]
    fn test_parses_conf_override() {
        let cli = Cli::try_parse_from([
            "storbench",
            "--archive",
            "/tmp/archive",
            "--conf",
            "/etc/cluster.conf",
            "config.yaml",
        ])
        .unwrap();

        assert_eq!(cli.conf, Some(PathBuf::from("/etc/cluster.conf")));
    }
}
