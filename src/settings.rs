//! Config-file schema and loading

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use storbench_backends::{ClusterSpec, TestSpec};
use storbench_core::RunConfig;

/// Top-level YAML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cluster and run options.
    pub cluster: ClusterSettings,

    /// The ordered benchmark suite.
    pub tests: Vec<TestSpec>,
}

/// The `cluster` section: orchestrator run options plus the shell
/// backend's own, side by side under one key.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClusterSettings {
    /// Options the orchestrator reads (iterations, rebuild mode, ...).
    #[serde(flatten)]
    pub run: RunConfig,

    /// Options the shell cluster backend reads.
    #[serde(flatten)]
    pub shell: ClusterSpec,
}

impl Settings {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let settings = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(settings)
    }
}
