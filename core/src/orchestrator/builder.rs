//! Builder pattern for Orchestrator construction

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::RunConfig;
use crate::error::{OrchestrationError, Result};
use crate::traits::{BenchmarkFactory, Cluster};

use super::executor::Orchestrator;

/// Builder for creating an Orchestrator with proper configuration
///
/// # Example
///
/// ```ignore
/// let orchestrator = OrchestratorBuilder::new()
///     .archive_dir("/var/lib/storbench/archive")
///     .iterations(3)
///     .rebuild_every_test(false)
///     .cluster(cluster)
///     .factory(factory)
///     .build()?;
/// ```
pub struct OrchestratorBuilder {
    config: RunConfig,
    archive_dir: Option<PathBuf>,
    cluster: Option<Arc<dyn Cluster>>,
    factory: Option<Arc<dyn BenchmarkFactory>>,
}

impl OrchestratorBuilder {
    /// Create a new orchestrator builder with default configuration
    pub fn new() -> Self {
        Self {
            config: RunConfig::default(),
            archive_dir: None,
            cluster: None,
            factory: None,
        }
    }

    /// Set the full run configuration
    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the iteration count
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.config.iterations = iterations;
        self
    }

    /// Set rebuild-every-test mode
    pub fn rebuild_every_test(mut self, rebuild: bool) -> Self {
        self.config.rebuild_every_test = rebuild;
        self
    }

    /// Set teuthology mode
    pub fn is_teuthology(mut self, teuthology: bool) -> Self {
        self.config.is_teuthology = teuthology;
        self
    }

    /// Set the archive directory benchmark results live under
    pub fn archive_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = Some(dir.into());
        self
    }

    /// Set the cluster handle
    pub fn cluster(mut self, cluster: Arc<dyn Cluster>) -> Self {
        self.cluster = Some(cluster);
        self
    }

    /// Set the benchmark factory
    pub fn factory(mut self, factory: Arc<dyn BenchmarkFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Build the orchestrator
    ///
    /// # Errors
    ///
    /// Returns an error if the archive directory, cluster, or factory are
    /// not set.
    pub fn build(self) -> Result<Orchestrator> {
        let archive_dir = self
            .archive_dir
            .ok_or(OrchestrationError::MissingComponent("archive_dir"))?;

        let cluster = self
            .cluster
            .ok_or(OrchestrationError::MissingComponent("cluster"))?;

        let factory = self
            .factory
            .ok_or(OrchestrationError::MissingComponent("factory"))?;

        Ok(Orchestrator::new(self.config, archive_dir, cluster, factory))
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
