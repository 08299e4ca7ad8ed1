//! Orchestrator execution logic

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::RunConfig;
use crate::error::{OrchestrationError, Result, RunStatus, Stage};
use crate::registry::InitRegistry;
use crate::traits::{Benchmark, BenchmarkFactory, Cluster};

/// Orchestrator manages the benchmark run lifecycle
///
/// Runs on a single sequential thread: every collaborator call blocks, and
/// iterations and benchmarks are processed strictly in order. Consuming
/// `self` in [`Orchestrator::run_all`] keeps the per-class setup registry
/// scoped to exactly one run.
pub struct Orchestrator {
    /// Named run options
    pub(crate) config: RunConfig,

    /// Directory benchmark results are archived under
    pub(crate) archive_dir: PathBuf,

    /// Cluster under test (shared with the factory)
    pub(crate) cluster: Arc<dyn Cluster>,

    /// Produces the benchmark list per iteration
    pub(crate) factory: Arc<dyn BenchmarkFactory>,

    /// Classes that have completed one-time setup this run
    pub(crate) registry: InitRegistry,
}

impl Orchestrator {
    /// Create a new orchestrator
    ///
    /// Use [`OrchestratorBuilder`](super::OrchestratorBuilder) for a more
    /// ergonomic construction.
    pub fn new(
        config: RunConfig,
        archive_dir: PathBuf,
        cluster: Arc<dyn Cluster>,
        factory: Arc<dyn BenchmarkFactory>,
    ) -> Self {
        Self {
            config,
            archive_dir,
            cluster,
            factory,
            registry: InitRegistry::new(),
        }
    }

    /// Get the run configuration
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Drive the full run and report its outcome.
    ///
    /// Performs the one-time setup pass (unless rebuild-every-test mode is
    /// on), then the execution pass. Setup errors propagate as `Err` and
    /// are fatal for the process; execution errors are downgraded into
    /// [`RunStatus::Failed`] so results archived by earlier benchmarks stay
    /// visible while the run still reports failure.
    pub fn run_all(mut self) -> Result<RunStatus> {
        tracing::debug!(
            rebuild_every_test = self.config.rebuild_every_test,
            iterations = self.config.iterations,
            archive_dir = %self.archive_dir.display(),
            "starting run"
        );

        // Only initialize and prefill upfront if we aren't rebuilding for
        // each test.
        if self.config.rebuild_every_test {
            tracing::debug!("rebuild-every-test mode, deferring initialization to execution");
        } else {
            self.setup_phase()?;
        }

        match self.execution_phase() {
            Ok(()) => Ok(RunStatus::Success),
            Err(error) => {
                tracing::error!(error = %error, "aborting run after execution failure");
                Ok(RunStatus::Failed(error))
            }
        }
    }

    /// Phase A: one-time cluster and per-class benchmark setup.
    fn setup_phase(&mut self) -> Result<()> {
        if !self.cluster.use_existing() {
            self.cluster.initialize()?;
        }

        for iteration in 0..self.config.iterations {
            tracing::debug!(iteration, "collecting benchmarks for setup");
            let benchmarks = self.benchmarks_for(iteration)?;
            for mut benchmark in benchmarks {
                if benchmark.exists() {
                    tracing::debug!(
                        benchmark = %benchmark.name(),
                        "results already archived, skipping initialization"
                    );
                    continue;
                }
                if self.registry.contains(benchmark.class_key()) {
                    tracing::debug!(
                        benchmark = %benchmark.name(),
                        class_key = %benchmark.class_key(),
                        "class already initialized"
                    );
                    continue;
                }

                tracing::debug!(benchmark = %benchmark.name(), "initializing benchmark");
                run_stage(benchmark.as_mut(), Stage::Initialize, iteration)?;
                run_stage(benchmark.as_mut(), Stage::InitializeEndpoints, iteration)?;
                run_stage(benchmark.as_mut(), Stage::Prefill, iteration)?;
                run_stage(benchmark.as_mut(), Stage::Cleanup, iteration)?;

                // Only initialize once per class.
                self.registry.record(benchmark);
            }
        }

        tracing::debug!(registry = ?self.registry, "one-time setup complete");
        Ok(())
    }

    /// Phase B: run every scheduled benchmark, failing fast on the first
    /// error.
    fn execution_phase(&mut self) -> Result<()> {
        for iteration in 0..self.config.iterations {
            let benchmarks = self.benchmarks_for(iteration)?;
            for mut benchmark in benchmarks {
                if !benchmark.exists() && !self.config.is_teuthology {
                    tracing::debug!(
                        benchmark = %benchmark.name(),
                        "no archived results to refresh, skipping"
                    );
                    continue;
                }

                if self.config.rebuild_every_test {
                    self.cluster.initialize()?;
                    run_stage(benchmark.as_mut(), Stage::Initialize, iteration)?;
                }

                // Always try to initialize endpoints before running the test.
                run_stage(benchmark.as_mut(), Stage::InitializeEndpoints, iteration)?;

                tracing::info!(benchmark = %benchmark.name(), iteration, "running benchmark");
                run_stage(benchmark.as_mut(), Stage::Run, iteration)?;
            }
        }
        Ok(())
    }

    fn benchmarks_for(&self, iteration: usize) -> Result<Vec<Box<dyn Benchmark>>> {
        self.factory
            .get_all(&self.archive_dir, &self.cluster, iteration)
            .map_err(|source| OrchestrationError::Factory { iteration, source })
    }
}

/// Drive one lifecycle call, attaching the benchmark/iteration context to
/// any failure.
fn run_stage(benchmark: &mut dyn Benchmark, stage: Stage, iteration: usize) -> Result<()> {
    let result = match stage {
        Stage::Initialize => benchmark.initialize(),
        Stage::InitializeEndpoints => benchmark.initialize_endpoints(),
        Stage::Prefill => benchmark.prefill(),
        Stage::Cleanup => benchmark.cleanup(),
        Stage::Run => benchmark.run(),
    };
    result.map_err(|source| OrchestrationError::Benchmark {
        benchmark: benchmark.name().to_string(),
        iteration,
        stage,
        source,
    })
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("archive_dir", &self.archive_dir)
            .field("cluster", &self.cluster.name())
            .field("registry", &self.registry)
            .finish()
    }
}
