//! Error and status types for storbench-core

use thiserror::Error;

use crate::traits::{BenchmarkError, ClusterError, FactoryError};

/// Lifecycle step being driven when a benchmark call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// One-time benchmark initialization
    Initialize,
    /// Endpoint bring-up (setup and before every run)
    InitializeEndpoints,
    /// Data-set seeding
    Prefill,
    /// Post-setup cleanup
    Cleanup,
    /// Benchmark execution
    Run,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Initialize => "initialize",
            Stage::InitializeEndpoints => "initialize_endpoints",
            Stage::Prefill => "prefill",
            Stage::Cleanup => "cleanup",
            Stage::Run => "run",
        };
        f.write_str(name)
    }
}

/// A collaborator failure plus where in the run it happened.
///
/// Errors from the setup phase propagate out of
/// [`Orchestrator::run_all`](crate::Orchestrator::run_all) as `Err` and are
/// fatal; the same type captured during the execution phase is carried
/// inside [`RunStatus::Failed`] instead, so earlier benchmarks' archived
/// results stay visible while the process still exits non-zero.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// Cluster provisioning failed
    #[error("cluster initialization failed: {0}")]
    Cluster(#[from] ClusterError),

    /// The factory could not produce the benchmark list for an iteration
    #[error("benchmark list for iteration {iteration} unavailable: {source}")]
    Factory {
        /// Iteration whose list was requested
        iteration: usize,
        /// Underlying factory failure
        source: FactoryError,
    },

    /// A benchmark lifecycle call failed
    #[error("benchmark {benchmark} {stage} failed (iteration {iteration}): {source}")]
    Benchmark {
        /// Display name of the benchmark that was executing
        benchmark: String,
        /// Iteration it was executing under
        iteration: usize,
        /// Lifecycle step that failed
        stage: Stage,
        /// Underlying benchmark failure
        source: BenchmarkError,
    },

    /// The orchestrator builder was not given a required component
    #[error("orchestrator misconfigured: missing {0}")]
    MissingComponent(&'static str),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, OrchestrationError>;

/// Overall outcome of the execution phase.
///
/// The fail-fast policy is deliberate: the first execution failure aborts
/// all remaining iterations and benchmarks, and the run reports that single
/// point of failure. This is an explicit value rather than an unwound
/// panic so the caller decides how to surface it.
#[derive(Debug)]
pub enum RunStatus {
    /// Every scheduled benchmark ran (including the zero-iteration no-op)
    Success,
    /// The execution phase was aborted by its first failure
    Failed(OrchestrationError),
}

impl RunStatus {
    /// Whether the run completed without failure.
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Success)
    }

    /// Process exit code for this outcome: 0 on success, 1 on failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunStatus::Success => 0,
            RunStatus::Failed(_) => 1,
        }
    }
}
