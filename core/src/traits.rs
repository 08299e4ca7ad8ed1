//! Core traits for cluster and benchmark collaborators
//!
//! These traits are defined in core so the orchestrator never depends on a
//! concrete backend. Implementations live in their respective crates
//! (backends/, or the embedding application).

use std::path::Path;
use std::sync::Arc;

// ============================================================================
// Cluster Trait
// ============================================================================

/// A long-lived, stateful handle for the provisioned storage cluster under
/// test.
///
/// The orchestrator is the only writer: it calls [`Cluster::initialize`]
/// zero, one, or many times depending on the run mode, and never tears the
/// cluster down. The handle is shared with the benchmark factory via `Arc`,
/// so implementations track their provisioned state with interior
/// mutability.
pub trait Cluster: Send + Sync {
    /// Cluster identifier used in diagnostics and exported to benchmarks.
    fn name(&self) -> &str;

    /// Whether the cluster was provisioned outside this run.
    ///
    /// A pre-existing cluster is never initialized during the setup phase.
    fn use_existing(&self) -> bool;

    /// Bring the cluster up.
    ///
    /// Whether repeat calls are idempotent or re-provision from scratch is
    /// implementation-defined; rebuild-every-test mode calls this before
    /// every benchmark run and relies on whichever the backend provides.
    fn initialize(&self) -> Result<(), ClusterError>;
}

/// Cluster provisioning errors
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    /// A provisioning command exited unsuccessfully
    #[error("cluster command `{command}` exited with status {code:?}")]
    Command {
        /// The command line that failed
        command: String,
        /// Process exit code, if the process exited at all
        code: Option<i32>,
    },

    /// IO error while provisioning (spawn failure, missing binary, ...)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend-specific provisioning failure
    #[error("{0}")]
    Failed(String),
}

// ============================================================================
// Benchmark Trait
// ============================================================================

/// One configured benchmark run for one iteration.
///
/// Instances are created fresh per iteration by a [`BenchmarkFactory`] and
/// driven through their lifecycle by the orchestrator:
///
/// - one-time setup is `initialize -> initialize_endpoints -> prefill ->
///   cleanup`, performed at most once per [`Benchmark::class_key`] unless
///   rebuild-every-test mode is on;
/// - execution is `initialize_endpoints -> run` (preceded by cluster and
///   benchmark re-initialization in rebuild mode).
pub trait Benchmark: Send {
    /// Display identity for diagnostics (typically the configured test name).
    fn name(&self) -> &str;

    /// Identity of the defining test spec.
    ///
    /// Instances produced for different iterations of the same spec share a
    /// class key, which is what lets the orchestrator deduplicate one-time
    /// setup across iterations.
    fn class_key(&self) -> &str;

    /// Whether this instance's results are already archived on disk.
    ///
    /// Pre-existing results suppress setup, and (outside teuthology mode)
    /// suppress execution as well.
    fn exists(&self) -> bool;

    /// One-time benchmark initialization.
    fn initialize(&mut self) -> Result<(), BenchmarkError>;

    /// Bring up the endpoints the benchmark talks to.
    ///
    /// Called before every run as well as during setup; implementations
    /// must tolerate repeat calls.
    fn initialize_endpoints(&mut self) -> Result<(), BenchmarkError>;

    /// Seed the cluster with the data set the benchmark operates on.
    fn prefill(&mut self) -> Result<(), BenchmarkError>;

    /// Post-setup cleanup (drop caches, remove scratch state, ...).
    fn cleanup(&mut self) -> Result<(), BenchmarkError>;

    /// Execute the benchmark and archive its results.
    fn run(&mut self) -> Result<(), BenchmarkError>;
}

/// Benchmark lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum BenchmarkError {
    /// A lifecycle command exited unsuccessfully
    #[error("command `{command}` exited with status {code:?}")]
    Command {
        /// The command line that failed
        command: String,
        /// Process exit code, if the process exited at all
        code: Option<i32>,
    },

    /// IO error (spawn failure, archive write failure, ...)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend-specific failure
    #[error("{0}")]
    Failed(String),
}

// ============================================================================
// Benchmark Factory Trait
// ============================================================================

/// Produces the benchmark list for one iteration.
///
/// The returned order is part of the contract: the orchestrator processes
/// benchmarks strictly in the order produced here, and calls with equal
/// arguments must produce the same sequence. Each call returns fresh
/// instances; the setup and execution phases never share instance state.
pub trait BenchmarkFactory: Send + Sync {
    /// Build the ordered benchmark list for `iteration`.
    ///
    /// `archive_dir` is where instances look for (and later write) their
    /// results; `cluster` is the shared handle under test.
    fn get_all(
        &self,
        archive_dir: &Path,
        cluster: &Arc<dyn Cluster>,
        iteration: usize,
    ) -> Result<Vec<Box<dyn Benchmark>>, FactoryError>;
}

/// Benchmark construction errors
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// A test spec cannot be turned into a benchmark instance
    #[error("invalid test spec: {0}")]
    InvalidSpec(String),

    /// IO error while building the list
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend-specific failure
    #[error("{0}")]
    Failed(String),
}
