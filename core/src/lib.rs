//! storbench-core: Orchestration core for storage-cluster benchmarking
//!
//! This crate provides the run lifecycle shared by all storbench
//! components, including:
//!
//! - Collaborator traits (Cluster, Benchmark, BenchmarkFactory)
//! - The two-phase Orchestrator state machine
//! - Run configuration and per-class setup bookkeeping
//! - Error handling and run status
//!
//! The orchestrator is deliberately sequential: one thread, blocking
//! collaborator calls, iterations in ascending order, benchmarks in the
//! order the factory yields them. Anything concurrent (or retried, or
//! persisted across runs) belongs to the collaborators.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod registry;
pub mod traits;

pub use config::RunConfig;
pub use error::{OrchestrationError, RunStatus, Stage};
pub use orchestrator::{Orchestrator, OrchestratorBuilder};
pub use registry::InitRegistry;
pub use traits::{
    Benchmark, BenchmarkError, BenchmarkFactory, Cluster, ClusterError, FactoryError,
};
