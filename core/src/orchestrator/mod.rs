//! Orchestrator for the benchmark run lifecycle
//!
//! The Orchestrator drives the two-phase run against a long-lived cluster:
//! - Phase A (setup): one-time cluster and per-class benchmark
//!   initialization, amortized across all iterations
//! - Phase B (execution): the pass that actually runs benchmarks and
//!   produces results
//!
//! Setup failures are fatal; the first execution failure aborts the rest of
//! the run and is reported through [`RunStatus`](crate::RunStatus).
//!
//! # Example
//!
//! ```ignore
//! use storbench_core::{OrchestratorBuilder, RunConfig};
//!
//! let orchestrator = OrchestratorBuilder::new()
//!     .archive_dir("/var/lib/storbench/archive")
//!     .config(RunConfig::new(3))
//!     .cluster(cluster)
//!     .factory(factory)
//!     .build()?;
//!
//! let status = orchestrator.run_all()?;
//! std::process::exit(status.exit_code().into());
//! ```

mod builder;
mod executor;

pub use builder::OrchestratorBuilder;
pub use executor::Orchestrator;
