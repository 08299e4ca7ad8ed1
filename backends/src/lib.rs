//! storbench-backends: Shell-command collaborators for storbench
//!
//! This crate provides implementations of the core `Cluster`, `Benchmark`,
//! and `BenchmarkFactory` traits that drive everything through configured
//! shell commands:
//!
//! - [`ShellCluster`]: provisioning via a configured start command
//! - [`ShellBenchmark`]: one command per lifecycle step, results archived
//!   under the run's archive directory
//! - [`ShellFactory`]: builds the per-iteration benchmark list from the
//!   ordered `tests` section of the config file

#![warn(missing_docs)]
#![warn(clippy::all)]

mod benchmark;
mod cluster;
mod command;
mod factory;

pub use benchmark::{ShellBenchmark, TestSpec};
pub use cluster::{ClusterSpec, ShellCluster};
pub use factory::ShellFactory;
