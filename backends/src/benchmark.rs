//! Shell-command benchmark instance

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use storbench_core::{Benchmark, BenchmarkError, Cluster};

use crate::command::run_shell;

/// One entry of the ordered `tests` section of the config file.
///
/// Every lifecycle step except `run` is optional; a missing step is a
/// no-op for this suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSpec {
    /// Test identifier. Doubles as the class key for one-time-setup
    /// deduplication and as the archive subdirectory name, so it must be
    /// unique within a suite.
    pub name: String,

    /// Command executed once per class during setup.
    #[serde(default)]
    pub initialize: Option<String>,

    /// Command that brings up the endpoints the benchmark talks to. Runs
    /// during setup and again before every run, so it must be repeatable.
    #[serde(default)]
    pub initialize_endpoints: Option<String>,

    /// Command that seeds the cluster with the benchmark's data set.
    #[serde(default)]
    pub prefill: Option<String>,

    /// Command run after setup (drop caches, remove scratch state, ...).
    #[serde(default)]
    pub cleanup: Option<String>,

    /// The benchmark command itself. Its stdout/stderr are archived.
    pub run: String,
}

/// Benchmark instance that shells out for each lifecycle step.
///
/// Commands see `STORBENCH_CLUSTER`, `STORBENCH_OUT_DIR`, and
/// `STORBENCH_ITERATION` in their environment. Results land under the
/// per-iteration archive directory; its presence is what
/// [`Benchmark::exists`] reports.
pub struct ShellBenchmark {
    spec: TestSpec,
    cluster: Arc<dyn Cluster>,
    out_dir: PathBuf,
    iteration: usize,
}

impl ShellBenchmark {
    pub(crate) fn new(
        spec: TestSpec,
        cluster: Arc<dyn Cluster>,
        out_dir: PathBuf,
        iteration: usize,
    ) -> Self {
        Self {
            spec,
            cluster,
            out_dir,
            iteration,
        }
    }

    /// Directory this instance archives its results under.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn env(&self) -> Vec<(String, String)> {
        vec![
            (
                "STORBENCH_CLUSTER".to_string(),
                self.cluster.name().to_string(),
            ),
            (
                "STORBENCH_OUT_DIR".to_string(),
                self.out_dir.display().to_string(),
            ),
            (
                "STORBENCH_ITERATION".to_string(),
                self.iteration.to_string(),
            ),
        ]
    }

    fn run_step(&self, command: Option<&str>) -> Result<(), BenchmarkError> {
        let Some(command) = command else {
            return Ok(());
        };
        tracing::debug!(benchmark = %self.spec.name, command, "running step command");
        let output = run_shell(command, &self.env())?;
        if !output.status.success() {
            return Err(BenchmarkError::Command {
                command: command.to_string(),
                code: output.status.code(),
            });
        }
        Ok(())
    }
}

impl Benchmark for ShellBenchmark {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn class_key(&self) -> &str {
        &self.spec.name
    }

    fn exists(&self) -> bool {
        self.out_dir.is_dir()
    }

    fn initialize(&mut self) -> Result<(), BenchmarkError> {
        self.run_step(self.spec.initialize.as_deref())
    }

    fn initialize_endpoints(&mut self) -> Result<(), BenchmarkError> {
        self.run_step(self.spec.initialize_endpoints.as_deref())
    }

    fn prefill(&mut self) -> Result<(), BenchmarkError> {
        self.run_step(self.spec.prefill.as_deref())
    }

    fn cleanup(&mut self) -> Result<(), BenchmarkError> {
        self.run_step(self.spec.cleanup.as_deref())
    }

    fn run(&mut self) -> Result<(), BenchmarkError> {
        fs::create_dir_all(&self.out_dir)?;

        tracing::debug!(benchmark = %self.spec.name, command = %self.spec.run, "running benchmark command");
        let output = run_shell(&self.spec.run, &self.env())?;

        fs::write(self.out_dir.join("stdout.log"), &output.stdout)?;
        fs::write(self.out_dir.join("stderr.log"), &output.stderr)?;

        if !output.status.success() {
            return Err(BenchmarkError::Command {
                command: self.spec.run.clone(),
                code: output.status.code(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{ClusterSpec, ShellCluster};

    fn spec(name: &str, run: &str) -> TestSpec {
        TestSpec {
            name: name.to_string(),
            initialize: None,
            initialize_endpoints: None,
            prefill: None,
            cleanup: None,
            run: run.to_string(),
        }
    }

    fn benchmark(spec: TestSpec, out_dir: PathBuf) -> ShellBenchmark {
        let cluster: Arc<dyn Cluster> = Arc::new(ShellCluster::new(ClusterSpec::default()));
        ShellBenchmark::new(spec, cluster, out_dir, 0)
    }

    #[test]
    fn test_run_archives_stdout() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("fio-seq-write");
        let mut b = benchmark(spec("fio-seq-write", "echo bandwidth=100MB/s"), out_dir);

        assert!(!b.exists());
        b.run().unwrap();
        assert!(b.exists());

        let stdout = fs::read_to_string(b.out_dir().join("stdout.log")).unwrap();
        assert_eq!(stdout.trim(), "bandwidth=100MB/s");
    }

    #[test]
    fn test_failed_run_still_archives_output() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("fio-seq-write");
        let mut b = benchmark(
            spec("fio-seq-write", "echo partial; exit 2"),
            out_dir.clone(),
        );

        let error = b.run().unwrap_err();
        match error {
            BenchmarkError::Command { code, .. } => assert_eq!(code, Some(2)),
            other => panic!("expected command error, got {other:?}"),
        }
        // output written before the status check, for post-mortem
        let stdout = fs::read_to_string(out_dir.join("stdout.log")).unwrap();
        assert_eq!(stdout.trim(), "partial");
    }

    #[test]
    fn test_missing_step_commands_are_noops() {
        let tmp = tempfile::tempdir().unwrap();
        let mut b = benchmark(spec("fio-seq-write", "true"), tmp.path().join("x"));

        b.initialize().unwrap();
        b.initialize_endpoints().unwrap();
        b.prefill().unwrap();
        b.cleanup().unwrap();
    }

    #[test]
    fn test_step_commands_see_the_benchmark_environment() {
        let tmp = tempfile::tempdir().unwrap();
        let out_dir = tmp.path().join("env-check");
        let mut test_spec = spec("env-check", "true");
        test_spec.prefill = Some(
            r#"test "$STORBENCH_CLUSTER" = local && test "$STORBENCH_ITERATION" = 0"#.to_string(),
        );
        let mut b = benchmark(test_spec, out_dir);

        b.prefill().unwrap();
    }

    #[test]
    fn test_spec_yaml_with_optional_steps_omitted() {
        let test_spec: TestSpec = serde_yaml::from_str(
            "name: radosbench-write\nrun: rados bench 60 write",
        )
        .unwrap();

        assert_eq!(test_spec.name, "radosbench-write");
        assert!(test_spec.prefill.is_none());
        assert_eq!(test_spec.run, "rados bench 60 write");
    }
}
