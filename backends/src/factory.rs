//! Config-driven benchmark factory

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use storbench_core::{Benchmark, BenchmarkFactory, Cluster, FactoryError};

use crate::benchmark::{ShellBenchmark, TestSpec};

/// Builds the per-iteration benchmark list from the ordered `tests`
/// section of the config file.
///
/// Output order is the config order, every call; instances archive under
/// `<archive>/results/<iteration:08>/<test name>`.
#[derive(Debug)]
pub struct ShellFactory {
    tests: Vec<TestSpec>,
}

impl ShellFactory {
    /// Validate the suite and build a factory for it.
    ///
    /// Test names key both setup deduplication and the archive layout, so
    /// they must be non-empty and unique; run commands must be non-empty.
    pub fn new(tests: Vec<TestSpec>) -> Result<Self, FactoryError> {
        let mut seen = HashSet::new();
        for spec in &tests {
            if spec.name.trim().is_empty() {
                return Err(FactoryError::InvalidSpec(
                    "test with an empty name".to_string(),
                ));
            }
            if spec.run.trim().is_empty() {
                return Err(FactoryError::InvalidSpec(format!(
                    "test {} has an empty run command",
                    spec.name
                )));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(FactoryError::InvalidSpec(format!(
                    "duplicate test name {}",
                    spec.name
                )));
            }
        }
        Ok(Self { tests })
    }

    /// Number of tests in the suite.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Whether the suite is empty.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

impl BenchmarkFactory for ShellFactory {
    fn get_all(
        &self,
        archive_dir: &Path,
        cluster: &Arc<dyn Cluster>,
        iteration: usize,
    ) -> Result<Vec<Box<dyn Benchmark>>, FactoryError> {
        Ok(self
            .tests
            .iter()
            .map(|spec| {
                let out_dir = archive_dir
                    .join("results")
                    .join(format!("{iteration:08}"))
                    .join(&spec.name);
                Box::new(ShellBenchmark::new(
                    spec.clone(),
                    Arc::clone(cluster),
                    out_dir,
                    iteration,
                )) as Box<dyn Benchmark>
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{ClusterSpec, ShellCluster};

    fn spec(name: &str) -> TestSpec {
        TestSpec {
            name: name.to_string(),
            initialize: None,
            initialize_endpoints: None,
            prefill: None,
            cleanup: None,
            run: "true".to_string(),
        }
    }

    fn cluster() -> Arc<dyn Cluster> {
        Arc::new(ShellCluster::new(ClusterSpec::default()))
    }

    #[test]
    fn test_rejects_duplicate_test_names() {
        let result = ShellFactory::new(vec![spec("fio"), spec("fio")]);
        assert!(matches!(result, Err(FactoryError::InvalidSpec(_))));
    }

    #[test]
    fn test_rejects_empty_run_command() {
        let mut bad = spec("fio");
        bad.run = "  ".to_string();
        let result = ShellFactory::new(vec![bad]);
        assert!(matches!(result, Err(FactoryError::InvalidSpec(_))));
    }

    #[test]
    fn test_preserves_config_order() {
        let factory = ShellFactory::new(vec![spec("radosbench"), spec("fio"), spec("getput")])
            .unwrap();
        let benchmarks = factory
            .get_all(Path::new("/tmp/archive"), &cluster(), 0)
            .unwrap();

        let names: Vec<&str> = benchmarks.iter().map(|b| b.name()).collect();
        assert_eq!(names, ["radosbench", "fio", "getput"]);
    }

    #[test]
    fn test_fresh_instances_per_call() {
        let factory = ShellFactory::new(vec![spec("fio")]).unwrap();
        let cluster = cluster();

        let first = factory
            .get_all(Path::new("/tmp/archive"), &cluster, 1)
            .unwrap();
        let second = factory
            .get_all(Path::new("/tmp/archive"), &cluster, 1)
            .unwrap();

        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].name(), second[0].name());
        assert_eq!(first[0].class_key(), second[0].class_key());
    }

    #[test]
    fn test_archive_layout_is_per_iteration() {
        let tmp = tempfile::tempdir().unwrap();
        let factory = ShellFactory::new(vec![spec("fio")]).unwrap();
        let mut benchmarks = factory.get_all(tmp.path(), &cluster(), 3).unwrap();

        benchmarks[0].run().unwrap();

        assert!(tmp
            .path()
            .join("results")
            .join("00000003")
            .join("fio")
            .join("stdout.log")
            .is_file());
    }
}
