//! Per-class one-time-setup bookkeeping

use crate::traits::Benchmark;

/// Insertion-ordered record of which benchmark classes have completed
/// one-time setup.
///
/// Owned by a single [`Orchestrator`](crate::Orchestrator) instance and
/// scoped to one orchestration run; it is populated only during the setup
/// phase and never persisted. Each entry maps a class key to the instance
/// that actually performed the setup for that class — later instances of an
/// already-registered class are skipped without being re-recorded.
///
/// Backed by a `Vec`: the entry count is bounded by the number of distinct
/// test specs in a config file.
#[derive(Default)]
pub struct InitRegistry {
    entries: Vec<(String, Box<dyn Benchmark>)>,
}

impl InitRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `class_key` has already completed one-time setup.
    pub fn contains(&self, class_key: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == class_key)
    }

    /// Record `benchmark` as the instance that performed setup for its
    /// class. A class already present keeps its original entry.
    pub fn record(&mut self, benchmark: Box<dyn Benchmark>) {
        if !self.contains(benchmark.class_key()) {
            self.entries.push((benchmark.class_key().to_string(), benchmark));
        }
    }

    /// Registered class keys, in setup order.
    pub fn class_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Number of classes that completed setup.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no class has completed setup yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for InitRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(key, _)| key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::BenchmarkError;

    struct StubBenchmark {
        class_key: String,
    }

    impl StubBenchmark {
        fn boxed(class_key: &str) -> Box<dyn Benchmark> {
            Box::new(Self {
                class_key: class_key.to_string(),
            })
        }
    }

    impl Benchmark for StubBenchmark {
        fn name(&self) -> &str {
            &self.class_key
        }

        fn class_key(&self) -> &str {
            &self.class_key
        }

        fn exists(&self) -> bool {
            false
        }

        fn initialize(&mut self) -> Result<(), BenchmarkError> {
            Ok(())
        }

        fn initialize_endpoints(&mut self) -> Result<(), BenchmarkError> {
            Ok(())
        }

        fn prefill(&mut self) -> Result<(), BenchmarkError> {
            Ok(())
        }

        fn cleanup(&mut self) -> Result<(), BenchmarkError> {
            Ok(())
        }

        fn run(&mut self) -> Result<(), BenchmarkError> {
            Ok(())
        }
    }

    #[test]
    fn test_registry_starts_empty() {
        let registry = InitRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains("fio-seq-write"));
    }

    #[test]
    fn test_record_and_contains() {
        let mut registry = InitRegistry::new();
        registry.record(StubBenchmark::boxed("fio-seq-write"));

        assert!(registry.contains("fio-seq-write"));
        assert!(!registry.contains("radosbench"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_class_keeps_first_entry() {
        let mut registry = InitRegistry::new();
        registry.record(StubBenchmark::boxed("fio-seq-write"));
        registry.record(StubBenchmark::boxed("fio-seq-write"));

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_class_keys_preserve_setup_order() {
        let mut registry = InitRegistry::new();
        registry.record(StubBenchmark::boxed("radosbench"));
        registry.record(StubBenchmark::boxed("fio-seq-write"));
        registry.record(StubBenchmark::boxed("getput"));

        let keys: Vec<&str> = registry.class_keys().collect();
        assert_eq!(keys, ["radosbench", "fio-seq-write", "getput"]);
    }

    #[test]
    fn test_debug_lists_class_keys() {
        let mut registry = InitRegistry::new();
        registry.record(StubBenchmark::boxed("radosbench"));

        assert_eq!(format!("{:?}", registry), r#"["radosbench"]"#);
    }
}
