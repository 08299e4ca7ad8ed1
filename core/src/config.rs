//! Run configuration types

use serde::{Deserialize, Serialize};

/// Named options the orchestrator reads at startup.
///
/// These are the only configuration values the core interprets; everything
/// else in a config file belongs to the collaborators. Missing options fall
/// back to their defaults, and no further semantic validation is performed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Re-initialize the cluster and the benchmark immediately before every
    /// single run, instead of one amortized setup pass up front.
    pub rebuild_every_test: bool,

    /// Number of repetitions of the configured test suite. Zero is a no-op
    /// run that succeeds without touching any collaborator.
    pub iterations: usize,

    /// Run benchmarks even when no prior result exists on disk.
    pub is_teuthology: bool,
}

impl RunConfig {
    /// Create a config with the given iteration count.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Set rebuild-every-test mode.
    pub fn with_rebuild_every_test(mut self, rebuild: bool) -> Self {
        self.rebuild_every_test = rebuild;
        self
    }

    /// Set teuthology mode.
    pub fn with_is_teuthology(mut self, teuthology: bool) -> Self {
        self.is_teuthology = teuthology;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert!(!config.rebuild_every_test);
        assert_eq!(config.iterations, 0);
        assert!(!config.is_teuthology);
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = RunConfig::new(3)
            .with_rebuild_every_test(true)
            .with_is_teuthology(true);

        assert_eq!(config.iterations, 3);
        assert!(config.rebuild_every_test);
        assert!(config.is_teuthology);
    }

    #[test]
    fn test_missing_options_take_defaults() {
        let config: RunConfig = serde_json::from_str(r#"{"iterations": 2}"#).unwrap();
        assert_eq!(config.iterations, 2);
        assert!(!config.rebuild_every_test);
        assert!(!config.is_teuthology);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = RunConfig::new(5).with_rebuild_every_test(true);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RunConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.iterations, 5);
        assert!(deserialized.rebuild_every_test);
    }
}
