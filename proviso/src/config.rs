//! Configuration types for controlling a property run.

use std::str::FromStr;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Invalid number of tests (must be > 0)
    #[error("invalid num_tests: {0} (must be > 0)")]
    InvalidNumTests(usize),
    /// Invalid fail ratio (must be >= 1)
    #[error("invalid max_fail_ratio: {0} (must be >= 1)")]
    InvalidFailRatio(usize),
    /// An override variable was set but could not be parsed
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: String, value: String },
}

pub const ENV_NUM_TESTS: &str = "PROVISO_NUM_TESTS";
pub const ENV_MAX_FAIL_RATIO: &str = "PROVISO_MAX_FAIL_RATIO";
pub const ENV_MAX_SIZE: &str = "PROVISO_MAX_SIZE";
pub const ENV_MAX_SHRINKS: &str = "PROVISO_MAX_SHRINKS";
pub const ENV_SEED: &str = "PROVISO_SEED";

/// Configuration for one property run
///
/// Immutable once the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of passing trials required
    pub num_tests: usize,
    /// Attempts (including skipped ones) are bounded by `num_tests * max_fail_ratio`
    pub max_fail_ratio: usize,
    /// Size used by the last trial; sizes ramp linearly from 0
    pub max_size: usize,
    /// Maximum number of shrink iterations
    pub max_shrinks: usize,
    /// Seed for a reproducible run; `None` draws one from entropy
    pub seed: Option<u64>,
    /// Treat any panic in the property as an assertion failure
    pub catch_panics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_tests: 1000,
            max_fail_ratio: 10,
            max_size: 20,
            max_shrinks: 100,
            seed: None,
            catch_panics: true,
        }
    }
}

impl Config {
    /// Default configuration pinned to seed 0
    pub fn deterministic() -> Self {
        Self {
            seed: Some(0),
            ..Default::default()
        }
    }

    pub fn with_num_tests(mut self, num_tests: usize) -> Self {
        self.num_tests = num_tests;
        self
    }

    pub fn with_max_fail_ratio(mut self, max_fail_ratio: usize) -> Self {
        self.max_fail_ratio = max_fail_ratio;
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_max_shrinks(mut self, max_shrinks: usize) -> Self {
        self.max_shrinks = max_shrinks;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_catch_panics(mut self, catch_panics: bool) -> Self {
        self.catch_panics = catch_panics;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_tests == 0 {
            return Err(ConfigError::InvalidNumTests(self.num_tests));
        }
        if self.max_fail_ratio == 0 {
            return Err(ConfigError::InvalidFailRatio(self.max_fail_ratio));
        }
        Ok(())
    }

    /// Upper bound on trial attempts before a run fails for skipping too much
    pub fn attempt_limit(&self) -> usize {
        self.num_tests.saturating_mul(self.max_fail_ratio)
    }

    /// Apply `PROVISO_*` environment overrides on top of this configuration
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(num_tests) = parse_override(&lookup, ENV_NUM_TESTS)? {
            self.num_tests = num_tests;
        }
        if let Some(ratio) = parse_override(&lookup, ENV_MAX_FAIL_RATIO)? {
            self.max_fail_ratio = ratio;
        }
        if let Some(max_size) = parse_override(&lookup, ENV_MAX_SIZE)? {
            self.max_size = max_size;
        }
        if let Some(max_shrinks) = parse_override(&lookup, ENV_MAX_SHRINKS)? {
            self.max_shrinks = max_shrinks;
        }
        if let Some(seed) = parse_override(&lookup, ENV_SEED)? {
            self.seed = Some(seed);
        }
        self.validate()?;
        Ok(self)
    }
}

fn parse_override<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv {
            var: var.to_string(),
            value: raw.clone(),
        })
}
