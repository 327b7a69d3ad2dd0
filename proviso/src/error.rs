//! Error types and result handling for property runs.

use std::fmt;

use crate::config::ConfigError;

/// A failing input together with the shrunk input that still fails
#[derive(Debug, Clone, PartialEq)]
pub struct Counterexample<T> {
    /// The input the trial driver generated
    pub original: T,
    /// The most reduced input that still fails
    pub minimal: T,
    /// Failure message raised by the property for `minimal`
    pub message: String,
    /// Index of the failing trial
    pub trial: usize,
    /// Size the failing trial was generated at
    pub size: usize,
    /// Number of accepted shrink steps
    pub shrink_steps: usize,
    /// Seed that reproduces the run
    pub seed: u64,
}

impl<T: fmt::Debug> fmt::Display for Counterexample<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "minimal counterexample: {:?}", self.minimal)?;
        writeln!(f, "original input: {:?}", self.original)?;
        writeln!(f, "failure: {}", self.message)?;
        write!(
            f,
            "trial {} (size {}), {} shrink steps, seed {}",
            self.trial, self.size, self.shrink_steps, self.seed
        )
    }
}

/// Why a property run did not pass
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckError<T: fmt::Debug> {
    /// Configuration rejected before any trial ran
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The attempt bound tripped before enough trials passed
    #[error(
        "too many skipped tests: {passed} passed, {skipped} skipped after {attempts} attempts"
    )]
    TooManySkips {
        passed: usize,
        skipped: usize,
        attempts: usize,
    },

    /// Shrinking finished and the counterexample is locally minimal
    #[error("property falsified (shrinking done)\n{0}")]
    Falsified(Counterexample<T>),

    /// The shrink bound was reached before shrinking finished
    #[error("property falsified (shrink limit reached, result may not be minimal)\n{0}")]
    ShrinkExhausted(Counterexample<T>),

    /// Failure on an input that could not be shrunk
    #[error("property falsified at trial {trial} (not shrunk)\ninput: {input}\nfailure: {message}\nseed {seed}")]
    Unshrinkable {
        trial: usize,
        input: String,
        message: String,
        seed: u64,
    },
}

impl<T: fmt::Debug> CheckError<T> {
    /// The counterexample, when the run was falsified with shrinking
    pub fn counterexample(&self) -> Option<&Counterexample<T>> {
        match self {
            CheckError::Falsified(cx) | CheckError::ShrinkExhausted(cx) => Some(cx),
            _ => None,
        }
    }

    /// Minimal failing input, when there is one
    pub fn minimal(&self) -> Option<&T> {
        self.counterexample().map(|cx| &cx.minimal)
    }

    /// True for every property failure, false for config and skip errors
    pub fn is_falsified(&self) -> bool {
        matches!(
            self,
            CheckError::Falsified(_)
                | CheckError::ShrinkExhausted(_)
                | CheckError::Unshrinkable { .. }
        )
    }

    /// Seed to replay the run with, when the run got far enough to draw one
    pub fn seed(&self) -> Option<u64> {
        match self {
            CheckError::Falsified(cx) | CheckError::ShrinkExhausted(cx) => Some(cx.seed),
            CheckError::Unshrinkable { seed, .. } => Some(*seed),
            _ => None,
        }
    }
}

/// Summary of a passing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Trials that passed (equals `num_tests`)
    pub passed: usize,
    /// Attempts the property skipped
    pub skipped: usize,
    /// Seed the run used
    pub seed: u64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ok, passed {} tests ({} skipped, seed {})",
            self.passed, self.skipped, self.seed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Counterexample<(i32, i32)> {
        Counterexample {
            original: (17, -4),
            minimal: (1, 0),
            message: "property returned false".to_string(),
            trial: 12,
            size: 3,
            shrink_steps: 4,
            seed: 42,
        }
    }

    #[test]
    fn test_counterexample_display() {
        let text = sample().to_string();
        assert!(text.contains("minimal counterexample: (1, 0)"));
        assert!(text.contains("original input: (17, -4)"));
        assert!(text.contains("property returned false"));
        assert!(text.contains("seed 42"));
    }

    #[test]
    fn test_shrink_outcomes_are_distinguished() {
        let done = CheckError::Falsified(sample());
        let exhausted = CheckError::ShrinkExhausted(sample());
        assert!(done.to_string().contains("shrinking done"));
        assert!(exhausted.to_string().contains("shrink limit reached"));
        assert_eq!(done.minimal(), Some(&(1, 0)));
        assert_eq!(exhausted.seed(), Some(42));
    }

    #[test]
    fn test_too_many_skips_message() {
        let err: CheckError<(u8,)> = CheckError::TooManySkips {
            passed: 1,
            skipped: 4,
            attempts: 5,
        };
        assert!(err.to_string().contains("too many skipped tests"));
        assert!(!err.is_falsified());
        assert!(err.counterexample().is_none());
        assert_eq!(err.seed(), None);
    }

    #[test]
    fn test_config_error_converts() {
        let err: CheckError<(u8,)> = ConfigError::InvalidNumTests(0).into();
        assert_eq!(err, CheckError::Config(ConfigError::InvalidNumTests(0)));
        assert!(err.to_string().starts_with("configuration error"));
    }

    #[test]
    fn test_unshrinkable_renders_input() {
        let err: CheckError<()> = CheckError::Unshrinkable {
            trial: 0,
            input: "(3,)".to_string(),
            message: "boom".to_string(),
            seed: 9,
        };
        assert!(err.is_falsified());
        assert!(err.to_string().contains("input: (3,)"));
        assert_eq!(err.seed(), Some(9));
    }

    #[test]
    fn test_report_display() {
        let report = Report {
            passed: 1000,
            skipped: 3,
            seed: 0,
        };
        assert_eq!(report.to_string(), "ok, passed 1000 tests (3 skipped, seed 0)");
    }
}
