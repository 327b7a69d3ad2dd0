//! Trial driver and shrink loop.
//!
//! A run owns one [`GenContext`] for its whole duration. Trial `i` is
//! generated at size `ceil(i * max_size / max(1, num_tests - 1))`, so early
//! trials see tiny inputs and the last trial sees `max_size`. A skipped trial
//! is retried at the same index until the attempt bound trips. The first
//! failure ends the run: its input is shrunk and reported.

use std::fmt;

use crate::arbitrary::Arbitrary;
use crate::config::Config;
use crate::context::GenContext;
use crate::error::{CheckError, Counterexample, Report};
use crate::property::{Outcome, Property, execute};
use crate::shrink::Shrink;

/// Size assigned to trial `trial` out of `num_tests`
pub fn size_for_trial(trial: usize, num_tests: usize, max_size: usize) -> usize {
    let denom = num_tests.saturating_sub(1).max(1) as u128;
    let size = (trial as u128 * max_size as u128).div_ceil(denom);
    usize::try_from(size).unwrap_or(usize::MAX).min(max_size)
}

/// Result of shrinking one failing input
#[derive(Debug, Clone, PartialEq)]
pub struct Shrunk<T> {
    pub minimal: T,
    /// Failure message for `minimal`
    pub message: String,
    /// Accepted shrink steps
    pub steps: usize,
    /// False when the step bound was reached before no candidate failed
    pub completed: bool,
}

/// Greedy shrink search.
///
/// Each iteration tries the candidates of the current input in order and
/// moves to the first one that still fails. The search stops when no
/// candidate fails, or after `max_shrinks` iterations. Skipped candidates do
/// not count as failures.
pub fn shrink_failure<Args, P>(
    property: &P,
    failing: Args,
    message: String,
    max_shrinks: usize,
    catch_panics: bool,
) -> Shrunk<Args>
where
    Args: Shrink + Clone + fmt::Debug,
    P: Property<Args> + ?Sized,
{
    let mut current = failing;
    let mut message = message;

    for step in 0..max_shrinks {
        let next = current.shrink().into_iter().find_map(|candidate| {
            match execute(property, candidate.clone(), catch_panics) {
                Outcome::Failed(msg) => Some((candidate, msg)),
                Outcome::Passed | Outcome::Skipped => None,
            }
        });

        match next {
            Some((candidate, msg)) => {
                tracing::debug!("shrink step {}: {:?}", step + 1, candidate);
                current = candidate;
                message = msg;
            }
            None => {
                return Shrunk {
                    minimal: current,
                    message,
                    steps: step,
                    completed: true,
                };
            }
        }
    }

    tracing::debug!("shrink limit of {} reached", max_shrinks);
    Shrunk {
        minimal: current,
        message,
        steps: max_shrinks,
        completed: false,
    }
}

/// A trial that failed, with whatever the caller captured from its input
struct Failure<C> {
    captured: C,
    message: String,
    trial: usize,
    size: usize,
    seed: u64,
}

/// Drives one property through a configured run
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: Config,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `property`, shrinking the first failing input.
    pub fn run<Args, P>(&self, property: &P) -> Result<Report, CheckError<Args>>
    where
        Args: Arbitrary + Shrink + Clone + fmt::Debug,
        P: Property<Args> + ?Sized,
    {
        self.drive(property, Args::clone, |failure| {
            let shrunk = shrink_failure(
                property,
                failure.captured.clone(),
                failure.message,
                self.config.max_shrinks,
                self.config.catch_panics,
            );
            let cx = Counterexample {
                original: failure.captured,
                minimal: shrunk.minimal,
                message: shrunk.message,
                trial: failure.trial,
                size: failure.size,
                shrink_steps: shrunk.steps,
                seed: failure.seed,
            };
            if shrunk.completed {
                CheckError::Falsified(cx)
            } else {
                CheckError::ShrinkExhausted(cx)
            }
        })
    }

    /// Run `property` on inputs that cannot be duplicated.
    ///
    /// Each input is rendered before the property consumes it. A failure is
    /// reported as-is, without shrinking.
    pub fn run_unshrunk<Args, P>(&self, property: &P) -> Result<Report, CheckError<Args>>
    where
        Args: Arbitrary + fmt::Debug,
        P: Property<Args> + ?Sized,
    {
        self.drive(
            property,
            |args| format!("{:?}", args),
            |failure| CheckError::Unshrinkable {
                trial: failure.trial,
                input: failure.captured,
                message: failure.message,
                seed: failure.seed,
            },
        )
    }

    fn drive<Args, P, C, T>(
        &self,
        property: &P,
        capture: impl Fn(&Args) -> C,
        on_failure: impl FnOnce(Failure<C>) -> CheckError<T>,
    ) -> Result<Report, CheckError<T>>
    where
        Args: Arbitrary,
        P: Property<Args> + ?Sized,
        T: fmt::Debug,
    {
        let config = &self.config;
        config.validate()?;

        let limit = config.attempt_limit();
        let mut ctx = GenContext::new(config.seed, 0);
        let seed = ctx.seed();
        let mut attempts = 0;
        let mut skipped = 0;

        for trial in 0..config.num_tests {
            let size = size_for_trial(trial, config.num_tests, config.max_size);
            loop {
                if attempts > limit {
                    tracing::warn!(
                        passed = trial,
                        skipped,
                        attempts,
                        "too many skipped tests"
                    );
                    return Err(CheckError::TooManySkips {
                        passed: trial,
                        skipped,
                        attempts,
                    });
                }
                attempts += 1;

                tracing::debug!("trial {trial} (size={size})");
                ctx.set_size(size);
                let args = Args::arbitrary(&mut ctx);
                let captured = capture(&args);

                match execute(property, args, config.catch_panics) {
                    Outcome::Passed => break,
                    Outcome::Skipped => skipped += 1,
                    Outcome::Failed(message) => {
                        tracing::debug!("trial {trial} failed: {message}");
                        return Err(on_failure(Failure {
                            captured,
                            message,
                            trial,
                            size,
                            seed,
                        }));
                    }
                }
            }
        }

        tracing::info!(
            passed = config.num_tests,
            skipped,
            seed,
            "property held"
        );
        Ok(Report {
            passed: config.num_tests,
            skipped,
            seed,
        })
    }
}

/// Check `property` with the default configuration, honouring `PROVISO_*`
/// environment overrides. Panics with the report if the property fails.
pub fn check<Args, P>(property: P)
where
    Args: Arbitrary + Shrink + Clone + fmt::Debug,
    P: Property<Args>,
{
    match Config::default().with_env_overrides() {
        Ok(config) => check_with(config, property),
        Err(err) => panic!("proviso: {}", err),
    }
}

/// Check `property` with an explicit configuration.
pub fn check_with<Args, P>(config: Config, property: P)
where
    Args: Arbitrary + Shrink + Clone + fmt::Debug,
    P: Property<Args>,
{
    if let Err(err) = Runner::new(config).run(&property) {
        panic!("proviso: {}", err);
    }
}

/// Check `property` with the default configuration pinned to seed 0.
pub fn check_det<Args, P>(property: P)
where
    Args: Arbitrary + Shrink + Clone + fmt::Debug,
    P: Property<Args>,
{
    check_with(Config::deterministic(), property)
}
