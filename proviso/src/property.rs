//! Property definitions and the signals a property can raise.
//!
//! A property either returns normally, raises an assertion failure, or
//! raises a skip. All three are folded into an [`Outcome`] so the trial
//! driver can branch on a tag instead of inspecting panics itself.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Result of one property invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The property held for this input
    Passed,
    /// The input is a counterexample, with the failure message
    Failed(String),
    /// The property declined to judge this input
    Skipped,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Conversion from a property's return value into an [`Outcome`]
pub trait IntoOutcome {
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Outcome {
        self
    }
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> Outcome {
        if self {
            Outcome::Passed
        } else {
            Outcome::Failed("property returned false".to_string())
        }
    }
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome {
        Outcome::Passed
    }
}

impl<E: fmt::Display> IntoOutcome for Result<(), E> {
    fn into_outcome(self) -> Outcome {
        match self {
            Ok(()) => Outcome::Passed,
            Err(err) => Outcome::Failed(err.to_string()),
        }
    }
}

/// Property definition trait
///
/// `Args` is the tuple of parameter types. Implemented for every `Fn` of
/// one to eight arguments whose return type implements [`IntoOutcome`], so
/// `|a: i32, b: i32| a + b == b + a` is a `Property<(i32, i32)>`.
pub trait Property<Args> {
    fn call(&self, args: Args) -> Outcome;
}

macro_rules! impl_property_fn {
    ($($name:ident),+) => {
        impl<Func, Out, $($name),+> Property<($($name,)+)> for Func
        where
            Func: Fn($($name),+) -> Out,
            Out: IntoOutcome,
        {
            #[allow(non_snake_case)]
            fn call(&self, ($($name,)+): ($($name,)+)) -> Outcome {
                self($($name),+).into_outcome()
            }
        }
    };
}

impl_property_fn!(A);
impl_property_fn!(A, B);
impl_property_fn!(A, B, C);
impl_property_fn!(A, B, C, D);
impl_property_fn!(A, B, C, D, E);
impl_property_fn!(A, B, C, D, E, F);
impl_property_fn!(A, B, C, D, E, F, G);
impl_property_fn!(A, B, C, D, E, F, G, H);

/// Unwind payload carrying an assertion failure
#[derive(Debug)]
struct FailureSignal(String);

/// Unwind payload carrying a skip
#[derive(Debug)]
struct SkipSignal;

/// Skip the current trial.
///
/// May be called from anywhere below the property body. The driver retries
/// the same trial with fresh input, up to the configured skip bound.
pub fn skip() -> ! {
    panic::resume_unwind(Box::new(SkipSignal))
}

/// Fail the current trial with `message`.
///
/// Unlike `panic!`, this does not run the panic hook, so shrinking does not
/// print a backtrace for every candidate it tries.
pub fn fail(message: impl Into<String>) -> ! {
    panic::resume_unwind(Box::new(FailureSignal(message.into())))
}

/// Run one invocation of `property`, folding signals into an [`Outcome`].
///
/// With `catch_panics` unset, panics other than [`fail`] and [`skip`] are
/// propagated unchanged.
pub fn execute<Args, P>(property: &P, args: Args, catch_panics: bool) -> Outcome
where
    P: Property<Args> + ?Sized,
{
    match panic::catch_unwind(AssertUnwindSafe(|| property.call(args))) {
        Ok(outcome) => outcome,
        Err(payload) => {
            if payload.is::<SkipSignal>() {
                return Outcome::Skipped;
            }
            match payload.downcast::<FailureSignal>() {
                Ok(failure) => Outcome::Failed(failure.0),
                Err(payload) if catch_panics => Outcome::Failed(panic_message(payload.as_ref())),
                Err(payload) => panic::resume_unwind(payload),
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "property panicked".to_string()
    }
}

/// Skip the current trial unless the condition holds
#[macro_export]
macro_rules! prop_assume {
    ($cond:expr) => {
        if !$cond {
            $crate::skip()
        }
    };
}

/// Fail the current trial unless the condition holds
#[macro_export]
macro_rules! prop_assert {
    ($cond:expr) => {
        if !$cond {
            $crate::fail(concat!("assertion failed: ", stringify!($cond)))
        }
    };
    ($cond:expr, $($fmt:tt)+) => {
        if !$cond {
            $crate::fail(format!($($fmt)+))
        }
    };
}

/// Fail the current trial unless both sides are equal
#[macro_export]
macro_rules! prop_assert_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => {
                if !(*left == *right) {
                    $crate::fail(format!(
                        "assertion `left == right` failed\n  left: {:?}\n right: {:?}",
                        left, right
                    ))
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_values_map_to_outcomes() {
        assert_eq!(true.into_outcome(), Outcome::Passed);
        assert!(false.into_outcome().is_failure());
        assert_eq!(().into_outcome(), Outcome::Passed);
        assert_eq!(
            Err::<(), _>("bad input").into_outcome(),
            Outcome::Failed("bad input".to_string())
        );
    }

    #[test]
    fn test_closures_are_properties() {
        let commutes = |a: i32, b: i32| a + b == b + a;
        assert_eq!(execute(&commutes, (1, 2), true), Outcome::Passed);

        let never = |_: u8| false;
        assert!(execute(&never, (0,), true).is_failure());
    }

    #[test]
    fn test_skip_signal_is_intercepted() {
        let prop = |x: i32| {
            if x % 2 != 0 {
                skip();
            }
            true
        };
        assert_eq!(execute(&prop, (3,), true), Outcome::Skipped);
        assert_eq!(execute(&prop, (4,), true), Outcome::Passed);
    }

    #[test]
    fn test_fail_signal_carries_message() {
        let prop = |x: i32| {
            prop_assert!(x < 10, "{} is too large", x);
        };
        assert_eq!(
            execute(&prop, (12,), false),
            Outcome::Failed("12 is too large".to_string())
        );
    }

    #[test]
    fn test_prop_assert_eq_renders_both_sides() {
        let prop = |a: i32, b: i32| {
            prop_assert_eq!(a, b);
        };
        match execute(&prop, (1, 2), false) {
            Outcome::Failed(message) => {
                assert!(message.contains("left: 1"));
                assert!(message.contains("right: 2"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_prop_assume_skips() {
        let prop = |x: u32| {
            prop_assume!(x > 0);
            true
        };
        assert_eq!(execute(&prop, (0,), true), Outcome::Skipped);
    }

    #[test]
    fn test_foreign_panics_count_as_failures_when_caught() {
        let prop = |x: i32| {
            assert!(x > 100, "x was {}", x);
        };
        assert_eq!(
            execute(&prop, (1,), true),
            Outcome::Failed("x was 1".to_string())
        );
    }

    #[test]
    fn test_foreign_panics_propagate_when_not_caught() {
        let prop = |_: i32| -> bool { panic!("boom") };
        let result = panic::catch_unwind(AssertUnwindSafe(|| execute(&prop, (1,), false)));
        let payload = result.expect_err("panic should propagate");
        assert_eq!(panic_message(payload.as_ref()), "boom");
    }
}
