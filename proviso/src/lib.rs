//! # Proviso - Property-Based Testing for Rust
//!
//! Proviso checks that a property holds for many generated inputs. When it
//! finds an input that breaks the property, it shrinks that input to a
//! locally minimal counterexample and reports it with the seed that
//! reproduces the run.
//!
//! ## Quick Start
//!
//! ```rust
//! use proviso::{Config, Runner, check_det};
//!
//! // Panics with a shrunk counterexample on failure
//! check_det(|a: i32, b: i32| a.wrapping_add(b) == b.wrapping_add(a));
//!
//! // Or inspect the outcome yourself
//! let runner = Runner::new(Config::default().with_seed(7));
//! let err = runner.run(&|xs: Vec<u8>| xs.len() < 5).unwrap_err();
//! assert_eq!(err.minimal().unwrap().0.len(), 5);
//! ```
//!
//! Every argument type must implement [`Arbitrary`] and [`Shrink`]. Both are
//! implemented for booleans, integers, floats, vectors, tuples and [`Fun`],
//! and can be derived for your own types with the `derive` feature.

// Lets the derive macros refer to `::proviso` from inside this crate's tests.
extern crate self as proviso;

pub mod arbitrary;
pub mod config;
pub mod context;
pub mod error;
pub mod fun;
pub mod hash;
pub mod property;
pub mod runner;
pub mod shrink;

pub use arbitrary::Arbitrary;
pub use config::{Config, ConfigError};
pub use context::GenContext;
pub use error::{CheckError, Counterexample, Report};
pub use fun::Fun;
pub use hash::ValueHash;
pub use property::{IntoOutcome, Outcome, Property, execute, fail, skip};
pub use runner::{Runner, Shrunk, check, check_det, check_with, shrink_failure, size_for_trial};
pub use shrink::Shrink;

#[cfg(feature = "derive")]
pub use proviso_derive::{Arbitrary, Shrink, ValueHash};

#[doc(hidden)]
pub mod __private {
    pub use rand::Rng;
}
