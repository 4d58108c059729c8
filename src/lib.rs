//! # Retrial
//!
//! > *"If at first you don't succeed, sleep a little and try again"*
//!
//! A small library for retrying flaky operations a bounded number of times
//! with randomized exponential backoff.
//!
//! ## Philosophy
//!
//! **Retrial** keeps a pure core and an imperative shell:
//! - [`TrialConfig`] and the delay math are pure data and pure functions,
//!   deterministic under a fixed RNG.
//! - [`Trial`] is the shell: it owns the loop, the blocking sleeps, and the
//!   surfacing of the final error.
//!
//! Errors propagate opaquely: whatever error type the operation produces is
//! the error type the caller gets back, unchanged. Non-final failures are
//! parked in an [`ErrorTrap`] per attempt; only the last attempt's error
//! surfaces.
//!
//! ## Quick Example
//!
//! ```rust
//! use retrial::{Trial, TrialConfig};
//! use std::time::Duration;
//!
//! fn flaky(calls: &mut u32) -> Result<&'static str, String> {
//!     *calls += 1;
//!     if *calls < 3 {
//!         Err("connection refused".to_string())
//!     } else {
//!         Ok("connected")
//!     }
//! }
//!
//! let config = TrialConfig::new()
//!     .with_num_tries(5)
//!     .with_retry_period(Duration::from_millis(1))
//!     .with_backoff(2.0);
//!
//! let mut calls = 0;
//! let result = Trial::new(config).run(|| flaky(&mut calls));
//!
//! assert_eq!(result, Ok("connected"));
//! assert_eq!(calls, 3);
//! ```
//!
//! For finer control over what happens between attempts, drive the sequence
//! yourself with [`Trial::next_attempt`] and check [`Trial::outcome`] at the
//! end; see the [`trial`] module docs.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod testing;
pub mod trap;
pub mod trial;

// Re-exports
pub use trap::ErrorTrap;
pub use trial::{Sleeper, ThreadSleeper, Trial, TrialConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::trap::ErrorTrap;
    pub use crate::trial::{Sleeper, ThreadSleeper, Trial, TrialConfig};
}
