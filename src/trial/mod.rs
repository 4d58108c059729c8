//! Bounded retry sequences with jittered backoff.
//!
//! A [`Trial`] drives a flaky operation through up to `num_tries` attempts,
//! handing out one [`ErrorTrap`](crate::ErrorTrap) per attempt and sleeping a
//! randomized, optionally backed-off delay between them. The pieces split
//! cleanly:
//!
//! - **Pure core**: [`TrialConfig`] is just data; delay computation is a pure
//!   function of the config, the retry index, and the RNG handed to it.
//! - **Imperative shell**: [`Trial`] owns the loop, the sleep, and the final
//!   surfacing of the last error.
//!
//! # Quick Start
//!
//! ```rust
//! use retrial::{Trial, TrialConfig};
//! use std::time::Duration;
//!
//! let config = TrialConfig::new()
//!     .with_num_tries(3)
//!     .with_retry_period(Duration::from_millis(1))
//!     .with_period_noise(0.0);
//!
//! let mut calls = 0;
//! let result: Result<u32, String> = Trial::new(config).run(|| {
//!     calls += 1;
//!     if calls < 3 {
//!         Err("transient".to_string())
//!     } else {
//!         Ok(calls)
//!     }
//! });
//!
//! assert_eq!(result, Ok(3));
//! ```
//!
//! # Failure semantics
//!
//! Every non-final attempt's error is swallowed by its trap; only the final
//! attempt's error surfaces, unchanged, from [`Trial::outcome`] or
//! [`Trial::run`]. There is no wrapper type around it - the signal is the
//! original error.

mod config;
mod sequence;

pub use config::TrialConfig;
pub use sequence::{Sleeper, ThreadSleeper, Trial};
