//! Testing utilities for code that retries.
//!
//! The trial's two imperative seams - sleeping and entropy - are both
//! substitutable through [`Trial::with_parts`](crate::Trial::with_parts).
//! This module ships the sleeper half: a recorder that captures every
//! requested delay instead of blocking. For the entropy half, pass a seeded
//! [`StdRng`](rand::rngs::StdRng).
//!
//! # Examples
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use retrial::testing::RecordingSleeper;
//! use retrial::{Trial, TrialConfig};
//! use std::time::Duration;
//!
//! let config = TrialConfig::new()
//!     .with_retry_period(Duration::from_millis(100))
//!     .with_period_noise(0.0);
//!
//! let sleeper = RecordingSleeper::new();
//! let trial = Trial::with_parts(config, sleeper.clone(), StdRng::seed_from_u64(0));
//! let result: Result<(), _> = trial.run(|| Err("flaky"));
//!
//! assert_eq!(result, Err("flaky"));
//! assert_eq!(sleeper.slept(), vec![Duration::from_millis(100); 2]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::trial::Sleeper;

/// A [`Sleeper`] that records requested delays instead of blocking.
///
/// Clones share the same log, so keep one handle and pass another into the
/// trial; the log is readable after the trial has been consumed.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    slept: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Create a recorder with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every delay requested so far, in order.
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.borrow().clone()
    }

    /// Number of sleep calls recorded.
    pub fn call_count(&self) -> usize {
        self.slept.borrow().len()
    }

    /// Sum of all recorded delays.
    pub fn total_slept(&self) -> Duration {
        self.slept.borrow().iter().sum()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, period: Duration) {
        self.slept.borrow_mut().push(period);
    }
}
