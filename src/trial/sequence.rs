//! The attempt sequence and its sleep seam.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::trap::ErrorTrap;
use crate::trial::TrialConfig;

/// Blocking sleep, the trial's one imperative dependency.
///
/// [`Trial`] is generic over its sleeper so tests can intercept the requested
/// delays instead of actually waiting; see
/// [`RecordingSleeper`](crate::testing::RecordingSleeper).
pub trait Sleeper {
    /// Block the calling thread for `period`.
    fn sleep(&mut self, period: Duration);
}

/// The default [`Sleeper`]: [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, period: Duration) {
        std::thread::sleep(period);
    }
}

/// A bounded sequence of retry attempts, one [`ErrorTrap`] per attempt.
///
/// A trial yields up to `num_tries` fresh traps through
/// [`next_attempt`](Trial::next_attempt), sleeping a jittered, backed-off
/// delay before each retry. The sequence ends early on the first attempt
/// whose trap captured nothing; once it ends, [`outcome`](Trial::outcome)
/// surfaces the final attempt's error, if the sequence ran all the way to
/// failure.
///
/// Attempts run strictly sequentially on the calling thread; the only
/// suspension point is the blocking sleep between retries. A trial is not
/// restartable - construct a new one per operation.
///
/// # Consuming the sequence
///
/// Traps are lent mutably, so the sequence is driven with `while let` rather
/// than a `for` loop:
///
/// ```rust
/// use retrial::{Trial, TrialConfig};
/// use std::time::Duration;
///
/// let config = TrialConfig::new().with_retry_period(Duration::from_millis(1));
/// let mut remaining = 2;
/// let mut trial = Trial::new(config);
/// while let Some(trap) = trial.next_attempt() {
///     trap.trap(|| {
///         if remaining > 0 {
///             remaining -= 1;
///             Err("not yet".to_string())
///         } else {
///             Ok(())
///         }
///     });
/// }
/// assert_eq!(trial.attempts(), 3);
/// assert_eq!(trial.outcome(), Ok(()));
/// ```
///
/// For the common case where the operation is a single closure,
/// [`run`](Trial::run) drives the loop for you.
pub struct Trial<E, S = ThreadSleeper, R = StdRng> {
    config: TrialConfig,
    sleeper: S,
    rng: R,
    attempts: u32,
    trap: Option<ErrorTrap<E>>,
}

impl<E> Trial<E> {
    /// Create a trial with the default sleeper and an OS-seeded RNG.
    pub fn new(config: TrialConfig) -> Self {
        Self::with_parts(config, ThreadSleeper, StdRng::from_os_rng())
    }
}

impl<E, S, R> Trial<E, S, R>
where
    S: Sleeper,
    R: Rng,
{
    /// Create a trial with an explicit sleeper and RNG.
    ///
    /// This is the deterministic entry point: a recording sleeper makes the
    /// delays observable, and a seeded RNG makes the jitter reproducible.
    ///
    /// ```rust
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use retrial::testing::RecordingSleeper;
    /// use retrial::{Trial, TrialConfig};
    ///
    /// let sleeper = RecordingSleeper::new();
    /// let trial: Trial<String, _, _> = Trial::with_parts(
    ///     TrialConfig::new(),
    ///     sleeper.clone(),
    ///     StdRng::seed_from_u64(42),
    /// );
    /// # let _ = trial;
    /// ```
    pub fn with_parts(config: TrialConfig, sleeper: S, rng: R) -> Self {
        Self {
            config,
            sleeper,
            rng,
            attempts: 0,
            trap: None,
        }
    }

    /// The config this trial was built from.
    pub fn config(&self) -> &TrialConfig {
        &self.config
    }

    /// Attempts started so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Advance the sequence, yielding a fresh trap for the next attempt.
    ///
    /// Returns `None` once the sequence is over: either the previous attempt
    /// captured no error (success) or all `num_tries` attempts have failed.
    /// In the latter case the final error is held until
    /// [`outcome`](Trial::outcome) is called. Before every retry this sleeps
    /// the jittered delay computed by
    /// [`TrialConfig::delay_for_retry`].
    pub fn next_attempt(&mut self) -> Option<&mut ErrorTrap<E>> {
        if let Some(trap) = &self.trap {
            if trap.error().is_none() {
                return None;
            }
            if self.attempts >= self.config.num_tries() {
                #[cfg(feature = "tracing")]
                tracing::debug!(attempts = self.attempts, "attempts exhausted");
                return None;
            }

            let delay = self.config.delay_for_retry(self.attempts, &mut self.rng);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                attempt = self.attempts,
                delay_ms = delay.as_millis() as u64,
                "attempt failed, sleeping before retry"
            );
            self.sleeper.sleep(delay);
        }

        self.attempts += 1;
        self.trap = Some(ErrorTrap::new());
        self.trap.as_mut()
    }

    /// The sequence's verdict.
    ///
    /// `Err` with the final attempt's error, identity preserved, if the trial
    /// ran through every attempt and the last one failed. `Ok(())` on success
    /// or when the consuming loop broke off early - an abandoned sequence
    /// never surfaces anything.
    #[must_use = "a failed trial's error is dropped unless the outcome is checked"]
    pub fn outcome(self) -> Result<(), E> {
        match self.trap {
            Some(trap) if self.attempts >= self.config.num_tries() => trap.reraise(),
            _ => Ok(()),
        }
    }

    /// Run `op` to completion under this trial's retry policy.
    ///
    /// Calls `op` up to `num_tries` times, sleeping the configured delay
    /// between attempts, and returns the first success or the final attempt's
    /// error unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrial::{Trial, TrialConfig};
    /// use std::time::Duration;
    ///
    /// let config = TrialConfig::new()
    ///     .with_retry_period(Duration::from_millis(1))
    ///     .with_period_noise(0.0);
    ///
    /// let mut remaining = 2;
    /// let result = Trial::new(config).run(|| {
    ///     if remaining > 0 {
    ///         remaining -= 1;
    ///         Err("not yet")
    ///     } else {
    ///         Ok("done")
    ///     }
    /// });
    ///
    /// assert_eq!(result, Ok("done"));
    /// ```
    pub fn run<T, F>(mut self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) => {
                    self.attempts += 1;
                    if self.attempts >= self.config.num_tries() {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(attempts = self.attempts, "attempts exhausted");
                        return Err(err);
                    }

                    let delay = self.config.delay_for_retry(self.attempts, &mut self.rng);
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        attempt = self.attempts,
                        delay_ms = delay.as_millis() as u64,
                        "attempt failed, sleeping before retry"
                    );
                    self.sleeper.sleep(delay);
                }
            }
        }
    }
}

impl<E, S, R> std::fmt::Debug for Trial<E, S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trial")
            .field("config", &self.config)
            .field("attempts", &self.attempts)
            .field("trap", &self.trap.as_ref().map(|_| "<trap>"))
            .finish()
    }
}
