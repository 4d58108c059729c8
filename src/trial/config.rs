//! Trial configuration and delay computation.

use std::time::Duration;

use rand::Rng;

/// Backoff growth saturates after this many doublings: the effective delay
/// never exceeds `retry_period * backoff^2`.
const BACKOFF_EXPONENT_CAP: u32 = 2;

/// Configuration for a [`Trial`](crate::Trial) sequence.
///
/// Configs are pure data - they describe retry behavior but don't execute it.
/// This makes them easy to test, clone, and inspect. The delay math lives in
/// [`delay_for_retry`](TrialConfig::delay_for_retry), which is deterministic
/// given the RNG passed to it.
///
/// # Defaults
///
/// Three attempts, 1 second between them, ±10% jitter, no backoff growth.
///
/// # Examples
///
/// ```rust
/// use retrial::TrialConfig;
/// use std::time::Duration;
///
/// let config = TrialConfig::new()
///     .with_num_tries(5)
///     .with_retry_period(Duration::from_millis(200))
///     .with_backoff(2.0);
///
/// assert_eq!(config.num_tries(), 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TrialConfig {
    num_tries: u32,
    retry_period: Duration,
    period_noise: f64,
    backoff: f64,
}

impl TrialConfig {
    /// Create a config with the default parameters.
    pub fn new() -> Self {
        Self {
            num_tries: 3,
            retry_period: Duration::from_secs(1),
            period_noise: 0.1,
            backoff: 1.0,
        }
    }

    /// Set the total number of attempts, including the initial one.
    ///
    /// Must be at least 1; see [`validate`](TrialConfig::validate).
    pub fn with_num_tries(mut self, n: u32) -> Self {
        self.num_tries = n;
        self
    }

    /// Set the base delay between attempts.
    pub fn with_retry_period(mut self, period: Duration) -> Self {
        self.retry_period = period;
        self
    }

    /// Set the jitter fraction applied to each delay.
    ///
    /// Each delay is perturbed by a uniformly random factor in
    /// `[1 - noise, 1 + noise]`. The value is clamped into `[0, 1]`, so a
    /// jittered delay can never go negative. With `0.0` the delays are exact
    /// and deterministic.
    pub fn with_period_noise(mut self, noise: f64) -> Self {
        self.period_noise = noise.clamp(0.0, 1.0);
        self
    }

    /// Set the multiplicative backoff factor applied on successive retries.
    ///
    /// Must be at least 1; see [`validate`](TrialConfig::validate). Growth
    /// saturates after two steps: the effective delay caps at
    /// `retry_period * backoff^2`, so with `backoff = 2.0` the delay
    /// progression is `1x, 2x, 4x, 4x, 4x, ...`.
    pub fn with_backoff(mut self, factor: f64) -> Self {
        self.backoff = factor;
        self
    }

    /// Total number of attempts.
    pub fn num_tries(&self) -> u32 {
        self.num_tries
    }

    /// Base delay between attempts.
    pub fn retry_period(&self) -> Duration {
        self.retry_period
    }

    /// Jitter fraction.
    pub fn period_noise(&self) -> f64 {
        self.period_noise
    }

    /// Backoff factor.
    pub fn backoff(&self) -> f64 {
        self.backoff
    }

    /// Check the config for out-of-range parameters.
    ///
    /// Returns an error message if `num_tries` is zero or `backoff` is below
    /// 1 (or not a number).
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.num_tries == 0 {
            return Err("num_tries must be at least 1");
        }
        if self.backoff.is_nan() || self.backoff < 1.0 {
            return Err("backoff must be at least 1");
        }
        Ok(())
    }

    /// Compute the jittered delay before retry `retry` (1-based).
    ///
    /// The base term is `retry_period * backoff^(retry - 1)`, with the
    /// exponent saturating at 2. Jitter multiplies it by a uniformly random
    /// factor in `[1 - period_noise, 1 + period_noise]`; with zero noise the
    /// RNG is not consulted and the result is exact. The result is floored at
    /// zero before conversion to a `Duration`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrial::TrialConfig;
    /// use std::time::Duration;
    ///
    /// let config = TrialConfig::new()
    ///     .with_retry_period(Duration::from_secs(1))
    ///     .with_period_noise(0.0)
    ///     .with_backoff(2.0);
    /// let mut rng = rand::rng();
    ///
    /// assert_eq!(config.delay_for_retry(1, &mut rng), Duration::from_secs(1));
    /// assert_eq!(config.delay_for_retry(2, &mut rng), Duration::from_secs(2));
    /// assert_eq!(config.delay_for_retry(3, &mut rng), Duration::from_secs(4));
    /// assert_eq!(config.delay_for_retry(4, &mut rng), Duration::from_secs(4)); // capped
    /// ```
    pub fn delay_for_retry<R: Rng + ?Sized>(&self, retry: u32, rng: &mut R) -> Duration {
        let exponent = retry.saturating_sub(1).min(BACKOFF_EXPONENT_CAP);
        let effective = self.retry_period.as_secs_f64() * self.backoff.powi(exponent as i32);

        let jittered = if self.period_noise > 0.0 {
            effective * (1.0 + rng.random_range(-self.period_noise..=self.period_noise))
        } else {
            effective
        };

        Duration::from_secs_f64(jittered.max(0.0))
    }
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self::new()
    }
}
