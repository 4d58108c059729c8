//! End-to-end scenarios through the public API.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use retrial::testing::RecordingSleeper;
use retrial::{ErrorTrap, Trial, TrialConfig};

fn recorded_trial<E>(config: TrialConfig, seed: u64) -> (Trial<E, RecordingSleeper, StdRng>, RecordingSleeper) {
    let sleeper = RecordingSleeper::new();
    let trial = Trial::with_parts(config, sleeper.clone(), StdRng::seed_from_u64(seed));
    (trial, sleeper)
}

#[test]
fn trap_scope_runs_normally_and_reraise_is_noop() {
    let mut trap = ErrorTrap::<String>::new();
    let mut a = 10;

    trap.trap(|| {
        a = 20;
        Ok::<_, String>(())
    });

    assert_eq!(a, 20);
    assert_eq!(trap.reraise(), Ok(()));
}

#[test]
fn trap_captures_and_reraises_with_original_message() {
    let mut trap = ErrorTrap::new();

    let _: Option<()> = trap.trap(|| Err("foo".to_string()));

    assert_eq!(trap.error().map(String::as_str), Some("foo"));
    assert_eq!(trap.reraise(), Err("foo".to_string()));
}

#[test]
fn successful_operation_gets_a_single_attempt() {
    let mut attempts = Vec::new();
    let mut trial = Trial::new(TrialConfig::new());

    while let Some(trap) = trial.next_attempt() {
        let n = attempts.len();
        attempts.push(n);
        trap.trap(|| Ok::<_, String>(()));
    }

    assert_eq!(attempts, vec![0]);
    assert_eq!(trial.outcome(), Ok(()));
}

#[test]
fn failing_operation_uses_all_default_attempts() {
    // real sleeper, zero period: exercises the unmocked path
    let config = TrialConfig::new().with_retry_period(Duration::ZERO);
    let mut attempts = Vec::new();
    let mut trial = Trial::new(config);

    while let Some(trap) = trial.next_attempt() {
        let n = attempts.len();
        attempts.push(n);
        let _ = trap.trap(|| Err::<(), _>("persistent".to_string()));
    }

    assert_eq!(attempts, vec![0, 1, 2]);
    assert_eq!(trial.outcome(), Err("persistent".to_string()));
}

#[test]
fn constant_period_without_noise_sleeps_exact_amounts() {
    let config = TrialConfig::new()
        .with_retry_period(Duration::from_secs_f64(0.1))
        .with_period_noise(0.0);
    let (mut trial, sleeper) = recorded_trial(config, 0);
    let mut attempts = 0;

    while let Some(trap) = trial.next_attempt() {
        attempts += 1;
        let _ = trap.trap(|| Err::<(), _>("boom"));
    }

    assert_eq!(attempts, 3);
    assert_eq!(
        sleeper.slept(),
        vec![Duration::from_secs_f64(0.1), Duration::from_secs_f64(0.1)]
    );
    assert!(trial.outcome().is_err());
}

#[test]
fn noisy_delays_spread_across_the_jitter_band() {
    let config = TrialConfig::new()
        .with_num_tries(1000)
        .with_retry_period(Duration::from_secs(2))
        .with_period_noise(0.5);
    let (trial, sleeper) = recorded_trial(config, 7);

    let result: Result<(), _> = trial.run(|| Err("boom"));
    assert_eq!(result, Err("boom"));

    let slept = sleeper.slept();
    assert_eq!(slept.len(), 999);

    let mut found_small = false;
    let mut found_large = false;
    for delay in slept {
        let secs = delay.as_secs_f64();
        assert!((1.0..=3.0).contains(&secs), "delay out of band: {secs}");
        if secs < 1.1 {
            found_small = true;
        }
        if secs > 2.9 {
            found_large = true;
        }
    }
    assert!(found_small, "no delay near the lower edge of the band");
    assert!(found_large, "no delay near the upper edge of the band");
}

#[test]
fn backoff_doubles_then_caps() {
    let config = TrialConfig::new()
        .with_num_tries(6)
        .with_retry_period(Duration::from_secs(1))
        .with_period_noise(0.0)
        .with_backoff(2.0);
    let (mut trial, sleeper) = recorded_trial(config, 0);
    let mut attempts = 0;

    while let Some(trap) = trial.next_attempt() {
        attempts += 1;
        let _ = trap.trap(|| Err::<(), _>("boom"));
    }

    assert_eq!(attempts, 6);
    assert_eq!(
        sleeper.slept(),
        vec![
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(4),
            Duration::from_secs(4),
            Duration::from_secs(4),
        ]
    );
    assert!(trial.outcome().is_err());
}

#[test]
fn breaking_out_early_surfaces_nothing() {
    let config = TrialConfig::new().with_num_tries(10);
    let (mut trial, sleeper) = recorded_trial(config, 0);

    while let Some(trap) = trial.next_attempt() {
        let _ = trap.trap(|| Err::<(), _>("abandoned"));
        break;
    }

    assert_eq!(sleeper.call_count(), 0);
    assert_eq!(trial.outcome(), Ok(()));
}

#[test]
fn custom_error_types_pass_through_unchanged() {
    #[derive(Debug, PartialEq)]
    enum DialError {
        Refused { port: u16 },
    }

    let config = TrialConfig::new().with_retry_period(Duration::ZERO);
    let (trial, _) = recorded_trial(config, 0);

    let result: Result<(), _> = trial.run(|| Err(DialError::Refused { port: 4222 }));

    assert_eq!(result, Err(DialError::Refused { port: 4222 }));
}
