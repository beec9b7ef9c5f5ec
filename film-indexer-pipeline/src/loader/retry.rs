//! Retry policy with exponential backoff.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

/// How often and how patiently to retry a failing operation.
///
/// The n-th wait (1-based) lasts `initial_delay * multiplier^(n-1)`, capped
/// at `max_delay`. With `max_attempts` unset the operation is retried until
/// it succeeds or fails with a non-retryable error.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Wait before the second attempt.
    pub initial_delay: Duration,
    /// Growth factor between consecutive waits.
    pub multiplier: f64,
    /// Upper bound for a single wait.
    pub max_delay: Duration,
    /// Total attempts allowed, including the first; `None` for unbounded.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: Duration::from_secs(300),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Wait after the `attempt`-th failed attempt (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.initial_delay.as_secs_f64() * self.multiplier.max(1.0).powi(exponent);

        if secs.is_finite() && secs < self.max_delay.as_secs_f64() {
            Duration::from_secs_f64(secs)
        } else {
            self.max_delay
        }
    }

    /// Whether another attempt is allowed after `attempt` attempts.
    pub fn allows_retry_after(&self, attempt: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempt < max)
    }

    /// Run `operation` until it succeeds, fails with an error `is_retryable`
    /// rejects, or the attempt limit is reached.
    ///
    /// Each backoff is logged at `warn` with the attempt number and delay.
    pub async fn run<T, E, F, Fut, P>(
        &self,
        operation: &str,
        is_retryable: P,
        mut attempt_fn: F,
    ) -> Result<T, E>
    where
        E: Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
    {
        let mut attempt: u32 = 1;

        loop {
            match attempt_fn().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(operation = %operation, attempt = attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if is_retryable(&e) && self.allows_retry_after(attempt) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        operation = %operation,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Backing off after transient failure"
                    );
                    tokio::time::sleep(delay).await;
                    attempt = attempt.saturating_add(1);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy() -> RetryPolicy {
        RetryPolicy {
            initial_delay: Duration::from_millis(100),
            multiplier: 2.0,
            max_delay: Duration::from_millis(1000),
            max_attempts: None,
        }
    }

    #[test]
    fn test_delays_grow_then_cap() {
        let policy = policy();

        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for(4), Duration::from_millis(800));
        assert_eq!(policy.delay_for(5), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_millis(1000));
    }

    #[test]
    fn test_unbounded_attempts() {
        let policy = policy();

        assert!(policy.allows_retry_after(1));
        assert!(policy.allows_retry_after(u32::MAX - 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<u32, String> = policy()
            .run("test", |_| true, move || async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(format!("failure {}", n))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_stops_immediately() {
        let calls = AtomicU32::new(0);
        let counter = &calls;

        let result: Result<(), String> = policy()
            .run("test", |e: &String| e != "fatal", move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err("fatal".to_string())
            })
            .await;

        assert_eq!(result, Err("fatal".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_attempts_limits_retries() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let policy = RetryPolicy {
            max_attempts: Some(4),
            ..policy()
        };

        let result: Result<(), String> = policy
            .run("test", |_| true, move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err("still down".to_string())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
