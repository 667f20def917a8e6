//! Bounded retry over an explicit list of delays.

use async_trait::async_trait;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Elapsed-time waits, injectable so tests never really sleep.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Waits on the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        tokio::time::sleep(duration).await;
    }
}

/// Every attempt failed.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    /// `None` only when there were no delays, and so no attempts.
    pub last_error: Option<E>,
}

/// Runs `op` once per entry of `delays`, sleeping that entry first, until
/// the first success.
///
/// Returns the value together with the number of attempts it took.
pub async fn retry_with_delays<T, E, F, Fut, Z>(
    delays: &[Duration],
    sleeper: &Z,
    mut op: F,
) -> Result<(T, u32), RetryExhausted<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    Z: Sleeper + ?Sized,
{
    let mut last_error = None;
    let mut attempts = 0;

    for delay in delays {
        sleeper.sleep(*delay).await;
        attempts += 1;
        match op().await {
            Ok(value) => {
                debug!(attempt = attempts, "Attempt succeeded");
                return Ok((value, attempts));
            }
            Err(e) => {
                warn!(
                    attempt = attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed"
                );
                last_error = Some(e);
            }
        }
    }

    Err(RetryExhausted {
        attempts,
        last_error,
    })
}
