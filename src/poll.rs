//! Bounded polling driven by the server's delay schedule.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use crate::client::Exchange;
use crate::delay::DelaySchedule;
use crate::{Error, Result};

/// How a poll finished when it did not fail outright.
#[derive(Debug)]
pub(crate) enum Polled<T> {
    /// The value was ready, or polling was disabled and this is the only
    /// value that was fetched.
    Done(T),
    /// Waiting again would overrun the timeout. Holds the last value seen,
    /// if the last exchange produced one.
    TimedOut(Option<T>),
}

/// Repeat `exchange` until `is_ready` accepts its value.
///
/// Errors for which `is_transient` returns `true` are polled through; any
/// other error is returned immediately. Between attempts the loop sleeps for
/// the delay the server suggested, and it stops once the next sleep would
/// carry the total time past `timeout_secs`. A timeout of `0` performs
/// exactly one exchange and returns its outcome untouched.
pub(crate) async fn poll<T, F, Fut, P, R>(
    timeout_secs: u64,
    mut exchange: F,
    is_ready: P,
    is_transient: R,
) -> Result<Polled<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Exchange<T>>,
    P: Fn(&T) -> bool,
    R: Fn(&Error) -> bool,
{
    let start = Instant::now();
    let timeout = Duration::from_secs(timeout_secs);
    let mut attempt = 0usize;
    let mut hint: Option<String> = None;

    loop {
        let Exchange { result, delay } = exchange().await;

        if let Some(value) = delay.filter(|v| !v.trim().is_empty()) {
            hint = Some(value);
        }

        // A zero timeout hands back the first outcome, ready or not.
        let last = match result {
            Ok(value) if timeout_secs == 0 || is_ready(&value) => {
                return Ok(Polled::Done(value));
            }
            Ok(value) => Some(value),
            Err(e) if timeout_secs > 0 && is_transient(&e) => None,
            Err(e) => return Err(e),
        };

        let schedule = hint
            .as_deref()
            .map(DelaySchedule::parse)
            .unwrap_or_default();
        let wait = schedule.delay(attempt);
        attempt += 1;

        let elapsed = start.elapsed();
        if elapsed + wait > timeout {
            warn!(
                attempts = attempt,
                elapsed_secs = elapsed.as_secs(),
                timeout_secs,
                "giving up polling"
            );
            return Ok(Polled::TimedOut(last));
        }

        debug!(
            attempt,
            wait_secs = wait.as_secs(),
            elapsed_secs = elapsed.as_secs(),
            "not ready, polling again"
        );
        sleep(wait).await;
    }
}
