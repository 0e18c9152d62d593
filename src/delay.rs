//! Server-suggested retry pacing.
//!
//! The service attaches an `x-ms-delay` header to responses that may need to
//! be polled again. It holds a comma-separated list of millisecond waits, one
//! per attempt, with the final entry repeating once the list runs out.

use std::time::Duration;

/// Response header carrying the delay schedule.
pub(crate) const DELAY_HEADER: &str = "x-ms-delay";

const DEFAULT_DELAY_MS: u64 = 1000;

/// Ordered, non-empty list of millisecond waits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelaySchedule {
    delays: Vec<u64>,
}

impl DelaySchedule {
    /// Parse a header value.
    ///
    /// Empty input yields the default schedule of a single 1000ms wait.
    /// Tokens that do not parse as integers count as `0` rather than failing.
    pub fn parse(value: &str) -> Self {
        if value.trim().is_empty() {
            return Self::default();
        }

        let delays = value
            .split(',')
            .map(|token| token.trim().parse::<u64>().unwrap_or(0))
            .collect();

        Self { delays }
    }

    /// Milliseconds to wait after the attempt with 0-based index `attempt`.
    pub fn delay_ms(&self, attempt: usize) -> u64 {
        match self.delays.get(attempt) {
            Some(ms) => *ms,
            None => self.delays.last().copied().unwrap_or(DEFAULT_DELAY_MS),
        }
    }

    /// Wait after `attempt`, truncated to whole seconds.
    pub fn delay(&self, attempt: usize) -> Duration {
        Duration::from_secs(self.delay_ms(attempt) / 1000)
    }

    /// The configured waits in order.
    pub fn as_slice(&self) -> &[u64] {
        &self.delays
    }
}

impl Default for DelaySchedule {
    fn default() -> Self {
        Self {
            delays: vec![DEFAULT_DELAY_MS],
        }
    }
}

impl std::fmt::Display for DelaySchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for ms in &self.delays {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{ms}")?;
            first = false;
        }
        Ok(())
    }
}
