//! Bounded readiness probing
//!
//! A [`Prober`] runs a [`LivenessCheck`] at a fixed rate until it succeeds or
//! the timeout elapses. The first attempt runs immediately, the next ones at
//! `start + n * interval`. Slots missed by a slow attempt are skipped, and an
//! attempt still in flight at the deadline is abandoned.

use crate::{
    Error,
    clock::{Clock, TokioClock},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
/// Longest accepted timeout, one year
pub const MAX_TIMEOUT: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Zero-argument check telling whether a target currently accepts requests
#[async_trait]
pub trait LivenessCheck: Send {
    /// # Errors
    ///
    /// Returns an error if the target is not reachable right now
    async fn check(&mut self) -> anyhow::Result<()>;
}

/// Poll interval and deadline for one probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSettings {
    interval: Duration,
    timeout: Duration,
}

impl ProbeSettings {
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if either duration is zero or the
    /// timeout is longer than [`MAX_TIMEOUT`]
    pub fn new(interval: Duration, timeout: Duration) -> Result<Self, Error> {
        if interval.is_zero() {
            return Err(Error::Configuration(
                "probe interval must be greater than zero".to_string(),
            ));
        }

        if timeout.is_zero() {
            return Err(Error::Configuration(
                "probe timeout must be greater than zero".to_string(),
            ));
        }

        if timeout > MAX_TIMEOUT {
            return Err(Error::Configuration(format!(
                "probe timeout must be at most {} seconds",
                MAX_TIMEOUT.as_secs()
            )));
        }

        Ok(Self { interval, timeout })
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Terminal state of a probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Ready {
        attempts: u32,
        failed_attempts: u32,
        elapsed: Duration,
    },
    TimedOut {
        attempts: u32,
        failed_attempts: u32,
        elapsed: Duration,
        last_error: Option<String>,
    },
}

impl ProbeOutcome {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    #[must_use]
    pub const fn attempts(&self) -> u32 {
        match self {
            Self::Ready { attempts, .. } | Self::TimedOut { attempts, .. } => *attempts,
        }
    }

    #[must_use]
    pub const fn failed_attempts(&self) -> u32 {
        match self {
            Self::Ready {
                failed_attempts, ..
            }
            | Self::TimedOut {
                failed_attempts, ..
            } => *failed_attempts,
        }
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        match self {
            Self::Ready { elapsed, .. } | Self::TimedOut { elapsed, .. } => *elapsed,
        }
    }

    /// Turn a timeout into [`Error::DeadlineExceeded`] for `target`
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeadlineExceeded`] when the probe timed out
    pub fn into_result(self, target: &str, timeout: Duration) -> Result<Self, Error> {
        match self {
            Self::Ready { .. } => Ok(self),
            Self::TimedOut {
                attempts,
                last_error,
                ..
            } => Err(Error::DeadlineExceeded {
                target: target.to_string(),
                timeout,
                attempts,
                last_error,
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Prober<C = TokioClock> {
    settings: ProbeSettings,
    clock: C,
}

impl Prober {
    #[must_use]
    pub fn new(settings: ProbeSettings) -> Self {
        Self::with_clock(settings, TokioClock)
    }
}

impl<C: Clock> Prober<C> {
    #[must_use]
    pub const fn with_clock(settings: ProbeSettings, clock: C) -> Self {
        Self { settings, clock }
    }

    #[must_use]
    pub const fn settings(&self) -> ProbeSettings {
        self.settings
    }

    /// Poll `target` until it answers or the timeout elapses
    pub async fn probe<L>(&self, target: &mut L) -> ProbeOutcome
    where
        L: LivenessCheck + ?Sized,
    {
        let interval = self.settings.interval;
        let start = self.clock.now();
        let deadline = start
            .checked_add(self.settings.timeout)
            .or_else(|| start.checked_add(MAX_TIMEOUT))
            .unwrap_or(start);
        let mut next = start;
        let mut attempts: u32 = 0;
        let mut last_error = None;

        loop {
            if self.clock.now() >= deadline {
                return ProbeOutcome::TimedOut {
                    attempts,
                    failed_attempts: attempts,
                    elapsed: self.clock.now() - start,
                    last_error,
                };
            }

            attempts += 1;
            debug!(attempt = attempts, "checking liveness");

            let result = tokio::select! {
                biased;
                result = target.check() => Some(result),
                () = self.clock.sleep_until(deadline) => None,
            };

            match result {
                Some(Ok(())) => {
                    let elapsed = self.clock.now() - start;
                    info!(
                        attempt = attempts,
                        elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                        "connected"
                    );
                    return ProbeOutcome::Ready {
                        attempts,
                        failed_attempts: attempts - 1,
                        elapsed,
                    };
                }
                Some(Err(err)) => {
                    let cause = format!("{err:#}");
                    warn!(attempt = attempts, error = %cause, "try connecting...");
                    last_error = Some(cause);
                }
                None => {
                    warn!(attempt = attempts, "liveness check still pending at deadline");
                    return ProbeOutcome::TimedOut {
                        attempts,
                        failed_attempts: attempts,
                        elapsed: self.clock.now() - start,
                        last_error: Some("liveness check did not complete".to_string()),
                    };
                }
            }

            // interval is never zero, so this terminates
            let now = self.clock.now();
            while next <= now {
                let Some(slot) = next.checked_add(interval) else {
                    next = deadline;
                    break;
                };
                next = slot;
            }

            self.clock.sleep_until(next.min(deadline)).await;
        }
    }
}
