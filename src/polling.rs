//! Adaptive polling utility.
//!
//! Repeatedly invokes a caller-supplied asynchronous probe on an interval,
//! without overlapping invocations, while adapting the interval to observed
//! failures: a successful probe snaps the interval back to its base value, a
//! failure streak grows it geometrically up to a bounded maximum. Probe
//! errors never escape the loop; they are reported through an optional
//! callback only, so a single failing probe cannot terminate a polling
//! session.
//!
//! A [`Poller`] owns its background task. Constructing one starts polling
//! with an immediate probe; [`Poller::disable`] (or dropping the poller)
//! cancels the pending timer and discards the result of any probe still in
//! flight.

use std::{
    future::Future,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::task::JoinHandle;

/// Default upper bound for the polling interval.
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(30);

/// Default geometric growth factor applied after consecutive failures.
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 1.5;

/// Error type reported to the `on_error` callback.
pub type ProbeError = Box<dyn std::error::Error + Send + Sync>;

/// Static description of a polling session.
///
/// Invariants: `base_interval <= max_interval` and `backoff_multiplier > 1`.
/// [`PollerConfig::new`] normalizes inputs that violate them rather than
/// panicking.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Identifying name for diagnostics.
    pub name: String,
    pub base_interval: Duration,
    pub max_interval: Duration,
    pub backoff_multiplier: f64,
}

impl PollerConfig {
    /// Creates a config with the default maximum interval and multiplier.
    pub fn new(name: impl Into<String>, base_interval: Duration) -> Self {
        Self {
            name: name.into(),
            base_interval,
            max_interval: DEFAULT_MAX_INTERVAL.max(base_interval),
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }

    /// Overrides the maximum interval, clamped to at least the base interval.
    pub fn with_max_interval(mut self, max_interval: Duration) -> Self {
        self.max_interval = max_interval.max(self.base_interval);
        self
    }

    /// Overrides the backoff multiplier. Values at or below 1 fall back to
    /// the default so the interval can never shrink on failure.
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = if multiplier > 1.0 {
            multiplier
        } else {
            DEFAULT_BACKOFF_MULTIPLIER
        };
        self
    }
}

/// Mutable runtime state of a polling session.
///
/// The current interval is always within `[base_interval, max_interval]`.
/// Kept separate from the poll loop so the backoff arithmetic is a plain
/// synchronous function that tests can drive outcome by outcome.
#[derive(Debug, Clone)]
pub struct BackoffState {
    current_interval: Duration,
    consecutive_errors: u32,
}

impl BackoffState {
    pub fn new(config: &PollerConfig) -> Self {
        Self {
            current_interval: config.base_interval,
            consecutive_errors: 0,
        }
    }

    /// Resets the streak and snaps the interval back to base.
    pub fn record_success(&mut self, config: &PollerConfig) {
        self.consecutive_errors = 0;
        self.current_interval = config.base_interval;
    }

    /// Extends the failure streak. The first failure keeps the current
    /// interval; from the second consecutive failure on, the interval grows
    /// by the multiplier, clamped to the maximum.
    pub fn record_failure(&mut self, config: &PollerConfig) {
        self.consecutive_errors += 1;
        if self.consecutive_errors > 1 {
            let grown = self.current_interval.mul_f64(config.backoff_multiplier);
            self.current_interval = grown.min(config.max_interval);
        }
    }

    pub fn current_interval(&self) -> Duration {
        self.current_interval
    }

    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }
}

/// Snapshot of a poller's runtime state, for readouts and tests.
#[derive(Debug, Clone)]
pub struct PollerStats {
    pub current_interval: Duration,
    pub consecutive_errors: u32,
    pub in_flight: bool,
}

/// A running polling session.
///
/// The probe is invoked immediately on spawn, then again after the current
/// interval each time it settles. Probes are strictly sequential: a new tick
/// never starts before the previous probe has completed, so there is never
/// more than one probe in flight per session.
pub struct Poller {
    active: Arc<AtomicBool>,
    in_flight: Arc<AtomicBool>,
    state: Arc<Mutex<BackoffState>>,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Starts a polling session.
    ///
    /// `probe` is the operation to run on each tick; returning `Err` counts
    /// as a failure. `on_error` receives every probe error; errors are never
    /// propagated out of the loop.
    pub fn spawn<P, Fut>(
        config: PollerConfig,
        mut probe: P,
        mut on_error: Option<Box<dyn FnMut(ProbeError) + Send>>,
    ) -> Self
    where
        P: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ProbeError>> + Send,
    {
        let active = Arc::new(AtomicBool::new(true));
        let in_flight = Arc::new(AtomicBool::new(false));
        let state = Arc::new(Mutex::new(BackoffState::new(&config)));

        let task_active = Arc::clone(&active);
        let task_in_flight = Arc::clone(&in_flight);
        let task_state = Arc::clone(&state);

        let handle = tokio::spawn(async move {
            loop {
                if !task_active.load(Ordering::SeqCst) {
                    break;
                }

                task_in_flight.store(true, Ordering::SeqCst);
                let result = probe().await;
                task_in_flight.store(false, Ordering::SeqCst);

                // A disable that raced the probe wins: its result is discarded.
                if !task_active.load(Ordering::SeqCst) {
                    break;
                }

                match result {
                    Ok(()) => {
                        lock_state(&task_state).record_success(&config);
                    }
                    Err(e) => {
                        lock_state(&task_state).record_failure(&config);
                        if let Some(cb) = on_error.as_mut() {
                            cb(e);
                        }
                    }
                }

                let delay = lock_state(&task_state).current_interval();
                tokio::time::sleep(delay).await;
            }
        });

        Self {
            active,
            in_flight,
            state,
            handle,
        }
    }

    /// Stops the session: cancels the pending timer and marks any in-flight
    /// probe's result as discarded. Idempotent.
    pub fn disable(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.handle.abort();
        self.in_flight.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst) && !self.handle.is_finished()
    }

    pub fn stats(&self) -> PollerStats {
        let state = lock_state(&self.state);
        PollerStats {
            current_interval: state.current_interval(),
            consecutive_errors: state.consecutive_errors(),
            in_flight: self.in_flight.load(Ordering::SeqCst),
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.disable();
    }
}

// Poisoning cannot corrupt BackoffState (all mutations are single
// assignments), so recover the inner value instead of panicking.
fn lock_state(state: &Mutex<BackoffState>) -> std::sync::MutexGuard<'_, BackoffState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}
