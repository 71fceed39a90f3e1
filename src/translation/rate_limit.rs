/*!
 * Fixed-window rate limiting for outbound translation calls.
 *
 * The window resets only once its full length has elapsed, so a burst at
 * the end of one window followed by a burst at the start of the next can
 * briefly double the effective rate.
 *
 * A limiter built with [`RateLimiter::persistent`] keeps its window in the
 * key-value store, so separate invocations of the binary share one quota.
 */

use chrono::{DateTime, Utc};
use log::{debug, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::RateLimitConfig;
use crate::database::KeyValueStore;

/// Storage key holding the persisted window
pub const RATE_LIMIT_KEY: &str = "rateLimit";

/// Counter state for the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateWindow {
    /// Calls permitted since `window_start`
    pub count: u32,
    /// When the current window opened
    pub window_start: DateTime<Utc>,
}

impl RateWindow {
    fn opened_at(start: DateTime<Utc>) -> Self {
        Self {
            count: 0,
            window_start: start,
        }
    }

    /// Whether more than `window` has passed since the window opened
    fn expired(&self, window: Duration, now: DateTime<Utc>) -> bool {
        // a start in the future (clock moved back) counts as zero elapsed
        let elapsed = (now - self.window_start).to_std().unwrap_or(Duration::ZERO);
        elapsed > window
    }
}

/// Fixed-window call quota
///
/// Denial is immediate; the caller decides whether to try again later.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    state: Mutex<RateWindow>,
    store: Option<KeyValueStore>,
}

impl RateLimiter {
    /// Create an in-process limiter allowing `max_requests` per `window`
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self::starting_at(max_requests, window, Utc::now())
    }

    /// Create an in-process limiter whose first window opens at `start`
    pub fn starting_at(max_requests: u32, window: Duration, start: DateTime<Utc>) -> Self {
        Self {
            max_requests,
            window,
            state: Mutex::new(RateWindow::opened_at(start)),
            store: None,
        }
    }

    /// Create a limiter whose window lives in `store`
    pub fn persistent(max_requests: u32, window: Duration, store: KeyValueStore) -> Self {
        let initial = Self::read_window(&store).unwrap_or_else(|| RateWindow::opened_at(Utc::now()));
        debug!(
            "Loaded rate window: {} calls since {}",
            initial.count, initial.window_start
        );
        Self {
            max_requests,
            window,
            state: Mutex::new(initial),
            store: Some(store),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, config.window())
    }

    /// Persistent limiter configured from `config`
    pub fn from_config_with_store(config: &RateLimitConfig, store: KeyValueStore) -> Self {
        Self::persistent(config.max_requests, config.window(), store)
    }

    fn read_window(store: &KeyValueStore) -> Option<RateWindow> {
        match store.get::<RateWindow>(RATE_LIMIT_KEY) {
            Ok(window) => window,
            Err(e) => {
                warn!("Ignoring unreadable rate window: {}", e);
                None
            }
        }
    }

    /// Try to take one call from the quota now
    pub fn allow(&self) -> bool {
        self.allow_at(Utc::now())
    }

    /// Try to take one call from the quota at `now`
    pub fn allow_at(&self, now: DateTime<Utc>) -> bool {
        let mut state = self.state.lock();

        // another process may have spent part of the quota since our last look
        if let Some(stored) = self.store.as_ref().and_then(Self::read_window) {
            *state = stored;
        }

        let mut next = *state;
        if next.expired(self.window, now) {
            next = RateWindow::opened_at(now);
        }

        if next.count >= self.max_requests {
            debug!(
                "Rate limit reached ({} calls in current {:?} window)",
                next.count, self.window
            );
            return false;
        }

        next.count += 1;
        *state = next;

        if let Some(store) = &self.store {
            if let Err(e) = store.set(RATE_LIMIT_KEY, &next) {
                warn!("Failed to persist rate window: {}", e);
            }
        }
        true
    }

    /// Calls still available in the current window at `now`
    pub fn remaining_at(&self, now: DateTime<Utc>) -> u32 {
        let state = self.window_state();
        if state.expired(self.window, now) {
            return self.max_requests;
        }
        self.max_requests.saturating_sub(state.count)
    }

    pub fn remaining(&self) -> u32 {
        self.remaining_at(Utc::now())
    }

    /// Snapshot of the current window
    pub fn window_state(&self) -> RateWindow {
        let mut state = self.state.lock();
        if let Some(stored) = self.store.as_ref().and_then(Self::read_window) {
            *state = stored;
        }
        *state
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
