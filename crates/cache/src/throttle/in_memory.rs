// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{collections::HashMap, sync::Arc, time::Duration};

use parking_lot::Mutex;
use rigmart_core::util::clock::{TimestampMillis, UtcDateTimeMs};
use tokio::task::JoinHandle;

use super::ThrottleStore;

/// Last counted view per key, local to the process.
///
/// Entries accumulate until swept. Multiple instances of the server
/// throttle independently of each other.
#[derive(Debug, Default)]
pub struct InMemoryThrottleStore {
    last_seen: Mutex<HashMap<String, TimestampMillis>>,
}

impl InMemoryThrottleStore {
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.last_seen.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_seen.lock().is_empty()
    }

    pub fn acquire(&self, key: &str, now: UtcDateTimeMs, window_millis: TimestampMillis) -> bool {
        let now = now.unix_timestamp_millis();
        let mut last_seen = self.last_seen.lock();
        if let Some(seen) = last_seen.get_mut(key) {
            if now.saturating_sub(*seen) > window_millis {
                *seen = now;
                return true;
            }
            return false;
        }
        last_seen.insert(key.to_owned(), now);
        true
    }

    /// Remove all entries that have been seen before the window
    /// that ends at `now`.
    ///
    /// Returns the number of removed entries.
    pub fn sweep(&self, now: UtcDateTimeMs, window_millis: TimestampMillis) -> usize {
        let threshold = now.unix_timestamp_millis().saturating_sub(window_millis);
        let mut last_seen = self.last_seen.lock();
        let len_before = last_seen.len();
        last_seen.retain(|_, seen| *seen >= threshold);
        len_before - last_seen.len()
    }

    /// Sweep periodically until the returned handle is aborted.
    ///
    /// The first sweep happens after one `interval` has elapsed.
    /// Must be invoked within the context of a Tokio runtime.
    #[must_use]
    pub fn spawn_sweeper(
        self: Arc<Self>,
        interval: Duration,
        window_millis: TimestampMillis,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticks = tokio::time::interval_at(start, interval);
            loop {
                ticks.tick().await;
                let removed = self.sweep(UtcDateTimeMs::now(), window_millis);
                if removed > 0 {
                    log::debug!("Swept {removed} view throttle entries");
                }
            }
        })
    }
}

impl ThrottleStore for InMemoryThrottleStore {
    async fn try_acquire(
        &self,
        key: &str,
        now: UtcDateTimeMs,
        window_millis: TimestampMillis,
    ) -> bool {
        self.acquire(key, now, window_millis)
    }
}
