// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Debouncing of view events per client and resource.
//!
//! A view event of a client for a resource is counted if no other
//! event of the same pair has been counted during the preceding window.
//! Suppressed events do not extend the window.

use std::sync::Arc;

use rigmart_core::util::clock::{TimestampMillis, UtcDateTimeMs};

mod in_memory;
pub use self::in_memory::InMemoryThrottleStore;

#[cfg(feature = "redis")]
mod redis_store;
#[cfg(feature = "redis")]
pub use self::redis_store::RedisThrottleStore;

pub const DEFAULT_WINDOW_MILLIS: TimestampMillis = 60_000;

pub const DEFAULT_SWEEP_INTERVAL_MILLIS: u64 = 300_000;

pub trait ThrottleStore: Send + Sync {
    /// Try to record a counted event for `key` at `now`.
    ///
    /// Returns `true` if the event should be counted, i.e. if no event
    /// has been recorded for `key` or the last one is older than
    /// `window_millis`. Unavailable stores must count the event.
    fn try_acquire(
        &self,
        key: &str,
        now: UtcDateTimeMs,
        window_millis: TimestampMillis,
    ) -> impl Future<Output = bool> + Send;
}

#[derive(Debug)]
pub enum AnyThrottleStore {
    /// Shared with the periodic sweeper.
    InMemory(Arc<InMemoryThrottleStore>),
    #[cfg(feature = "redis")]
    Redis(RedisThrottleStore),
}

impl ThrottleStore for AnyThrottleStore {
    async fn try_acquire(
        &self,
        key: &str,
        now: UtcDateTimeMs,
        window_millis: TimestampMillis,
    ) -> bool {
        match self {
            Self::InMemory(store) => store.try_acquire(key, now, window_millis).await,
            #[cfg(feature = "redis")]
            Self::Redis(store) => store.try_acquire(key, now, window_millis).await,
        }
    }
}

impl From<Arc<InMemoryThrottleStore>> for AnyThrottleStore {
    fn from(from: Arc<InMemoryThrottleStore>) -> Self {
        Self::InMemory(from)
    }
}

impl From<InMemoryThrottleStore> for AnyThrottleStore {
    fn from(from: InMemoryThrottleStore) -> Self {
        Self::InMemory(Arc::new(from))
    }
}

#[cfg(feature = "redis")]
impl From<RedisThrottleStore> for AnyThrottleStore {
    fn from(from: RedisThrottleStore) -> Self {
        Self::Redis(from)
    }
}

#[derive(Debug)]
pub struct ViewThrottle<S> {
    store: S,
    window_millis: TimestampMillis,
}

impl<S> ViewThrottle<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self::with_window_millis(store, DEFAULT_WINDOW_MILLIS)
    }

    #[must_use]
    pub const fn with_window_millis(store: S, window_millis: TimestampMillis) -> Self {
        Self {
            store,
            window_millis,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn window_millis(&self) -> TimestampMillis {
        self.window_millis
    }

    #[must_use]
    pub fn throttle_key(client: &str, resource: &str) -> String {
        format!("view:{resource}:{client}")
    }
}

impl<S: ThrottleStore> ViewThrottle<S> {
    /// Returns `true` if the view should be counted.
    pub async fn register_view(&self, client: &str, resource: &str, now: UtcDateTimeMs) -> bool {
        let key = Self::throttle_key(client, resource);
        let counted = self.store.try_acquire(&key, now, self.window_millis).await;
        if !counted {
            log::debug!("Suppressed repeated view: {key}");
        }
        counted
    }
}

#[cfg(test)]
mod tests;
