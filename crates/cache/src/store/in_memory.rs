// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{collections::HashMap, sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::{task::JoinHandle, time::Instant};

use super::CacheStore;
use crate::glob::GlobPattern;

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// Process-local store for single-instance deployments.
///
/// Expired entries are dropped lazily when accessed and
/// periodically by [`Self::spawn_purger()`].
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryCacheStore {
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    /// Number of entries, including those that expired but
    /// have not been purged yet.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns the number of purged entries.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let len_before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        len_before - entries.len()
    }

    /// Purge expired entries periodically until the returned handle
    /// is aborted.
    ///
    /// The first purge happens after one `interval` has elapsed.
    /// Must be invoked within the context of a Tokio runtime.
    #[must_use]
    pub fn spawn_purger(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let start = Instant::now() + interval;
            let mut ticks = tokio::time::interval_at(start, interval);
            loop {
                ticks.tick().await;
                let purged = self.purge_expired();
                if purged > 0 {
                    log::debug!("Purged {purged} expired cache entries");
                }
            }
        })
    }

    fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
            Some(_) => (),
            None => return None,
        }
        entries.remove(key);
        None
    }

    fn set(&self, key: &str, value: String, ttl: Duration) {
        let expires_at = Instant::now() + ttl;
        self.entries
            .lock()
            .insert(key.to_owned(), Entry { value, expires_at });
    }

    fn delete_matching(&self, pattern: &GlobPattern) -> usize {
        let mut entries = self.entries.lock();
        let len_before = entries.len();
        entries.retain(|key, _| !pattern.matches(key));
        len_before - entries.len()
    }
}

impl CacheStore for InMemoryCacheStore {
    async fn try_get(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    async fn try_set(&self, key: &str, value: String, ttl: Duration) -> bool {
        if ttl.is_zero() {
            return false;
        }
        self.set(key, value, ttl);
        true
    }

    async fn try_delete_matching(&self, pattern: &GlobPattern) -> usize {
        self.delete_matching(pattern)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::tests::TestResult;

    #[test(tokio::test(start_paused = true))]
    async fn entries_expire() {
        let store = InMemoryCacheStore::new();
        assert!(store.try_set("k", "v".to_owned(), Duration::from_secs(10)).await);
        assert_eq!(Some("v"), store.try_get("k").await.as_deref());
        tokio::time::advance(Duration::from_secs(9)).await;
        assert_eq!(Some("v"), store.try_get("k").await.as_deref());
        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(None, store.try_get("k").await);
        assert!(store.is_empty());
    }

    #[test(tokio::test(start_paused = true))]
    async fn purge_expired_entries() {
        let store = InMemoryCacheStore::new();
        store.try_set("short", "1".to_owned(), Duration::from_secs(1)).await;
        store.try_set("long", "2".to_owned(), Duration::from_secs(60)).await;
        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(1, store.purge_expired());
        assert_eq!(1, store.len());
        assert_eq!(Some("2"), store.try_get("long").await.as_deref());
    }

    #[test(tokio::test(start_paused = true))]
    async fn periodic_purge_bounds_distinct_keys() {
        let store = Arc::new(InMemoryCacheStore::new());
        let ttl = Duration::from_secs(60);
        for page in 1..=1_000 {
            store
                .try_set(&format!("cache:/listings?page={page}"), "[]".to_owned(), ttl)
                .await;
        }
        let interval = Duration::from_secs(300);
        let purger = Arc::clone(&store).spawn_purger(interval);
        assert_eq!(1_000, store.len());
        tokio::time::sleep(ttl).await;
        // Not purged before the first interval has elapsed
        assert_eq!(1_000, store.len());
        tokio::time::sleep(interval).await;
        assert!(store.is_empty());
        purger.abort();
    }

    #[test(tokio::test)]
    async fn zero_ttl_is_not_stored() {
        let store = InMemoryCacheStore::new();
        assert!(!store.try_set("k", "v".to_owned(), Duration::ZERO).await);
        assert!(store.is_empty());
    }

    #[test(tokio::test)]
    async fn delete_matching_keys() -> TestResult<()> {
        let store = InMemoryCacheStore::new();
        let ttl = Duration::from_secs(60);
        store.try_set("cache:/listings?page=1", "a".to_owned(), ttl).await;
        store.try_set("cache:/listings/actros", "b".to_owned(), ttl).await;
        store.try_set("cache:/categories", "c".to_owned(), ttl).await;
        let deleted = store
            .try_delete_matching(&GlobPattern::new("cache:/listings*")?)
            .await;
        assert_eq!(2, deleted);
        assert_eq!(Some("c"), store.try_get("cache:/categories").await.as_deref());
        Ok(())
    }
}
