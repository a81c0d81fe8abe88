// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{sync::Arc, time::Duration};

use crate::glob::GlobPattern;

mod in_memory;
pub use self::in_memory::InMemoryCacheStore;

#[cfg(feature = "redis")]
mod redis_store;
#[cfg(feature = "redis")]
pub use self::redis_store::RedisCacheStore;

/// Best-effort key/value store with expiration.
///
/// Implementations never fail. Unavailability of the underlying
/// store is reported as a miss or a no-op.
pub trait CacheStore: Send + Sync {
    /// `None` if the key is missing, expired or the store is unavailable.
    fn try_get(&self, key: &str) -> impl Future<Output = Option<String>> + Send;

    /// Returns `true` if the value has been stored.
    fn try_set(&self, key: &str, value: String, ttl: Duration)
    -> impl Future<Output = bool> + Send;

    /// Returns the number of deleted keys.
    fn try_delete_matching(&self, pattern: &GlobPattern) -> impl Future<Output = usize> + Send;
}

/// Runtime selection of a store.
#[derive(Debug)]
pub enum AnyCacheStore {
    /// Every lookup misses, nothing is stored.
    Disabled,
    /// Shared with the periodic purger.
    InMemory(Arc<InMemoryCacheStore>),
    #[cfg(feature = "redis")]
    Redis(RedisCacheStore),
}

impl CacheStore for AnyCacheStore {
    async fn try_get(&self, key: &str) -> Option<String> {
        match self {
            Self::Disabled => None,
            Self::InMemory(store) => store.try_get(key).await,
            #[cfg(feature = "redis")]
            Self::Redis(store) => store.try_get(key).await,
        }
    }

    async fn try_set(&self, key: &str, value: String, ttl: Duration) -> bool {
        match self {
            Self::Disabled => false,
            Self::InMemory(store) => store.try_set(key, value, ttl).await,
            #[cfg(feature = "redis")]
            Self::Redis(store) => store.try_set(key, value, ttl).await,
        }
    }

    async fn try_delete_matching(&self, pattern: &GlobPattern) -> usize {
        match self {
            Self::Disabled => 0,
            Self::InMemory(store) => store.try_delete_matching(pattern).await,
            #[cfg(feature = "redis")]
            Self::Redis(store) => store.try_delete_matching(pattern).await,
        }
    }
}

impl From<Arc<InMemoryCacheStore>> for AnyCacheStore {
    fn from(from: Arc<InMemoryCacheStore>) -> Self {
        Self::InMemory(from)
    }
}

impl From<InMemoryCacheStore> for AnyCacheStore {
    fn from(from: InMemoryCacheStore) -> Self {
        Self::InMemory(Arc::new(from))
    }
}

#[cfg(feature = "redis")]
impl From<RedisCacheStore> for AnyCacheStore {
    fn from(from: RedisCacheStore) -> Self {
        Self::Redis(from)
    }
}
