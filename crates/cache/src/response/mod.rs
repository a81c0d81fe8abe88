// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{glob::GlobPattern, store::CacheStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
}

impl CacheOutcome {
    /// Value of the `X-Cache` response header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub outcome: CacheOutcome,
    pub status: u16,
    pub body: String,
}

impl CachedResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        is_success_status(self.status)
    }
}

/// Serialized value of a cache entry.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    status: u16,
    body: String,
}

const fn is_success_status(status: u16) -> bool {
    status >= 200 && status < 300
}

/// Get-or-populate cache for the responses of read requests.
///
/// Keys are built from the path and query string verbatim, i.e.
/// requests that only differ in the order of query parameters are
/// cached independently.
#[derive(Debug)]
pub struct ResponseCache<S> {
    store: S,
    key_prefix: String,
}

impl<S> ResponseCache<S> {
    pub fn new(store: S, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// An empty query string is omitted together with the `?` separator.
    #[must_use]
    pub fn cache_key(&self, path: &str, query: Option<&str>) -> String {
        let mut key = String::with_capacity(
            self.key_prefix.len() + path.len() + query.map_or(0, |query| query.len() + 1),
        );
        key.push_str(&self.key_prefix);
        key.push_str(path);
        if let Some(query) = query.filter(|query| !query.is_empty()) {
            key.push('?');
            key.push_str(query);
        }
        key
    }
}

impl<S: CacheStore> ResponseCache<S> {
    /// Returns the cached response or invokes `handler` on a miss.
    ///
    /// Only successful responses with a status in `200..300` are stored.
    /// Errors of the handler are passed through and never cached.
    pub async fn get_or_populate<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        handler: F,
    ) -> Result<CachedResponse, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(u16, String), E>>,
    {
        if let Some(cached) = self.lookup(key).await {
            return Ok(cached);
        }
        let (status, body) = handler().await?;
        if is_success_status(status) {
            self.populate(key, status, &body, ttl).await;
        }
        Ok(CachedResponse {
            outcome: CacheOutcome::Miss,
            status,
            body,
        })
    }

    async fn lookup(&self, key: &str) -> Option<CachedResponse> {
        let value = self.store.try_get(key).await?;
        let Envelope { status, body } = serde_json::from_str(&value)
            .inspect_err(|err| log::warn!("Ignoring malformed cache entry {key}: {err}"))
            .ok()?;
        log::debug!("Cache hit: {key}");
        Some(CachedResponse {
            outcome: CacheOutcome::Hit,
            status,
            body,
        })
    }

    async fn populate(&self, key: &str, status: u16, body: &str, ttl: Duration) {
        let envelope = Envelope {
            status,
            body: body.to_owned(),
        };
        let value = match serde_json::to_string(&envelope) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to serialize cache entry {key}: {err}");
                return;
            }
        };
        if self.store.try_set(key, value, ttl).await {
            log::debug!("Cached response: {key}");
        }
    }

    /// Delete all entries matching any of the given glob patterns.
    ///
    /// Patterns are relative to the key prefix. Invalid patterns are
    /// logged and skipped. Returns the number of deleted entries.
    pub async fn invalidate(&self, patterns: &[&str]) -> usize {
        let mut deleted = 0;
        for pattern in patterns {
            let glob = format!("{prefix}{pattern}", prefix = self.key_prefix);
            let pattern = match GlobPattern::new(glob) {
                Ok(pattern) => pattern,
                Err(err) => {
                    log::warn!("Invalid cache key pattern {pattern}: {err}");
                    continue;
                }
            };
            deleted += self.store.try_delete_matching(&pattern).await;
        }
        log::debug!("Invalidated {deleted} cache entries matching {patterns:?}");
        deleted
    }
}

#[cfg(test)]
mod tests;
