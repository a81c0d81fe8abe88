// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, time::Duration};

use redis::{Client, RedisResult, aio::ConnectionManager};

use super::CacheStore;
use crate::glob::GlobPattern;

const SCAN_COUNT: usize = 100;

/// Store shared by multiple server instances.
#[derive(Clone)]
pub struct RedisCacheStore {
    connection: ConnectionManager,
}

impl fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCacheStore").finish_non_exhaustive()
    }
}

impl RedisCacheStore {
    #[must_use]
    pub const fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    pub async fn connect(redis_url: &str) -> crate::Result<Self> {
        let client = Client::open(redis_url)?;
        let connection = client.get_connection_manager().await?;
        Ok(Self::new(connection))
    }

    #[must_use]
    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    async fn get(&self, key: &str) -> RedisResult<Option<String>> {
        let mut connection = self.connection.clone();
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut connection)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> RedisResult<()> {
        let mut connection = self.connection.clone();
        let ttl_millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let (): () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(ttl_millis)
            .query_async(&mut connection)
            .await?;
        Ok(())
    }

    async fn delete_matching(&self, pattern: &GlobPattern) -> RedisResult<usize> {
        let mut connection = self.connection.clone();
        let mut cursor = 0u64;
        let mut deleted = 0;
        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern.as_str())
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut connection)
                .await?;
            if !keys.is_empty() {
                let count: usize = redis::cmd("DEL")
                    .arg(&keys)
                    .query_async(&mut connection)
                    .await?;
                deleted += count;
            }
            if next_cursor == 0 {
                break;
            }
            cursor = next_cursor;
        }
        Ok(deleted)
    }
}

impl CacheStore for RedisCacheStore {
    async fn try_get(&self, key: &str) -> Option<String> {
        self.get(key)
            .await
            .inspect_err(|err| log::warn!("Failed to read cache entry {key}: {err}"))
            .ok()
            .flatten()
    }

    async fn try_set(&self, key: &str, value: String, ttl: Duration) -> bool {
        if ttl.is_zero() {
            return false;
        }
        self.set(key, value, ttl)
            .await
            .inspect_err(|err| log::warn!("Failed to write cache entry {key}: {err}"))
            .is_ok()
    }

    async fn try_delete_matching(&self, pattern: &GlobPattern) -> usize {
        self.delete_matching(pattern)
            .await
            .inspect_err(|err| log::warn!("Failed to delete cache entries matching {pattern}: {err}"))
            .unwrap_or(0)
    }
}
