// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use redis::{Client, RedisResult, aio::ConnectionManager};
use rigmart_core::util::clock::{TimestampMillis, UtcDateTimeMs};

use super::ThrottleStore;

/// Throttles consistently across all server instances that share
/// the same Redis server.
///
/// Keys expire after the window, so no sweeping is needed. The timestamp
/// of the event is irrelevant, the window starts when the key is set.
#[derive(Clone)]
pub struct RedisThrottleStore {
    connection: ConnectionManager,
}

impl fmt::Debug for RedisThrottleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisThrottleStore").finish_non_exhaustive()
    }
}

impl RedisThrottleStore {
    #[must_use]
    pub const fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    pub async fn connect(redis_url: &str) -> crate::Result<Self> {
        let client = Client::open(redis_url)?;
        let connection = client.get_connection_manager().await?;
        Ok(Self::new(connection))
    }

    async fn set_if_absent(&self, key: &str, window_millis: TimestampMillis) -> RedisResult<bool> {
        let mut connection = self.connection.clone();
        // The expiration must be positive.
        let window_millis = window_millis.max(1);
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(1)
            .arg("NX")
            .arg("PX")
            .arg(window_millis)
            .query_async(&mut connection)
            .await?;
        Ok(reply.is_some())
    }
}

impl ThrottleStore for RedisThrottleStore {
    async fn try_acquire(
        &self,
        key: &str,
        _now: UtcDateTimeMs,
        window_millis: TimestampMillis,
    ) -> bool {
        self.set_if_absent(key, window_millis)
            .await
            .inspect_err(|err| log::warn!("Failed to throttle view {key}: {err}"))
            .unwrap_or(true)
    }
}
