// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::NonZeroU64,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tokio::{sync::RwLock, task::spawn_blocking, time::timeout};

use super::{ConnectionPool, PooledConnection, get_pooled_connection};
use crate::{Error, Result};

/// Manage database connections for asynchronous tasks
///
/// Only a single writer is allowed to access the `SQLite` database
/// at any given time. This is required to prevent both synchronous
/// locking when obtaining a connection and timeouts when concurrently
/// trying to execute write operations on a shared `SQLite` database
/// instance.
#[allow(missing_debug_implementations)]
pub struct Gatekeeper {
    connection_pool: Arc<RwLock<ConnectionPool>>,
    acquire_read_timeout: Duration,
    acquire_write_timeout: Duration,
    request_counter_state: Arc<RequestCounterState>,
    decommissioned: AtomicBool,
}

#[derive(Debug, Default)]
struct RequestCounterState {
    read_count: AtomicUsize,
    write_count: AtomicUsize,
}

impl RequestCounterState {
    const fn counter(&self, mode: AccessMode) -> &AtomicUsize {
        match mode {
            AccessMode::Read => &self.read_count,
            AccessMode::Write => &self.write_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
}

impl AccessMode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

/// Counts a pending request while in scope
struct RequestCounterScope {
    shared_state: Arc<RequestCounterState>,
    mode: AccessMode,
}

impl RequestCounterScope {
    #[must_use]
    fn new(shared_state: Arc<RequestCounterState>, mode: AccessMode) -> Self {
        let pending_before = shared_state.counter(mode).fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Starting {mode} request: {pending} pending {mode} request(s)",
            mode = mode.as_str(),
            pending = pending_before + 1,
        );
        Self { shared_state, mode }
    }
}

impl Drop for RequestCounterScope {
    fn drop(&mut self) {
        let Self { shared_state, mode } = self;
        let pending_before = shared_state.counter(*mode).fetch_sub(1, Ordering::Relaxed);
        debug_assert!(pending_before > 0);
        log::debug!(
            "Finished {mode} request: {pending} pending {mode} request(s)",
            mode = mode.as_str(),
            pending = pending_before - 1,
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTasks {
    pub read: usize,
    pub write: usize,
}

fn database_locked() -> Error {
    Error::TaskTimeout {
        reason: "database is locked".to_owned(),
    }
}

async fn run_blocking<H, R>(connection: PooledConnection, connection_handler: H) -> Result<R>
where
    H: FnOnce(PooledConnection) -> R + Send + 'static,
    R: Send + 'static,
{
    spawn_blocking(move || connection_handler(connection))
        .await
        .map_err(Error::TaskScheduling)
}

impl Gatekeeper {
    #[must_use]
    pub fn new(connection_pool: ConnectionPool, config: Config) -> Self {
        let Config {
            acquire_read_timeout_millis,
            acquire_write_timeout_millis,
        } = config;
        Self {
            connection_pool: Arc::new(RwLock::new(connection_pool)),
            acquire_read_timeout: Duration::from_millis(acquire_read_timeout_millis.get()),
            acquire_write_timeout: Duration::from_millis(acquire_write_timeout_millis.get()),
            request_counter_state: Default::default(),
            decommissioned: AtomicBool::new(false),
        }
    }

    /// Reject all subsequent tasks, e.g. when shutting down.
    pub fn decommission(&self) {
        self.decommissioned.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_decommissioned(&self) -> bool {
        self.decommissioned.load(Ordering::Acquire)
    }

    fn check_not_decommissioned(&self) -> Result<()> {
        if self.is_decommissioned() {
            return Err(Error::TaskTimeout {
                reason: "connection pool has been decommissioned".to_owned(),
            });
        }
        Ok(())
    }

    pub async fn spawn_blocking_read_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.spawn_blocking_task(AccessMode::Read, connection_handler)
            .await
    }

    pub async fn spawn_blocking_write_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.spawn_blocking_task(AccessMode::Write, connection_handler)
            .await
    }

    /// The lock on the connection pool is held until the task has finished.
    pub async fn spawn_blocking_task<H, R>(&self, mode: AccessMode, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_not_decommissioned()?;
        let _request_counter_scope =
            RequestCounterScope::new(Arc::clone(&self.request_counter_state), mode);
        match mode {
            AccessMode::Read => {
                let guard = timeout(self.acquire_read_timeout, self.connection_pool.read())
                    .await
                    .map_err(|_| database_locked())?;
                self.check_not_decommissioned()?;
                let connection = get_pooled_connection(&guard)?;
                run_blocking(connection, connection_handler).await
            }
            AccessMode::Write => {
                let guard = timeout(self.acquire_write_timeout, self.connection_pool.write())
                    .await
                    .map_err(|_| database_locked())?;
                self.check_not_decommissioned()?;
                let connection = get_pooled_connection(&guard)?;
                run_blocking(connection, connection_handler).await
            }
        }
    }

    #[must_use]
    pub fn pending_tasks(&self) -> PendingTasks {
        PendingTasks {
            read: self
                .request_counter_state
                .read_count
                .load(Ordering::Relaxed),
            write: self
                .request_counter_state
                .write_count
                .load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub acquire_read_timeout_millis: NonZeroU64,
    pub acquire_write_timeout_millis: NonZeroU64,
}
