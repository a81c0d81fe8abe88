// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Best-effort caching of read responses and throttling of view events.
//!
//! None of the operations in this crate fail from the perspective of the
//! caller. Failures of an external store are logged and degrade to a cache
//! miss or a no-op respectively.

use thiserror::Error;

pub mod glob;
pub mod response;
pub mod store;
pub mod throttle;

/// Internal errors of the store implementations.
///
/// Only exposed for connecting to a store, never by the best-effort
/// operations of an established store.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[cfg(feature = "redis")]
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
}

pub type Result<T> = std::result::Result<T, Error>;
