// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    net::{IpAddr, Ipv6Addr, SocketAddr},
    num::{NonZeroU32, NonZeroU64},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use rigmart_cache::throttle::{DEFAULT_SWEEP_INTERVAL_MILLIS, DEFAULT_WINDOW_MILLIS};
use rigmart_core::util::clock::TimestampMillis;
use rigmart_storage_sqlite::connection::{
    Storage,
    pool::{
        Config as DatabaseConnectionPoolConfig,
        gatekeeper::Config as DatabaseConnectionGatekeeperConfig,
    },
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) network: NetworkConfig,
    pub(crate) database: DatabaseConfig,
    pub(crate) cache: CacheConfig,
    pub(crate) search: SearchConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct NetworkConfig {
    pub(crate) endpoint: EndpointConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EndpointConfig {
    pub(crate) ip_addr: IpAddr,
    pub(crate) port: u16,
}

pub(crate) const ENDPOINT_PORT_DEFAULT: u16 = 8080;

impl EndpointConfig {
    pub(crate) const fn socket_addr(self) -> SocketAddr {
        let Self { ip_addr, port } = self;
        SocketAddr::new(ip_addr, port)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            ip_addr: IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            port: ENDPOINT_PORT_DEFAULT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DatabaseConfig {
    pub(crate) storage: Storage,
    pub(crate) pool: DatabaseConnectionPoolConfig,
    pub(crate) migrate_schema_on_startup: bool,
}

const DEFAULT_DATABASE_CONNECTION_POOL_SIZE: NonZeroU32 = NonZeroU32::new(8).unwrap();

const DEFAULT_DATABASE_ACQUIRE_READ_TIMEOUT_MILLIS: NonZeroU64 = NonZeroU64::new(10_000).unwrap();

const DEFAULT_DATABASE_ACQUIRE_WRITE_TIMEOUT_MILLIS: NonZeroU64 =
    NonZeroU64::new(30_000).unwrap();

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            storage: Storage::InMemory,
            pool: DatabaseConnectionPoolConfig {
                max_size: DEFAULT_DATABASE_CONNECTION_POOL_SIZE,
                gatekeeper: DatabaseConnectionGatekeeperConfig {
                    acquire_read_timeout_millis: DEFAULT_DATABASE_ACQUIRE_READ_TIMEOUT_MILLIS,
                    acquire_write_timeout_millis: DEFAULT_DATABASE_ACQUIRE_WRITE_TIMEOUT_MILLIS,
                },
            },
            migrate_schema_on_startup: true,
        }
    }
}

/// Response cache and view throttling.
///
/// Both use shared Redis stores if an URL is configured and
/// in-process stores otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CacheConfig {
    pub(crate) redis_url: Option<String>,
    pub(crate) key_prefix: String,
    pub(crate) listings_ttl_secs: u64,
    pub(crate) catalog_ttl_secs: u64,
    pub(crate) view_throttle_window_millis: TimestampMillis,
    pub(crate) view_throttle_sweep_interval_millis: u64,
    /// Eviction of expired entries from the in-process cache store.
    pub(crate) purge_interval_secs: u64,
}

impl CacheConfig {
    pub(crate) const fn listings_ttl(&self) -> Duration {
        Duration::from_secs(self.listings_ttl_secs)
    }

    pub(crate) const fn catalog_ttl(&self) -> Duration {
        Duration::from_secs(self.catalog_ttl_secs)
    }

    pub(crate) const fn view_throttle_sweep_interval(&self) -> Duration {
        Duration::from_millis(self.view_throttle_sweep_interval_millis)
    }

    pub(crate) const fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            key_prefix: "rigmart:".to_owned(),
            listings_ttl_secs: 60,
            catalog_ttl_secs: 3_600,
            view_throttle_window_millis: DEFAULT_WINDOW_MILLIS,
            view_throttle_sweep_interval_millis: DEFAULT_SWEEP_INTERVAL_MILLIS,
            purge_interval_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct SearchConfig {
    /// Enables ordering by relevance for free-text searches.
    pub(crate) text_search_available: bool,
}
