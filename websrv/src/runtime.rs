// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use warp::Filter as _;

use rigmart_cache::{
    response::ResponseCache,
    store::{AnyCacheStore, InMemoryCacheStore},
    throttle::{AnyThrottleStore, InMemoryThrottleStore, ViewThrottle},
};
use rigmart_storage_sqlite::connection::pool::{
    create_connection_pool, gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper,
    get_pooled_connection,
};
use rigmart_usecases_sqlite as uc;
use rigmart_websrv_warp_sqlite::handle_rejection;
use tokio::task::JoinHandle;

use crate::{
    config::{CacheConfig, Config, DatabaseConfig},
    routing,
    state::AppState,
};

fn provision_database(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnectionGatekeeper> {
    log::info!(
        "Commissioning SQLite database: {storage}",
        storage = config.storage,
    );

    // The maximum size of the pool defines the maximum number of
    // allowed readers while writers require exclusive access.
    let pool_max_size = config.pool.max_size;
    log::info!("Creating connection pool of max. size {pool_max_size}");
    let connection_pool = create_connection_pool(&config.storage, pool_max_size)?;

    log::info!("Initializing database");
    uc::database::initialize(&mut *get_pooled_connection(&connection_pool)?)?;

    if config.migrate_schema_on_startup {
        log::info!("Migrating database schema");
        uc::database::migrate_schema(&mut *get_pooled_connection(&connection_pool)?)?;
    }

    Ok(DatabaseConnectionGatekeeper::new(
        connection_pool,
        config.pool.gatekeeper,
    ))
}

#[cfg(feature = "redis")]
async fn provision_redis_stores(
    redis_url: &str,
) -> anyhow::Result<(AnyCacheStore, AnyThrottleStore)> {
    use rigmart_cache::{store::RedisCacheStore, throttle::RedisThrottleStore};

    log::info!("Connecting to Redis");
    let cache_store = RedisCacheStore::connect(redis_url).await?;
    let throttle_store = RedisThrottleStore::connect(redis_url).await?;
    Ok((cache_store.into(), throttle_store.into()))
}

#[cfg(not(feature = "redis"))]
#[allow(clippy::unused_async)]
async fn provision_redis_stores(
    _redis_url: &str,
) -> anyhow::Result<(AnyCacheStore, AnyThrottleStore)> {
    anyhow::bail!("Redis support is disabled")
}

/// Select the stores and spawn the periodic eviction of in-process
/// cache and throttle entries.
async fn provision_stores(
    config: &CacheConfig,
) -> (AnyCacheStore, AnyThrottleStore, Vec<JoinHandle<()>>) {
    if let Some(redis_url) = &config.redis_url {
        match provision_redis_stores(redis_url).await {
            Ok((cache_store, throttle_store)) => return (cache_store, throttle_store, vec![]),
            Err(err) => {
                log::warn!("Falling back to in-process cache and throttle stores: {err:#}");
            }
        }
    }
    log::info!("Using in-process cache and throttle stores");
    let mut housekeeping = Vec::with_capacity(2);
    let cache_store = Arc::new(InMemoryCacheStore::new());
    let purge_interval = config.purge_interval();
    if purge_interval.is_zero() {
        log::warn!("Expired cache entries are only evicted on access");
    } else {
        housekeeping.push(Arc::clone(&cache_store).spawn_purger(purge_interval));
    }
    let throttle_store = Arc::new(InMemoryThrottleStore::new());
    let sweep_interval = config.view_throttle_sweep_interval();
    if sweep_interval.is_zero() {
        log::warn!("View throttle entries are never swept");
    } else {
        housekeeping.push(
            Arc::clone(&throttle_store)
                .spawn_sweeper(sweep_interval, config.view_throttle_window_millis),
        );
    }
    (cache_store.into(), throttle_store.into(), housekeeping)
}

pub(crate) async fn run(config: Config) -> anyhow::Result<()> {
    log::info!("Launching");

    let Config {
        network,
        database,
        cache,
        search,
    } = config;

    let gatekeeper = provision_database(&database)?;
    let (cache_store, throttle_store, housekeeping) = provision_stores(&cache).await;
    let state = Arc::new(AppState {
        gatekeeper,
        response_cache: ResponseCache::new(cache_store, cache.key_prefix.clone()),
        view_throttle: ViewThrottle::with_window_millis(
            throttle_store,
            cache.view_throttle_window_millis,
        ),
        listings_ttl: cache.listings_ttl(),
        catalog_ttl: cache.catalog_ttl(),
        text_search_available: search.text_search_available,
    });

    log::info!("Creating service routes");
    let filters = routing::create_filters(Arc::clone(&state));

    log::info!("Initializing server");
    let server = warp::serve(
        filters
            .with(warp::cors().allow_any_origin())
            .with(warp::trace::request())
            .recover(handle_rejection),
    );

    let (socket_addr, server_listener) = server.try_bind_with_graceful_shutdown(
        network.endpoint.socket_addr(),
        async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                log::error!("Failed to await shutdown signal: {err}");
            }
        },
    )?;
    log::info!("Listening on {socket_addr}");

    server_listener.await;

    log::info!("Stopping");
    for task in housekeeping {
        task.abort();
    }
    state.gatekeeper.decommission();

    log::info!("Terminating");
    Ok(())
}
