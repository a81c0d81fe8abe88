// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env, fmt, num::NonZeroU32, str::FromStr};

use tracing::{Subscriber, subscriber::set_global_default};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

use rigmart_storage_sqlite::connection::Storage;

use crate::config::Config;

pub(crate) fn init_environment() {
    if let Ok(path) = dotenvy::dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {}", path.display());
    }
}

const TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT: &str = "info";

fn create_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        if let Some(rust_log_from_env) = env::var("RUST_LOG")
            .ok()
            .filter(|var| !var.is_empty())
        {
            eprintln!("Failed to parse RUST_LOG environment variable '{rust_log_from_env}': {err}");
        }
        EnvFilter::new(TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT)
    })
}

fn create_tracing_subscriber() -> impl Subscriber {
    tracing_subscriber::fmt()
        .with_env_filter(create_env_filter())
        .with_writer(std::io::stderr)
        .finish()
}

pub(crate) fn init_tracing_and_logging() -> anyhow::Result<()> {
    // Capture and redirect all log messages as tracing events
    LogTracer::init()?;

    set_global_default(create_tracing_subscriber())?;

    Ok(())
}

const ENDPOINT_IP_ENV: &str = "ENDPOINT_IP";

const ENDPOINT_PORT_ENV: &str = "ENDPOINT_PORT";

const DATABASE_URL_ENV: &str = "DATABASE_URL";

const DATABASE_CONNECTION_POOL_SIZE_ENV: &str = "DATABASE_CONNECTION_POOL_SIZE";

const DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV: &str = "DATABASE_MIGRATE_SCHEMA_ON_STARTUP";

const REDIS_URL_ENV: &str = "REDIS_URL";

const CACHE_KEY_PREFIX_ENV: &str = "CACHE_KEY_PREFIX";

const LISTINGS_CACHE_TTL_SECS_ENV: &str = "LISTINGS_CACHE_TTL_SECS";

const CATALOG_CACHE_TTL_SECS_ENV: &str = "CATALOG_CACHE_TTL_SECS";

const TEXT_SEARCH_AVAILABLE_ENV: &str = "TEXT_SEARCH_AVAILABLE";

fn parse_bool(var: &str) -> Option<bool> {
    match var.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Read a non-empty environment variable.
fn read_var(name: &str) -> Option<String> {
    let var = env::var(name).ok()?;
    tracing::debug!("{name} = {var}");
    let var = var.trim();
    (!var.is_empty()).then(|| var.to_owned())
}

fn parse_var<T>(name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let var = read_var(name)?;
    var.parse()
        .inspect_err(|err| tracing::warn!("Failed to parse {name} = {var}: {err}"))
        .ok()
}

fn parse_bool_var(name: &str) -> Option<bool> {
    let var = read_var(name)?;
    let parsed = parse_bool(&var);
    if parsed.is_none() {
        tracing::warn!("Failed to parse {name} = {var}");
    }
    parsed
}

/// Patch the configuration with environment variables.
pub(crate) fn parse_config_into(config: &mut Config) {
    let Config {
        network,
        database,
        cache,
        search,
    } = config;
    if let Some(ip_addr) = parse_var(ENDPOINT_IP_ENV) {
        network.endpoint.ip_addr = ip_addr;
    }
    if let Some(port) = parse_var(ENDPOINT_PORT_ENV) {
        network.endpoint.port = port;
    }
    if let Some(url) = read_var(DATABASE_URL_ENV) {
        database.storage = Storage::parse_url(&url);
    }
    if let Some(max_size) = parse_var::<NonZeroU32>(DATABASE_CONNECTION_POOL_SIZE_ENV) {
        database.pool.max_size = max_size;
    }
    if let Some(migrate_schema_on_startup) = parse_bool_var(DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV)
    {
        database.migrate_schema_on_startup = migrate_schema_on_startup;
    }
    if let Some(redis_url) = read_var(REDIS_URL_ENV) {
        cache.redis_url = Some(redis_url);
    }
    if let Some(key_prefix) = read_var(CACHE_KEY_PREFIX_ENV) {
        cache.key_prefix = key_prefix;
    }
    if let Some(ttl_secs) = parse_var(LISTINGS_CACHE_TTL_SECS_ENV) {
        cache.listings_ttl_secs = ttl_secs;
    }
    if let Some(ttl_secs) = parse_var(CATALOG_CACHE_TTL_SECS_ENV) {
        cache.catalog_ttl_secs = ttl_secs;
    }
    if let Some(text_search_available) = parse_bool_var(TEXT_SEARCH_AVAILABLE_ENV) {
        search.text_search_available = text_search_available;
    }
}
