// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Duration;

use rigmart_cache::{
    response::ResponseCache,
    store::AnyCacheStore,
    throttle::{AnyThrottleStore, ViewThrottle},
};
use rigmart_storage_sqlite::connection::pool::gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper;

/// Cache keys of all listing resources relative to the key prefix.
const LISTINGS_CACHE_KEY_PATTERN: &str = "/listings*";

/// Shared by all request handlers.
pub(crate) struct AppState {
    pub(crate) gatekeeper: DatabaseConnectionGatekeeper,
    pub(crate) response_cache: ResponseCache<AnyCacheStore>,
    pub(crate) view_throttle: ViewThrottle<AnyThrottleStore>,
    pub(crate) listings_ttl: Duration,
    pub(crate) catalog_ttl: Duration,
    pub(crate) text_search_available: bool,
}

impl AppState {
    /// Discard all cached responses that might contain listings.
    pub(crate) async fn invalidate_listings(&self) {
        let deleted = self
            .response_cache
            .invalidate(&[LISTINGS_CACHE_KEY_PATTERN])
            .await;
        log::debug!("Invalidated {deleted} cached listing responses");
    }
}
