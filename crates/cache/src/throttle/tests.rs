// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{sync::Arc, time::Duration};

use test_log::test;

use super::*;

const WINDOW: TimestampMillis = DEFAULT_WINDOW_MILLIS;

const fn at(millis: TimestampMillis) -> UtcDateTimeMs {
    UtcDateTimeMs::from_unix_timestamp_millis(1_700_000_000_000 + millis)
}

#[test(tokio::test)]
async fn count_once_within_window() {
    let throttle = ViewThrottle::new(InMemoryThrottleStore::new());
    let mut counted = 0;
    for offset in [0, 1, 1_000, 30_000, WINDOW - 1, WINDOW] {
        if throttle.register_view("203.0.113.7", "listing-1", at(offset)).await {
            counted += 1;
        }
    }
    assert_eq!(1, counted);
    assert!(throttle.register_view("203.0.113.7", "listing-1", at(WINDOW + 1)).await);
    assert!(!throttle.register_view("203.0.113.7", "listing-1", at(WINDOW + 2)).await);
}

#[test(tokio::test)]
async fn suppressed_views_do_not_extend_the_window() {
    let throttle = ViewThrottle::new(InMemoryThrottleStore::new());
    assert!(throttle.register_view("client", "listing", at(0)).await);
    assert!(!throttle.register_view("client", "listing", at(59_000)).await);
    assert!(throttle.register_view("client", "listing", at(60_001)).await);
}

#[test(tokio::test)]
async fn keys_are_independent() {
    let throttle = ViewThrottle::new(InMemoryThrottleStore::new());
    assert!(throttle.register_view("a", "listing-1", at(0)).await);
    assert!(throttle.register_view("b", "listing-1", at(0)).await);
    assert!(throttle.register_view("a", "listing-2", at(0)).await);
    assert!(!throttle.register_view("a", "listing-1", at(10)).await);
    assert_eq!(3, throttle.store().len());
}

#[test]
fn sweep_removes_entries_older_than_window() {
    let store = InMemoryThrottleStore::new();
    assert!(store.acquire("old", at(0), WINDOW));
    assert!(store.acquire("recent", at(50_000), WINDOW));
    assert_eq!(0, store.sweep(at(WINDOW), WINDOW));
    assert_eq!(1, store.sweep(at(WINDOW + 1), WINDOW));
    assert_eq!(1, store.len());
    assert_eq!(1, store.sweep(at(50_000 + WINDOW + 1), WINDOW));
    assert!(store.is_empty());
}

#[test(tokio::test(start_paused = true))]
async fn periodic_sweep_empties_store() {
    let store = Arc::new(InMemoryThrottleStore::new());
    let past = UtcDateTimeMs::from_unix_timestamp_millis(
        UtcDateTimeMs::now().unix_timestamp_millis() - 2 * WINDOW,
    );
    for client in ["a", "b", "c"] {
        assert!(store.acquire(client, past, WINDOW));
    }
    let interval = Duration::from_millis(DEFAULT_SWEEP_INTERVAL_MILLIS);
    let sweeper = Arc::clone(&store).spawn_sweeper(interval, WINDOW);
    assert_eq!(3, store.len());
    tokio::time::sleep(interval + Duration::from_millis(1)).await;
    assert!(store.is_empty());
    sweeper.abort();
}

#[test]
fn throttle_key_contains_client_and_resource() {
    assert_eq!(
        "view:listing-1:203.0.113.7",
        ViewThrottle::<InMemoryThrottleStore>::throttle_key("203.0.113.7", "listing-1")
    );
}
