// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::atomic::{AtomicUsize, Ordering};

use test_log::test;

use super::*;
use crate::{
    store::{AnyCacheStore, InMemoryCacheStore},
    tests::TestResult,
};

const TTL: Duration = Duration::from_secs(60);

fn new_cache() -> ResponseCache<InMemoryCacheStore> {
    ResponseCache::new(InMemoryCacheStore::new(), "cache:")
}

#[test]
fn cache_key_is_verbatim() {
    let cache = new_cache();
    assert_eq!(
        "cache:/listings?sort=price_asc&page=2",
        cache.cache_key("/listings", Some("sort=price_asc&page=2"))
    );
    assert_ne!(
        cache.cache_key("/listings", Some("sort=price_asc&page=2")),
        cache.cache_key("/listings", Some("page=2&sort=price_asc"))
    );
    assert_eq!("cache:/listings", cache.cache_key("/listings", Some("")));
    assert_eq!("cache:/listings", cache.cache_key("/listings", None));
}

#[test(tokio::test)]
async fn hit_after_miss_and_miss_after_invalidation() -> TestResult<()> {
    let cache = new_cache();
    let invocations = &AtomicUsize::new(0);
    let handler = move || async move {
        let n = invocations.fetch_add(1, Ordering::Relaxed);
        Ok::<_, anyhow::Error>((200, format!(r#"{{"data":[],"n":{n}}}"#)))
    };
    let key = cache.cache_key("/listings", Some("page=1"));

    let first = cache.get_or_populate(&key, TTL, handler).await?;
    assert_eq!(CacheOutcome::Miss, first.outcome);

    let second = cache.get_or_populate(&key, TTL, handler).await?;
    assert_eq!(CacheOutcome::Hit, second.outcome);
    assert_eq!(200, second.status);
    assert_eq!(first.body, second.body);
    assert_eq!(1, invocations.load(Ordering::Relaxed));

    assert_eq!(1, cache.invalidate(&["/listings*"]).await);

    let third = cache.get_or_populate(&key, TTL, handler).await?;
    assert_eq!(CacheOutcome::Miss, third.outcome);
    assert_eq!(2, invocations.load(Ordering::Relaxed));
    Ok(())
}

#[test(tokio::test)]
async fn unsuccessful_responses_are_not_cached() -> TestResult<()> {
    let cache = new_cache();
    let key = cache.cache_key("/listings/unknown", None);
    for _ in 0..2 {
        let response = cache
            .get_or_populate(&key, TTL, || async {
                Ok::<_, anyhow::Error>((404, r#"{"code":"NOT_FOUND"}"#.to_owned()))
            })
            .await?;
        assert_eq!(CacheOutcome::Miss, response.outcome);
        assert!(!response.is_success());
    }
    assert!(cache.store().is_empty());
    Ok(())
}

#[test(tokio::test)]
async fn handler_errors_are_passed_through() {
    let cache = new_cache();
    let key = cache.cache_key("/listings", None);
    let result = cache
        .get_or_populate(&key, TTL, || async { Err::<(u16, String), _>("failed") })
        .await;
    assert_eq!(Err("failed"), result);
    assert!(cache.store().is_empty());
}

#[test(tokio::test)]
async fn invalidate_only_matching_patterns() -> TestResult<()> {
    let cache = new_cache();
    for path in ["/listings", "/listings/actros-1845", "/categories", "/brands"] {
        let key = cache.cache_key(path, None);
        cache
            .get_or_populate(&key, TTL, || async { Ok::<_, anyhow::Error>((200, "{}".to_owned())) })
            .await?;
    }
    assert_eq!(3, cache.invalidate(&["/listings*", "/brands"]).await);
    assert_eq!(1, cache.store().len());
    Ok(())
}

#[test(tokio::test)]
async fn malformed_entries_are_treated_as_miss() -> TestResult<()> {
    let cache = new_cache();
    let key = cache.cache_key("/listings", None);
    cache.store().try_set(&key, "not json".to_owned(), TTL).await;
    let response = cache
        .get_or_populate(&key, TTL, || async { Ok::<_, anyhow::Error>((200, "[]".to_owned())) })
        .await?;
    assert_eq!(CacheOutcome::Miss, response.outcome);
    assert_eq!("[]", response.body);
    Ok(())
}

#[test(tokio::test)]
async fn disabled_store_always_misses() -> TestResult<()> {
    let cache = ResponseCache::new(AnyCacheStore::Disabled, "cache:");
    let key = cache.cache_key("/listings", None);
    for _ in 0..2 {
        let response = cache
            .get_or_populate(&key, TTL, || async { Ok::<_, anyhow::Error>((200, "[]".to_owned())) })
            .await?;
        assert_eq!(CacheOutcome::Miss, response.outcome);
    }
    assert_eq!(0, cache.invalidate(&["*"]).await);
    Ok(())
}
