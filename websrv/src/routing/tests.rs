// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::{NonZeroU32, NonZeroU64},
    time::Duration,
};

use serde_json::{Value, json};
use warp::{http::Response, hyper::body::Bytes};

use rigmart_cache::{
    response::ResponseCache,
    store::InMemoryCacheStore,
    throttle::{InMemoryThrottleStore, ViewThrottle},
};
use rigmart_core::Category;
use rigmart_repo::catalog::CategoryRepo as _;
use rigmart_repo_sqlite::Connection as RepoConnection;
use rigmart_storage_sqlite::connection::{
    Storage,
    pool::{
        create_connection_pool,
        gatekeeper::{Config as GatekeeperConfig, Gatekeeper as DatabaseConnectionGatekeeper},
        get_pooled_connection,
    },
};
use rigmart_usecases_sqlite as uc;
use rigmart_websrv_warp_sqlite::handle_rejection;

use super::*;

type TestResult<T> = anyhow::Result<T>;

const TIMEOUT_MILLIS: NonZeroU64 = NonZeroU64::new(5_000).unwrap();

async fn new_state() -> TestResult<Arc<AppState>> {
    let pool = create_connection_pool(&Storage::InMemory, NonZeroU32::MIN)?;
    uc::database::initialize(&mut *get_pooled_connection(&pool)?)?;
    uc::database::migrate_schema(&mut *get_pooled_connection(&pool)?)?;
    let gatekeeper = DatabaseConnectionGatekeeper::new(
        pool,
        GatekeeperConfig {
            acquire_read_timeout_millis: TIMEOUT_MILLIS,
            acquire_write_timeout_millis: TIMEOUT_MILLIS,
        },
    );
    gatekeeper
        .spawn_blocking_write_task(|mut pooled_connection| {
            RepoConnection::new(&mut pooled_connection).insert_category(
                None,
                &Category {
                    slug: "trucks".to_owned(),
                    name: "Trucks".to_owned(),
                    is_active: true,
                    position: 0,
                },
            )
        })
        .await??;
    Ok(Arc::new(AppState {
        gatekeeper,
        response_cache: ResponseCache::new(InMemoryCacheStore::new().into(), "test:"),
        view_throttle: ViewThrottle::new(InMemoryThrottleStore::new().into()),
        listings_ttl: Duration::from_secs(60),
        catalog_ttl: Duration::from_secs(60),
        text_search_available: false,
    }))
}

fn json_body(response: &Response<Bytes>) -> Value {
    serde_json::from_slice(response.body()).unwrap()
}

fn cache_header(response: &Response<Bytes>) -> &str {
    response.headers()["x-cache"].to_str().unwrap()
}

#[tokio::test]
async fn listing_lifecycle() -> TestResult<()> {
    let state = new_state().await?;
    let filters = create_filters(Arc::clone(&state)).recover(handle_rejection);

    let response = warp::test::request().path("/listings").reply(&filters).await;
    assert_eq!(StatusCode::OK, response.status());
    assert_eq!("MISS", cache_header(&response));
    assert_eq!(json!(0), json_body(&response)["pagination"]["total"]);
    let response = warp::test::request().path("/listings").reply(&filters).await;
    assert_eq!("HIT", cache_header(&response));

    let response = warp::test::request()
        .method("POST")
        .path("/me/seller")
        .header("x-user-id", "seller1")
        .json(&json!({
            "displayName": "Nordic Trucks",
            "countryCode": "SE",
        }))
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::CREATED, response.status());

    let response = warp::test::request()
        .method("POST")
        .path("/listings")
        .header("x-user-id", "seller1")
        .json(&json!({
            "title": "Volvo FH 500",
            "category": "trucks",
            "condition": "USED",
            "priceEur": 65_000,
            "countryCode": "SE",
        }))
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::CREATED, response.status());
    let created = json_body(&response);
    assert_eq!(json!("DRAFT"), created["status"]);
    let slug = created["slug"].as_str().unwrap().to_owned();

    // Drafts are hidden from the public
    let response = warp::test::request()
        .path(&format!("/listings/{slug}"))
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::NOT_FOUND, response.status());
    assert_eq!(json!("NOT_FOUND"), json_body(&response)["code"]);

    // Sellers cannot publish their own listings
    let response = warp::test::request()
        .method("PUT")
        .path(&format!("/listings/{slug}/status"))
        .header("x-user-id", "seller1")
        .json(&json!({ "status": "ACTIVE" }))
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::FORBIDDEN, response.status());

    let response = warp::test::request()
        .method("PUT")
        .path(&format!("/listings/{slug}/status"))
        .header("x-user-id", "moderator")
        .header("x-admin", "true")
        .json(&json!({ "status": "ACTIVE" }))
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::OK, response.status());

    // The cached search result has been invalidated
    let response = warp::test::request().path("/listings").reply(&filters).await;
    assert_eq!("MISS", cache_header(&response));
    assert_eq!(json!(1), json_body(&response)["pagination"]["total"]);

    let response = warp::test::request()
        .method("DELETE")
        .path(&format!("/listings/{slug}"))
        .header("x-user-id", "seller1")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::NO_CONTENT, response.status());
    let response = warp::test::request().path("/listings").reply(&filters).await;
    assert_eq!(json!(0), json_body(&response)["pagination"]["total"]);

    Ok(())
}

#[tokio::test]
async fn repeated_views_are_throttled_per_client() -> TestResult<()> {
    let state = new_state().await?;
    let filters = create_filters(Arc::clone(&state)).recover(handle_rejection);

    warp::test::request()
        .method("POST")
        .path("/me/seller")
        .header("x-user-id", "seller1")
        .json(&json!({ "displayName": "Nordic Trucks", "countryCode": "SE" }))
        .reply(&filters)
        .await;
    let response = warp::test::request()
        .method("POST")
        .path("/listings")
        .header("x-user-id", "seller1")
        .json(&json!({
            "title": "Scania R 450",
            "category": "trucks",
            "condition": "USED",
            "priceEur": 54_900,
            "countryCode": "SE",
        }))
        .reply(&filters)
        .await;
    let slug = json_body(&response)["slug"].as_str().unwrap().to_owned();
    warp::test::request()
        .method("PUT")
        .path(&format!("/listings/{slug}/status"))
        .header("x-user-id", "moderator")
        .header("x-admin", "true")
        .json(&json!({ "status": "ACTIVE" }))
        .reply(&filters)
        .await;

    // The returned view count does not include the current view
    for (forwarded_for, expected_view_count) in [
        ("198.51.100.1", 0),
        ("198.51.100.1", 1),
        ("198.51.100.1", 1),
        ("198.51.100.2", 1),
        ("198.51.100.1", 2),
    ] {
        let response = warp::test::request()
            .path(&format!("/listings/{slug}"))
            .header("x-forwarded-for", forwarded_for)
            .reply(&filters)
            .await;
        assert_eq!(StatusCode::OK, response.status());
        assert_eq!(json!(expected_view_count), json_body(&response)["viewCount"]);
    }

    Ok(())
}

#[tokio::test]
async fn moderation_requires_admin() -> TestResult<()> {
    let state = new_state().await?;
    let filters = create_filters(state).recover(handle_rejection);

    let response = warp::test::request()
        .path("/admin/listings?status=DRAFT")
        .header("x-user-id", "seller1")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::FORBIDDEN, response.status());

    let response = warp::test::request()
        .path("/admin/listings?status=DRAFT")
        .header("x-user-id", "moderator")
        .header("x-admin", "true")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(json!(50), json_body(&response)["pagination"]["limit"]);

    let response = warp::test::request()
        .path("/listings?minPrice=cheap")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::BAD_REQUEST, response.status());

    Ok(())
}

#[tokio::test]
async fn catalog_is_cached() -> TestResult<()> {
    let state = new_state().await?;
    let filters = create_filters(state).recover(handle_rejection);

    let response = warp::test::request().path("/categories").reply(&filters).await;
    assert_eq!(StatusCode::OK, response.status());
    assert_eq!("MISS", cache_header(&response));
    assert_eq!(json!("trucks"), json_body(&response)[0]["slug"]);
    let response = warp::test::request().path("/categories").reply(&filters).await;
    assert_eq!("HIT", cache_header(&response));

    let response = warp::test::request().path("/brands").reply(&filters).await;
    assert_eq!(json!([]), json_body(&response));

    Ok(())
}
