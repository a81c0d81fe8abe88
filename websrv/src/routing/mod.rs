// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use serde::Serialize;
use warp::{
    Filter, Rejection, Reply as _,
    filters::BoxedFilter,
    http::StatusCode,
    path::FullPath,
    reply::Response,
};

use rigmart_backend_webapi_json as api;
use rigmart_core::util::clock::UtcDateTimeMs;
use rigmart_core_api::Caller;
use rigmart_core_api_json::{listing::search::SearchQueryParams, pagination::PaginationParams};
use rigmart_websrv_warp_sqlite::{
    self as websrv,
    filters::{caller, client_id, path_and_query},
    reply::cached_json_reply,
};

use crate::state::AppState;

type Result<T> = std::result::Result<T, Rejection>;

fn json_reply<T: Serialize>(response_body: &T) -> Response {
    warp::reply::json(response_body).into_response()
}

fn json_reply_with_status<T: Serialize>(response_body: &T, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(response_body), status).into_response()
}

#[allow(clippy::too_many_lines)] // Route definitions
pub(crate) fn create_filters(state: Arc<AppState>) -> BoxedFilter<(Response,)> {
    let state = warp::any().map(move || Arc::clone(&state));

    log::info!("Creating API routes");

    let path_param_slug = warp::path::param::<String>();

    let listings_path = warp::path("listings");
    let admin_path = warp::path("admin");
    let me_path = warp::path("me");

    let listings_search = warp::get()
        .and(listings_path)
        .and(warp::path::end())
        .and(warp::query::<SearchQueryParams>())
        .and(path_and_query())
        .and(state.clone())
        .and_then(search_listings);
    let listings_load_one = warp::get()
        .and(listings_path)
        .and(path_param_slug)
        .and(warp::path::end())
        .and(caller())
        .and(client_id())
        .and(state.clone())
        .and_then(load_listing);
    let listings_load_related = warp::get()
        .and(listings_path)
        .and(path_param_slug)
        .and(warp::path("related"))
        .and(warp::path::end())
        .and(path_and_query())
        .and(state.clone())
        .and_then(load_related_listings);
    let listings_create = warp::post()
        .and(listings_path)
        .and(warp::path::end())
        .and(caller())
        .and(warp::body::json::<api::listing::create::RequestBody>())
        .and(state.clone())
        .and_then(create_listing);
    let listings_update = warp::put()
        .and(listings_path)
        .and(path_param_slug)
        .and(warp::path::end())
        .and(caller())
        .and(warp::body::json::<api::listing::update::RequestBody>())
        .and(state.clone())
        .and_then(update_listing);
    let listings_update_status = warp::put()
        .and(listings_path)
        .and(path_param_slug)
        .and(warp::path("status"))
        .and(warp::path::end())
        .and(caller())
        .and(warp::body::json::<api::listing::update_status::RequestBody>())
        .and(state.clone())
        .and_then(update_listing_status);
    let listings_delete = warp::delete()
        .and(listings_path)
        .and(path_param_slug)
        .and(warp::path::end())
        .and(caller())
        .and(state.clone())
        .and_then(delete_listing);

    let admin_listings_search = warp::get()
        .and(admin_path)
        .and(listings_path)
        .and(warp::path::end())
        .and(caller())
        .and(warp::query::<SearchQueryParams>())
        .and(state.clone())
        .and_then(search_listings_for_moderation);

    let me_recently_viewed = warp::get()
        .and(me_path)
        .and(warp::path("recently-viewed"))
        .and(warp::path::end())
        .and(caller())
        .and(warp::query::<PaginationParams>())
        .and(state.clone())
        .and_then(load_recently_viewed);
    let me_listings = warp::get()
        .and(me_path)
        .and(listings_path)
        .and(warp::path::end())
        .and(caller())
        .and(warp::query::<PaginationParams>())
        .and(state.clone())
        .and_then(load_own_listings);
    let me_register_seller = warp::post()
        .and(me_path)
        .and(warp::path("seller"))
        .and(warp::path::end())
        .and(caller())
        .and(warp::body::json::<api::seller::RequestBody>())
        .and(state.clone())
        .and_then(register_seller);

    let categories_load = warp::get()
        .and(warp::path("categories"))
        .and(warp::path::end())
        .and(path_and_query())
        .and(state.clone())
        .and_then(load_categories);
    let brands_load = warp::get()
        .and(warp::path("brands"))
        .and(warp::path::end())
        .and(path_and_query())
        .and(state)
        .and_then(load_brands);

    let listings_filters = listings_search
        .or(listings_load_related)
        .unify()
        .or(listings_load_one)
        .unify()
        .or(listings_create)
        .unify()
        .or(listings_update_status)
        .unify()
        .or(listings_update)
        .unify()
        .or(listings_delete)
        .unify();
    let me_filters = me_recently_viewed
        .or(me_listings)
        .unify()
        .or(me_register_seller)
        .unify();
    let catalog_filters = categories_load.or(brands_load).unify();

    listings_filters
        .or(admin_listings_search)
        .unify()
        .or(me_filters)
        .unify()
        .or(catalog_filters)
        .unify()
        .boxed()
}

async fn search_listings(
    query_params: SearchQueryParams,
    path: FullPath,
    query: String,
    state: Arc<AppState>,
) -> Result<Response> {
    let cache_key = state.response_cache.cache_key(path.as_str(), Some(&query));
    let text_search_available = state.text_search_available;
    cached_json_reply(&state.response_cache, &cache_key, state.listings_ttl, || {
        websrv::spawn_blocking_read_task(&state.gatekeeper, move |mut pooled_connection| {
            api::listing::search::handle_request(
                &mut pooled_connection,
                query_params,
                text_search_available,
            )
        })
    })
    .await
}

/// Views are recorded after the detail has been loaded.
///
/// Failures while recording a view are logged and do not affect
/// the response.
async fn load_listing(
    slug: String,
    caller: Caller,
    client_id: String,
    state: Arc<AppState>,
) -> Result<Response> {
    let (listing_id, response_body) = websrv::spawn_blocking_read_task(&state.gatekeeper, {
        let slug = slug.clone();
        let caller = caller.clone();
        move |mut pooled_connection| {
            api::listing::load_one::handle_request(&mut pooled_connection, &slug, &caller)
        }
    })
    .await?;
    let resource = listing_id.to_inner().to_string();
    let count_view = state
        .view_throttle
        .register_view(&client_id, &resource, UtcDateTimeMs::now())
        .await;
    let viewer = caller.user_uid().map(ToOwned::to_owned);
    if count_view || viewer.is_some() {
        let recorded = websrv::spawn_blocking_write_task(&state.gatekeeper, move |mut pooled_connection| {
            api::listing::record_view::handle_request(
                &mut pooled_connection,
                listing_id,
                count_view,
                viewer.as_deref(),
            )
        })
        .await;
        if let Err(rejection) = recorded {
            log::warn!("Failed to record view of listing {slug}: {rejection:?}");
        }
    }
    Ok(json_reply(&response_body))
}

async fn load_related_listings(
    slug: String,
    path: FullPath,
    query: String,
    state: Arc<AppState>,
) -> Result<Response> {
    let cache_key = state.response_cache.cache_key(path.as_str(), Some(&query));
    cached_json_reply(&state.response_cache, &cache_key, state.listings_ttl, || {
        websrv::spawn_blocking_read_task(&state.gatekeeper, move |mut pooled_connection| {
            api::listing::load_related::handle_request(&mut pooled_connection, &slug)
        })
    })
    .await
}

async fn create_listing(
    caller: Caller,
    request_body: api::listing::create::RequestBody,
    state: Arc<AppState>,
) -> Result<Response> {
    let response_body =
        websrv::spawn_blocking_write_task(&state.gatekeeper, move |mut pooled_connection| {
            api::listing::create::handle_request(&mut pooled_connection, &caller, request_body)
        })
        .await?;
    state.invalidate_listings().await;
    Ok(json_reply_with_status(&response_body, StatusCode::CREATED))
}

async fn update_listing(
    slug: String,
    caller: Caller,
    request_body: api::listing::update::RequestBody,
    state: Arc<AppState>,
) -> Result<Response> {
    let response_body =
        websrv::spawn_blocking_write_task(&state.gatekeeper, move |mut pooled_connection| {
            api::listing::update::handle_request(
                &mut pooled_connection,
                &caller,
                &slug,
                request_body,
            )
        })
        .await?;
    state.invalidate_listings().await;
    Ok(json_reply(&response_body))
}

async fn update_listing_status(
    slug: String,
    caller: Caller,
    request_body: api::listing::update_status::RequestBody,
    state: Arc<AppState>,
) -> Result<Response> {
    let response_body =
        websrv::spawn_blocking_write_task(&state.gatekeeper, move |mut pooled_connection| {
            api::listing::update_status::handle_request(
                &mut pooled_connection,
                &caller,
                &slug,
                request_body,
            )
        })
        .await?;
    state.invalidate_listings().await;
    Ok(json_reply(&response_body))
}

async fn delete_listing(slug: String, caller: Caller, state: Arc<AppState>) -> Result<Response> {
    websrv::spawn_blocking_write_task(&state.gatekeeper, move |mut pooled_connection| {
        api::listing::delete::handle_request(&mut pooled_connection, &caller, &slug)
    })
    .await?;
    state.invalidate_listings().await;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn search_listings_for_moderation(
    caller: Caller,
    query_params: SearchQueryParams,
    state: Arc<AppState>,
) -> Result<Response> {
    let text_search_available = state.text_search_available;
    let response_body =
        websrv::spawn_blocking_read_task(&state.gatekeeper, move |mut pooled_connection| {
            api::listing::search_admin::handle_request(
                &mut pooled_connection,
                &caller,
                query_params,
                text_search_available,
            )
        })
        .await?;
    Ok(json_reply(&response_body))
}

async fn load_recently_viewed(
    caller: Caller,
    query_params: PaginationParams,
    state: Arc<AppState>,
) -> Result<Response> {
    let response_body =
        websrv::spawn_blocking_read_task(&state.gatekeeper, move |mut pooled_connection| {
            api::recently_viewed::handle_request(&mut pooled_connection, &caller, &query_params)
        })
        .await?;
    Ok(json_reply(&response_body))
}

async fn load_own_listings(
    caller: Caller,
    query_params: PaginationParams,
    state: Arc<AppState>,
) -> Result<Response> {
    let response_body =
        websrv::spawn_blocking_read_task(&state.gatekeeper, move |mut pooled_connection| {
            api::listing::search_own::handle_request(&mut pooled_connection, &caller, &query_params)
        })
        .await?;
    Ok(json_reply(&response_body))
}

async fn register_seller(
    caller: Caller,
    request_body: api::seller::RequestBody,
    state: Arc<AppState>,
) -> Result<Response> {
    let response_body =
        websrv::spawn_blocking_write_task(&state.gatekeeper, move |mut pooled_connection| {
            api::seller::handle_request(&mut pooled_connection, &caller, request_body)
        })
        .await?;
    Ok(json_reply_with_status(&response_body, StatusCode::CREATED))
}

async fn load_categories(path: FullPath, query: String, state: Arc<AppState>) -> Result<Response> {
    let cache_key = state.response_cache.cache_key(path.as_str(), Some(&query));
    cached_json_reply(&state.response_cache, &cache_key, state.catalog_ttl, || {
        websrv::spawn_blocking_read_task(&state.gatekeeper, |mut pooled_connection| {
            api::catalog::load_categories::handle_request(&mut pooled_connection)
        })
    })
    .await
}

async fn load_brands(path: FullPath, query: String, state: Arc<AppState>) -> Result<Response> {
    let cache_key = state.response_cache.cache_key(path.as_str(), Some(&query));
    cached_json_reply(&state.response_cache, &cache_key, state.catalog_ttl, || {
        websrv::spawn_blocking_read_task(&state.gatekeeper, |mut pooled_connection| {
            api::catalog::load_brands::handle_request(&mut pooled_connection)
        })
    })
    .await
}

#[cfg(test)]
mod tests;
