// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{result::Result as StdResult, time::Duration};

use rigmart_cache::{
    response::{CachedResponse, ResponseCache},
    store::CacheStore,
};
use serde::Serialize;
use warp::{
    http::{
        HeaderValue, StatusCode,
        header::{CONTENT_TYPE, HeaderName},
    },
    reject::Rejection,
    reply::Response,
};

use crate::reject_on_error;

pub const CACHE_HEADER: &str = "x-cache";

const APPLICATION_JSON: &str = "application/json";

/// Reply with a JSON body that is served from the cache if possible.
///
/// The `X-Cache` header tells if the response has been cached
/// before. Rejections are passed through and never cached.
pub async fn cached_json_reply<S, F, Fut, T>(
    cache: &ResponseCache<S>,
    cache_key: &str,
    ttl: Duration,
    handler: F,
) -> StdResult<Response, Rejection>
where
    S: CacheStore,
    F: FnOnce() -> Fut,
    Fut: Future<Output = StdResult<T, Rejection>>,
    T: Serialize,
{
    let CachedResponse {
        outcome,
        status,
        body,
    } = cache
        .get_or_populate(cache_key, ttl, || async move {
            let response_body = handler().await?;
            let body = serde_json::to_string(&response_body)
                .map_err(|err| reject_on_error(anyhow::Error::from(err)))?;
            Ok::<_, Rejection>((StatusCode::OK.as_u16(), body))
        })
        .await?;
    let mut response = Response::new(body.into());
    *response.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(
        HeaderName::from_static(CACHE_HEADER),
        HeaderValue::from_static(outcome.as_str()),
    );
    Ok(response)
}
