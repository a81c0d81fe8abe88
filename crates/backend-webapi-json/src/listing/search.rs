// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core_api::{listing::search::FilterScope, pagination::Endpoint};
use rigmart_core_api_json::listing::search::SearchQueryParams;

use super::*;

pub type ResponseBody = Page<ListingSummary>;

/// Search publicly visible listings.
#[allow(clippy::panic_in_result_fn)] // tracing::instrument
#[tracing::instrument(
    name = "Searching listings",
    skip(
        connection,
    ),
    fields(
        request_id = %new_request_id(),
    )
)]
pub fn handle_request(
    connection: &mut DbConnection,
    query_params: SearchQueryParams,
    text_search_available: bool,
) -> Result<ResponseBody> {
    let pagination = query_params.pagination.parse(Endpoint::Listings);
    let params = query_params
        .try_into_search_params()
        .map_err(Error::BadRequest)?;
    let results = uc::listing::search(
        connection,
        &params,
        FilterScope::Public,
        pagination,
        text_search_available,
    )?;
    Ok(page_of_summaries(results))
}
