// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core_api::{listing::search::FilterScope, pagination::Endpoint};
use rigmart_core_api_json::listing::search::SearchQueryParams;

use super::*;

pub type ResponseBody = Page<ListingSummary>;

/// Search listings of any status for moderation.
///
/// Soft-deleted listings are never included.
#[allow(clippy::panic_in_result_fn)] // tracing::instrument
#[tracing::instrument(
    name = "Searching listings for moderation",
    skip(
        connection,
    ),
    fields(
        request_id = %new_request_id(),
    )
)]
pub fn handle_request(
    connection: &mut DbConnection,
    caller: &Caller,
    query_params: SearchQueryParams,
    text_search_available: bool,
) -> Result<ResponseBody> {
    if !caller.is_admin() {
        return Err(uc::Error::Forbidden.into());
    }
    let pagination = query_params.pagination.parse(Endpoint::AdminListings);
    let status = query_params.parse_status().map_err(Error::BadRequest)?;
    let params = query_params
        .try_into_search_params()
        .map_err(Error::BadRequest)?;
    let results = uc::listing::search(
        connection,
        &params,
        FilterScope::Admin { status },
        pagination,
        text_search_available,
    )?;
    Ok(page_of_summaries(results))
}
