// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core_api::{Caller, pagination::Endpoint};
use rigmart_core_api_json::pagination::PaginationParams;

use super::*;

pub type ResponseBody = Page<ListingSummary>;

/// Active listings the caller has viewed recently, most recent first.
#[allow(clippy::panic_in_result_fn)] // tracing::instrument
#[tracing::instrument(
    name = "Loading recently viewed listings",
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
    query_params: &PaginationParams,
) -> Result<ResponseBody> {
    let pagination = query_params.parse(Endpoint::RecentlyViewed);
    let results = uc::recently_viewed::load(connection, caller, pagination)?;
    Ok(page_of_summaries(results))
}
