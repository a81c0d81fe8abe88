// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core_api::pagination::Endpoint;
use rigmart_core_api_json::pagination::PaginationParams;

use super::*;

pub type ResponseBody = Page<ListingSummary>;

/// All listings of the calling seller, newest first.
#[allow(clippy::panic_in_result_fn)] // tracing::instrument
#[tracing::instrument(
    name = "Loading own listings",
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
    let pagination = query_params.parse(Endpoint::SellerListings);
    let results = uc::listing::search_own(connection, caller, pagination)?;
    Ok(page_of_summaries(results))
}
