// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_repo::listing::RecordId as ListingId;

use super::*;

pub type ResponseBody = ListingDetail;

/// Load the detail of a listing that is visible to the caller.
///
/// Returns the record id that is needed for recording the view.
#[allow(clippy::panic_in_result_fn)] // tracing::instrument
#[tracing::instrument(
    name = "Loading listing",
    skip(
        connection,
    ),
    fields(
        request_id = %new_request_id(),
    )
)]
pub fn handle_request(
    connection: &mut DbConnection,
    slug: &str,
    caller: &Caller,
) -> Result<(ListingId, ResponseBody)> {
    let (id, detail) = uc::listing::load_visible_detail(connection, slug, caller)?;
    Ok((id, detail.into()))
}
