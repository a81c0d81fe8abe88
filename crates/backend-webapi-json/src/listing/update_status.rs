// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

pub type RequestBody = StatusBody;

pub type ResponseBody = ListingDetail;

#[allow(clippy::panic_in_result_fn)] // tracing::instrument
#[tracing::instrument(
    name = "Updating listing status",
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
    slug: &str,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    let StatusBody { status } = request_body;
    uc::listing::update_status(connection, caller, slug, status)
        .map(Into::into)
        .map_err(Into::into)
}
