// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

pub type RequestBody = ListingBody;

pub type ResponseBody = ListingDetail;

#[allow(clippy::panic_in_result_fn)] // tracing::instrument
#[tracing::instrument(
    name = "Creating listing",
    skip(
        connection,
        request_body,
    ),
    fields(
        request_id = %new_request_id(),
    )
)]
pub fn handle_request(
    connection: &mut DbConnection,
    caller: &Caller,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    let created = uc::listing::create(connection, caller, request_body.into())?;
    log::info!("Created listing {}", created.summary.slug);
    Ok(created.into())
}
