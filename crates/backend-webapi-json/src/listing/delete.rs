// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[allow(clippy::panic_in_result_fn)] // tracing::instrument
#[tracing::instrument(
    name = "Deleting listing",
    skip(
        connection,
    ),
    fields(
        request_id = %new_request_id(),
    )
)]
pub fn handle_request(connection: &mut DbConnection, caller: &Caller, slug: &str) -> Result<()> {
    uc::listing::delete(connection, caller, slug)?;
    log::info!("Deleted listing {slug}");
    Ok(())
}
