// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_repo::listing::RecordId as ListingId;

use super::*;

pub fn handle_request(
    connection: &mut DbConnection,
    listing_id: ListingId,
    count_view: bool,
    viewer: Option<&str>,
) -> Result<()> {
    log::debug!("Recording view of listing {listing_id:?}: count_view = {count_view}");
    uc::listing::record_view(connection, listing_id, count_view, viewer).map_err(Into::into)
}
