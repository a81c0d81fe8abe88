// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core_api::listing::projection::ListingDetail;
use rigmart_repo::listing::{EntityRepo as ListingRepo, RecordId as ListingId};

use super::*;

/// Load the detail of a listing the caller is permitted to see.
///
/// Listings that are not visible to the caller are reported
/// as not found, indistinguishable from a nonexistent slug.
pub fn load_visible<Repo>(
    repo: &mut Repo,
    slug: &str,
    caller: &Caller,
) -> Result<(ListingId, ListingDetail)>
where
    Repo: ListingRepo,
{
    let id = repo.resolve_listing_id(slug)?;
    let detail = repo.load_listing_detail(id)?;
    if !detail.is_visible_to(caller) {
        log::debug!(
            "Listing {slug} with status {status} is not visible to {caller:?}",
            status = detail.status()
        );
        return Err(RepoError::NotFound.into());
    }
    Ok((id, detail))
}
