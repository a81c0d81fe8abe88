// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{ListingStatus, util::clock::UtcDateTimeMs};
use rigmart_core_api::{
    Caller,
    listing::{
        projection::{ListingDetail, ListingSummary},
        search::{FilterScope, SearchParams},
    },
    pagination::PaginationState,
};
use rigmart_repo::listing::{EntityRepo as _, RecordId as ListingId};
use uc::listing::{search::SearchResults, write::ListingInput};

use super::*;

pub fn search(
    connection: &mut DbConnection,
    params: &SearchParams,
    scope: FilterScope,
    pagination: PaginationState,
    text_search_available: bool,
) -> Result<SearchResults> {
    with_transaction(connection, |repo| {
        uc::listing::search::search(repo, params, scope, pagination, text_search_available)
    })
}

pub fn search_own(
    connection: &mut DbConnection,
    caller: &Caller,
    pagination: PaginationState,
) -> Result<SearchResults> {
    with_transaction(connection, |repo| {
        uc::listing::search::search_own(repo, caller, pagination)
    })
}

pub fn load_visible_detail(
    connection: &mut DbConnection,
    slug: &str,
    caller: &Caller,
) -> Result<(ListingId, ListingDetail)> {
    with_transaction(connection, |repo| {
        uc::listing::detail::load_visible(repo, slug, caller)
    })
}

pub fn load_related(connection: &mut DbConnection, slug: &str) -> Result<Vec<ListingSummary>> {
    with_transaction(connection, |repo| {
        uc::listing::related::load_related(repo, slug)
    })
}

/// Side effects of viewing the detail of a listing.
///
/// The view counter is only incremented if the view has not been
/// throttled. Views of authenticated users are recorded in their
/// history regardless of throttling.
pub fn record_view(
    connection: &mut DbConnection,
    listing_id: ListingId,
    count_view: bool,
    viewer: Option<&str>,
) -> Result<()> {
    if !count_view && viewer.is_none() {
        return Ok(());
    }
    let viewed_at = UtcDateTimeMs::now();
    with_transaction(connection, |repo| {
        if count_view {
            repo.increment_listing_view_count(listing_id)?;
        }
        if let Some(user_uid) = viewer {
            uc::recently_viewed::record_view(repo, user_uid, listing_id, viewed_at)?;
        }
        Ok::<_, RepoError>(())
    })
}

pub fn create(
    connection: &mut DbConnection,
    caller: &Caller,
    input: ListingInput,
) -> Result<ListingDetail> {
    let created_at = UtcDateTimeMs::now();
    with_transaction(connection, |repo| {
        uc::listing::write::create(repo, caller, input, created_at)
    })
}

pub fn update(
    connection: &mut DbConnection,
    caller: &Caller,
    slug: &str,
    input: ListingInput,
) -> Result<ListingDetail> {
    let updated_at = UtcDateTimeMs::now();
    with_transaction(connection, |repo| {
        uc::listing::write::update(repo, caller, slug, input, updated_at)
    })
}

pub fn update_status(
    connection: &mut DbConnection,
    caller: &Caller,
    slug: &str,
    status: ListingStatus,
) -> Result<ListingDetail> {
    let updated_at = UtcDateTimeMs::now();
    with_transaction(connection, |repo| {
        uc::listing::write::update_status(repo, caller, slug, status, updated_at)
    })
}

pub fn delete(connection: &mut DbConnection, caller: &Caller, slug: &str) -> Result<()> {
    let deleted_at = UtcDateTimeMs::now();
    with_transaction(connection, |repo| {
        uc::listing::write::delete(repo, caller, slug, deleted_at)
    })
}

#[cfg(test)]
mod tests;
