// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::util::clock::UtcDateTimeMs;

use crate::{listing::RecordId as ListingId, prelude::*};

pub trait RecentlyViewedRepo {
    /// Insert or refresh the entry of a user and a listing.
    fn touch_recently_viewed(
        &mut self,
        user_uid: &str,
        listing_id: ListingId,
        viewed_at: UtcDateTimeMs,
    ) -> RepoResult<()>;

    /// Only listings that are active and not deleted are counted.
    fn count_recently_viewed(&mut self, user_uid: &str) -> RepoResult<u64>;

    /// Most recently viewed first. Only listings that are active
    /// and not deleted are considered.
    fn load_recently_viewed_listing_ids(
        &mut self,
        user_uid: &str,
        pagination: &Pagination,
    ) -> RepoResult<Vec<ListingId>>;

    /// Keep only the most recent entries of a user.
    ///
    /// Returns the number of purged entries.
    fn prune_recently_viewed(&mut self, user_uid: &str, keep_count: u64) -> RepoResult<usize>;
}
