// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashMap;

use rigmart_core::{ListingStatus, util::clock::UtcDateTimeMs};
use rigmart_core_api::pagination::PaginationState;
use rigmart_repo::{
    listing::{RecordId as ListingId, SearchRepo, SummaryCollector, search::Filter},
    prelude::*,
    recently_viewed::RecentlyViewedRepo,
};

use crate::listing::search::SearchResults;

/// Number of entries that are kept per user.
pub const RECENTLY_VIEWED_MAX_COUNT: u64 = 50;

pub fn record_view<Repo>(
    repo: &mut Repo,
    user_uid: &str,
    listing_id: ListingId,
    viewed_at: UtcDateTimeMs,
) -> RepoResult<()>
where
    Repo: RecentlyViewedRepo,
{
    repo.touch_recently_viewed(user_uid, listing_id, viewed_at)?;
    let pruned = repo.prune_recently_viewed(user_uid, RECENTLY_VIEWED_MAX_COUNT)?;
    if pruned > 0 {
        log::debug!("Pruned {pruned} recently viewed listings of user {user_uid}");
    }
    Ok(())
}

/// Active listings the user has viewed, most recently viewed first.
pub fn load<Repo>(
    repo: &mut Repo,
    user_uid: &str,
    pagination: PaginationState,
) -> RepoResult<SearchResults>
where
    Repo: RecentlyViewedRepo + SearchRepo,
{
    let total = repo.count_recently_viewed(user_uid)?;
    let ids = repo.load_recently_viewed_listing_ids(user_uid, &pagination.to_pagination())?;
    let mut collector = SummaryCollector::default();
    if !ids.is_empty() {
        let filter = Filter::All(vec![
            Filter::Status(ListingStatus::Active),
            Filter::NotDeleted,
            Filter::IdIn(ids.clone()),
        ]);
        repo.search_listings(
            &filter,
            &[],
            &Pagination::new(),
            &mut collector,
        )?;
    }
    let rank_by_id: HashMap<_, _> = ids.into_iter().zip(0usize..).collect();
    let mut summaries = collector.finish();
    summaries.sort_by_key(|summary| {
        rank_by_id
            .get(&ListingId::new(summary.id))
            .copied()
            .unwrap_or(usize::MAX)
    });
    Ok(SearchResults {
        summaries,
        pagination: pagination.summarize(total),
    })
}
