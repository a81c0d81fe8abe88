// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::dsl::count_star;
use rigmart_repo::{listing::RecordId as ListingId, recently_viewed::RecentlyViewedRepo};

use crate::{
    db::{
        listing::schema::*,
        recently_viewed::{models::*, schema::*},
    },
    prelude::*,
};

// Encoded value of `ListingStatus::Active`
const ACTIVE_STATUS: &str = "ACTIVE";

impl RecentlyViewedRepo for crate::Connection<'_> {
    fn touch_recently_viewed(
        &mut self,
        user_uid: &str,
        listing_id: ListingId,
        viewed_at: UtcDateTimeMs,
    ) -> RepoResult<()> {
        let viewed_ms = timestamp_to_sql(viewed_at);
        let insertable = InsertableRecord {
            user_uid,
            listing_id: listing_id.into(),
            viewed_ms,
        };
        let rows_affected = diesel::insert_into(recently_viewed::table)
            .values(&insertable)
            .on_conflict((recently_viewed::user_uid, recently_viewed::listing_id))
            .do_update()
            .set(recently_viewed::viewed_ms.eq(viewed_ms))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert_eq!(1, rows_affected);
        Ok(())
    }

    fn count_recently_viewed(&mut self, user_uid: &str) -> RepoResult<u64> {
        recently_viewed::table
            .select(count_star())
            .filter(recently_viewed::user_uid.eq(user_uid))
            .filter(recently_viewed::listing_id.eq_any(
                listing::table
                    .select(listing::row_id)
                    .filter(listing::status.eq(ACTIVE_STATUS))
                    .filter(listing::deleted_ms.is_null()),
            ))
            .first::<i64>(self.as_mut())
            .map_err(repo_error)
            .map(|count| count.max(0) as u64)
    }

    fn load_recently_viewed_listing_ids(
        &mut self,
        user_uid: &str,
        pagination: &Pagination,
    ) -> RepoResult<Vec<ListingId>> {
        let query = recently_viewed::table
            .select(recently_viewed::listing_id)
            .filter(recently_viewed::user_uid.eq(user_uid))
            .filter(recently_viewed::listing_id.eq_any(
                listing::table
                    .select(listing::row_id)
                    .filter(listing::status.eq(ACTIVE_STATUS))
                    .filter(listing::deleted_ms.is_null()),
            ))
            .order_by((
                recently_viewed::viewed_ms.desc(),
                recently_viewed::row_id.desc(),
            ))
            .into_boxed();
        apply_pagination(query, pagination)
            .load::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(|ids| ids.into_iter().map(Into::into).collect())
    }

    fn prune_recently_viewed(&mut self, user_uid: &str, keep_count: u64) -> RepoResult<usize> {
        let row_ids = recently_viewed::table
            .select(recently_viewed::row_id)
            .filter(recently_viewed::user_uid.eq(user_uid))
            .order_by((
                recently_viewed::viewed_ms.desc(),
                recently_viewed::row_id.desc(),
            ))
            .load::<RowId>(self.as_mut())
            .map_err(repo_error)?;
        let keep_count = usize::try_from(keep_count).unwrap_or(usize::MAX);
        if row_ids.len() <= keep_count {
            return Ok(0);
        }
        let purge_ids = &row_ids[keep_count..];
        let rows_deleted = diesel::delete(
            recently_viewed::table.filter(recently_viewed::row_id.eq_any(purge_ids)),
        )
        .execute(self.as_mut())
        .map_err(repo_error)?;
        debug_assert_eq!(purge_ids.len(), rows_deleted);
        log::debug!("Purged {rows_deleted} recently viewed listing(s) of user {user_uid}");
        Ok(rows_deleted)
    }
}
