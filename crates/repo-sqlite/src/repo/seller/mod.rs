// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::SellerProfile;
use rigmart_repo::seller::*;

use crate::{
    db::seller::{models::*, schema::*},
    prelude::*,
};

impl EntityRepo for crate::Connection<'_> {
    fn resolve_seller_id(&mut self, user_uid: &str) -> RepoResult<RecordId> {
        seller::table
            .select(seller::row_id)
            .filter(seller::user_uid.eq(user_uid))
            .first::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn load_seller(&mut self, id: RecordId) -> RepoResult<(RecordHeader, SellerProfile)> {
        seller::table
            .filter(seller::row_id.eq(RowId::from(id)))
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .and_then(|record| record.try_into().map_err(Into::into))
    }

    fn insert_seller(
        &mut self,
        created_at: UtcDateTimeMs,
        profile: &SellerProfile,
    ) -> RepoResult<RecordId> {
        let insertable = InsertableRecord::bind(created_at, profile);
        diesel::insert_into(seller::table)
            .values(&insertable)
            .returning(seller::row_id)
            .get_result::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }
}
