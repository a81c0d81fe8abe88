// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{SellerProfile, util::clock::UtcDateTimeMs};

use crate::prelude::*;

record_id_newtype!(RecordId);

pub type RecordHeader = crate::RecordHeader<RecordId>;

pub trait EntityRepo {
    fn resolve_seller_id(&mut self, user_uid: &str) -> RepoResult<RecordId>;

    fn load_seller(&mut self, id: RecordId) -> RepoResult<(RecordHeader, SellerProfile)>;

    fn insert_seller(
        &mut self,
        created_at: UtcDateTimeMs,
        profile: &SellerProfile,
    ) -> RepoResult<RecordId>;
}
