// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Insertable)]
#[diesel(table_name = recently_viewed)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) user_uid: &'a str,
    pub(crate) listing_id: RowId,
    pub(crate) viewed_ms: TimestampMillis,
}
