// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::ListingImage;

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Queryable)]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) listing_id: RowId,
    pub(crate) url: String,
    pub(crate) position: i32,
}

impl From<QueryableRecord> for (RowId, ListingImage) {
    fn from(from: QueryableRecord) -> Self {
        let QueryableRecord {
            row_id: _,
            listing_id,
            url,
            position,
        } = from;
        (listing_id, ListingImage { url, position })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = listing_image)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) listing_id: RowId,
    pub(crate) url: &'a str,
    pub(crate) position: i32,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(listing_id: RowId, image: &'a ListingImage) -> Self {
        let ListingImage { url, position } = image;
        Self {
            listing_id,
            url,
            position: *position,
        }
    }
}
