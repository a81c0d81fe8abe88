// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::Brand;
use rigmart_repo::catalog::BrandId;

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Queryable)]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) slug: String,
    pub(crate) name: String,
}

impl From<QueryableRecord> for (BrandId, Brand) {
    fn from(from: QueryableRecord) -> Self {
        let QueryableRecord { row_id, slug, name } = from;
        (row_id.into(), Brand { slug, name })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = brand)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) slug: &'a str,
    pub(crate) name: &'a str,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(brand: &'a Brand) -> Self {
        let Brand { slug, name } = brand;
        Self { slug, name }
    }
}
