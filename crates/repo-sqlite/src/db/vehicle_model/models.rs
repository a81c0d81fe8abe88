// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::Model;
use rigmart_repo::catalog::{BrandId, ModelId};

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Queryable)]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) brand_id: RowId,
    pub(crate) slug: String,
    pub(crate) name: String,
}

impl From<QueryableRecord> for (ModelId, Model) {
    fn from(from: QueryableRecord) -> Self {
        let QueryableRecord {
            row_id,
            brand_id: _,
            slug,
            name,
        } = from;
        (row_id.into(), Model { slug, name })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = vehicle_model)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) brand_id: RowId,
    pub(crate) slug: &'a str,
    pub(crate) name: &'a str,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(brand_id: BrandId, model: &'a Model) -> Self {
        let Model { slug, name } = model;
        Self {
            brand_id: brand_id.to_inner(),
            slug,
            name,
        }
    }
}
