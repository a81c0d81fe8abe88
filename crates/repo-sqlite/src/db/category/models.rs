// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::Category;
use rigmart_repo::catalog::{CategoryId, CategoryRecord};

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Queryable)]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) parent_id: Option<RowId>,
    pub(crate) slug: String,
    pub(crate) name: String,
    pub(crate) is_active: bool,
    pub(crate) position: i32,
}

impl From<QueryableRecord> for CategoryRecord {
    fn from(from: QueryableRecord) -> Self {
        let QueryableRecord {
            row_id,
            parent_id,
            slug,
            name,
            is_active,
            position,
        } = from;
        Self {
            id: row_id.into(),
            parent_id: parent_id.map(CategoryId::new),
            category: Category {
                slug,
                name,
                is_active,
                position,
            },
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = category)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) parent_id: Option<RowId>,
    pub(crate) slug: &'a str,
    pub(crate) name: &'a str,
    pub(crate) is_active: bool,
    pub(crate) position: i32,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(parent_id: Option<CategoryId>, category: &'a Category) -> Self {
        let Category {
            slug,
            name,
            is_active,
            position,
        } = category;
        Self {
            parent_id: parent_id.map(CategoryId::to_inner),
            slug,
            name,
            is_active: *is_active,
            position: *position,
        }
    }
}
