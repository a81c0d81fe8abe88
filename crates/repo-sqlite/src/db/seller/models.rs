// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::SellerProfile;
use rigmart_repo::seller::RecordHeader;

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Queryable)]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) user_uid: String,
    pub(crate) display_name: String,
    pub(crate) company_name: Option<String>,
    pub(crate) country_code: String,
}

impl TryFrom<QueryableRecord> for (RecordHeader, SellerProfile) {
    type Error = anyhow::Error;

    fn try_from(from: QueryableRecord) -> anyhow::Result<Self> {
        let QueryableRecord {
            row_id,
            row_created_ms,
            row_updated_ms,
            user_uid,
            display_name,
            company_name,
            country_code,
        } = from;
        let header = RecordHeader {
            id: row_id.into(),
            created_at: timestamp_from_sql(row_created_ms),
            updated_at: timestamp_from_sql(row_updated_ms),
        };
        let profile = SellerProfile {
            user_uid,
            display_name,
            company_name,
            country_code: decode_country_code(&country_code)?,
        };
        Ok((header, profile))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = seller)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) user_uid: &'a str,
    pub(crate) display_name: &'a str,
    pub(crate) company_name: Option<&'a str>,
    pub(crate) country_code: &'a str,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(created_at: UtcDateTimeMs, profile: &'a SellerProfile) -> Self {
        let row_created_updated_ms = timestamp_to_sql(created_at);
        let SellerProfile {
            user_uid,
            display_name,
            company_name,
            country_code,
        } = profile;
        Self {
            row_created_ms: row_created_updated_ms,
            row_updated_ms: row_created_updated_ms,
            user_uid,
            display_name,
            company_name: company_name.as_deref(),
            country_code: country_code.as_str(),
        }
    }
}
