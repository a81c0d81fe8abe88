// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::prelude::*;

mod _inner {
    pub(super) use crate::_inner::pagination::*;
}

/// Page-based pagination as requested by clients.
///
/// `perPage` is accepted as an alias of `limit`. Malformed values
/// are treated like absent values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub per_page: Option<String>,
}

impl PaginationParams {
    #[must_use]
    pub fn parse(&self, endpoint: _inner::Endpoint) -> _inner::PaginationState {
        let Self {
            page,
            limit,
            per_page,
        } = self;
        _inner::parse_pagination(
            page.as_deref(),
            limit.as_deref().or(per_page.as_deref()),
            endpoint.limits(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSummary {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl From<_inner::PaginationSummary> for PaginationSummary {
    fn from(from: _inner::PaginationSummary) -> Self {
        let _inner::PaginationSummary {
            page,
            limit,
            total,
            total_pages,
        } = from;
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}
