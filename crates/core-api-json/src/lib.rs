// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Serde representations of the boundary types.
//!
//! Query parameters are deserialized leniently as strings and
//! validated explicitly, responses use camelCase field names.

mod prelude {
    pub(crate) use rigmart_core_api as _inner;
    pub(crate) use serde::{Deserialize, Serialize};
}

pub mod catalog;
pub mod listing;
pub mod pagination;

use self::prelude::*;

/// Paginated list of items.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: pagination::PaginationSummary,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}
