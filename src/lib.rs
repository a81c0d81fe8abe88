// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Listing search backend for a commercial-vehicle marketplace.
//!
//! Re-exports the sub-crates of the workspace, selected by features.

pub use rigmart_core as core;

#[cfg(feature = "api")]
pub use rigmart_core_api as api;

#[cfg(feature = "json-api")]
pub use rigmart_core_api_json as api_json;

#[cfg(feature = "repo")]
pub use rigmart_repo as repo;

#[cfg(feature = "usecases")]
pub use rigmart_usecases as usecases;

#[cfg(feature = "cache")]
pub use rigmart_cache as cache;

#[cfg(feature = "sqlite")]
pub mod sqlite {
    pub use rigmart_repo_sqlite as repo;
    pub use rigmart_storage_sqlite as storage;
    pub use rigmart_usecases_sqlite as usecases;
}
