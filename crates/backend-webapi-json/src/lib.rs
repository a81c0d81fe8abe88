// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Synchronous request handlers of the web API.
//!
//! Each handler receives an exclusive database connection, invokes
//! the corresponding use case, and maps the outcome onto JSON
//! representations.

#![cfg_attr(not(test), deny(clippy::panic_in_result_fn))]

use rigmart_core_api_json::{Page, listing::projection::ListingSummary};
use rigmart_repo_sqlite::DbConnection;
use rigmart_usecases::listing::search::SearchResults;
use rigmart_usecases_sqlite as uc;
use thiserror::Error;
use uuid::Uuid;

pub mod catalog;
pub mod listing;
pub mod recently_viewed;
pub mod seller;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error(transparent)]
    UseCase(uc::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        Self::UseCase(err)
    }
}

impl From<rigmart_usecases::Error> for Error {
    fn from(err: rigmart_usecases::Error) -> Self {
        uc::Error::from(err).into()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

fn new_request_id() -> Uuid {
    Uuid::new_v4()
}

fn page_of_summaries(results: SearchResults) -> Page<ListingSummary> {
    let SearchResults {
        summaries,
        pagination,
    } = results;
    Page {
        data: summaries.into_iter().map(Into::into).collect(),
        pagination: pagination.into(),
    }
}
