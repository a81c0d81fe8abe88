// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core_api::{Caller, pagination::PaginationState};
use uc::listing::search::SearchResults;

use super::*;

/// Anonymous callers have no history.
pub fn load(
    connection: &mut DbConnection,
    caller: &Caller,
    pagination: PaginationState,
) -> Result<SearchResults> {
    let user_uid = caller.user_uid().ok_or(Error::Forbidden)?;
    with_transaction(connection, |repo| {
        uc::recently_viewed::load(repo, user_uid, pagination)
    })
}
