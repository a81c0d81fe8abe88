// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{SellerProfile, util::clock::UtcDateTimeMs};
use rigmart_core_api::Caller;
use uc::seller::SellerInput;

use super::*;

pub fn register(
    connection: &mut DbConnection,
    caller: &Caller,
    input: SellerInput,
) -> Result<SellerProfile> {
    let created_at = UtcDateTimeMs::now();
    with_transaction(connection, |repo| {
        uc::seller::register(repo, caller, input, created_at)
    })
    .map(|(_, profile)| profile)
}
