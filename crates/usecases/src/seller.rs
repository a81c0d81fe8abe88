// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{SellerProfile, listing::CountryCode, util::clock::UtcDateTimeMs};
use rigmart_core_api::Caller;
use rigmart_repo::seller::{EntityRepo as SellerRepo, RecordId as SellerId};

use super::*;

pub const DISPLAY_NAME_MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerInput {
    pub display_name: String,
    pub company_name: Option<String>,
    pub country_code: CountryCode,
}

/// Create the seller profile of the calling user.
///
/// Each user owns at most one seller profile, registering a second
/// one fails with a conflict.
pub fn register<Repo>(
    repo: &mut Repo,
    caller: &Caller,
    input: SellerInput,
    created_at: UtcDateTimeMs,
) -> Result<(SellerId, SellerProfile)>
where
    Repo: SellerRepo,
{
    let user_uid = caller.user_uid().ok_or(Error::Forbidden)?;
    let SellerInput {
        display_name,
        company_name,
        country_code,
    } = input;
    let display_name = display_name.trim().to_owned();
    if display_name.is_empty() || display_name.chars().count() > DISPLAY_NAME_MAX_LEN {
        return Err(InputError(anyhow::anyhow!("Invalid display name: {display_name:?}")).into());
    }
    let company_name = company_name
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty());
    let profile = SellerProfile {
        user_uid: user_uid.to_owned(),
        display_name,
        company_name,
        country_code,
    };
    let id = repo.insert_seller(created_at, &profile)?;
    log::info!("Registered seller profile of user {user_uid}");
    Ok((id, profile))
}
