// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core_api::Caller;
use rigmart_repo::{
    prelude::*,
    seller::{EntityRepo as SellerRepo, RecordId as SellerId},
};

use super::*;

pub mod detail;
pub mod filter;
pub mod related;
pub mod search;
pub mod write;

/// Admins may access all listings, users only those of their
/// own seller profile.
pub fn authorize_seller_access<Repo>(
    repo: &mut Repo,
    caller: &Caller,
    seller_id: SellerId,
) -> Result<()>
where
    Repo: SellerRepo,
{
    if caller.is_admin() {
        return Ok(());
    }
    let Some(user_uid) = caller.user_uid() else {
        return Err(Error::Forbidden);
    };
    let (_, seller) = repo.load_seller(seller_id)?;
    if seller.user_uid != user_uid {
        log::debug!("User {user_uid} is not the owner of seller {seller_id:?}");
        return Err(Error::Forbidden);
    }
    Ok(())
}

/// The seller profile of the calling user.
///
/// Callers without a seller profile are not permitted to manage listings.
pub fn resolve_caller_seller_id<Repo>(repo: &mut Repo, caller: &Caller) -> Result<SellerId>
where
    Repo: SellerRepo,
{
    let user_uid = caller.user_uid().ok_or(Error::Forbidden)?;
    repo.resolve_seller_id(user_uid)
        .optional()?
        .ok_or(Error::Forbidden)
}
