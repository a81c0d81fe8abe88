// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::listing::CountryCode;

/// Opaque user identifier as issued by the authentication gateway.
pub type UserUid = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerProfile {
    pub user_uid: UserUid,
    pub display_name: String,
    pub company_name: Option<String>,
    pub country_code: CountryCode,
}
