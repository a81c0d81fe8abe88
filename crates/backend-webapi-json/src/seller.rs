// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{SellerProfile, listing::CountryCode};
use rigmart_core_api::Caller;
use rigmart_usecases::seller::SellerInput;
use serde::{Deserialize, Serialize};

use super::*;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RequestBody {
    pub display_name: String,
    pub company_name: Option<String>,
    pub country_code: CountryCode,
}

impl From<RequestBody> for SellerInput {
    fn from(from: RequestBody) -> Self {
        let RequestBody {
            display_name,
            company_name,
            country_code,
        } = from;
        Self {
            display_name,
            company_name,
            country_code,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub user_uid: String,
    pub display_name: String,
    pub company_name: Option<String>,
    pub country_code: CountryCode,
}

impl From<SellerProfile> for ResponseBody {
    fn from(from: SellerProfile) -> Self {
        let SellerProfile {
            user_uid,
            display_name,
            company_name,
            country_code,
        } = from;
        Self {
            user_uid,
            display_name,
            company_name,
            country_code,
        }
    }
}

/// Register the caller as a seller.
#[allow(clippy::panic_in_result_fn)] // tracing::instrument
#[tracing::instrument(
    name = "Registering seller",
    skip(
        connection,
    ),
    fields(
        request_id = %new_request_id(),
    )
)]
pub fn handle_request(
    connection: &mut DbConnection,
    caller: &Caller,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    let profile = uc::seller::register(connection, caller, request_body.into())?;
    log::info!("Registered seller {}", profile.user_uid);
    Ok(profile.into())
}
