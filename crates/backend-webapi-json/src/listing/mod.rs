// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::listing::{
    Condition, CountryCode, EmissionClass, FuelType, ListingStatus, Location, MileageKm,
    ModelYear, PriceEur, Transmission,
};
use rigmart_core_api::Caller;
use rigmart_core_api_json::listing::projection::ListingDetail;
use serde::Deserialize;

use super::*;

mod _inner {
    pub(super) use rigmart_usecases::listing::write::ListingInput;
}

pub mod create;
pub mod delete;
pub mod load_one;
pub mod load_related;
pub mod record_view;
pub mod search;
pub mod search_admin;
pub mod search_own;
pub mod update;
pub mod update_status;

/// Editable fields of a listing.
///
/// Catalog relations are referenced by slug.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListingBody {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub condition: Condition,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub emission_class: Option<EmissionClass>,
    pub price_eur: PriceEur,
    pub year: Option<ModelYear>,
    pub mileage_km: Option<MileageKm>,
    pub country_code: CountryCode,
    pub city: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl From<ListingBody> for _inner::ListingInput {
    fn from(from: ListingBody) -> Self {
        let ListingBody {
            title,
            description,
            category,
            brand,
            model,
            condition,
            fuel_type,
            transmission,
            emission_class,
            price_eur,
            year,
            mileage_km,
            country_code,
            city,
            image_urls,
        } = from;
        Self {
            title,
            description,
            category,
            brand,
            model,
            condition,
            fuel_type,
            transmission,
            emission_class,
            price_eur,
            year,
            mileage_km,
            location: Location { country_code, city },
            image_urls,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusBody {
    pub status: ListingStatus,
}
