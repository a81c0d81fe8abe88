// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{
    Brand, Category, Model,
    listing::{
        Condition, CountryCode, EmissionClass, FuelType, ListingStatus, MileageKm, ModelYear,
        PriceEur, Transmission, ViewCount,
    },
    util::clock::UtcDateTimeMs,
};

use crate::prelude::*;

mod _inner {
    pub(super) use crate::_inner::listing::projection::*;
    pub(super) use rigmart_core::listing::{ListingImage, Location};
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub country_code: CountryCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl From<_inner::Location> for Location {
    fn from(from: _inner::Location) -> Self {
        let _inner::Location { country_code, city } = from;
        Self { country_code, city }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub url: String,
    pub position: i32,
}

impl From<_inner::ListingImage> for Image {
    fn from(from: _inner::ListingImage) -> Self {
        let _inner::ListingImage { url, position } = from;
        Self { url, position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSummary {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub status: ListingStatus,
    pub price_eur: PriceEur,
    pub condition: Condition,
    pub fuel_type: Option<FuelType>,
    pub year: Option<ModelYear>,
    pub mileage_km: Option<MileageKm>,
    pub location: Location,
    pub cover_image: Option<Image>,
    pub image_count: u64,
    pub view_count: ViewCount,
    pub published_at: Option<UtcDateTimeMs>,
}

impl From<_inner::ListingSummary> for ListingSummary {
    fn from(from: _inner::ListingSummary) -> Self {
        let _inner::ListingSummary {
            id,
            slug,
            title,
            status,
            price_eur,
            condition,
            fuel_type,
            year,
            mileage_km,
            location,
            cover_image,
            image_count,
            view_count,
            published_at,
        } = from;
        Self {
            id,
            slug,
            title,
            status,
            price_eur,
            condition,
            fuel_type,
            year,
            mileage_km,
            location: location.into(),
            cover_image: cover_image.map(Into::into),
            image_count,
            view_count,
            published_at,
        }
    }
}

/// Public profile of the seller.
///
/// The account id of the seller is not disclosed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerSummary {
    pub display_name: String,
    pub company_name: Option<String>,
    pub country_code: CountryCode,
}

impl From<_inner::SellerSummary> for SellerSummary {
    fn from(from: _inner::SellerSummary) -> Self {
        let _inner::SellerSummary {
            user_uid: _,
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetail {
    #[serde(flatten)]
    pub summary: ListingSummary,
    pub description: String,
    pub transmission: Option<Transmission>,
    pub emission_class: Option<EmissionClass>,
    pub images: Vec<Image>,
    pub category: Category,
    pub brand: Option<Brand>,
    pub model: Option<Model>,
    pub seller: SellerSummary,
}

impl From<_inner::ListingDetail> for ListingDetail {
    fn from(from: _inner::ListingDetail) -> Self {
        let _inner::ListingDetail {
            summary,
            description,
            transmission,
            emission_class,
            images,
            category,
            brand,
            model,
            seller,
        } = from;
        Self {
            summary: summary.into(),
            description,
            transmission,
            emission_class,
            images: images.into_iter().map(Into::into).collect(),
            category,
            brand,
            model,
            seller: seller.into(),
        }
    }
}
