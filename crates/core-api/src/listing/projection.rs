// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Fixed projections of listings for list and detail views.

use rigmart_core::{
    Brand, Category, Model,
    listing::{
        Condition, CountryCode, EmissionClass, FuelType, ListingImage, ListingStatus, Location,
        MileageKm, ModelYear, PriceEur, Transmission, ViewCount,
    },
    seller::UserUid,
    util::clock::UtcDateTimeMs,
};

use crate::Caller;

/// Database row id of a listing as exposed to clients.
pub type ListingRowId = i64;

/// Projection for list views.
///
/// Only the cover image, i.e. the image with the lowest position,
/// is included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSummary {
    pub id: ListingRowId,
    pub slug: String,
    pub title: String,
    pub status: ListingStatus,
    pub price_eur: PriceEur,
    pub condition: Condition,
    pub fuel_type: Option<FuelType>,
    pub year: Option<ModelYear>,
    pub mileage_km: Option<MileageKm>,
    pub location: Location,
    pub cover_image: Option<ListingImage>,
    pub image_count: u64,
    pub view_count: ViewCount,
    pub published_at: Option<UtcDateTimeMs>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerSummary {
    pub user_uid: UserUid,
    pub display_name: String,
    pub company_name: Option<String>,
    pub country_code: CountryCode,
}

/// Projection for the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDetail {
    pub summary: ListingSummary,
    pub description: String,
    pub transmission: Option<Transmission>,
    pub emission_class: Option<EmissionClass>,

    /// All images ordered by position.
    pub images: Vec<ListingImage>,
    pub category: Category,
    pub brand: Option<Brand>,
    pub model: Option<Model>,
    pub seller: SellerSummary,
}

impl ListingDetail {
    #[must_use]
    pub fn status(&self) -> ListingStatus {
        self.summary.status
    }

    #[must_use]
    pub fn owner_uid(&self) -> &str {
        &self.seller.user_uid
    }

    /// Non-public listings are only visible to their owner and to admins.
    #[must_use]
    pub fn is_visible_to(&self, caller: &Caller) -> bool {
        self.status().is_public() || caller.is_admin() || caller.is_user(self.owner_uid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_detail(status: ListingStatus) -> ListingDetail {
        ListingDetail {
            summary: ListingSummary {
                id: 1,
                slug: "volvo-fh-500".into(),
                title: "Volvo FH 500".into(),
                status,
                price_eur: 65_000,
                condition: Condition::Used,
                fuel_type: Some(FuelType::Diesel),
                year: Some(2019),
                mileage_km: Some(420_000),
                location: Location {
                    country_code: CountryCode::parse("SE").unwrap(),
                    city: None,
                },
                cover_image: None,
                image_count: 0,
                view_count: 0,
                published_at: None,
            },
            description: String::new(),
            transmission: None,
            emission_class: None,
            images: vec![],
            category: Category {
                slug: "trucks".into(),
                name: "Trucks".into(),
                is_active: true,
                position: 0,
            },
            brand: None,
            model: None,
            seller: SellerSummary {
                user_uid: "owner".into(),
                display_name: "Owner".into(),
                company_name: None,
                country_code: CountryCode::parse("SE").unwrap(),
            },
        }
    }

    #[test]
    fn active_listings_are_visible_to_everyone() {
        let detail = new_detail(ListingStatus::Active);
        assert!(detail.is_visible_to(&Caller::Anonymous));
        assert!(detail.is_visible_to(&Caller::User("other".into())));
    }

    #[test]
    fn non_public_listings_are_only_visible_to_owner_and_admins() {
        for status in [
            ListingStatus::Draft,
            ListingStatus::Pending,
            ListingStatus::Sold,
            ListingStatus::Expired,
            ListingStatus::Rejected,
        ] {
            let detail = new_detail(status);
            assert!(!detail.is_visible_to(&Caller::Anonymous));
            assert!(!detail.is_visible_to(&Caller::User("other".into())));
            assert!(detail.is_visible_to(&Caller::User("owner".into())));
            assert!(detail.is_visible_to(&Caller::Admin("moderator".into())));
        }
    }
}
