// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{
    Category, Condition, FuelType, Listing, ListingStatus, Location, SellerProfile,
    listing::{CountryCode, PriceEur},
    util::clock::UtcDateTimeMs,
};
use rigmart_repo::{
    catalog::{CategoryId, CategoryRepo as _},
    listing::{EntityRepo as _, ListingRelations, RecordId as ListingId},
    prelude::RepoResult,
    seller::{EntityRepo as _, RecordId as SellerId},
};

use crate::{DbConnection, tests::*};

pub(crate) struct Fixture {
    pub(crate) db: DbConnection,
}

impl Fixture {
    pub(crate) fn new() -> TestResult<Self> {
        let db = establish_connection()?;
        Ok(Self { db })
    }

    pub(crate) fn connection(&mut self) -> crate::Connection<'_> {
        crate::Connection::new(&mut self.db)
    }
}

pub(crate) fn country_code(code: &str) -> CountryCode {
    CountryCode::parse(code).unwrap()
}

pub(crate) fn new_category(slug: &str, is_active: bool) -> Category {
    Category {
        slug: slug.to_owned(),
        name: slug.to_uppercase(),
        is_active,
        position: 0,
    }
}

pub(crate) fn new_listing(slug: &str, status: ListingStatus, price_eur: PriceEur) -> Listing {
    Listing {
        slug: slug.to_owned(),
        title: format!("Truck {slug}"),
        description: "Well maintained".to_owned(),
        status,
        condition: Condition::Used,
        fuel_type: Some(FuelType::Diesel),
        transmission: None,
        emission_class: None,
        price_eur,
        year: Some(2018),
        mileage_km: Some(350_000),
        location: Location {
            country_code: country_code("DE"),
            city: Some("Hamburg".to_owned()),
        },
        published_at: status
            .is_public()
            .then(|| UtcDateTimeMs::from_unix_timestamp_millis(1_700_000_000_000)),
    }
}

pub(crate) fn insert_seller(db: &mut crate::Connection<'_>, user_uid: &str) -> RepoResult<SellerId> {
    db.insert_seller(
        UtcDateTimeMs::now(),
        &SellerProfile {
            user_uid: user_uid.to_owned(),
            display_name: format!("Seller {user_uid}"),
            company_name: Some("Haulage Ltd".to_owned()),
            country_code: country_code("DE"),
        },
    )
}

pub(crate) fn insert_category(
    db: &mut crate::Connection<'_>,
    parent_id: Option<CategoryId>,
    slug: &str,
    is_active: bool,
) -> RepoResult<CategoryId> {
    db.insert_category(parent_id, &new_category(slug, is_active))
}

pub(crate) fn insert_listing(
    db: &mut crate::Connection<'_>,
    seller_id: SellerId,
    category_id: CategoryId,
    listing: &Listing,
) -> RepoResult<ListingId> {
    insert_listing_created_at(db, seller_id, category_id, listing, UtcDateTimeMs::now())
}

pub(crate) fn insert_listing_created_at(
    db: &mut crate::Connection<'_>,
    seller_id: SellerId,
    category_id: CategoryId,
    listing: &Listing,
    created_at: UtcDateTimeMs,
) -> RepoResult<ListingId> {
    let relations = ListingRelations {
        seller_id,
        category_id,
        brand_id: None,
        model_id: None,
    };
    db.insert_listing(created_at, &relations, listing)
}
