// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::Connection as _;
use rigmart_core::{
    Brand, Category, Condition, FuelType, Listing, ListingStatus, Location, Model, SellerProfile,
    listing::{CountryCode, PriceEur},
    util::clock::UtcDateTimeMs,
};
use rigmart_repo::{
    catalog::{BrandId, BrandRepo as _, CategoryId, CategoryRepo as _, ModelId, ModelRepo as _},
    listing::{EntityRepo as _, ListingRelations, RecordId as ListingId},
    seller::{EntityRepo as _, RecordId as SellerId},
};

use crate::{DbConnection, RepoConnection, database};

pub(crate) type TestResult<T> = anyhow::Result<T>;

pub(crate) const PUBLISHED_AT: UtcDateTimeMs =
    UtcDateTimeMs::from_unix_timestamp_millis(1_700_000_000_000);

pub(crate) struct Fixture {
    pub(crate) connection: DbConnection,
}

impl Fixture {
    pub(crate) fn new() -> TestResult<Self> {
        let mut connection = DbConnection::establish(":memory:")?;
        database::initialize(&mut connection)?;
        database::migrate_schema(&mut connection)?;
        Ok(Self { connection })
    }

    pub(crate) fn repo(&mut self) -> RepoConnection<'_> {
        RepoConnection::new(&mut self.connection)
    }

    pub(crate) fn insert_seller(&mut self, user_uid: &str) -> TestResult<SellerId> {
        let profile = SellerProfile {
            user_uid: user_uid.to_owned(),
            display_name: format!("Seller {user_uid}"),
            company_name: None,
            country_code: country_code("DE"),
        };
        Ok(self.repo().insert_seller(UtcDateTimeMs::now(), &profile)?)
    }

    pub(crate) fn insert_category(
        &mut self,
        parent_id: Option<CategoryId>,
        slug: &str,
        is_active: bool,
    ) -> TestResult<CategoryId> {
        let category = Category {
            slug: slug.to_owned(),
            name: slug.to_uppercase(),
            is_active,
            position: 0,
        };
        Ok(self.repo().insert_category(parent_id, &category)?)
    }

    pub(crate) fn insert_brand_with_model(
        &mut self,
        brand_slug: &str,
        model_slug: &str,
    ) -> TestResult<(BrandId, ModelId)> {
        let mut repo = self.repo();
        let brand_id = repo.insert_brand(&Brand {
            slug: brand_slug.to_owned(),
            name: brand_slug.to_uppercase(),
        })?;
        let model_id = repo.insert_model(
            brand_id,
            &Model {
                slug: model_slug.to_owned(),
                name: model_slug.to_uppercase(),
            },
        )?;
        Ok((brand_id, model_id))
    }

    pub(crate) fn insert_listing(
        &mut self,
        relations: ListingRelations,
        listing: &Listing,
    ) -> TestResult<ListingId> {
        Ok(self
            .repo()
            .insert_listing(UtcDateTimeMs::now(), &relations, listing)?)
    }
}

pub(crate) fn country_code(code: &str) -> CountryCode {
    CountryCode::parse(code).unwrap()
}

pub(crate) const fn relations(seller_id: SellerId, category_id: CategoryId) -> ListingRelations {
    ListingRelations {
        seller_id,
        category_id,
        brand_id: None,
        model_id: None,
    }
}

pub(crate) fn new_listing(slug: &str, status: ListingStatus, price_eur: PriceEur) -> Listing {
    Listing {
        slug: slug.to_owned(),
        title: format!("Truck {slug}"),
        description: "Fleet maintained".to_owned(),
        status,
        condition: Condition::Used,
        fuel_type: Some(FuelType::Diesel),
        transmission: None,
        emission_class: None,
        price_eur,
        year: Some(2019),
        mileage_km: Some(420_000),
        location: Location {
            country_code: country_code("DE"),
            city: None,
        },
        published_at: status.is_public().then_some(PUBLISHED_AT),
    }
}
