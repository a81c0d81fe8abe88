// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{
    Listing, ListingImage, ListingStatus, Location,
    listing::{MileageKm, ModelYear, PriceEur},
};
use rigmart_core_api::listing::projection::ListingSummary;
use rigmart_repo::{
    catalog::{BrandId, CategoryId, ModelId},
    listing::{ListingRecord, ListingRelations, RecordHeader},
};

use super::schema::*;
use crate::prelude::*;

#[derive(Debug, Clone, Queryable)]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) slug: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) status: String,
    pub(crate) seller_id: RowId,
    pub(crate) category_id: RowId,
    pub(crate) brand_id: Option<RowId>,
    pub(crate) model_id: Option<RowId>,
    pub(crate) vehicle_condition: String,
    pub(crate) fuel_type: Option<String>,
    pub(crate) transmission: Option<String>,
    pub(crate) emission_class: Option<String>,
    pub(crate) country_code: String,
    pub(crate) city: Option<String>,
    pub(crate) price_eur: PriceEur,
    pub(crate) model_year: Option<ModelYear>,
    pub(crate) mileage_km: Option<MileageKm>,
    pub(crate) view_count: i64,
    pub(crate) published_ms: Option<TimestampMillis>,
    pub(crate) deleted_ms: Option<TimestampMillis>,
}

impl QueryableRecord {
    pub(crate) fn is_deleted(&self) -> bool {
        self.deleted_ms.is_some()
    }

    /// The cover is the image with the lowest position.
    pub(crate) fn into_summary(
        self,
        cover_image: Option<ListingImage>,
        image_count: u64,
    ) -> anyhow::Result<ListingSummary> {
        let ListingRecord {
            header,
            relations: _,
            listing,
            view_count,
        } = self.try_into()?;
        let Listing {
            slug,
            title,
            description: _,
            status,
            condition,
            fuel_type,
            transmission: _,
            emission_class: _,
            price_eur,
            year,
            mileage_km,
            location,
            published_at,
        } = listing;
        Ok(ListingSummary {
            id: header.id.to_inner(),
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
        })
    }
}

impl TryFrom<QueryableRecord> for ListingRecord {
    type Error = anyhow::Error;

    fn try_from(from: QueryableRecord) -> anyhow::Result<Self> {
        let QueryableRecord {
            row_id,
            row_created_ms,
            row_updated_ms,
            slug,
            title,
            description,
            status,
            seller_id,
            category_id,
            brand_id,
            model_id,
            vehicle_condition,
            fuel_type,
            transmission,
            emission_class,
            country_code,
            city,
            price_eur,
            model_year,
            mileage_km,
            view_count,
            published_ms,
            deleted_ms: _,
        } = from;
        let header = RecordHeader {
            id: row_id.into(),
            created_at: timestamp_from_sql(row_created_ms),
            updated_at: timestamp_from_sql(row_updated_ms),
        };
        let relations = ListingRelations {
            seller_id: seller_id.into(),
            category_id: CategoryId::new(category_id),
            brand_id: brand_id.map(BrandId::new),
            model_id: model_id.map(ModelId::new),
        };
        let listing = Listing {
            slug,
            title,
            description,
            status: decode_enum::<ListingStatus>("status", &status)?,
            condition: decode_enum("vehicle_condition", &vehicle_condition)?,
            fuel_type: decode_enum_opt("fuel_type", fuel_type.as_deref())?,
            transmission: decode_enum_opt("transmission", transmission.as_deref())?,
            emission_class: decode_enum_opt("emission_class", emission_class.as_deref())?,
            price_eur,
            year: model_year,
            mileage_km,
            location: Location {
                country_code: decode_country_code(&country_code)?,
                city,
            },
            published_at: published_ms.map(timestamp_from_sql),
        };
        Ok(Self {
            header,
            relations,
            listing,
            view_count: view_count.max(0) as u64,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = listing)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) slug: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: &'a str,
    pub(crate) status: &'static str,
    pub(crate) seller_id: RowId,
    pub(crate) category_id: RowId,
    pub(crate) brand_id: Option<RowId>,
    pub(crate) model_id: Option<RowId>,
    pub(crate) vehicle_condition: &'static str,
    pub(crate) fuel_type: Option<&'static str>,
    pub(crate) transmission: Option<&'static str>,
    pub(crate) emission_class: Option<&'static str>,
    pub(crate) country_code: &'a str,
    pub(crate) city: Option<&'a str>,
    pub(crate) price_eur: PriceEur,
    pub(crate) model_year: Option<ModelYear>,
    pub(crate) mileage_km: Option<MileageKm>,
    pub(crate) view_count: i64,
    pub(crate) published_ms: Option<TimestampMillis>,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(
        created_at: UtcDateTimeMs,
        relations: &ListingRelations,
        listing: &'a Listing,
    ) -> Self {
        let row_created_updated_ms = timestamp_to_sql(created_at);
        let UpdatableRecord {
            row_updated_ms: _,
            slug,
            title,
            description,
            status,
            seller_id,
            category_id,
            brand_id,
            model_id,
            vehicle_condition,
            fuel_type,
            transmission,
            emission_class,
            country_code,
            city,
            price_eur,
            model_year,
            mileage_km,
            published_ms,
        } = UpdatableRecord::bind(created_at, relations, listing);
        Self {
            row_created_ms: row_created_updated_ms,
            row_updated_ms: row_created_updated_ms,
            slug,
            title,
            description,
            status,
            seller_id,
            category_id,
            brand_id,
            model_id,
            vehicle_condition,
            fuel_type,
            transmission,
            emission_class,
            country_code,
            city,
            price_eur,
            model_year,
            mileage_km,
            view_count: 0,
            published_ms,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = listing, treat_none_as_null = true)]
pub(crate) struct UpdatableRecord<'a> {
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) slug: &'a str,
    pub(crate) title: &'a str,
    pub(crate) description: &'a str,
    pub(crate) status: &'static str,
    pub(crate) seller_id: RowId,
    pub(crate) category_id: RowId,
    pub(crate) brand_id: Option<RowId>,
    pub(crate) model_id: Option<RowId>,
    pub(crate) vehicle_condition: &'static str,
    pub(crate) fuel_type: Option<&'static str>,
    pub(crate) transmission: Option<&'static str>,
    pub(crate) emission_class: Option<&'static str>,
    pub(crate) country_code: &'a str,
    pub(crate) city: Option<&'a str>,
    pub(crate) price_eur: PriceEur,
    pub(crate) model_year: Option<ModelYear>,
    pub(crate) mileage_km: Option<MileageKm>,
    pub(crate) published_ms: Option<TimestampMillis>,
}

impl<'a> UpdatableRecord<'a> {
    pub(crate) fn bind(
        updated_at: UtcDateTimeMs,
        relations: &ListingRelations,
        listing: &'a Listing,
    ) -> Self {
        let ListingRelations {
            seller_id,
            category_id,
            brand_id,
            model_id,
        } = *relations;
        let Listing {
            slug,
            title,
            description,
            status,
            condition,
            fuel_type,
            transmission,
            emission_class,
            price_eur,
            year,
            mileage_km,
            location: Location { country_code, city },
            published_at,
        } = listing;
        Self {
            row_updated_ms: timestamp_to_sql(updated_at),
            slug,
            title,
            description,
            status: (*status).into(),
            seller_id: seller_id.to_inner(),
            category_id: category_id.to_inner(),
            brand_id: brand_id.map(BrandId::to_inner),
            model_id: model_id.map(ModelId::to_inner),
            vehicle_condition: (*condition).into(),
            fuel_type: fuel_type.map(Into::into),
            transmission: transmission.map(Into::into),
            emission_class: emission_class.map(Into::into),
            country_code: country_code.as_str(),
            city: city.as_deref(),
            price_eur: *price_eur,
            model_year: *year,
            mileage_km: *mileage_km,
            published_ms: published_at.map(timestamp_to_sql),
        }
    }
}
