// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashMap;

use diesel::dsl::{count_star, min};
use rigmart_core::{Brand, Listing, ListingImage, ListingStatus, Model};
use rigmart_core_api::listing::{
    projection::{ListingDetail, ListingSummary, SellerSummary},
    search::SortOrder,
};
use rigmart_repo::{
    catalog::{BrandId, CategoryRepo as _, ModelId},
    listing::{search::Filter, *},
    seller::EntityRepo as _,
};

use crate::{
    db::{
        brand::{models as brand_models, schema::*},
        listing::{models::*, schema::*},
        listing_image::{models as image_models, schema::*},
        vehicle_model::{models as vehicle_model_models, schema::*},
    },
    prelude::*,
};

mod search;

use self::search::{
    ListingSearchExpressionBoxedBuilder as _, ListingSearchQueryTransform as _, RelevanceOrder,
};

impl crate::Connection<'_> {
    fn load_listing_record(&mut self, id: RecordId) -> RepoResult<QueryableRecord> {
        listing::table
            .filter(listing::row_id.eq(RowId::from(id)))
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
    }

    /// Images grouped by listing and ordered by position.
    fn load_listing_images(
        &mut self,
        listing_ids: &[RowId],
    ) -> RepoResult<HashMap<RowId, Vec<ListingImage>>> {
        if listing_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let records = listing_image::table
            .filter(listing_image::listing_id.eq_any(listing_ids))
            .order_by((
                listing_image::listing_id,
                listing_image::position,
                listing_image::row_id,
            ))
            .load::<image_models::QueryableRecord>(self.as_mut())
            .map_err(repo_error)?;
        let mut images = HashMap::<RowId, Vec<ListingImage>>::with_capacity(listing_ids.len());
        for record in records {
            let (listing_id, image) = record.into();
            images.entry(listing_id).or_default().push(image);
        }
        Ok(images)
    }

    /// The cover image and the total number of images per listing.
    ///
    /// Only loads the images with the lowest position of each listing.
    fn load_listing_covers(
        &mut self,
        listing_ids: &[RowId],
    ) -> RepoResult<HashMap<RowId, (Option<ListingImage>, u64)>> {
        if listing_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let stats = listing_image::table
            .filter(listing_image::listing_id.eq_any(listing_ids))
            .group_by(listing_image::listing_id)
            .select((
                listing_image::listing_id,
                min(listing_image::position),
                count_star(),
            ))
            .load::<(RowId, Option<i32>, i64)>(self.as_mut())
            .map_err(repo_error)?;
        let mut cover_positions: Vec<i32> = stats
            .iter()
            .filter_map(|(_, position, _)| *position)
            .collect();
        cover_positions.sort_unstable();
        cover_positions.dedup();
        let mut covers: HashMap<RowId, (Option<ListingImage>, u64)> = stats
            .iter()
            .map(|(listing_id, _, count)| (*listing_id, (None, (*count).max(0) as u64)))
            .collect();
        if cover_positions.is_empty() {
            return Ok(covers);
        }
        let min_positions: HashMap<RowId, i32> = stats
            .into_iter()
            .filter_map(|(listing_id, position, _)| position.map(|position| (listing_id, position)))
            .collect();
        let candidates = listing_image::table
            .filter(listing_image::listing_id.eq_any(listing_ids))
            .filter(listing_image::position.eq_any(cover_positions))
            .order_by((
                listing_image::listing_id,
                listing_image::position,
                listing_image::row_id,
            ))
            .load::<image_models::QueryableRecord>(self.as_mut())
            .map_err(repo_error)?;
        for record in candidates {
            let (listing_id, image) = record.into();
            if min_positions.get(&listing_id) != Some(&image.position) {
                continue;
            }
            if let Some((cover, _)) = covers.get_mut(&listing_id) {
                cover.get_or_insert(image);
            }
        }
        Ok(covers)
    }
}

impl EntityRepo for crate::Connection<'_> {
    fn resolve_listing_id(&mut self, slug: &str) -> RepoResult<RecordId> {
        listing::table
            .select(listing::row_id)
            .filter(listing::slug.eq(slug))
            .filter(listing::deleted_ms.is_null())
            .first::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn load_listing(&mut self, id: RecordId) -> RepoResult<ListingRecord> {
        let record = self.load_listing_record(id)?;
        record.try_into().map_err(Into::into)
    }

    fn load_listing_detail(&mut self, id: RecordId) -> RepoResult<ListingDetail> {
        let record = self.load_listing_record(id)?;
        if record.is_deleted() {
            return Err(RepoError::NotFound);
        }
        let row_id = record.row_id;
        let images = self
            .load_listing_images(&[row_id])?
            .remove(&row_id)
            .unwrap_or_default();
        let summary = record
            .clone()
            .into_summary(images.first().cloned(), images.len() as u64)?;
        let ListingRecord {
            relations, listing, ..
        } = record.try_into()?;
        let category = self.load_category(relations.category_id)?;
        let brand = relations
            .brand_id
            .map(|brand_id| {
                brand::table
                    .filter(brand::row_id.eq(brand_id.to_inner()))
                    .first::<brand_models::QueryableRecord>(self.as_mut())
                    .map_err(repo_error)
                    .map(|record| {
                        let (_, brand): (BrandId, Brand) = record.into();
                        brand
                    })
            })
            .transpose()?;
        let model = relations
            .model_id
            .map(|model_id| {
                vehicle_model::table
                    .filter(vehicle_model::row_id.eq(model_id.to_inner()))
                    .first::<vehicle_model_models::QueryableRecord>(self.as_mut())
                    .map_err(repo_error)
                    .map(|record| {
                        let (_, model): (ModelId, Model) = record.into();
                        model
                    })
            })
            .transpose()?;
        let (_, seller) = self.load_seller(relations.seller_id)?;
        Ok(ListingDetail {
            summary,
            description: listing.description,
            transmission: listing.transmission,
            emission_class: listing.emission_class,
            images,
            category,
            brand,
            model,
            seller: SellerSummary {
                user_uid: seller.user_uid,
                display_name: seller.display_name,
                company_name: seller.company_name,
                country_code: seller.country_code,
            },
        })
    }

    fn insert_listing(
        &mut self,
        created_at: UtcDateTimeMs,
        relations: &ListingRelations,
        listing: &Listing,
    ) -> RepoResult<RecordId> {
        let insertable = InsertableRecord::bind(created_at, relations, listing);
        diesel::insert_into(listing::table)
            .values(&insertable)
            .returning(listing::row_id)
            .get_result::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn update_listing(
        &mut self,
        id: RecordId,
        updated_at: UtcDateTimeMs,
        relations: &ListingRelations,
        listing: &Listing,
    ) -> RepoResult<()> {
        let updatable = UpdatableRecord::bind(updated_at, relations, listing);
        let target = listing::table
            .filter(listing::row_id.eq(RowId::from(id)))
            .filter(listing::deleted_ms.is_null());
        let query = diesel::update(target).set(&updatable);
        let rows_affected: usize = query.execute(self.as_mut()).map_err(repo_error)?;
        debug_assert!(rows_affected <= 1);
        if rows_affected < 1 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    fn update_listing_status(
        &mut self,
        id: RecordId,
        updated_at: UtcDateTimeMs,
        status: ListingStatus,
        published_at: Option<UtcDateTimeMs>,
    ) -> RepoResult<()> {
        let status: &'static str = status.into();
        let target = listing::table
            .filter(listing::row_id.eq(RowId::from(id)))
            .filter(listing::deleted_ms.is_null());
        let row_updated_ms = timestamp_to_sql(updated_at);
        let rows_affected: usize = if let Some(published_at) = published_at {
            diesel::update(target)
                .set((
                    listing::row_updated_ms.eq(row_updated_ms),
                    listing::status.eq(status),
                    listing::published_ms.eq(Some(timestamp_to_sql(published_at))),
                ))
                .execute(self.as_mut())
        } else {
            diesel::update(target)
                .set((
                    listing::row_updated_ms.eq(row_updated_ms),
                    listing::status.eq(status),
                ))
                .execute(self.as_mut())
        }
        .map_err(repo_error)?;
        debug_assert!(rows_affected <= 1);
        if rows_affected < 1 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    fn mark_listing_deleted(
        &mut self,
        id: RecordId,
        deleted_at: UtcDateTimeMs,
    ) -> RepoResult<()> {
        let deleted_ms = timestamp_to_sql(deleted_at);
        let target = listing::table
            .filter(listing::row_id.eq(RowId::from(id)))
            .filter(listing::deleted_ms.is_null());
        let rows_affected: usize = diesel::update(target)
            .set((
                listing::row_updated_ms.eq(deleted_ms),
                listing::deleted_ms.eq(Some(deleted_ms)),
            ))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert!(rows_affected <= 1);
        if rows_affected < 1 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    fn increment_listing_view_count(&mut self, id: RecordId) -> RepoResult<()> {
        let target = listing::table.filter(listing::row_id.eq(RowId::from(id)));
        let rows_affected: usize = diesel::update(target)
            .set(listing::view_count.eq(listing::view_count + 1))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert!(rows_affected <= 1);
        if rows_affected < 1 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    fn replace_listing_images(
        &mut self,
        id: RecordId,
        images: &[ListingImage],
    ) -> RepoResult<()> {
        let listing_id = RowId::from(id);
        diesel::delete(listing_image::table.filter(listing_image::listing_id.eq(listing_id)))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        if images.is_empty() {
            return Ok(());
        }
        let insertables: Vec<_> = images
            .iter()
            .map(|image| image_models::InsertableRecord::bind(listing_id, image))
            .collect();
        let rows_affected = diesel::insert_into(listing_image::table)
            .values(&insertables)
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert_eq!(images.len(), rows_affected);
        Ok(())
    }
}

impl SearchRepo for crate::Connection<'_> {
    fn count_listings(&mut self, filter: &Filter) -> RepoResult<u64> {
        listing::table
            .select(count_star())
            .into_boxed()
            .filter(filter.build_expression())
            .first::<i64>(self.as_mut())
            .map_err(repo_error)
            .map(|count| count.max(0) as u64)
    }

    fn search_listings(
        &mut self,
        filter: &Filter,
        ordering: &[SortOrder],
        pagination: &Pagination,
        collector: &mut dyn ReservableRecordCollector<
            Header = RecordHeader,
            Record = ListingSummary,
        >,
    ) -> RepoResult<usize> {
        let mut query = listing::table
            .into_boxed()
            .filter(filter.build_expression());
        let phrase_terms = filter.phrase_terms();
        for order in ordering {
            query = RelevanceOrder {
                order: *order,
                phrase_terms,
            }
            .apply_to_query(query);
        }
        // Finally order by row id in the direction of the primary
        // order for a stable order across pages
        let direction = ordering
            .first()
            .map_or(SortDirection::Descending, |order| order.direction);
        query = match direction {
            SortDirection::Ascending => query.then_order_by(listing::row_id.asc()),
            SortDirection::Descending => query.then_order_by(listing::row_id.desc()),
        };
        query = apply_pagination(query, pagination);

        let records = query
            .load::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)?;
        let listing_ids: Vec<_> = records.iter().map(|record| record.row_id).collect();
        let mut covers = self.load_listing_covers(&listing_ids)?;
        let count = records.len();
        collector.reserve(count);
        for record in records {
            let header = RecordHeader {
                id: record.row_id.into(),
                created_at: timestamp_from_sql(record.row_created_ms),
                updated_at: timestamp_from_sql(record.row_updated_ms),
            };
            let (cover_image, image_count) =
                covers.remove(&record.row_id).unwrap_or_default();
            let summary = record.into_summary(cover_image, image_count)?;
            collector.collect(header, summary);
        }
        Ok(count)
    }
}
