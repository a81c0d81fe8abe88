// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{
    Listing, ListingImage, ListingStatus,
    listing::ViewCount,
    util::clock::UtcDateTimeMs,
};
use rigmart_core_api::listing::{
    projection::{ListingDetail, ListingSummary},
    search::SortOrder,
};

use crate::{
    catalog::{BrandId, CategoryId, ModelId},
    prelude::*,
    seller::RecordId as SellerId,
};

pub mod search;

use self::search::Filter;

record_id_newtype!(RecordId);

pub type RecordHeader = crate::RecordHeader<RecordId>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingRelations {
    pub seller_id: SellerId,
    pub category_id: CategoryId,
    pub brand_id: Option<BrandId>,
    pub model_id: Option<ModelId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub header: RecordHeader,
    pub relations: ListingRelations,
    pub listing: Listing,
    pub view_count: ViewCount,
}

pub trait EntityRepo {
    /// Deleted listings are not found.
    fn resolve_listing_id(&mut self, slug: &str) -> RepoResult<RecordId>;

    fn load_listing(&mut self, id: RecordId) -> RepoResult<ListingRecord>;

    fn load_listing_detail(&mut self, id: RecordId) -> RepoResult<ListingDetail>;

    fn insert_listing(
        &mut self,
        created_at: UtcDateTimeMs,
        relations: &ListingRelations,
        listing: &Listing,
    ) -> RepoResult<RecordId>;

    fn update_listing(
        &mut self,
        id: RecordId,
        updated_at: UtcDateTimeMs,
        relations: &ListingRelations,
        listing: &Listing,
    ) -> RepoResult<()>;

    fn update_listing_status(
        &mut self,
        id: RecordId,
        updated_at: UtcDateTimeMs,
        status: ListingStatus,
        published_at: Option<UtcDateTimeMs>,
    ) -> RepoResult<()>;

    /// Soft delete
    fn mark_listing_deleted(&mut self, id: RecordId, deleted_at: UtcDateTimeMs)
    -> RepoResult<()>;

    /// Atomically increment the view counter by one.
    fn increment_listing_view_count(&mut self, id: RecordId) -> RepoResult<()>;

    fn replace_listing_images(&mut self, id: RecordId, images: &[ListingImage])
    -> RepoResult<()>;
}

pub trait SearchRepo {
    fn count_listings(&mut self, filter: &Filter) -> RepoResult<u64>;

    /// Returns the number of collected summaries.
    ///
    /// The row id serves as tie breaker for a stable order across pages.
    fn search_listings(
        &mut self,
        filter: &Filter,
        ordering: &[SortOrder],
        pagination: &Pagination,
        collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = ListingSummary>,
    ) -> RepoResult<usize>;
}

#[derive(Debug, Default)]
pub struct SummaryCollector(Vec<ListingSummary>);

impl SummaryCollector {
    #[must_use]
    pub const fn new(inner: Vec<ListingSummary>) -> Self {
        Self(inner)
    }

    #[must_use]
    pub fn finish(self) -> Vec<ListingSummary> {
        let Self(inner) = self;
        inner
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.0.iter().map(|summary| RecordId::new(summary.id))
    }
}

impl RecordCollector for SummaryCollector {
    type Header = RecordHeader;
    type Record = ListingSummary;

    fn collect(&mut self, _header: RecordHeader, record: ListingSummary) {
        let Self(inner) = self;
        inner.push(record);
    }
}

impl ReservableRecordCollector for SummaryCollector {
    fn reserve(&mut self, additional: usize) {
        let Self(inner) = self;
        inner.reserve(additional);
    }
}
