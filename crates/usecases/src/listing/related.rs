// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::ListingStatus;
use rigmart_core_api::listing::{
    projection::ListingSummary,
    search::{SortField, SortOrder},
};
use rigmart_repo::listing::{
    EntityRepo as ListingRepo, SearchRepo, SummaryCollector, search::Filter,
};

use super::*;

pub const RELATED_LISTINGS_LIMIT: u64 = 6;

const NEWEST_FIRST: SortOrder = SortOrder {
    field: SortField::Date,
    direction: SortDirection::Descending,
};

/// Active listings that are similar to the given public listing.
///
/// Listings of the same category and brand come first, remaining
/// slots are filled with other listings of the same category.
pub fn load_related<Repo>(repo: &mut Repo, slug: &str) -> Result<Vec<ListingSummary>>
where
    Repo: ListingRepo + SearchRepo,
{
    let id = repo.resolve_listing_id(slug)?;
    let record = repo.load_listing(id)?;
    if !record.listing.status.is_public() {
        return Err(RepoError::NotFound.into());
    }
    let base_filters = vec![
        Filter::Status(ListingStatus::Active),
        Filter::NotDeleted,
        Filter::CategoryIdIn(vec![record.relations.category_id]),
    ];
    let mut collector = SummaryCollector::default();
    if let Some(brand_id) = record.relations.brand_id {
        let mut filters = base_filters.clone();
        filters.push(Filter::BrandId(brand_id));
        filters.push(Filter::Not(Box::new(Filter::IdIn(vec![id]))));
        let pagination = Pagination {
            limit: Some(RELATED_LISTINGS_LIMIT),
            offset: None,
        };
        repo.search_listings(
            &Filter::All(filters),
            &[NEWEST_FIRST],
            &pagination,
            &mut collector,
        )?;
    }
    let remaining = RELATED_LISTINGS_LIMIT.saturating_sub(collector.len() as u64);
    if remaining > 0 {
        let excluded_ids = std::iter::once(id).chain(collector.ids()).collect();
        let mut filters = base_filters;
        filters.push(Filter::Not(Box::new(Filter::IdIn(excluded_ids))));
        let pagination = Pagination {
            limit: Some(remaining),
            offset: None,
        };
        repo.search_listings(
            &Filter::All(filters),
            &[NEWEST_FIRST],
            &pagination,
            &mut collector,
        )?;
    }
    Ok(collector.finish())
}
