// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::time::Instant;

use rigmart_core_api::{
    listing::{
        projection::ListingSummary,
        search::{FilterScope, SearchParams, SortContext, SortField, SortOrder, split_text_terms},
    },
    pagination::{PaginationState, PaginationSummary},
};
use rigmart_repo::{
    catalog::{BrandRepo, CategoryRepo, ModelRepo},
    listing::{SearchRepo, SummaryCollector, search::Filter},
};

use super::{filter::build_filter, *};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub summaries: Vec<ListingSummary>,
    pub pagination: PaginationSummary,
}

/// Count and fetch a single page of listings.
pub fn search_filtered<Repo>(
    repo: &mut Repo,
    filter: &Filter,
    ordering: &[SortOrder],
    pagination: PaginationState,
) -> RepoResult<SearchResults>
where
    Repo: SearchRepo,
{
    let started = Instant::now();
    let total = repo.count_listings(filter)?;
    let mut collector = SummaryCollector::default();
    if total > pagination.skip {
        repo.search_listings(filter, ordering, &pagination.to_pagination(), &mut collector)?;
    }
    log::debug!(
        "Search returned {count} of {total} listings and took {elapsed_ms} ms",
        count = collector.len(),
        elapsed_ms = (started.elapsed().as_micros() / 1000) as f64,
    );
    Ok(SearchResults {
        summaries: collector.finish(),
        pagination: pagination.summarize(total),
    })
}

pub fn search<Repo>(
    repo: &mut Repo,
    params: &SearchParams,
    scope: FilterScope,
    pagination: PaginationState,
    text_search_available: bool,
) -> Result<SearchResults>
where
    Repo: CategoryRepo + BrandRepo + ModelRepo + SearchRepo,
{
    let text_terms = params.text_term().map(split_text_terms).unwrap_or_default();
    let filter = build_filter(repo, &params.criteria, scope, &text_terms)?;
    let order = params.sort.resolve(SortContext {
        has_text_term: !text_terms.is_empty(),
        text_search_available,
    });
    search_filtered(repo, &filter, &[order], pagination).map_err(Into::into)
}

/// All listings of the caller's seller profile that have not been
/// deleted, newest first.
pub fn search_own<Repo>(
    repo: &mut Repo,
    caller: &Caller,
    pagination: PaginationState,
) -> Result<SearchResults>
where
    Repo: SellerRepo + SearchRepo,
{
    let seller_id = resolve_caller_seller_id(repo, caller)?;
    let filter = Filter::All(vec![Filter::SellerId(seller_id), Filter::NotDeleted]);
    let order = SortOrder {
        field: SortField::Date,
        direction: SortDirection::Descending,
    };
    search_filtered(repo, &filter, &[order], pagination).map_err(Into::into)
}
