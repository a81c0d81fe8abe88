// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::ListingStatus;
use rigmart_core_api::{
    filtering::Range,
    listing::search::{FilterCriteria, FilterScope},
};
use rigmart_repo::{
    catalog::{BrandRepo, CategoryRepo, ModelRepo},
    listing::search::{Filter, NumericField, NumericFieldFilter},
    prelude::*,
};

/// Constraints that are implied by the scope, independent of any
/// caller-supplied criteria.
#[must_use]
pub fn scope_filters(scope: FilterScope) -> Vec<Filter> {
    match scope {
        FilterScope::Public => vec![Filter::Status(ListingStatus::Active), Filter::NotDeleted],
        FilterScope::Admin { status } => status
            .map(Filter::Status)
            .into_iter()
            .chain(std::iter::once(Filter::NotDeleted))
            .collect(),
    }
}

fn match_nothing(mut filters: Vec<Filter>) -> Filter {
    filters.push(Filter::Nothing);
    Filter::All(filters)
}

fn push_range_filters<V>(filters: &mut Vec<Filter>, field: NumericField, range: &Range<V>) -> bool
where
    V: PartialOrd + Copy + Into<i64>,
{
    if range.is_inverted() {
        return false;
    }
    filters.extend(range.predicates().map(|predicate| {
        Filter::Numeric(NumericFieldFilter {
            field,
            predicate: predicate.map(Into::into),
        })
    }));
    true
}

/// Build the predicate tree for a listing search.
///
/// The result is always a conjunction that starts with the constraints
/// of the scope. Criteria that cannot match anything, i.e. unknown slugs
/// and inverted ranges, add [`Filter::Nothing`] instead of being ignored.
pub fn build_filter<Repo>(
    repo: &mut Repo,
    criteria: &FilterCriteria,
    scope: FilterScope,
    text_terms: &[String],
) -> RepoResult<Filter>
where
    Repo: CategoryRepo + BrandRepo + ModelRepo,
{
    let FilterCriteria {
        category,
        brand,
        model,
        condition,
        fuel_type,
        transmission,
        emission_class,
        country_code,
        price,
        year,
        mileage,
    } = criteria;
    let mut filters = scope_filters(scope);
    if let Some(slug) = category {
        let Some(category_id) = repo.resolve_category_id(slug).optional()? else {
            log::debug!("Unknown category: {slug}");
            return Ok(match_nothing(filters));
        };
        let mut category_ids = vec![category_id];
        category_ids.extend(repo.load_active_child_category_ids(category_id)?);
        filters.push(Filter::CategoryIdIn(category_ids));
    }
    if let Some(slug) = brand {
        let Some(brand_id) = repo.resolve_brand_id(slug).optional()? else {
            log::debug!("Unknown brand: {slug}");
            return Ok(match_nothing(filters));
        };
        filters.push(Filter::BrandId(brand_id));
    }
    if let Some(slug) = model {
        let Some((_, model_id)) = repo.resolve_model_id(slug).optional()? else {
            log::debug!("Unknown model: {slug}");
            return Ok(match_nothing(filters));
        };
        filters.push(Filter::ModelId(model_id));
    }
    filters.extend(condition.map(Filter::Condition));
    filters.extend(fuel_type.map(Filter::FuelType));
    filters.extend(transmission.map(Filter::Transmission));
    filters.extend(emission_class.map(Filter::EmissionClass));
    filters.extend(country_code.clone().map(Filter::CountryCode));
    if !(push_range_filters(&mut filters, NumericField::PriceEur, price)
        && push_range_filters(&mut filters, NumericField::Year, year)
        && push_range_filters(&mut filters, NumericField::MileageKm, mileage))
    {
        log::debug!("Inverted range: price = {price:?}, year = {year:?}, mileage = {mileage:?}");
        return Ok(match_nothing(filters));
    }
    if !text_terms.is_empty() {
        filters.push(Filter::Phrase(text_terms.to_vec()));
    }
    Ok(Filter::All(filters))
}
