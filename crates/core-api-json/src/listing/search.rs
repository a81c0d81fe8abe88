// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::str::FromStr;

use anyhow::anyhow;
use rigmart_core::listing::{CountryCode, ListingStatus};

use crate::{pagination::PaginationParams, prelude::*};

mod _inner {
    pub(super) use crate::_inner::{filtering::Range, listing::search::*};
}

/// Query parameters of listing searches.
///
/// All values are received as strings and validated on conversion.
/// Unknown parameters are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub condition: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub emission_class: Option<String>,
    pub country_code: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_year: Option<String>,
    pub max_year: Option<String>,
    pub min_mileage: Option<String>,
    pub max_mileage: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,

    /// Only considered for moderation searches.
    pub status: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_opt<T: FromStr>(name: &str, value: Option<String>) -> anyhow::Result<Option<T>> {
    non_blank(value)
        .map(|value| {
            value
                .parse()
                .map_err(|_| anyhow!("invalid value for {name}: {value}"))
        })
        .transpose()
}

fn parse_range<T: FromStr + PartialOrd + Copy>(
    name: &str,
    min: Option<String>,
    max: Option<String>,
) -> anyhow::Result<_inner::Range<T>> {
    let min = parse_opt(&format!("min{name}"), min)?;
    let max = parse_opt(&format!("max{name}"), max)?;
    Ok(_inner::Range::new(min, max))
}

impl SearchQueryParams {
    /// Validate the filter parameters.
    ///
    /// The status is parsed separately, see [`Self::parse_status`].
    pub fn try_into_search_params(self) -> anyhow::Result<_inner::SearchParams> {
        let Self {
            pagination: _,
            category,
            brand,
            model,
            condition,
            fuel_type,
            transmission,
            emission_class,
            country_code,
            min_price,
            max_price,
            min_year,
            max_year,
            min_mileage,
            max_mileage,
            q,
            sort,
            status: _,
        } = self;
        let country_code = non_blank(country_code)
            .map(|value| {
                CountryCode::parse(&value)
                    .ok_or_else(|| anyhow!("invalid value for countryCode: {value}"))
            })
            .transpose()?;
        let criteria = _inner::FilterCriteria {
            category: non_blank(category),
            brand: non_blank(brand),
            model: non_blank(model),
            condition: parse_opt("condition", condition)?,
            fuel_type: parse_opt("fuelType", fuel_type)?,
            transmission: parse_opt("transmission", transmission)?,
            emission_class: parse_opt("emissionClass", emission_class)?,
            country_code,
            price: parse_range("Price", min_price, max_price)?,
            year: parse_range("Year", min_year, max_year)?,
            mileage: parse_range("Mileage", min_mileage, max_mileage)?,
        };
        Ok(_inner::SearchParams {
            criteria,
            text: q,
            sort: _inner::SortToken::parse(sort.as_deref()),
        })
    }

    pub fn parse_status(&self) -> anyhow::Result<Option<ListingStatus>> {
        parse_opt("status", self.status.clone())
    }
}

#[cfg(test)]
mod tests {
    use rigmart_core::listing::{Condition, FuelType};

    use super::*;

    fn params(query: &[(&str, &str)]) -> SearchQueryParams {
        let value = serde_json::Value::Object(
            query
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).into()))
                .collect(),
        );
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn absent_parameters_do_not_constrain() {
        let search_params = params(&[]).try_into_search_params().unwrap();
        assert_eq!(_inner::SearchParams::default(), search_params);
    }

    #[test]
    fn parse_facets_and_ranges() {
        let search_params = params(&[
            ("category", "trucks"),
            ("condition", "used"),
            ("fuelType", "DIESEL"),
            ("countryCode", "de"),
            ("minPrice", "10000"),
            ("maxYear", "2020"),
            ("sort", "price_asc"),
            ("page", "2"),
            ("unknown", "ignored"),
        ])
        .try_into_search_params()
        .unwrap();
        let criteria = &search_params.criteria;
        assert_eq!(Some("trucks"), criteria.category.as_deref());
        assert_eq!(Some(Condition::Used), criteria.condition);
        assert_eq!(Some(FuelType::Diesel), criteria.fuel_type);
        assert_eq!(Some("DE"), criteria.country_code.as_ref().map(CountryCode::as_str));
        assert_eq!(_inner::Range::new(Some(10_000), None), criteria.price);
        assert_eq!(_inner::Range::new(None, Some(2020)), criteria.year);
        assert_eq!(_inner::SortToken::PriceAsc, search_params.sort);
    }

    #[test]
    fn blank_values_are_absent() {
        let search_params = params(&[("brand", "  "), ("minPrice", "")])
            .try_into_search_params()
            .unwrap();
        assert_eq!(None, search_params.criteria.brand);
        assert!(search_params.criteria.price.is_unbounded());
    }

    #[test]
    fn reject_malformed_values() {
        assert!(params(&[("minPrice", "cheap")]).try_into_search_params().is_err());
        assert!(params(&[("condition", "MINT")]).try_into_search_params().is_err());
        assert!(params(&[("countryCode", "DEU")]).try_into_search_params().is_err());
        assert!(params(&[("status", "GONE")]).parse_status().is_err());
    }

    #[test]
    fn parse_status() {
        assert_eq!(
            Some(ListingStatus::Draft),
            params(&[("status", "draft")]).parse_status().unwrap()
        );
        assert_eq!(None, params(&[]).parse_status().unwrap());
    }
}
