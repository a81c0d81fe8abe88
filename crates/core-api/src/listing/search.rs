// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::listing::{
    Condition, CountryCode, EmissionClass, FuelType, ListingStatus, MileageKm, ModelYear,
    PriceEur, Transmission,
};

use crate::{filtering::Range, sorting::SortDirection};

/// All facets a listing search may be constrained by.
///
/// Every field is optional. Absent fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub condition: Option<Condition>,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub emission_class: Option<EmissionClass>,
    pub country_code: Option<CountryCode>,
    pub price: Range<PriceEur>,
    pub year: Range<ModelYear>,
    pub mileage: Range<MileageKm>,
}

/// Which listings a search is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterScope {
    /// Only active listings that have not been deleted.
    #[default]
    Public,

    /// Moderation view with an optional status constraint.
    ///
    /// Deleted listings are excluded nevertheless.
    Admin { status: Option<ListingStatus> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Listings that match the free-text term best come first.
    Relevance,
    Price,
    Year,

    /// Publication date, falls back to the creation date.
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Sort keywords accepted from clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SortToken {
    Relevance,
    PriceAsc,
    PriceDesc,
    DateAsc,
    #[default]
    DateDesc,
    YearAsc,
    YearDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortContext {
    pub has_text_term: bool,
    pub text_search_available: bool,
}

impl SortToken {
    /// Unrecognized or absent tokens default to newest first.
    #[must_use]
    pub fn parse(token: Option<&str>) -> Self {
        token
            .and_then(|token| token.trim().parse().ok())
            .unwrap_or_default()
    }

    /// Map the token onto a concrete ordering.
    ///
    /// [`SortToken::Relevance`] requires both a free-text term and a
    /// text search capability, otherwise it degrades to [`SortToken::DateDesc`].
    #[must_use]
    pub const fn resolve(self, context: SortContext) -> SortOrder {
        #[allow(clippy::enum_glob_use)]
        use SortDirection::*;
        let (field, direction) = match self {
            Self::Relevance => {
                if context.has_text_term && context.text_search_available {
                    (SortField::Relevance, Descending)
                } else {
                    (SortField::Date, Descending)
                }
            }
            Self::PriceAsc => (SortField::Price, Ascending),
            Self::PriceDesc => (SortField::Price, Descending),
            Self::DateAsc => (SortField::Date, Ascending),
            Self::DateDesc => (SortField::Date, Descending),
            Self::YearAsc => (SortField::Year, Ascending),
            Self::YearDesc => (SortField::Year, Descending),
        };
        SortOrder { field, direction }
    }
}

/// Split a free-text query into lowercase terms.
#[must_use]
pub fn split_text_terms(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub criteria: FilterCriteria,
    pub text: Option<String>,
    pub sort: SortToken,
}

impl SearchParams {
    /// The free-text term if it contains anything but whitespace.
    #[must_use]
    pub fn text_term(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
