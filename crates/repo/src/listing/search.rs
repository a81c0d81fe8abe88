// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::listing::{
    Condition, CountryCode, EmissionClass, FuelType, ListingStatus, Transmission,
};

use super::RecordId;
use crate::{
    catalog::{BrandId, CategoryId, ModelId},
    prelude::*,
    seller::RecordId as SellerId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    PriceEur,
    Year,
    MileageKm,
}

pub type NumericFieldFilter = ScalarFieldFilter<NumericField, i64>;

/// Predicate tree over listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All(Vec<Filter>),
    Any(Vec<Filter>),
    Not(Box<Filter>),

    /// Matches no listing at all.
    Nothing,

    Status(ListingStatus),
    NotDeleted,
    IdIn(Vec<RecordId>),
    SellerId(SellerId),

    /// An empty set matches nothing.
    CategoryIdIn(Vec<CategoryId>),
    BrandId(BrandId),
    ModelId(ModelId),
    Condition(Condition),
    FuelType(FuelType),
    Transmission(Transmission),
    EmissionClass(EmissionClass),
    CountryCode(CountryCode),
    Numeric(NumericFieldFilter),

    /// All terms must occur in this order, either in the title
    /// or in the description (case-insensitive).
    Phrase(Vec<String>),
}

impl Filter {
    /// Whether every listing matched by this filter is also matched
    /// by `required`, i.e. the filter is a conjunction that contains it.
    #[must_use]
    pub fn requires(&self, required: &Filter) -> bool {
        if self == required {
            return true;
        }
        match self {
            Self::All(filters) => filters.iter().any(|filter| filter.requires(required)),
            _ => false,
        }
    }

    /// Terms of the first phrase filter found by a depth-first search
    /// that ignores negated subtrees.
    #[must_use]
    pub fn phrase_terms(&self) -> Option<&[String]> {
        match self {
            Self::Phrase(terms) => Some(terms),
            Self::All(filters) | Self::Any(filters) => {
                filters.iter().find_map(Self::phrase_terms)
            }
            _ => None,
        }
    }
}
