// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::{BoolExpressionMethods, BoxableExpression, ExpressionMethods, sql_types};
use rigmart_core::listing::ModelYear;
use rigmart_core_api::listing::search::{SortField, SortOrder};
use rigmart_repo::listing::search::{Filter, NumericField, NumericFieldFilter};

use crate::{db::listing::schema::*, prelude::*};

define_sql_function! { fn ifnull<ST: sql_types::SingleValue>(x: sql_types::Nullable<ST>, y: ST) -> ST; }

type ListingSearchExpressionBoxed<'db> =
    Box<dyn BoxableExpression<listing::table, DbBackend, SqlType = sql_types::Bool> + 'db>;

fn dummy_true_expression() -> ListingSearchExpressionBoxed<'static> {
    Box::new(listing::row_id.is_not_null()) // always true
}

fn dummy_false_expression() -> ListingSearchExpressionBoxed<'static> {
    Box::new(listing::row_id.is_null()) // always false
}

pub(crate) trait ListingSearchExpressionBoxedBuilder {
    fn build_expression(&self) -> ListingSearchExpressionBoxed<'_>;
}

pub(crate) trait ListingSearchQueryTransform<'db> {
    fn apply_to_query(
        &self,
        query: listing::BoxedQuery<'db, DbBackend>,
    ) -> listing::BoxedQuery<'db, DbBackend>;
}

/// Relevance is approximated by matching the phrase against the title.
///
/// Listings that only match in the description come after those that
/// match in the title. Ties are broken by the publication date.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RelevanceOrder<'a> {
    pub(crate) order: SortOrder,
    pub(crate) phrase_terms: Option<&'a [String]>,
}

impl<'db> ListingSearchQueryTransform<'db> for RelevanceOrder<'_> {
    fn apply_to_query(
        &self,
        query: listing::BoxedQuery<'db, DbBackend>,
    ) -> listing::BoxedQuery<'db, DbBackend> {
        let Self {
            order,
            phrase_terms,
        } = *self;
        if order.field != SortField::Relevance {
            return order.apply_to_query(query);
        }
        let like_expr = phrase_terms
            .and_then(|terms| build_phrase_like_expr_escaped(terms.iter().map(String::as_str)));
        let query = if let Some(like_expr) = like_expr {
            query.then_order_by(
                listing::title
                    .like(like_expr)
                    .escape(LIKE_ESCAPE_CHARACTER)
                    .desc(),
            )
        } else {
            query
        };
        query.then_order_by(ifnull(listing::published_ms, listing::row_created_ms).desc())
    }
}

impl<'db> ListingSearchQueryTransform<'db> for SortOrder {
    fn apply_to_query(
        &self,
        query: listing::BoxedQuery<'db, DbBackend>,
    ) -> listing::BoxedQuery<'db, DbBackend> {
        let direction = self.direction;
        match self.field {
            SortField::Price => match direction {
                SortDirection::Ascending => query.then_order_by(listing::price_eur.asc()),
                SortDirection::Descending => query.then_order_by(listing::price_eur.desc()),
            },
            SortField::Year => {
                // Listings without a model year always come last
                let query = query.then_order_by(listing::model_year.is_null());
                match direction {
                    SortDirection::Ascending => query.then_order_by(listing::model_year.asc()),
                    SortDirection::Descending => query.then_order_by(listing::model_year.desc()),
                }
            }
            SortField::Date | SortField::Relevance => {
                let published_or_created_ms =
                    ifnull(listing::published_ms, listing::row_created_ms);
                match direction {
                    SortDirection::Ascending => query.then_order_by(published_or_created_ms.asc()),
                    SortDirection::Descending => {
                        query.then_order_by(published_or_created_ms.desc())
                    }
                }
            }
        }
    }
}

fn clamp_model_year(value: i64) -> ModelYear {
    value.clamp(ModelYear::MIN.into(), ModelYear::MAX.into()) as ModelYear
}

fn build_numeric_filter_expression(
    filter: &NumericFieldFilter,
) -> ListingSearchExpressionBoxed<'static> {
    let NumericFieldFilter { field, predicate } = *filter;
    match field {
        NumericField::PriceEur => {
            let column = listing::price_eur;
            match predicate {
                ScalarPredicate::LessThan(value) => Box::new(column.lt(value)),
                ScalarPredicate::LessOrEqual(value) => Box::new(column.le(value)),
                ScalarPredicate::GreaterThan(value) => Box::new(column.gt(value)),
                ScalarPredicate::GreaterOrEqual(value) => Box::new(column.ge(value)),
                ScalarPredicate::Equal(value) => Box::new(column.eq(value)),
            }
        }
        NumericField::Year => {
            let not_null = listing::model_year.is_not_null();
            let column = listing::model_year.assume_not_null();
            match predicate {
                ScalarPredicate::LessThan(value) => {
                    Box::new(not_null.and(column.lt(clamp_model_year(value))))
                }
                ScalarPredicate::LessOrEqual(value) => {
                    Box::new(not_null.and(column.le(clamp_model_year(value))))
                }
                ScalarPredicate::GreaterThan(value) => {
                    Box::new(not_null.and(column.gt(clamp_model_year(value))))
                }
                ScalarPredicate::GreaterOrEqual(value) => {
                    Box::new(not_null.and(column.ge(clamp_model_year(value))))
                }
                ScalarPredicate::Equal(value) => {
                    Box::new(not_null.and(column.eq(clamp_model_year(value))))
                }
            }
        }
        NumericField::MileageKm => {
            let not_null = listing::mileage_km.is_not_null();
            let column = listing::mileage_km.assume_not_null();
            match predicate {
                ScalarPredicate::LessThan(value) => Box::new(not_null.and(column.lt(value))),
                ScalarPredicate::LessOrEqual(value) => Box::new(not_null.and(column.le(value))),
                ScalarPredicate::GreaterThan(value) => Box::new(not_null.and(column.gt(value))),
                ScalarPredicate::GreaterOrEqual(value) => {
                    Box::new(not_null.and(column.ge(value)))
                }
                ScalarPredicate::Equal(value) => Box::new(not_null.and(column.eq(value))),
            }
        }
    }
}

fn build_phrase_filter_expression(terms: &[String]) -> ListingSearchExpressionBoxed<'static> {
    let Some(like_expr) = build_phrase_like_expr_escaped(terms.iter().map(String::as_str)) else {
        // Empty phrases match everything
        return dummy_true_expression();
    };
    Box::new(
        listing::title
            .like(like_expr.clone())
            .escape(LIKE_ESCAPE_CHARACTER)
            .or(listing::description
                .like(like_expr)
                .escape(LIKE_ESCAPE_CHARACTER)),
    )
}

impl ListingSearchExpressionBoxedBuilder for Filter {
    fn build_expression(&self) -> ListingSearchExpressionBoxed<'_> {
        match self {
            Self::All(filters) => filters
                .iter()
                .fold(dummy_true_expression(), |expr, filter| {
                    Box::new(expr.and(filter.build_expression()))
                }),
            Self::Any(filters) => filters
                .iter()
                .fold(dummy_false_expression(), |expr, filter| {
                    Box::new(expr.or(filter.build_expression()))
                }),
            Self::Not(filter) => Box::new(diesel::dsl::not(filter.build_expression())),
            Self::Nothing => dummy_false_expression(),
            Self::Status(status) => {
                let status: &'static str = (*status).into();
                Box::new(listing::status.eq(status))
            }
            Self::NotDeleted => Box::new(listing::deleted_ms.is_null()),
            Self::IdIn(ids) => {
                if ids.is_empty() {
                    return dummy_false_expression();
                }
                Box::new(
                    listing::row_id.eq_any(ids.iter().copied().map(RowId::from).collect::<Vec<_>>()),
                )
            }
            Self::SellerId(seller_id) => Box::new(listing::seller_id.eq(seller_id.to_inner())),
            Self::CategoryIdIn(category_ids) => {
                if category_ids.is_empty() {
                    return dummy_false_expression();
                }
                Box::new(
                    listing::category_id.eq_any(
                        category_ids
                            .iter()
                            .copied()
                            .map(RowId::from)
                            .collect::<Vec<_>>(),
                    ),
                )
            }
            Self::BrandId(brand_id) => Box::new(
                listing::brand_id
                    .is_not_null()
                    .and(listing::brand_id.assume_not_null().eq(brand_id.to_inner())),
            ),
            Self::ModelId(model_id) => Box::new(
                listing::model_id
                    .is_not_null()
                    .and(listing::model_id.assume_not_null().eq(model_id.to_inner())),
            ),
            Self::Condition(condition) => {
                let condition: &'static str = (*condition).into();
                Box::new(listing::vehicle_condition.eq(condition))
            }
            Self::FuelType(fuel_type) => {
                let fuel_type: &'static str = (*fuel_type).into();
                Box::new(
                    listing::fuel_type
                        .is_not_null()
                        .and(listing::fuel_type.assume_not_null().eq(fuel_type)),
                )
            }
            Self::Transmission(transmission) => {
                let transmission: &'static str = (*transmission).into();
                Box::new(
                    listing::transmission
                        .is_not_null()
                        .and(listing::transmission.assume_not_null().eq(transmission)),
                )
            }
            Self::EmissionClass(emission_class) => {
                let emission_class: &'static str = (*emission_class).into();
                Box::new(
                    listing::emission_class
                        .is_not_null()
                        .and(listing::emission_class.assume_not_null().eq(emission_class)),
                )
            }
            Self::CountryCode(country_code) => {
                Box::new(listing::country_code.eq(country_code.as_str()))
            }
            Self::Numeric(filter) => build_numeric_filter_expression(filter),
            Self::Phrase(terms) => build_phrase_filter_expression(terms),
        }
    }
}
