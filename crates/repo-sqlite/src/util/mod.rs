// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::str::FromStr;

use diesel::query_dsl::methods::{LimitDsl, OffsetDsl};

use rigmart_core::util::clock::{TimestampMillis, UtcDateTimeMs};

use crate::prelude::*;

pub(crate) fn apply_pagination<Q>(source: Q, pagination: &Pagination) -> Q
where
    Q: LimitDsl<Output = Q> + OffsetDsl<Output = Q>,
{
    if !pagination.is_paginated() {
        return source;
    }
    let mut target = source;
    // SQLite: OFFSET can only be used in conjunction with LIMIT
    if pagination.has_offset() || pagination.is_limited() {
        let limit = i64::try_from(pagination.mandatory_limit()).unwrap_or(i64::MAX);
        target = LimitDsl::limit(target, limit);
    }
    if let Some(offset) = pagination.offset {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        target = OffsetDsl::offset(target, offset);
    }
    target
}

pub(crate) const LIKE_ESCAPE_CHARACTER: char = '\\';

pub(crate) const LIKE_WILDCARD_CHARACTER: char = '%';
pub(crate) const LIKE_PLACEHOLDER_CHARACTER: char = '_';

const LIKE_ESCAPE_CHARACTER_REPLACEMENT: &str = "\\\\"; // LIKE_ESCAPE_CHARACTER + LIKE_ESCAPE_CHARACTER

const LIKE_WILDCARD_CHARACTER_REPLACEMENT: &str = "\\%"; // LIKE_ESCAPE_CHARACTER + LIKE_WILDCARD_CHARACTER
const LIKE_PLACEHOLDER_CHARACTER_REPLACEMENT: &str = "\\_"; // LIKE_ESCAPE_CHARACTER + LIKE_PLACEHOLDER_CHARACTER

pub(crate) fn escape_like_matches(arg: &str) -> String {
    // The order if replacements matters!
    arg.replace(LIKE_ESCAPE_CHARACTER, LIKE_ESCAPE_CHARACTER_REPLACEMENT)
        .replace(LIKE_WILDCARD_CHARACTER, LIKE_WILDCARD_CHARACTER_REPLACEMENT)
        .replace(
            LIKE_PLACEHOLDER_CHARACTER,
            LIKE_PLACEHOLDER_CHARACTER_REPLACEMENT,
        )
}

/// Matches all terms in the given order with arbitrary text in between.
///
/// Returns `None` if all terms are empty.
pub(crate) fn build_phrase_like_expr_escaped<'term>(
    terms: impl IntoIterator<Item = &'term str>,
) -> Option<String> {
    let escaped_terms: Vec<_> = terms.into_iter().map(escape_like_matches).collect();
    let escaped_terms_str_len = escaped_terms.iter().fold(0, |len, term| len + term.len());
    if escaped_terms_str_len == 0 {
        return None;
    }
    let mut like_expr = escaped_terms.iter().fold(
        String::with_capacity(escaped_terms_str_len + escaped_terms.len() + 1),
        |mut like_expr, term| {
            // Prepend wildcard character before each part
            like_expr.push(LIKE_WILDCARD_CHARACTER);
            like_expr.push_str(term);
            like_expr
        },
    );
    // Append final wildcard character after last part
    like_expr.push(LIKE_WILDCARD_CHARACTER);
    Some(like_expr)
}

pub(crate) const fn timestamp_from_sql(millis: TimestampMillis) -> UtcDateTimeMs {
    UtcDateTimeMs::from_unix_timestamp_millis(millis)
}

pub(crate) const fn timestamp_to_sql(timestamp: UtcDateTimeMs) -> TimestampMillis {
    timestamp.unix_timestamp_millis()
}

/// Decode a textual enum value as stored in the database.
pub(crate) fn decode_enum<T>(column: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
{
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid {column} value: {value}"))
}

pub(crate) fn decode_enum_opt<T>(column: &str, value: Option<&str>) -> anyhow::Result<Option<T>>
where
    T: FromStr,
{
    value.map(|value| decode_enum(column, value)).transpose()
}

pub(crate) fn decode_country_code(value: &str) -> anyhow::Result<CountryCode> {
    CountryCode::parse(value).ok_or_else(|| anyhow::anyhow!("invalid country code: {value}"))
}

pub(crate) use rigmart_core::listing::CountryCode;
