// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Page-based pagination of client requests.

use crate::{Pagination, PaginationLimit, PaginationOffset};

pub type PageNumber = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationLimits {
    pub default_limit: PaginationLimit,
    pub max_limit: PaginationLimit,
}

/// Paginated resources with their individual limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Endpoint {
    Listings,
    AdminListings,
    SellerListings,
    RecentlyViewed,
    Reviews,
}

impl Endpoint {
    #[must_use]
    pub const fn limits(self) -> PaginationLimits {
        let (default_limit, max_limit) = match self {
            Self::Listings => (20, 100),
            Self::AdminListings => (50, 100),
            Self::SellerListings | Self::RecentlyViewed | Self::Reviews => (20, 50),
        };
        PaginationLimits {
            default_limit,
            max_limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// 1-based
    pub page: PageNumber,
    pub limit: PaginationLimit,
    pub skip: PaginationOffset,
}

fn parse_positive(input: Option<&str>) -> Option<u64> {
    input?.trim().parse::<u64>().ok().filter(|value| *value > 0)
}

/// Parse raw query parameters into a valid pagination state.
///
/// Never fails. Invalid or missing values fall back to the first page
/// and the default limit of the endpoint. Limits that exceed the
/// maximum are clamped.
#[must_use]
pub fn parse_pagination(
    page: Option<&str>,
    limit: Option<&str>,
    limits: PaginationLimits,
) -> PaginationState {
    let PaginationLimits {
        default_limit,
        max_limit,
    } = limits;
    debug_assert!(default_limit > 0);
    debug_assert!(default_limit <= max_limit);
    let page = parse_positive(page).unwrap_or(1);
    let limit = parse_positive(limit)
        .unwrap_or(default_limit)
        .min(max_limit);
    let skip = (page - 1).saturating_mul(limit);
    PaginationState { page, limit, skip }
}

impl PaginationState {
    #[must_use]
    pub const fn to_pagination(self) -> Pagination {
        Pagination {
            limit: Some(self.limit),
            offset: Some(self.skip),
        }
    }

    #[must_use]
    pub fn summarize(self, total: u64) -> PaginationSummary {
        let Self { page, limit, .. } = self;
        PaginationSummary {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSummary {
    pub page: PageNumber,
    pub limit: PaginationLimit,
    pub total: u64,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTINGS: PaginationLimits = Endpoint::Listings.limits();

    #[test]
    fn defaults() {
        assert_eq!(
            PaginationState {
                page: 1,
                limit: 20,
                skip: 0,
            },
            parse_pagination(None, None, LISTINGS)
        );
        assert_eq!(50, Endpoint::AdminListings.limits().default_limit);
    }

    #[test]
    fn skip_from_page_and_limit() {
        let state = parse_pagination(Some("3"), Some("25"), LISTINGS);
        assert_eq!(3, state.page);
        assert_eq!(25, state.limit);
        assert_eq!(50, state.skip);
        assert_eq!(
            Pagination {
                limit: Some(25),
                offset: Some(50),
            },
            state.to_pagination()
        );
    }

    #[test]
    fn invalid_input_behaves_like_absent_input() {
        let absent = parse_pagination(None, None, LISTINGS);
        for invalid in ["", "abc", "0", "-1", "1.5", "-0", " "] {
            assert_eq!(absent, parse_pagination(Some(invalid), Some(invalid), LISTINGS));
        }
    }

    #[test]
    fn limit_is_clamped_to_max() {
        assert_eq!(100, parse_pagination(None, Some("1000"), LISTINGS).limit);
        assert_eq!(
            50,
            parse_pagination(None, Some("51"), Endpoint::Reviews.limits()).limit
        );
        assert_eq!(
            50,
            parse_pagination(None, Some("18446744073709551615"), Endpoint::Reviews.limits())
                .limit
        );
    }

    #[test]
    fn page_and_limit_stay_within_bounds() {
        for endpoint in [
            Endpoint::Listings,
            Endpoint::AdminListings,
            Endpoint::SellerListings,
            Endpoint::RecentlyViewed,
            Endpoint::Reviews,
        ] {
            let limits = endpoint.limits();
            for input in [i64::MIN, -100, -1, 0, 1, 2, 49, 50, 51, 99, 100, 101, i64::MAX] {
                let input = input.to_string();
                let state = parse_pagination(Some(&input), Some(&input), limits);
                assert!(state.page >= 1);
                assert!(state.limit >= 1);
                assert!(state.limit <= limits.max_limit);
            }
        }
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let state = parse_pagination(Some("18446744073709551615"), Some("100"), LISTINGS);
        assert_eq!(u64::MAX, state.skip);
    }

    #[test]
    fn summarize_total_pages() {
        let state = parse_pagination(Some("1"), Some("20"), LISTINGS);
        assert_eq!(2, state.summarize(21).total_pages);
        assert_eq!(1, state.summarize(20).total_pages);
        assert_eq!(0, state.summarize(0).total_pages);
    }
}
