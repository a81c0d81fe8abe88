// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::str::FromStr as _;

use strum::IntoEnumIterator as _;

use super::*;

#[test]
fn only_active_listings_are_public() {
    let public: Vec<_> = ListingStatus::iter().filter(|s| s.is_public()).collect();
    assert_eq!(vec![ListingStatus::Active], public);
}

#[test]
fn parse_status_case_insensitive() {
    assert_eq!(Ok(ListingStatus::Active), ListingStatus::from_str("ACTIVE"));
    assert_eq!(Ok(ListingStatus::Draft), ListingStatus::from_str("draft"));
    assert!(ListingStatus::from_str("deleted").is_err());
    assert_eq!("PENDING", ListingStatus::Pending.as_ref());
}

#[test]
fn facet_values_roundtrip_as_str() {
    for value in FuelType::iter() {
        assert_eq!(Ok(value), FuelType::from_str(value.as_ref()));
    }
    for value in Transmission::iter() {
        assert_eq!(Ok(value), Transmission::from_str(value.as_ref()));
    }
    for value in EmissionClass::iter() {
        assert_eq!(Ok(value), EmissionClass::from_str(value.as_ref()));
    }
    for value in Condition::iter() {
        assert_eq!(Ok(value), Condition::from_str(value.as_ref()));
    }
}

#[test]
fn query_style_facet_values() {
    assert_eq!(
        Ok(Transmission::SemiAutomatic),
        Transmission::from_str("semi_automatic")
    );
    assert_eq!(Ok(EmissionClass::Euro6), EmissionClass::from_str("euro_6"));
    assert_eq!(Ok(FuelType::Lng), FuelType::from_str("lng"));
}

#[test]
fn parse_country_code() {
    assert_eq!(Some("DE"), CountryCode::parse("de").as_ref().map(CountryCode::as_str));
    assert_eq!(Some("NL"), CountryCode::parse(" NL ").as_ref().map(CountryCode::as_str));
    assert!(CountryCode::parse("DEU").is_none());
    assert!(CountryCode::parse("D1").is_none());
    assert!(CountryCode::parse("").is_none());
}
