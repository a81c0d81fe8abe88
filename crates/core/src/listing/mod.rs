// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::util::clock::UtcDateTimeMs;

/// Asking price in whole euros.
///
/// Prices quoted in other currencies are normalized before they are stored.
pub type PriceEur = i64;

pub type ModelYear = i32;

pub type MileageKm = i64;

pub type ViewCount = u64;

/// Lifecycle of a listing.
///
/// Only [`ListingStatus::Active`] listings are visible to the public.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ListingStatus {
    Draft,
    Pending,
    Active,
    Sold,
    Expired,
    Rejected,
}

impl ListingStatus {
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Active)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Condition {
    New,
    Used,
    Damaged,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum FuelType {
    Diesel,
    Petrol,
    Electric,
    Hybrid,
    Lng,
    Cng,
    Hydrogen,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Transmission {
    Manual,
    Automatic,
    SemiAutomatic,
}

/// European emission standard for heavy-duty vehicles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmissionClass {
    #[strum(serialize = "EURO_3")]
    #[cfg_attr(feature = "serde", serde(rename = "EURO_3"))]
    Euro3,
    #[strum(serialize = "EURO_4")]
    #[cfg_attr(feature = "serde", serde(rename = "EURO_4"))]
    Euro4,
    #[strum(serialize = "EURO_5")]
    #[cfg_attr(feature = "serde", serde(rename = "EURO_5"))]
    Euro5,
    #[strum(serialize = "EEV")]
    #[cfg_attr(feature = "serde", serde(rename = "EEV"))]
    Eev,
    #[strum(serialize = "EURO_6")]
    #[cfg_attr(feature = "serde", serde(rename = "EURO_6"))]
    Euro6,
    #[strum(serialize = "ZERO_EMISSION")]
    #[cfg_attr(feature = "serde", serde(rename = "ZERO_EMISSION"))]
    ZeroEmission,
}

/// ISO 3166-1 alpha-2 country code, always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct CountryCode(String);

impl CountryCode {
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.len() != 2 || !input.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        Some(Self(input.to_ascii_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        let Self(inner) = self;
        inner
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CountryCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let input = String::deserialize(deserializer)?;
        Self::parse(&input).ok_or_else(|| {
            serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(&input),
                &"a two-letter country code",
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub country_code: CountryCode,
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingImage {
    pub url: String,

    /// Display order, ascending. The image with the lowest
    /// position serves as the cover image.
    pub position: i32,
}

/// The owned properties of a listing.
///
/// Relations to the catalog and to the seller are maintained
/// by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub status: ListingStatus,
    pub condition: Condition,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub emission_class: Option<EmissionClass>,
    pub price_eur: PriceEur,
    pub year: Option<ModelYear>,
    pub mileage_km: Option<MileageKm>,
    pub location: Location,
    pub published_at: Option<UtcDateTimeMs>,
}

#[cfg(test)]
mod tests;
