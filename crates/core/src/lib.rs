// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod catalog;
pub mod listing;
pub mod seller;
pub mod util;

pub use self::{
    catalog::{Brand, Category, Model},
    listing::{
        Condition, EmissionClass, FuelType, Listing, ListingImage, ListingStatus, Location,
        Transmission,
    },
    seller::SellerProfile,
};

pub mod prelude {
    pub use crate::util::clock::{TimestampMillis, UtcDateTimeMs};
}
