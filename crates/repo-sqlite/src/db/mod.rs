// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub(crate) mod brand;
pub(crate) mod category;
pub(crate) mod listing;
pub(crate) mod listing_image;
pub(crate) mod recently_viewed;
pub(crate) mod seller;
pub(crate) mod vehicle_model;

mod join {
    use crate::db::{
        brand::schema::*, category::schema::*, listing::schema::*, listing_image::schema::*,
        recently_viewed::schema::*, seller::schema::*, vehicle_model::schema::*,
    };

    diesel::allow_tables_to_appear_in_same_query!(
        brand,
        category,
        listing,
        listing_image,
        recently_viewed,
        seller,
        vehicle_model,
    );
}
