// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    listing (row_id) {
        row_id -> BigInt,
        row_created_ms -> BigInt,
        row_updated_ms -> BigInt,
        slug -> Text,
        title -> Text,
        description -> Text,
        status -> Text,
        seller_id -> BigInt,
        category_id -> BigInt,
        brand_id -> Nullable<BigInt>,
        model_id -> Nullable<BigInt>,
        vehicle_condition -> Text,
        fuel_type -> Nullable<Text>,
        transmission -> Nullable<Text>,
        emission_class -> Nullable<Text>,
        country_code -> Text,
        city -> Nullable<Text>,
        price_eur -> BigInt,
        model_year -> Nullable<Integer>,
        mileage_km -> Nullable<BigInt>,
        view_count -> BigInt,
        published_ms -> Nullable<BigInt>,
        deleted_ms -> Nullable<BigInt>,
    }
}
