// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    listing_image (row_id) {
        row_id -> BigInt,
        listing_id -> BigInt,
        url -> Text,
        position -> Integer,
    }
}
