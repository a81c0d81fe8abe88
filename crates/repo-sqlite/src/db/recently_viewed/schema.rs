// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    recently_viewed (row_id) {
        row_id -> BigInt,
        user_uid -> Text,
        listing_id -> BigInt,
        viewed_ms -> BigInt,
    }
}
