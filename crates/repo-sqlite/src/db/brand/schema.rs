// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

diesel::table! {
    brand (row_id) {
        row_id -> BigInt,
        slug -> Text,
        name -> Text,
    }
}
