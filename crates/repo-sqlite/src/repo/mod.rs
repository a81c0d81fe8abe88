// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod catalog;
pub mod listing;
pub mod recently_viewed;
pub mod seller;

#[cfg(test)]
pub(crate) mod tests;
