// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// A node of the category hierarchy, e.g. "trucks" or "semi-trailers".
///
/// Inactive categories are hidden from the catalog and are not
/// included when searching listings of their parent category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Category {
    pub slug: String,
    pub name: String,
    pub is_active: bool,
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Brand {
    pub slug: String,
    pub name: String,
}

/// A vehicle model of a [`Brand`].
///
/// Slugs of models are unique across all brands.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Model {
    pub slug: String,
    pub name: String,
}
