// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{Brand, Category, Model};

/// A top-level category with its direct children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandWithModels {
    pub brand: Brand,
    pub models: Vec<Model>,
}
