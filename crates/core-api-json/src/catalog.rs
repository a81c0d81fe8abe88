// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{Category, Model};

use crate::prelude::*;

mod _inner {
    pub(super) use crate::_inner::catalog::*;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    pub slug: String,
    pub name: String,
    pub position: i32,
    pub children: Vec<Category>,
}

impl From<_inner::CategoryNode> for CategoryNode {
    fn from(from: _inner::CategoryNode) -> Self {
        let _inner::CategoryNode { category, children } = from;
        let Category {
            slug,
            name,
            is_active: _,
            position,
        } = category;
        Self {
            slug,
            name,
            position,
            children,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandWithModels {
    pub slug: String,
    pub name: String,
    pub models: Vec<Model>,
}

impl From<_inner::BrandWithModels> for BrandWithModels {
    fn from(from: _inner::BrandWithModels) -> Self {
        let _inner::BrandWithModels { brand, models } = from;
        let rigmart_core::Brand { slug, name } = brand;
        Self { slug, name, models }
    }
}
