// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{Brand, Category, Model};

use crate::prelude::*;

record_id_newtype!(CategoryId);

record_id_newtype!(BrandId);

record_id_newtype!(ModelId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub parent_id: Option<CategoryId>,
    pub category: Category,
}

pub trait CategoryRepo {
    fn resolve_category_id(&mut self, slug: &str) -> RepoResult<CategoryId>;

    /// Direct children of the given category that are active.
    fn load_active_child_category_ids(&mut self, parent_id: CategoryId)
    -> RepoResult<Vec<CategoryId>>;

    fn load_category(&mut self, id: CategoryId) -> RepoResult<Category>;

    /// All active categories ordered by position.
    fn load_active_categories(&mut self) -> RepoResult<Vec<CategoryRecord>>;

    fn insert_category(
        &mut self,
        parent_id: Option<CategoryId>,
        category: &Category,
    ) -> RepoResult<CategoryId>;
}

pub trait BrandRepo {
    fn resolve_brand_id(&mut self, slug: &str) -> RepoResult<BrandId>;

    /// All brands ordered by name.
    fn load_brands(&mut self) -> RepoResult<Vec<(BrandId, Brand)>>;

    fn insert_brand(&mut self, brand: &Brand) -> RepoResult<BrandId>;
}

pub trait ModelRepo {
    fn resolve_model_id(&mut self, slug: &str) -> RepoResult<(BrandId, ModelId)>;

    /// All models of a brand ordered by name.
    fn load_brand_models(&mut self, brand_id: BrandId) -> RepoResult<Vec<(ModelId, Model)>>;

    fn insert_model(&mut self, brand_id: BrandId, model: &Model) -> RepoResult<ModelId>;
}
