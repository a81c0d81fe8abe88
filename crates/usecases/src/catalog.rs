// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core_api::catalog::{BrandWithModels, CategoryNode};
use rigmart_repo::{
    catalog::{BrandRepo, CategoryRepo, ModelRepo},
    prelude::*,
};

/// Active top-level categories with their active children,
/// both ordered by position.
///
/// Children of inactive categories are omitted.
pub fn load_category_tree<Repo>(repo: &mut Repo) -> RepoResult<Vec<CategoryNode>>
where
    Repo: CategoryRepo,
{
    let records = repo.load_active_categories()?;
    let tree = records
        .iter()
        .filter(|record| record.parent_id.is_none())
        .map(|parent| CategoryNode {
            category: parent.category.clone(),
            children: records
                .iter()
                .filter(|record| record.parent_id == Some(parent.id))
                .map(|record| record.category.clone())
                .collect(),
        })
        .collect();
    Ok(tree)
}

pub fn load_brands_with_models<Repo>(repo: &mut Repo) -> RepoResult<Vec<BrandWithModels>>
where
    Repo: BrandRepo + ModelRepo,
{
    let brands = repo.load_brands()?;
    let mut brands_with_models = Vec::with_capacity(brands.len());
    for (brand_id, brand) in brands {
        let models = repo
            .load_brand_models(brand_id)?
            .into_iter()
            .map(|(_, model)| model)
            .collect();
        brands_with_models.push(BrandWithModels { brand, models });
    }
    Ok(brands_with_models)
}
