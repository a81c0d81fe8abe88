// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::{Brand, Category, Model};
use rigmart_repo::catalog::*;

use crate::{
    db::{
        brand::{models as brand_models, schema::*},
        category::{models as category_models, schema::*},
        vehicle_model::{models as vehicle_model_models, schema::*},
    },
    prelude::*,
};

impl CategoryRepo for crate::Connection<'_> {
    fn resolve_category_id(&mut self, slug: &str) -> RepoResult<CategoryId> {
        category::table
            .select(category::row_id)
            .filter(category::slug.eq(slug))
            .first::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn load_active_child_category_ids(
        &mut self,
        parent_id: CategoryId,
    ) -> RepoResult<Vec<CategoryId>> {
        category::table
            .select(category::row_id)
            .filter(category::parent_id.eq(parent_id.to_inner()))
            .filter(category::is_active.eq(true))
            .order_by(category::row_id)
            .load::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(|ids| ids.into_iter().map(Into::into).collect())
    }

    fn load_category(&mut self, id: CategoryId) -> RepoResult<Category> {
        category::table
            .filter(category::row_id.eq(id.to_inner()))
            .first::<category_models::QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .map(|record| CategoryRecord::from(record).category)
    }

    fn load_active_categories(&mut self) -> RepoResult<Vec<CategoryRecord>> {
        category::table
            .filter(category::is_active.eq(true))
            .order_by((category::position, category::name, category::row_id))
            .load::<category_models::QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .map(|records| records.into_iter().map(Into::into).collect())
    }

    fn insert_category(
        &mut self,
        parent_id: Option<CategoryId>,
        category: &Category,
    ) -> RepoResult<CategoryId> {
        let insertable = category_models::InsertableRecord::bind(parent_id, category);
        diesel::insert_into(category::table)
            .values(&insertable)
            .returning(category::row_id)
            .get_result::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }
}

impl BrandRepo for crate::Connection<'_> {
    fn resolve_brand_id(&mut self, slug: &str) -> RepoResult<BrandId> {
        brand::table
            .select(brand::row_id)
            .filter(brand::slug.eq(slug))
            .first::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn load_brands(&mut self) -> RepoResult<Vec<(BrandId, Brand)>> {
        brand::table
            .order_by((brand::name, brand::row_id))
            .load::<brand_models::QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .map(|records| records.into_iter().map(Into::into).collect())
    }

    fn insert_brand(&mut self, brand: &Brand) -> RepoResult<BrandId> {
        let insertable = brand_models::InsertableRecord::bind(brand);
        diesel::insert_into(brand::table)
            .values(&insertable)
            .returning(brand::row_id)
            .get_result::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }
}

impl ModelRepo for crate::Connection<'_> {
    fn resolve_model_id(&mut self, slug: &str) -> RepoResult<(BrandId, ModelId)> {
        vehicle_model::table
            .select((vehicle_model::brand_id, vehicle_model::row_id))
            .filter(vehicle_model::slug.eq(slug))
            .first::<(RowId, RowId)>(self.as_mut())
            .map_err(repo_error)
            .map(|(brand_id, model_id)| (brand_id.into(), model_id.into()))
    }

    fn load_brand_models(&mut self, brand_id: BrandId) -> RepoResult<Vec<(ModelId, Model)>> {
        vehicle_model::table
            .filter(vehicle_model::brand_id.eq(brand_id.to_inner()))
            .order_by((vehicle_model::name, vehicle_model::row_id))
            .load::<vehicle_model_models::QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .map(|records| records.into_iter().map(Into::into).collect())
    }

    fn insert_model(&mut self, brand_id: BrandId, model: &Model) -> RepoResult<ModelId> {
        let insertable = vehicle_model_models::InsertableRecord::bind(brand_id, model);
        diesel::insert_into(vehicle_model::table)
            .values(&insertable)
            .returning(vehicle_model::row_id)
            .get_result::<RowId>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }
}

#[cfg(test)]
mod tests;
