// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core_api::catalog::{BrandWithModels, CategoryNode};

use super::*;

pub fn load_category_tree(connection: &mut DbConnection) -> Result<Vec<CategoryNode>> {
    with_transaction(connection, |repo| uc::catalog::load_category_tree(repo))
}

pub fn load_brands_with_models(connection: &mut DbConnection) -> Result<Vec<BrandWithModels>> {
    with_transaction(connection, |repo| {
        uc::catalog::load_brands_with_models(repo)
    })
}
