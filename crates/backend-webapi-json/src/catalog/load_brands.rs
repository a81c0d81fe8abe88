// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

pub type ResponseBody = Vec<BrandWithModels>;

pub fn handle_request(connection: &mut DbConnection) -> Result<ResponseBody> {
    let brands = uc::catalog::load_brands_with_models(connection)?;
    Ok(brands.into_iter().map(Into::into).collect())
}
