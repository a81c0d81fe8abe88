// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core_api_json::catalog::{BrandWithModels, CategoryNode};

use super::*;

pub mod load_brands;
pub mod load_categories;
