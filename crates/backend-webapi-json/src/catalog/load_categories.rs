// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

pub type ResponseBody = Vec<CategoryNode>;

/// Active top-level categories with their active children.
pub fn handle_request(connection: &mut DbConnection) -> Result<ResponseBody> {
    let tree = uc::catalog::load_category_tree(connection)?;
    Ok(tree.into_iter().map(Into::into).collect())
}
