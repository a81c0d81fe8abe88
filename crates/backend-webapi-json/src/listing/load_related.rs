// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

pub type ResponseBody = Vec<ListingSummary>;

pub fn handle_request(connection: &mut DbConnection, slug: &str) -> Result<ResponseBody> {
    let related = uc::listing::load_related(connection, slug)?;
    Ok(related.into_iter().map(Into::into).collect())
}
