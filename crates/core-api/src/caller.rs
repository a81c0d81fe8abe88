// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use rigmart_core::seller::UserUid;

/// The identity on whose behalf a request is executed.
///
/// Authentication happens upstream, the identity is trusted as is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Caller {
    #[default]
    Anonymous,
    User(UserUid),
    Admin(UserUid),
}

impl Caller {
    #[must_use]
    pub fn user_uid(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::User(uid) | Self::Admin(uid) => Some(uid),
        }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin(_))
    }

    #[must_use]
    pub fn is_user(&self, user_uid: &str) -> bool {
        self.user_uid() == Some(user_uid)
    }
}
