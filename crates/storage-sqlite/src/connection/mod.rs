// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, path::PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod pool;

/// Location of the `SQLite` database
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Storage {
    /// Volatile, per connection
    InMemory,

    File { path: PathBuf },
}

const IN_MEMORY_STORAGE: &str = ":memory:";

impl Storage {
    /// Parse a database URL
    ///
    /// Both `:memory:` and an empty string denote an in-memory database.
    /// An optional `sqlite://` or `file:` prefix is stripped from file paths.
    #[must_use]
    pub fn parse_url(url: &str) -> Self {
        let url = url.trim();
        if url.is_empty() || url == IN_MEMORY_STORAGE {
            return Self::InMemory;
        }
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("file:"))
            .unwrap_or(url);
        Self::File { path: path.into() }
    }

    #[must_use]
    pub const fn is_in_memory(&self) -> bool {
        matches!(self, Self::InMemory)
    }
}

impl AsRef<str> for Storage {
    fn as_ref(&self) -> &str {
        match self {
            Self::InMemory => IN_MEMORY_STORAGE,
            Self::File { path } => path.to_str().unwrap_or_default(),
        }
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InMemory => f.write_str(IN_MEMORY_STORAGE),
            Self::File { path } => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn parse_database_urls() {
        assert_eq!(Storage::InMemory, Storage::parse_url(":memory:"));
        assert_eq!(Storage::InMemory, Storage::parse_url("  "));
        assert_eq!(
            Storage::File {
                path: "/var/lib/rigmart/rigmart.sqlite".into()
            },
            Storage::parse_url("sqlite:///var/lib/rigmart/rigmart.sqlite")
        );
        assert_eq!(
            Storage::File {
                path: "rigmart.sqlite".into()
            },
            Storage::parse_url("file:rigmart.sqlite")
        );
        assert_eq!("rigmart.sqlite", Storage::parse_url("rigmart.sqlite").as_ref());
    }
}
