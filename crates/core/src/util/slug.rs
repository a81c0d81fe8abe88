// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! URL-safe identifiers derived from human-readable titles.

use uuid::Uuid;

pub const SLUG_MAX_LEN: usize = 80;

const SLUG_SEPARATOR: char = '-';

const SLUG_SUFFIX_LEN: usize = 6;

/// Lowercase ASCII letters and digits separated by single dashes.
///
/// Non-ASCII characters are dropped, all other characters are
/// collapsed into a single separator.
#[must_use]
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len().min(SLUG_MAX_LEN));
    let mut pending_separator = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SLUG_SEPARATOR);
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_ascii() {
            pending_separator = true;
        }
        if slug.len() >= SLUG_MAX_LEN {
            break;
        }
    }
    slug.truncate(SLUG_MAX_LEN);
    while slug.ends_with(SLUG_SEPARATOR) {
        slug.pop();
    }
    slug
}

/// Appends a short random suffix that keeps slugs of equally titled
/// entities apart.
#[must_use]
pub fn slugify_unique(input: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    let suffix = &suffix[..SLUG_SUFFIX_LEN];
    let mut slug = slugify(input);
    slug.truncate(SLUG_MAX_LEN - SLUG_SUFFIX_LEN - 1);
    while slug.ends_with(SLUG_SEPARATOR) {
        slug.pop();
    }
    if !slug.is_empty() {
        slug.push(SLUG_SEPARATOR);
    }
    slug.push_str(suffix);
    slug
}

#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= SLUG_MAX_LEN
        && !slug.starts_with(SLUG_SEPARATOR)
        && !slug.ends_with(SLUG_SEPARATOR)
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c == SLUG_SEPARATOR || c.is_ascii_lowercase() || c.is_ascii_digit())
}
