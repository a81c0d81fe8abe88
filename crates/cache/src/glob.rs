// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use regex::Regex;

/// Glob-style key pattern with the same syntax as the `KEYS`/`SCAN`
/// commands of Redis.
///
/// Supported: `*` (any sequence), `?` (any single character),
/// `[abc]`, `[^abc]` and `[a-z]` (character classes), and `\x` (literal `x`).
#[derive(Debug, Clone)]
pub struct GlobPattern {
    glob: String,
    regex: Regex,
}

impl GlobPattern {
    pub fn new(glob: impl Into<String>) -> crate::Result<Self> {
        let glob = glob.into();
        let regex = Regex::new(&glob_to_regex(&glob))?;
        Ok(Self { glob, regex })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}

impl AsRef<str> for GlobPattern {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut regex = String::with_capacity(glob.len() * 2 + 2);
    regex.push('^');
    let mut chars = glob.chars();
    while let Some(c) = chars.next() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            '\\' => {
                if let Some(escaped) = chars.next() {
                    regex.push_str(&regex::escape(escaped.encode_utf8(&mut [0; 4])));
                } else {
                    regex.push_str(r"\\");
                }
            }
            '[' => {
                let mut class = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    class.push(c);
                }
                if closed && !class.is_empty() {
                    regex.push('[');
                    let (negated, members) = class
                        .strip_prefix('^')
                        .map_or((false, class.as_str()), |members| (true, members));
                    if negated {
                        regex.push('^');
                    }
                    for c in members.chars() {
                        match c {
                            '\\' | '[' | ']' | '^' | '&' | '~' => {
                                regex.push('\\');
                                regex.push(c);
                            }
                            c => regex.push(c),
                        }
                    }
                    regex.push(']');
                } else {
                    // Unbalanced brackets match literally
                    regex.push_str(&regex::escape("["));
                    regex.push_str(&regex::escape(&class));
                    if closed {
                        regex.push_str(&regex::escape("]"));
                    }
                }
            }
            c => regex.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    regex.push('$');
    regex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::TestResult;

    #[test]
    fn wildcard_suffix() -> TestResult<()> {
        let pattern = GlobPattern::new("cache:/listings*")?;
        assert!(pattern.matches("cache:/listings"));
        assert!(pattern.matches("cache:/listings?page=2&sort=price_asc"));
        assert!(pattern.matches("cache:/listings/man-tgx/related"));
        assert!(!pattern.matches("cache:/categories"));
        assert!(!pattern.matches("other:/listings"));
        Ok(())
    }

    #[test]
    fn regex_metacharacters_are_literal() -> TestResult<()> {
        let pattern = GlobPattern::new("/listings?page=1(x)+")?;
        // '?' is a glob wildcard
        assert!(pattern.matches("/listings&page=1(x)+"));
        assert!(!pattern.matches("/listings?page=1x"));
        Ok(())
    }

    #[test]
    fn character_classes() -> TestResult<()> {
        let pattern = GlobPattern::new("k[ab]")?;
        assert!(pattern.matches("ka"));
        assert!(!pattern.matches("kc"));
        let pattern = GlobPattern::new("k[^ab]")?;
        assert!(pattern.matches("kc"));
        assert!(!pattern.matches("ka"));
        let pattern = GlobPattern::new("k[0-9]")?;
        assert!(pattern.matches("k7"));
        let pattern = GlobPattern::new("k[")?;
        assert!(pattern.matches("k["));
        Ok(())
    }

    #[test]
    fn escaped_wildcard() -> TestResult<()> {
        let pattern = GlobPattern::new(r"a\*")?;
        assert!(pattern.matches("a*"));
        assert!(!pattern.matches("ab"));
        Ok(())
    }
}
