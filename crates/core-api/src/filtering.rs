// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarPredicate<V> {
    LessThan(V),
    LessOrEqual(V),
    GreaterThan(V),
    GreaterOrEqual(V),
    Equal(V),
}

impl<V> ScalarPredicate<V> {
    #[must_use]
    pub fn map<W>(self, f: impl FnOnce(V) -> W) -> ScalarPredicate<W> {
        match self {
            Self::LessThan(value) => ScalarPredicate::LessThan(f(value)),
            Self::LessOrEqual(value) => ScalarPredicate::LessOrEqual(f(value)),
            Self::GreaterThan(value) => ScalarPredicate::GreaterThan(f(value)),
            Self::GreaterOrEqual(value) => ScalarPredicate::GreaterOrEqual(f(value)),
            Self::Equal(value) => ScalarPredicate::Equal(f(value)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScalarFieldFilter<F, V> {
    pub field: F,
    pub predicate: ScalarPredicate<V>,
}

/// Inclusive range with optional bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Range<V> {
    pub min: Option<V>,
    pub max: Option<V>,
}

impl<V> Range<V>
where
    V: PartialOrd + Copy,
{
    #[must_use]
    pub const fn new(min: Option<V>, max: Option<V>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Both bounds are present and `min` exceeds `max`.
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min > max,
            _ => false,
        }
    }

    /// One predicate per present bound.
    pub fn predicates(&self) -> impl Iterator<Item = ScalarPredicate<V>> {
        self.min
            .map(ScalarPredicate::GreaterOrEqual)
            .into_iter()
            .chain(self.max.map(ScalarPredicate::LessOrEqual))
    }
}
