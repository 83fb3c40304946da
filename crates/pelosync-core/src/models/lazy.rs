// ABOUTME: Explicit loaded/not-loaded state for entity fields that need an extra remote call
// ABOUTME: A field moves from NotLoaded to Loaded at most once and is never invalidated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Serialize;

/// State of a lazily-materialized entity field
///
/// Entities start with these fields `NotLoaded` unless the response that built
/// them already carried the value. Accessors on the owning entity perform the
/// fetch, fill the field, and serve it from memory afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Lazy<T> {
    /// Value has not been fetched yet
    NotLoaded,
    /// Value is materialized
    Loaded(T),
}

impl<T> Default for Lazy<T> {
    fn default() -> Self {
        Self::NotLoaded
    }
}

impl<T> From<Option<T>> for Lazy<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotLoaded, Self::Loaded)
    }
}

impl<T> Lazy<T> {
    /// True once the value has been materialized
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Borrow the value if loaded
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::NotLoaded => None,
        }
    }

    /// Fill the field if it is still `NotLoaded`
    ///
    /// A loaded value is kept as is. Returns whether the transition happened.
    pub fn load(&mut self, value: T) -> bool {
        if self.is_loaded() {
            return false;
        }
        *self = Self::Loaded(value);
        true
    }

    /// Consume into an `Option`
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::NotLoaded => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_loaded() {
        let field: Lazy<u64> = Lazy::default();
        assert!(!field.is_loaded());
        assert_eq!(field.get(), None);
    }

    #[test]
    fn test_load_transitions_once() {
        let mut field = Lazy::NotLoaded;
        assert!(field.load(3_u64));
        assert!(!field.load(7));
        assert_eq!(field.get(), Some(&3));
    }

    #[test]
    fn test_loaded_none_is_still_loaded() {
        let mut field: Lazy<Option<u64>> = Lazy::NotLoaded;
        field.load(None);
        assert!(field.is_loaded());
        assert_eq!(field.into_option(), Some(None));
    }
}
