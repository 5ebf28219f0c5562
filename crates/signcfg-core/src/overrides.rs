//! Property override sets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value of one override; an entry without a value does not participate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideValue {
    pub value: Option<String>,
}

impl OverrideValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn unset() -> Self {
        Self { value: None }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// Mapping from property tag to override value, ordered by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overrides {
    entries: BTreeMap<String, OverrideValue>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(tag.into(), OverrideValue::new(value));
    }

    /// Record a tag without a value.
    pub fn unset(&mut self, tag: impl Into<String>) {
        self.entries.insert(tag.into(), OverrideValue::unset());
    }

    /// Builder form of [`Overrides::set`].
    pub fn with(mut self, tag: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(tag, value);
        self
    }

    pub fn get(&self, tag: &str) -> Option<&OverrideValue> {
        self.entries.get(tag)
    }

    /// Entries that carry a concrete value.
    pub fn with_values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(tag, v)| v.value.as_deref().map(|value| (tag.as_str(), value)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (tag, value) in iter {
            overrides.set(tag, value);
        }
        overrides
    }
}
