//! Substring search over record fields

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Records that can be matched by a [`SearchCondition`]
pub trait Searchable {
    /// Fields the free-text keyword is matched against
    const KEYWORD_FIELDS: &'static [&'static str];

    /// Value of a named field, `None` when the record has no such field or it is unset
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Search state of a list view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCondition {
    /// Free text, matched case-insensitively as a substring
    #[serde(default)]
    pub keyword: String,

    /// Exact (case-insensitive) field filters
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl SearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// True when nothing would be filtered out
    pub fn is_empty(&self) -> bool {
        self.keyword.trim().is_empty() && self.filters.is_empty()
    }

    /// Check a single record
    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        let keyword = self.keyword.trim().to_lowercase();
        if !keyword.is_empty() {
            let hit = T::KEYWORD_FIELDS.iter().any(|name| {
                record
                    .field(name)
                    .map_or(false, |value| value.to_lowercase().contains(&keyword))
            });
            if !hit {
                return false;
            }
        }

        self.filters.iter().all(|(name, expected)| {
            record
                .field(name)
                .map_or(false, |value| value.eq_ignore_ascii_case(expected.trim()))
        })
    }

    /// Matching records, in source order
    pub fn filter<T: Searchable + Clone>(&self, records: &[T]) -> Vec<T> {
        if self.is_empty() {
            return records.to_vec();
        }
        records.iter().filter(|r| self.matches(*r)).cloned().collect()
    }
}
