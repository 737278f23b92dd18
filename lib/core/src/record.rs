//! Parsed records
//!
//! A parsed record is the structured view of one catalog item: the attributes
//! captured by extraction rules plus the two fingerprints derived from the
//! residual text.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Multiset of mandatory tokens (numbers, Latin codes, proper-noun extras)
///
/// Equality is order-insensitive and count-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TesterKit {
    counts: AHashMap<String, usize>,
}

impl TesterKit {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: impl Into<String>) {
        *self.counts.entry(token.into()).or_insert(0) += 1;
    }

    /// Number of distinct tokens
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrences of a token (0 when absent)
    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Tokens with counts, sorted by token
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut tokens: Vec<_> = self.counts.iter().map(|(t, c)| (t.as_str(), *c)).collect();
        tokens.sort_unstable();
        tokens
    }
}

impl<S: Into<String>> FromIterator<S> for TesterKit {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut kit = TesterKit::new();
        for token in iter {
            kit.insert(token);
        }
        kit
    }
}

impl fmt::Display for TesterKit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .sorted()
            .into_iter()
            .map(|(token, count)| format!("{}: {}", token, count))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Set of normalized noun lemmas
pub type KeywordSet = BTreeSet<String>;

/// Structured view of one catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecord {
    /// The original item text
    pub item: String,
    /// Captured attribute values keyed by attribute name
    pub attributes: AHashMap<String, Option<String>>,
    /// Tester kit (hard equality gate)
    pub tester: TesterKit,
    /// Keyword set (soft similarity basis)
    pub keywords: KeywordSet,
}

impl ParsedRecord {
    pub fn new(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            attributes: AHashMap::new(),
            tester: TesterKit::new(),
            keywords: KeywordSet::new(),
        }
    }

    /// Captured value of an attribute; a missing key reads as absent
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(|v| v.as_deref())
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.attributes.insert(name.into(), value.map(str::to_string));
        self
    }

    #[must_use]
    pub fn with_tester(mut self, tester: TesterKit) -> Self {
        self.tester = tester;
        self
    }

    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tester_kit_is_count_sensitive() {
        let a: TesterKit = ["10", "10", "din"].into_iter().collect();
        let b: TesterKit = ["din", "10"].into_iter().collect();
        let c: TesterKit = ["10", "din", "10"].into_iter().collect();

        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.len(), 2);
        assert_eq!(a.count("10"), 2);
    }

    #[test]
    fn test_tester_kit_display_is_sorted() {
        let kit: TesterKit = ["m", "10", "10"].into_iter().collect();
        assert_eq!(kit.to_string(), "{10: 2, m: 1}");
    }

    #[test]
    fn test_missing_attribute_reads_absent() {
        let record = ParsedRecord::new("Болт").with_attribute("din", Some("933"));
        assert_eq!(record.attribute("din"), Some("933"));
        assert_eq!(record.attribute("gost"), None);
    }
}
