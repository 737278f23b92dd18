//! Attribute behavior
//!
//! Declares, for each captured attribute, how it takes part in pairwise
//! comparison. Supplied once per run and applied uniformly to all pairs.

use dedupx_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison mode of one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    /// Must be equal for the pair to be considered (absent == absent passes)
    Strong,
    /// Soft OR-group: at least one grouped attribute must match with a value
    Grouped,
    /// Excluded from comparison
    Ignore,
}

impl CompareMode {
    pub const ALL: [CompareMode; 3] = [CompareMode::Strong, CompareMode::Grouped, CompareMode::Ignore];

    /// One-letter shortcut used in prompts
    pub fn shortcut(&self) -> &'static str {
        match self {
            CompareMode::Strong => "s",
            CompareMode::Grouped => "g",
            CompareMode::Ignore => "i",
        }
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareMode::Strong => write!(f, "strong"),
            CompareMode::Grouped => write!(f, "grouped"),
            CompareMode::Ignore => write!(f, "ignore"),
        }
    }
}

impl FromStr for CompareMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "s" | "strong" => Ok(CompareMode::Strong),
            "g" | "grouped" => Ok(CompareMode::Grouped),
            "i" | "ignore" => Ok(CompareMode::Ignore),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

/// Per-attribute comparison modes, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeBehavior {
    modes: Vec<(String, CompareMode)>,
}

impl AttributeBehavior {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mode of an attribute, replacing a previous one
    pub fn set(&mut self, attr: impl Into<String>, mode: CompareMode) {
        let attr = attr.into();
        match self.modes.iter_mut().find(|(name, _)| *name == attr) {
            Some(entry) => entry.1 = mode,
            None => self.modes.push((attr, mode)),
        }
    }

    #[must_use]
    pub fn with(mut self, attr: impl Into<String>, mode: CompareMode) -> Self {
        self.set(attr, mode);
        self
    }

    #[must_use]
    pub fn strong(self, attr: impl Into<String>) -> Self {
        self.with(attr, CompareMode::Strong)
    }

    #[must_use]
    pub fn grouped(self, attr: impl Into<String>) -> Self {
        self.with(attr, CompareMode::Grouped)
    }

    #[must_use]
    pub fn ignore(self, attr: impl Into<String>) -> Self {
        self.with(attr, CompareMode::Ignore)
    }

    pub fn mode(&self, attr: &str) -> Option<CompareMode> {
        self.modes.iter().find(|(name, _)| name == attr).map(|(_, mode)| *mode)
    }

    /// Attributes with the given mode, in declaration order
    pub fn attrs(&self, mode: CompareMode) -> impl Iterator<Item = &str> {
        self.modes
            .iter()
            .filter(move |(_, m)| *m == mode)
            .map(|(name, _)| name.as_str())
    }

    pub fn count(&self, mode: CompareMode) -> usize {
        self.attrs(mode).count()
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CompareMode)> {
        self.modes.iter().map(|(name, mode)| (name.as_str(), *mode))
    }
}
