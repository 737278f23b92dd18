//! Sample selection by query keywords
//!
//! A lower-case word matches any case, a word containing upper-case letters
//! matches only the exact spelling.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How keyword presence is combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// At least one keyword must be present
    #[default]
    Any,
    /// Every keyword must be present
    All,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Any => write!(f, "any"),
            SearchMode::All => write!(f, "all"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "any" => Ok(SearchMode::Any),
            "all" => Ok(SearchMode::All),
            other => Err(Error::InvalidConfig(format!("unknown search mode: {}", other))),
        }
    }
}

/// Keyword query picking the sample out of a source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub mode: SearchMode,
}

impl Query {
    pub fn new(keywords: Vec<String>, exclude: Vec<String>, mode: SearchMode) -> Self {
        Self { keywords, exclude, mode }
    }

    /// Check whether an item belongs to the sample
    pub fn matches(&self, item: &str) -> bool {
        let lowered = item.to_lowercase();
        let present = |word: &String| word_in(word, item, &lowered);

        let picked = match self.mode {
            SearchMode::Any => self.keywords.iter().any(present),
            SearchMode::All => self.keywords.iter().all(present),
        };

        picked && !self.exclude.iter().any(present)
    }

    /// Split source lines into the sample and the remaining (next) source
    pub fn split<I, S>(&self, lines: I) -> (Vec<String>, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sample = Vec::new();
        let mut next_source = Vec::new();

        for line in lines {
            let line = line.into();
            if self.matches(&line) {
                sample.push(line);
            } else {
                next_source.push(line);
            }
        }

        tracing::info!(
            sample = sample.len(),
            next_source = next_source.len(),
            mode = %self.mode,
            "selected sample"
        );

        (sample, next_source)
    }
}

fn word_in(word: &str, item: &str, lowered: &str) -> bool {
    if is_lower(word) {
        lowered.contains(word)
    } else {
        item.contains(word)
    }
}

/// True when the word has cased letters and all of them are lower case
pub fn is_lower(word: &str) -> bool {
    word.chars().any(char::is_lowercase) && !word.chars().any(char::is_uppercase)
}
