//! Fingerprint builder
//!
//! Derives the two signatures of a residual string:
//!
//! - the **tester kit**: numeric sequences, Latin words of two or more
//!   letters and, in degraded mode, capitalized Cyrillic "extras" (brands,
//!   abbreviations). Single Latin letters (`D` for diameter, `x` for times)
//!   are noise and never enter the kit.
//! - the **keyword set**: noun lemmas minus lower-cased extras, so a proper
//!   noun is not counted twice.

use crate::keywords::noun_keywords;
use crate::lemma::Lemmatizer;
use crate::stopwords::StopWords;
use dedupx_core::{KeywordSet, TesterKit};
use regex::Regex;
use std::sync::LazyLock;

// Optional kilo/mega prefix before a title-cased word
static EXTRAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[км]?[А-Я][А-Яа-яё]*").expect("extras pattern is valid"));

static TESTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.,]+|[a-z]{2,}").expect("tester pattern is valid"));

/// Tester kit and keyword set of one residual
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fingerprint {
    pub tester: TesterKit,
    pub keywords: KeywordSet,
}

/// Builds fingerprints with an injected lemmatizer and stop-word set
pub struct Fingerprinter<'a> {
    lemmatizer: &'a dyn Lemmatizer,
    stopwords: &'a StopWords,
}

impl<'a> Fingerprinter<'a> {
    pub fn new(lemmatizer: &'a dyn Lemmatizer, stopwords: &'a StopWords) -> Self {
        Self { lemmatizer, stopwords }
    }

    /// Build the fingerprint of a residual.
    ///
    /// `degraded` is true when rule selection fell back to supertags only;
    /// extras are collected only then.
    pub fn build(&self, residual: &str, degraded: bool) -> Fingerprint {
        let extras: Vec<&str> = if degraded {
            EXTRAS.find_iter(residual).map(|m| m.as_str()).collect()
        } else {
            Vec::new()
        };

        let lowered = residual.to_lowercase();
        let mut tester: TesterKit = TESTER.find_iter(&lowered).map(|m| m.as_str()).collect();
        for extra in &extras {
            tester.insert(*extra);
        }

        let lowered_extras: Vec<String> = extras.iter().map(|e| e.to_lowercase()).collect();
        let keywords: KeywordSet = noun_keywords(residual, self.lemmatizer, self.stopwords)
            .into_iter()
            .filter(|kw| !lowered_extras.contains(kw))
            .collect();

        Fingerprint { tester, keywords }
    }
}
