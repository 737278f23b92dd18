//! Lemmatizer seam
//!
//! Morphological analysis is an external capability. The fingerprint builder
//! only depends on the [`Lemmatizer`] trait; callers inject an
//! implementation, usually wrapped in a [`CachedLemmatizer`].

use ahash::AHashMap;
use dedupx_core::Result;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Analyses scoring at or below this are ignored when a part of speech is requested
pub const CONFIDENCE_FLOOR: f32 = 0.1;

/// Part of speech of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    #[serde(rename = "NOUN")]
    Noun,
    #[serde(rename = "ADJF")]
    Adjective,
    #[serde(rename = "VERB")]
    Verb,
    #[serde(other)]
    Other,
}

/// One morphological reading of a word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub normal_form: String,
    pub pos: PartOfSpeech,
    #[serde(default = "default_score")]
    pub score: f32,
}

fn default_score() -> f32 {
    1.0
}

impl Analysis {
    pub fn new(normal_form: impl Into<String>, pos: PartOfSpeech, score: f32) -> Self {
        Self {
            normal_form: normal_form.into(),
            pos,
            score,
        }
    }
}

/// Normalizes words to lemmas
pub trait Lemmatizer: Send + Sync {
    /// All readings of a word, most probable first. Empty when unknown.
    fn analyze(&self, word: &str) -> Vec<Analysis>;

    /// Normal form of a word, optionally constrained to a part of speech.
    ///
    /// Without `pos` the most probable reading wins. With `pos` the first
    /// reading of that part of speech scoring above [`CONFIDENCE_FLOOR`] wins.
    fn normal_form(&self, word: &str, pos: Option<PartOfSpeech>) -> Option<String> {
        let analyses = self.analyze(word);
        match pos {
            None => analyses.into_iter().next().map(|a| a.normal_form),
            Some(pos) => analyses
                .into_iter()
                .find(|a| a.pos == pos && a.score > CONFIDENCE_FLOOR)
                .map(|a| a.normal_form),
        }
    }
}

impl<L: Lemmatizer + ?Sized> Lemmatizer for &L {
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        (**self).analyze(word)
    }

    fn normal_form(&self, word: &str, pos: Option<PartOfSpeech>) -> Option<String> {
        (**self).normal_form(word, pos)
    }
}

impl<L: Lemmatizer + ?Sized> Lemmatizer for Box<L> {
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        (**self).analyze(word)
    }

    fn normal_form(&self, word: &str, pos: Option<PartOfSpeech>) -> Option<String> {
        (**self).normal_form(word, pos)
    }
}

/// Memoizing wrapper around another lemmatizer
pub struct CachedLemmatizer<L> {
    inner: L,
    cache: RwLock<AHashMap<(String, Option<PartOfSpeech>), Option<String>>>,
}

impl<L: Lemmatizer> CachedLemmatizer<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Number of memoized lookups
    pub fn cached(&self) -> usize {
        self.cache.read().len()
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Lemmatizer> Lemmatizer for CachedLemmatizer<L> {
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        self.inner.analyze(word)
    }

    fn normal_form(&self, word: &str, pos: Option<PartOfSpeech>) -> Option<String> {
        let key = (word.to_string(), pos);
        if let Some(hit) = self.cache.read().get(&key) {
            return hit.clone();
        }

        let lemma = self.inner.normal_form(word, pos);
        self.cache.write().insert(key, lemma.clone());
        lemma
    }
}

/// Table-driven lemmatizer: word to analyses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DictionaryLemmatizer {
    entries: AHashMap<String, Vec<Analysis>>,
}

impl DictionaryLemmatizer {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON object mapping each word form to its analyses
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, word: impl Into<String>, analysis: Analysis) {
        self.entries.entry(word.into()).or_default().push(analysis);
    }

    /// Register a word form as a noun reading of a lemma
    #[must_use]
    pub fn with_noun(mut self, word: &str, lemma: &str) -> Self {
        self.insert(word, Analysis::new(lemma, PartOfSpeech::Noun, 1.0));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        self.entries.get(word).cloned().unwrap_or_default()
    }
}

/// Treats every word as a noun that is its own lemma
///
/// Used when no morphological dictionary is available: keywords then only
/// match on identical word forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceLemmatizer;

impl Lemmatizer for SurfaceLemmatizer {
    fn analyze(&self, word: &str) -> Vec<Analysis> {
        vec![Analysis::new(word, PartOfSpeech::Noun, 1.0)]
    }
}
