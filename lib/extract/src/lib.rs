//! # dedupx Extract
//!
//! Rule-based attribute extraction for catalog items.
//!
//! ## Overview
//!
//! A versioned [`Catalog`] holds the tag catalog, pattern rules and function
//! rules. Query keywords select a [`Playlist`] of rules through the tag
//! cloud; the [`Extractor`] runs the playlist over each item, stripping every
//! recognized attribute from the residual text; the [`Fingerprinter`] turns
//! the residual into a tester kit and a keyword set.
//!
//! ## Example
//!
//! ```rust
//! use dedupx_extract::{Catalog, Extractor, Fingerprinter, RuleBook, StopWords, SurfaceLemmatizer};
//!
//! let book = RuleBook::new(Catalog::builtin()).unwrap();
//! let playlist = book.select(&["болт"]);
//!
//! let extractor = Extractor::new(&playlist);
//! let extraction = extractor.extract("Болт М10 DIN 933 цинк");
//! assert_eq!(extraction.attributes["din"].as_deref(), Some("933"));
//! assert_eq!(extraction.residual, "Болт М10");
//!
//! let stopwords = StopWords::default();
//! let fingerprinter = Fingerprinter::new(&SurfaceLemmatizer, &stopwords);
//! let records = extractor.parse(&["Болт М10 DIN 933 цинк"], &fingerprinter);
//! assert_eq!(records[0].tester.count("10"), 1);
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Keywords   │────>│  Tag cloud  │────>│  Playlist   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//! ┌─────────────┐     ┌─────────────┐     ┌──────┴──────┐
//! │ Fingerprint │<────│  Residual   │<────│  Extractor  │
//! │   (T, K)    │     │             │     │ (per item)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```

pub mod catalog;
pub mod engine;
pub mod fingerprint;
pub mod keywords;
pub mod lemma;
pub mod normalize;
pub mod rule;
pub mod scraper;
pub mod stopwords;

pub use catalog::{Catalog, FunctionRecord, PatternRecord, CATALOG_VERSION};
pub use engine::{Extraction, Extractor};
pub use fingerprint::{Fingerprint, Fingerprinter};
pub use keywords::{next_keywords, noun_keywords};
pub use lemma::{
    Analysis, CachedLemmatizer, DictionaryLemmatizer, Lemmatizer, PartOfSpeech, SurfaceLemmatizer,
    CONFIDENCE_FLOOR,
};
pub use normalize::remove_retired_mark;
pub use rule::{CompiledPattern, ExtractionRule, Playlist, RuleBook, RuleKind, TagCloud};
pub use scraper::Scraper;
pub use stopwords::StopWords;
