//! # dedupx
//!
//! Probable duplicate detection for free-form inventory catalogs.
//!
//! dedupx picks a sample out of a catalog by keywords, strips structured
//! attributes (standard codes, platings, strength classes, SKUs) from each
//! item with a tag-gated rule playlist, and compares the parsed items
//! pairwise under a per-attribute policy.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! cargo install dedupx
//! dedupx run csv_sources/1_source.csv any болт винт -e дюйм --strong din
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use dedupx::prelude::*;
//!
//! let rulebook = RuleBook::new(Catalog::builtin()).unwrap();
//! let playlist = rulebook.select(&["болт"]);
//!
//! let lemmatizer = SurfaceLemmatizer;
//! let stopwords = StopWords::default();
//! let fingerprinter = Fingerprinter::new(&lemmatizer, &stopwords);
//! let records = Extractor::new(&playlist).parse(
//!     &["Болт М10 DIN 933 цинк", "болт м10 дин 933 оц"],
//!     &fingerprinter,
//! );
//!
//! let behavior = AttributeBehavior::new().strong("din").grouped("fastener_plating");
//! let results = SimilarityEngine::new(behavior, DEFAULT_THRESHOLD).compare(&records);
//! assert_eq!(results[0].ratio, 1.0);
//! ```
//!
//! ## Crate Structure
//!
//! - [`dedupx-core`](https://docs.rs/dedupx-core) - Errors, query, clone partition, parsed records
//! - [`dedupx-extract`](https://docs.rs/dedupx-extract) - Rule catalog, extraction engine, fingerprints
//! - [`dedupx-similarity`](https://docs.rs/dedupx-similarity) - Attribute behavior, pair scoring, suppression
//! - [`dedupx-storage`](https://docs.rs/dedupx-storage) - Source files, catalog artifacts, CSV reports

pub mod pipeline;
pub mod prompt;

// Re-export core types
pub use dedupx_core::{
    partition, CloneGroup, Error, KeywordSet, ParsedRecord, Partition, Query, Result, SearchMode,
    TesterKit,
};

// Re-export extraction
pub use dedupx_extract::{
    next_keywords, remove_retired_mark, CachedLemmatizer, Catalog, DictionaryLemmatizer, Extractor,
    Fingerprinter, FunctionRecord, Lemmatizer, PatternRecord, Playlist, RuleBook, Scraper,
    StopWords, SurfaceLemmatizer,
};

// Re-export similarity
pub use dedupx_similarity::{
    AttributeBehavior, Cluster, CompareMode, SimilarityEngine, SimilarityResult, DEFAULT_THRESHOLD,
};

// Re-export storage
pub use dedupx_storage::{ReportStem, ReportWriter, TextEncoding};

pub use pipeline::{run, RunConfig, RunSummary};
pub use prompt::prompt_behavior;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AttributeBehavior, Catalog, CompareMode, Error, Extractor, Fingerprinter, Lemmatizer,
        ParsedRecord, Query, Result, RuleBook, SearchMode, SimilarityEngine, SimilarityResult,
        StopWords, SurfaceLemmatizer, DEFAULT_THRESHOLD,
    };
}
