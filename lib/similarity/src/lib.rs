//! # dedupx Similarity
//!
//! Structured pairwise similarity for parsed catalog records.
//!
//! ## Features
//!
//! - **Attribute Behavior**: Per-attribute comparison mode (strong, grouped, ignore)
//! - **Tiered Gating**: Tester kit equality, strong test, grouped test
//! - **Ratio Scoring**: Weighted Jaccard over keywords and attribute matches
//! - **Suppression**: Deterministic, non-transitive leader/follower pairing
//!
//! ## Example
//!
//! ```rust
//! use dedupx_core::{ParsedRecord, TesterKit};
//! use dedupx_similarity::{AttributeBehavior, SimilarityEngine};
//!
//! let tester: TesterKit = ["10"].into_iter().collect();
//! let a = ParsedRecord::new("Болт М10 DIN 933")
//!     .with_attribute("din", Some("933"))
//!     .with_tester(tester.clone())
//!     .with_keywords(["болт"]);
//! let b = ParsedRecord::new("болт м10 дин 933")
//!     .with_attribute("din", Some("933"))
//!     .with_tester(tester)
//!     .with_keywords(["болт"]);
//!
//! let behavior = AttributeBehavior::new().strong("din");
//! let engine = SimilarityEngine::new(behavior, 0.01);
//! let results = engine.compare(&[a, b]);
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].ratio, 1.0);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Behavior   │────>│ Pair gates  │────>│    Ratio    │
//! │  (modes)    │     │ (T, s, g)   │     │  (rayon)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌──────┴──────┐
//!                     │  Clusters   │<────│ Suppression │
//!                     │  (report)   │     │ (in order)  │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod behavior;
pub mod cluster;
pub mod engine;
pub mod score;

// Re-export main types for convenience
pub use behavior::{AttributeBehavior, CompareMode};
pub use cluster::{cluster, Cluster};
pub use engine::{SimilarityEngine, SimilarityResult, DEFAULT_THRESHOLD};
pub use score::{gate_pair, score_pair, PairScore};
