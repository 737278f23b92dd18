//! # dedupx Core
//!
//! Core library for the dedupx catalog deduplicator.
//!
//! This crate provides the fundamental data structures shared by the
//! extraction and similarity stages:
//!
//! - [`Query`] - Keyword query selecting the sample out of a source file
//! - [`partition`] - Clone partition separating byte-identical items
//! - [`ParsedRecord`] - Captured attributes plus tester kit and keyword set
//! - [`TesterKit`] - Count-sensitive multiset of mandatory tokens
//!
//! ## Example
//!
//! ```rust
//! use dedupx_core::{partition, Query, SearchMode};
//!
//! let query = Query::new(vec!["болт".to_string()], vec![], SearchMode::Any);
//! let (sample, _next) = query.split(vec!["Болт М10", "Болт М10", "Болт М12", "Гайка"]);
//!
//! let parts = partition(sample);
//! assert_eq!(parts.sample, vec!["Болт М12".to_string()]);
//! assert_eq!(parts.clones[0].count, 2);
//! ```

pub mod clones;
pub mod error;
pub mod query;
pub mod record;

pub use clones::{partition, CloneGroup, Partition};
pub use error::{Error, Result};
pub use query::{Query, SearchMode};
pub use record::{KeywordSet, ParsedRecord, TesterKit};
