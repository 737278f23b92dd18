//! Attribute extraction engine
//!
//! Runs the playlist over an item. Each rule sees only the residual left by
//! the rules before it, so rule order is significant: standard codes must be
//! stripped before the strength-class rule could mistake them for a class.

use crate::fingerprint::Fingerprinter;
use crate::normalize::remove_retired_mark;
use crate::rule::Playlist;
use ahash::AHashMap;
use dedupx_core::ParsedRecord;

/// Attributes captured from one item and the text no rule claimed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub attributes: AHashMap<String, Option<String>>,
    pub residual: String,
}

/// Applies a playlist to catalog items
pub struct Extractor<'a> {
    playlist: &'a Playlist,
}

impl<'a> Extractor<'a> {
    pub fn new(playlist: &'a Playlist) -> Self {
        Self { playlist }
    }

    pub fn playlist(&self) -> &Playlist {
        self.playlist
    }

    /// Extract attributes from an item
    pub fn extract(&self, item: &str) -> Extraction {
        let mut residual = remove_retired_mark(item);
        let mut attributes = AHashMap::with_capacity(self.playlist.rules().len());

        for rule in self.playlist.rules() {
            let (value, rest) = rule.apply(item, &residual);
            tracing::trace!(attr = %rule.attr_captured, value = ?value, "rule applied");
            attributes.insert(rule.attr_captured.clone(), value);
            residual = rest;
        }

        Extraction { attributes, residual }
    }

    /// Extract and fingerprint every item, keeping sample order
    pub fn parse<S: AsRef<str>>(&self, items: &[S], fingerprinter: &Fingerprinter<'_>) -> Vec<ParsedRecord> {
        let degraded = self.playlist.is_degraded();

        let records: Vec<ParsedRecord> = items
            .iter()
            .map(|item| {
                let item = item.as_ref();
                let Extraction { attributes, residual } = self.extract(item);
                let fingerprint = fingerprinter.build(&residual, degraded);
                tracing::debug!(item, residual = %residual, "parsed item");

                ParsedRecord {
                    item: item.to_string(),
                    attributes,
                    tester: fingerprint.tester,
                    keywords: fingerprint.keywords,
                }
            })
            .collect();

        tracing::info!(records = records.len(), degraded, "parsed sample");
        records
    }
}
