//! Tag cloud and rule selection
//!
//! Query keywords are mapped through the tag catalog into a tag cloud. Every
//! rule declaring at least one tag of the cloud is scheduled into the
//! playlist, pattern rules first, then function rules, each in catalog order.

use crate::catalog::Catalog;
use crate::scraper::Scraper;
use dedupx_core::{Error, Result};
use regex::Regex;

/// Name of the prefix capture group
pub const HEAD: &str = "head";
/// Name of the suffix capture group
pub const TAIL: &str = "tail";

/// A compiled pattern rule, anchored at the start of the residual
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    attr: String,
}

impl CompiledPattern {
    /// Compile a catalog pattern and check its named groups
    pub fn compile(pattern: &str, attr: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|source| {
            Error::InvalidPattern {
                attr: attr.to_string(),
                source,
            }
        })?;

        let names: Vec<&str> = regex.capture_names().flatten().collect();
        for group in [HEAD, attr, TAIL] {
            if !names.contains(&group) {
                return Err(Error::MissingCaptureGroup {
                    attr: attr.to_string(),
                    group: group.to_string(),
                });
            }
        }
        if let Some(extra) = names.iter().find(|n| ![HEAD, attr, TAIL].contains(*n)) {
            return Err(Error::UnexpectedCaptureGroup {
                attr: attr.to_string(),
                group: extra.to_string(),
            });
        }

        Ok(Self {
            regex,
            attr: attr.to_string(),
        })
    }

    /// Match the residual; on success return the value and the residual
    /// with the attribute span removed
    pub fn apply(&self, residual: &str) -> Option<(Option<String>, String)> {
        let caps = self.regex.captures(residual)?;
        let head = caps.name(HEAD).map_or("", |m| m.as_str());
        let tail = caps.name(TAIL).map_or("", |m| m.as_str());
        let value = caps.name(&self.attr).map(|m| m.as_str().to_string());
        Some((value, format!("{} {}", head, tail)))
    }
}

/// How a rule produces its attribute
#[derive(Debug, Clone)]
pub enum RuleKind {
    Pattern(CompiledPattern),
    Function(Scraper),
}

/// An immutable extraction rule
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    pub attr_captured: String,
    pub tags: Vec<String>,
    pub kind: RuleKind,
}

impl ExtractionRule {
    /// Apply the rule to the current residual.
    ///
    /// Never fails: a non-matching pattern yields an absent value and leaves
    /// the residual unchanged.
    pub fn apply(&self, item: &str, residual: &str) -> (Option<String>, String) {
        match &self.kind {
            RuleKind::Pattern(pattern) => pattern
                .apply(residual)
                .unwrap_or_else(|| (None, residual.to_string())),
            RuleKind::Function(scraper) => scraper.apply(item, residual),
        }
    }

    fn selected_by(&self, cloud: &TagCloud) -> bool {
        self.tags.iter().any(|tag| cloud.contains(tag))
    }
}

/// Tags active for the current query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCloud {
    tags: Vec<String>,
    supertags: usize,
}

impl TagCloud {
    /// Supertags followed by the tags of every known keyword, first-seen order
    pub fn build<S: AsRef<str>>(catalog: &Catalog, keywords: &[S]) -> Self {
        let mut tags: Vec<String> = Vec::new();
        for tag in &catalog.supertags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        let supertags = tags.len();

        for keyword in keywords {
            for tag in catalog.tags_for(keyword.as_ref()) {
                if !tags.contains(tag) {
                    tags.push(tag.clone());
                }
            }
        }

        Self { tags, supertags }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// True when no keyword contributed a tag beyond the supertags
    pub fn is_degraded(&self) -> bool {
        self.tags.len() == self.supertags
    }
}

/// A compiled catalog: every rule, ready to be selected per query
#[derive(Debug, Clone)]
pub struct RuleBook {
    catalog: Catalog,
    rules: Vec<ExtractionRule>,
}

impl RuleBook {
    /// Compile all catalog rules. Malformed patterns fail here, not per item.
    pub fn new(catalog: Catalog) -> Result<Self> {
        catalog.validate()?;

        let mut rules = Vec::with_capacity(catalog.patterns.len() + catalog.functions.len());
        for record in &catalog.patterns {
            rules.push(ExtractionRule {
                attr_captured: record.attr_captured.clone(),
                tags: record.tags.clone(),
                kind: RuleKind::Pattern(CompiledPattern::compile(
                    &record.pattern,
                    &record.attr_captured,
                )?),
            });
        }
        for record in &catalog.functions {
            rules.push(ExtractionRule {
                attr_captured: record.attr_captured.clone(),
                tags: record.tags.clone(),
                kind: RuleKind::Function(record.func_name),
            });
        }

        Ok(Self { catalog, rules })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    /// Select the playlist for a set of query keywords
    pub fn select<S: AsRef<str>>(&self, keywords: &[S]) -> Playlist {
        let cloud = TagCloud::build(&self.catalog, keywords);
        let rules: Vec<ExtractionRule> = self
            .rules
            .iter()
            .filter(|rule| rule.selected_by(&cloud))
            .cloned()
            .collect();

        tracing::info!(
            tags = cloud.tags().len(),
            rules = rules.len(),
            degraded = cloud.is_degraded(),
            "selected extraction rules"
        );

        Playlist { cloud, rules }
    }
}

/// The ordered rules scheduled for one run
#[derive(Debug, Clone)]
pub struct Playlist {
    cloud: TagCloud,
    rules: Vec<ExtractionRule>,
}

impl Playlist {
    /// Compile a catalog and select its rules for the keywords in one step
    pub fn select<S: AsRef<str>>(catalog: &Catalog, keywords: &[S]) -> Result<Self> {
        Ok(RuleBook::new(catalog.clone())?.select(keywords))
    }

    pub fn cloud(&self) -> &TagCloud {
        &self.cloud
    }

    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    pub fn is_degraded(&self) -> bool {
        self.cloud.is_degraded()
    }

    /// Captured attribute names in rule order, without repeats
    pub fn attributes(&self) -> Vec<&str> {
        let mut attrs: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !attrs.contains(&rule.attr_captured.as_str()) {
                attrs.push(&rule.attr_captured);
            }
        }
        attrs
    }
}
