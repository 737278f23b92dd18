//! Rule catalog
//!
//! The catalog is a versioned configuration artifact holding the tag
//! catalog, the pattern rules and the function rules. It is loaded once at
//! startup; editing happens offline and produces a new artifact.

use crate::rule::CompiledPattern;
use crate::scraper::Scraper;
use dedupx_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current catalog artifact version
pub const CATALOG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CATALOG_VERSION
}

/// A pattern-based extraction rule as stored in the catalog
///
/// The pattern must define exactly three named groups: `head`, the
/// attribute itself (named after `attr_captured`) and `tail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub pattern: String,
    pub attr_captured: String,
    pub tags: Vec<String>,
}

/// A function-based extraction rule as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub func_name: Scraper,
    pub attr_captured: String,
    pub tags: Vec<String>,
}

/// The full rule catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Artifact version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Tags always present in the tag cloud
    #[serde(default)]
    pub supertags: Vec<String>,

    /// Lower-case keyword to tags
    #[serde(default)]
    pub tags: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub patterns: Vec<PatternRecord>,

    #[serde(default)]
    pub functions: Vec<FunctionRecord>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: CATALOG_VERSION,
            supertags: Vec::new(),
            tags: BTreeMap::new(),
            patterns: Vec::new(),
            functions: Vec::new(),
        }
    }
}

impl Catalog {
    /// The catalog shipped with the tool: fastener standards, platings,
    /// strength classes and SKUs
    pub fn builtin() -> Self {
        let mut catalog = Catalog {
            supertags: vec!["гост".into(), "iso".into(), "артикул изделия".into()],
            ..Catalog::default()
        };

        catalog.add_tags(
            &["болт", "винт", "гайка", "шайба", "шпилька"],
            &["материал/покрытие крепежа", "класс прочности крепежа", "din"],
        );

        let patterns = [
            (r"(?i)(?P<head>.*)\b(?:din|дин)\s*(?P<din>\d+)(?P<tail>.*)", "din", "din"),
            (r"(?i)(?P<head>.*)гост\s*р?\s*(?P<gost>[0-9.–-]+)(?P<tail>.*)", "gost", "гост"),
            (r"(?i)(?P<head>.*)iso\s*(?P<iso>[0-9:–-]+)(?P<tail>.*)", "iso", "iso"),
            (
                r"(?i)(?P<head>.*)\s(?:артикул|арт\.?)\s*(?P<sku>.+)(?P<tail>)",
                "sku",
                "артикул изделия",
            ),
        ];
        for (pattern, attr, tag) in patterns {
            catalog.patterns.push(PatternRecord {
                pattern: pattern.to_string(),
                attr_captured: attr.to_string(),
                tags: vec![tag.to_string()],
            });
        }

        catalog.functions.push(FunctionRecord {
            func_name: Scraper::FastenerPlating,
            attr_captured: "fastener_plating".to_string(),
            tags: vec!["материал/покрытие крепежа".to_string()],
        });
        catalog.functions.push(FunctionRecord {
            func_name: Scraper::FastenerClass,
            attr_captured: "fastener_class".to_string(),
            tags: vec!["класс прочности крепежа".to_string()],
        });

        catalog
    }

    /// Parse and validate a catalog artifact
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the version and compile every pattern once
    pub fn validate(&self) -> Result<()> {
        if self.version != CATALOG_VERSION {
            return Err(Error::UnsupportedCatalogVersion(self.version));
        }
        for record in &self.patterns {
            CompiledPattern::compile(&record.pattern, &record.attr_captured)?;
        }
        Ok(())
    }

    /// Map every keyword to every tag, skipping pairs already present
    pub fn add_tags<K, T>(&mut self, keywords: &[K], tags: &[T])
    where
        K: AsRef<str>,
        T: AsRef<str>,
    {
        for keyword in keywords {
            let entry = self.tags.entry(keyword.as_ref().to_lowercase()).or_default();
            for tag in tags {
                let tag = tag.as_ref();
                if !entry.iter().any(|t| t == tag) {
                    entry.push(tag.to_string());
                }
            }
        }
    }

    /// Append a pattern rule after checking it compiles with the required groups
    pub fn add_pattern(&mut self, record: PatternRecord) -> Result<()> {
        CompiledPattern::compile(&record.pattern, &record.attr_captured)?;
        self.patterns.push(record);
        Ok(())
    }

    pub fn add_function(&mut self, record: FunctionRecord) {
        self.functions.push(record);
    }

    /// Tags mapped from a keyword (case-insensitive)
    pub fn tags_for(&self, keyword: &str) -> &[String] {
        self.tags
            .get(&keyword.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.supertags.len(), 3);
        assert_eq!(catalog.patterns.len(), 4);
        assert_eq!(catalog.functions.len(), 2);
        assert_eq!(catalog.tags_for("Болт").len(), 3);
    }

    #[test]
    fn test_json_roundtrip_keeps_rules() {
        let catalog = Catalog::builtin();
        let json = catalog.to_json_pretty().unwrap();
        let loaded = Catalog::from_json(&json).unwrap();
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_missing_group_is_fatal_at_load() {
        let json = r#"{
            "version": 1,
            "patterns": [
                {"pattern": "(?P<head>.*)din\\s*(?P<din>\\d+)", "attr_captured": "din", "tags": ["din"]}
            ]
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, Error::MissingCaptureGroup { ref group, .. } if group == "tail"));
    }

    #[test]
    fn test_unknown_function_is_fatal_at_load() {
        let json = r#"{
            "functions": [
                {"func_name": "get_color", "attr_captured": "color", "tags": ["paint"]}
            ]
        }"#;
        assert!(matches!(Catalog::from_json(json), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_unsupported_version() {
        let json = r#"{"version": 7}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(Error::UnsupportedCatalogVersion(7))
        ));
    }

    #[test]
    fn test_add_tags_deduplicates() {
        let mut catalog = Catalog::default();
        catalog.add_tags(&["Анкер"], &["din", "din", "анкер"]);
        catalog.add_tags(&["анкер"], &["din"]);
        assert_eq!(catalog.tags_for("анкер"), &["din".to_string(), "анкер".to_string()]);
    }

    #[test]
    fn test_add_pattern_rejects_bad_regex() {
        let mut catalog = Catalog::default();
        let record = PatternRecord {
            pattern: "(?P<head>.*)(?P<x>[)(?P<tail>.*)".to_string(),
            attr_captured: "x".to_string(),
            tags: vec![],
        };
        assert!(matches!(catalog.add_pattern(record), Err(Error::InvalidPattern { .. })));
        assert!(catalog.patterns.is_empty());
    }
}
