//! Deduplication run
//!
//! One batch run over a source file:
//!
//! 1. read the source and split it by the keyword query;
//! 2. separate exact clones from the sample;
//! 3. select the rule playlist from the query keywords;
//! 4. extract attributes and build fingerprints;
//! 5. resolve the attribute behavior;
//! 6. compare all pairs;
//! 7. write reports and the next iteration's source and keywords.

use anyhow::Result;
use dedupx_core::{partition, Error, Query, SearchMode};
use dedupx_extract::{Catalog, Extractor, Fingerprinter, Lemmatizer, RuleBook, StopWords};
use dedupx_similarity::{AttributeBehavior, CompareMode, SimilarityEngine, DEFAULT_THRESHOLD};
use dedupx_storage::{
    load_catalog, load_stopwords, read_lines, source_number, ReportStem, ReportWriter, TextEncoding,
};
use std::path::PathBuf;

/// Default reports directory
pub const DEFAULT_REPORTS_DIR: &str = "csv_reports";

/// Default directory for the next iteration's source files
pub const DEFAULT_SOURCES_DIR: &str = "csv_sources";

/// Configuration of one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source_file: PathBuf,
    pub mode: SearchMode,
    pub keywords: Vec<String>,
    pub exclude: Vec<String>,
    pub threshold: f64,
    /// Catalog artifact; the builtin catalog when absent
    pub catalog: Option<PathBuf>,
    /// Extra stop words file
    pub stopwords: Option<PathBuf>,
    pub strong: Vec<String>,
    pub grouped: Vec<String>,
    pub ignore: Vec<String>,
    pub reports_dir: PathBuf,
    pub sources_dir: PathBuf,
    /// Encoding of the source file and of every CSV output
    pub encoding: TextEncoding,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source_file: PathBuf::new(),
            mode: SearchMode::default(),
            keywords: Vec::new(),
            exclude: Vec::new(),
            threshold: DEFAULT_THRESHOLD,
            catalog: None,
            stopwords: None,
            strong: Vec::new(),
            grouped: Vec::new(),
            ignore: Vec::new(),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            sources_dir: PathBuf::from(DEFAULT_SOURCES_DIR),
            encoding: TextEncoding::default(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> dedupx_core::Result<()> {
        if self.keywords.is_empty() {
            return Err(Error::InvalidConfig("at least one keyword is required".to_string()));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidConfig(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Behavior preset from the command line
    pub fn preset(&self) -> AttributeBehavior {
        let mut behavior = AttributeBehavior::new();
        for (attrs, mode) in [
            (&self.strong, CompareMode::Strong),
            (&self.grouped, CompareMode::Grouped),
            (&self.ignore, CompareMode::Ignore),
        ] {
            for attr in attrs {
                behavior.set(attr.as_str(), mode);
            }
        }
        behavior
    }

    fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => load_catalog(path),
            None => Ok(Catalog::builtin()),
        }
    }

    fn load_stopwords(&self) -> Result<StopWords> {
        let mut stopwords = StopWords::default();
        if let Some(path) = &self.stopwords {
            stopwords.extend(load_stopwords(path)?);
        }
        Ok(stopwords)
    }
}

/// What a run produced
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub selected: usize,
    pub clone_lines: usize,
    pub parsed: usize,
    pub pairs: usize,
    pub next_source: usize,
    pub degraded: bool,
    pub reports: Vec<PathBuf>,
}

/// Run the whole pipeline.
///
/// `resolve_behavior` receives the attributes captured by the selected
/// playlist and the preset restricted to them, and returns the final
/// behavior (usually by prompting for the rest).
pub fn run<F>(config: &RunConfig, lemmatizer: &dyn Lemmatizer, resolve_behavior: F) -> Result<RunSummary>
where
    F: FnOnce(&[&str], &AttributeBehavior) -> Result<AttributeBehavior>,
{
    config.validate()?;

    let catalog = config.load_catalog()?;
    let stopwords = config.load_stopwords()?;
    let rulebook = RuleBook::new(catalog)?;

    let lines = read_lines(&config.source_file, config.encoding)?;
    let query = Query::new(config.keywords.clone(), config.exclude.clone(), config.mode);
    let (selected, next_source) = query.split(lines);

    let partition = partition(selected);
    tracing::info!(
        sample = partition.sample.len(),
        clone_groups = partition.clones.len(),
        clone_lines = partition.clone_lines(),
        "partitioned sample"
    );

    let playlist = rulebook.select(&config.keywords);
    if playlist.is_degraded() {
        tracing::warn!("no tags mapped from the query keywords, only supertag rules apply");
    }

    let fingerprinter = Fingerprinter::new(lemmatizer, &stopwords);
    let extractor = Extractor::new(&playlist);
    let records = extractor.parse(&partition.sample, &fingerprinter);

    let attrs = playlist.attributes();
    let full_preset = config.preset();
    let mut preset = AttributeBehavior::new();
    for (attr, mode) in full_preset.iter() {
        if attrs.contains(&attr) {
            preset.set(attr, mode);
        } else {
            tracing::warn!(attr, "preset attribute is not captured by the selected rules");
        }
    }

    let behavior = resolve_behavior(attrs.as_slice(), &preset)?;
    let engine = SimilarityEngine::new(behavior, config.threshold);
    let results = engine.compare(&records);

    let next_keywords = dedupx_extract::next_keywords(&next_source, lemmatizer, &stopwords);

    let stem = ReportStem::new(
        source_number(&config.source_file),
        config.mode,
        &config.keywords,
        &config.exclude,
    );
    let writer =
        ReportWriter::new(&config.reports_dir, &config.sources_dir, stem).with_encoding(config.encoding);
    let reports = vec![
        writer.write_parsed(&records, &attrs)?,
        writer.write_clones(&partition.clones)?,
        writer.write_duplicates(&results)?,
        writer.write_next_source(&next_source)?,
        writer.write_next_keywords(&next_keywords)?,
    ];

    Ok(RunSummary {
        selected: partition.sample.len() + partition.clone_lines(),
        clone_lines: partition.clone_lines(),
        parsed: records.len(),
        pairs: results.len(),
        next_source: next_source.len(),
        degraded: playlist.is_degraded(),
        reports,
    })
}
