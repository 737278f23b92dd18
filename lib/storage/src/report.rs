// CSV reports of a deduplication run
use crate::artifacts::write_atomic;
use crate::encoding::TextEncoding;
use anyhow::Result;
use chrono::{DateTime, Local};
use dedupx_core::{CloneGroup, ParsedRecord, SearchMode};
use dedupx_similarity::{cluster, SimilarityResult};
use std::path::{Path, PathBuf};

/// Timestamp format used in report file names
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Keyword lists this long are not spelled out in file names
pub const MAX_STEM_KEYWORDS: usize = 6;

/// File name stem shared by the reports of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStem {
    pub n: u64,
    pub timestamp: String,
    pub mode: SearchMode,
    pub keywords: Vec<String>,
    pub exclude: Vec<String>,
}

impl ReportStem {
    pub fn new(n: u64, mode: SearchMode, keywords: &[String], exclude: &[String]) -> Self {
        Self::at(Local::now(), n, mode, keywords, exclude)
    }

    pub fn at(
        time: DateTime<Local>,
        n: u64,
        mode: SearchMode,
        keywords: &[String],
        exclude: &[String],
    ) -> Self {
        Self {
            n,
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
            mode,
            keywords: keywords.to_vec(),
            exclude: exclude.to_vec(),
        }
    }

    /// `{n}_{timestamp}_{mode}_{keywords}_ex={exclude}`
    pub fn render(&self) -> String {
        let keywords = if self.keywords.len() < MAX_STEM_KEYWORDS {
            bracketed(&self.keywords)
        } else {
            "KW_TOO_LONG".to_string()
        };
        format!(
            "{}_{}_{}_{}_ex={}",
            self.n,
            self.timestamp,
            self.mode,
            keywords,
            bracketed(&self.exclude)
        )
    }
}

fn bracketed(words: &[String]) -> String {
    let words: Vec<String> = words.iter().map(|w| w.replace(' ', "")).collect();
    format!("[{}]", words.join(","))
}

/// Ratios are printed with at least one decimal: `1.0`, `0.75`
pub fn format_ratio(ratio: f64) -> String {
    if ratio.fract() == 0.0 {
        format!("{:.1}", ratio)
    } else {
        format!("{}", ratio)
    }
}

/// Writes the reports of one run
#[derive(Debug, Clone)]
pub struct ReportWriter {
    reports_dir: PathBuf,
    sources_dir: PathBuf,
    stem: ReportStem,
    encoding: TextEncoding,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(reports_dir: P, sources_dir: Q, stem: ReportStem) -> Self {
        Self {
            reports_dir: reports_dir.as_ref().to_path_buf(),
            sources_dir: sources_dir.as_ref().to_path_buf(),
            stem,
            encoding: TextEncoding::default(),
        }
    }

    /// Encoding of every file written; UTF-8 by default
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn stem(&self) -> &ReportStem {
        &self.stem
    }

    fn report_path(&self, suffix: &str) -> PathBuf {
        self.reports_dir.join(format!("{}_{}.csv", self.stem.render(), suffix))
    }

    fn source_path(&self, name: &str) -> PathBuf {
        self.sources_dir.join(format!("{}_{}.csv", self.stem.n.saturating_add(1), name))
    }

    /// Parsed sample: item, each attribute (empty when absent), tester kit, keywords
    pub fn write_parsed(&self, records: &[ParsedRecord], attrs: &[&str]) -> Result<PathBuf> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec!["ITEM"];
        header.extend(attrs.iter().copied());
        header.extend(["TESTER", "KEYWORDS"]);
        writer.write_record(&header)?;

        for record in records {
            let mut row = vec![record.item.clone()];
            row.extend(
                attrs
                    .iter()
                    .map(|attr| record.attribute(attr).unwrap_or_default().to_string()),
            );
            row.push(record.tester.to_string());
            row.push(record.keywords.iter().cloned().collect::<Vec<_>>().join(" "));
            writer.write_record(&row)?;
        }

        let path = self.report_path(&format!("1-parsed={}", records.len()));
        self.finish(writer, &path)?;
        Ok(path)
    }

    /// `CLONE,COUNT`; the file name carries the total number of clone lines
    pub fn write_clones(&self, clones: &[CloneGroup]) -> Result<PathBuf> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["CLONE", "COUNT"])?;
        for group in clones {
            writer.write_record([group.item.as_str(), group.count.to_string().as_str()])?;
        }

        let total: usize = clones.iter().map(|g| g.count).sum();
        let path = self.report_path(&format!("2-clones={}", total));
        self.finish(writer, &path)?;
        Ok(path)
    }

    /// `ITEM1,ITEM2,RATIO` grouped by leader, best ratio first, blank row between groups
    pub fn write_duplicates(&self, results: &[SimilarityResult]) -> Result<PathBuf> {
        let mut data = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut data);
            writer.write_record(["ITEM1", "ITEM2", "RATIO"])?;
            writer.flush()?;
        }

        for group in cluster(results) {
            {
                let mut writer = csv::Writer::from_writer(&mut data);
                for (follower, ratio) in &group.followers {
                    writer.write_record([group.leader.as_str(), follower.as_str(), format_ratio(*ratio).as_str()])?;
                }
                writer.flush()?;
            }
            data.push(b'\n');
        }

        let path = self.report_path(&format!("3-duplic={}", results.len()));
        self.write(&path, data)?;
        Ok(path)
    }

    /// Items left for the next iteration, one per row, no header
    pub fn write_next_source(&self, items: &[String]) -> Result<PathBuf> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for item in items {
            writer.write_record([item])?;
        }

        let path = self.source_path("source");
        self.finish(writer, &path)?;
        Ok(path)
    }

    /// `KEYWORD,COUNT` for the next iteration's query
    pub fn write_next_keywords(&self, keywords: &[(String, usize)]) -> Result<PathBuf> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["KEYWORD", "COUNT"])?;
        for (keyword, count) in keywords {
            writer.write_record([keyword.as_str(), count.to_string().as_str()])?;
        }

        let path = self.source_path("keywords");
        self.finish(writer, &path)?;
        Ok(path)
    }

    fn finish(&self, writer: csv::Writer<Vec<u8>>, path: &Path) -> Result<()> {
        let data = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("CSV buffer error: {}", e))?;
        self.write(path, data)
    }

    fn write(&self, path: &Path, data: Vec<u8>) -> Result<()> {
        let data = match self.encoding {
            TextEncoding::Utf8 => data,
            encoding => encoding.encode(&String::from_utf8(data)?),
        };
        write_atomic(path, &data)?;
        tracing::info!(path = %path.display(), encoding = %self.encoding, "wrote report");
        Ok(())
    }
}
