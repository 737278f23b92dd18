// Configuration artifacts: rule catalog, lemma dictionary, extra stop words
use anyhow::{Context, Result};
use atomicwrites::{AllowOverwrite, AtomicFile};
use dedupx_extract::{Catalog, DictionaryLemmatizer};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write a file atomically (temp file + rename)
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    AtomicFile::new(path, AllowOverwrite)
        .write(|f| f.write_all(data))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Load and validate a catalog artifact
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog = Catalog::from_json(&json)
        .with_context(|| format!("invalid catalog {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        tags = catalog.tags.len(),
        patterns = catalog.patterns.len(),
        functions = catalog.functions.len(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Save a catalog artifact; it is validated first so a broken catalog never lands on disk
pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    catalog.validate()?;
    let json = catalog.to_json_pretty()?;
    write_atomic(path.as_ref(), json.as_bytes())?;
    tracing::info!(path = %path.as_ref().display(), "saved catalog");
    Ok(())
}

/// Load a JSON lemma dictionary
pub fn load_lemmas<P: AsRef<Path>>(path: P) -> Result<DictionaryLemmatizer> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read lemma dictionary {}", path.display()))?;
    let dictionary = DictionaryLemmatizer::from_json(&json)
        .with_context(|| format!("invalid lemma dictionary {}", path.display()))?;

    tracing::info!(path = %path.display(), words = dictionary.len(), "loaded lemma dictionary");
    Ok(dictionary)
}

/// Load extra stop words, one per line; `#` starts a comment line
pub fn load_stopwords<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read stop words {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
