// Source files: one catalog item per line
use crate::encoding::TextEncoding;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read all items of a source file, trailing whitespace stripped
pub fn read_lines<P: AsRef<Path>>(path: P, encoding: TextEncoding) -> Result<Vec<String>> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).with_context(|| format!("failed to read source file {}", path.display()))?;
    let content = encoding
        .decode(&bytes)
        .with_context(|| format!("failed to decode source file {}", path.display()))?;

    let lines: Vec<String> = content.lines().map(|line| line.trim_end().to_string()).collect();
    tracing::info!(path = %path.display(), %encoding, lines = lines.len(), "read source file");
    Ok(lines)
}

/// Iteration number of a source file: the first number in its file name, 0 if none
pub fn source_number<P: AsRef<Path>>(path: P) -> u64 {
    let name = path
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_lines_strips_trailing_whitespace() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Болт М10 DIN 933  \r\n  Гайка М10\t\n\nШайба").unwrap();

        let lines = read_lines(file.path(), TextEncoding::Utf8).unwrap();
        assert_eq!(lines, vec!["Болт М10 DIN 933", "  Гайка М10", "", "Шайба"]);
    }

    #[test]
    fn test_read_windows_1251() {
        let mut file = NamedTempFile::new().unwrap();
        // "Болт М10\r\nГайка\n"
        file.write_all(&[0xC1, 0xEE, 0xEB, 0xF2, b' ', 0xCC, b'1', b'0', b'\r', b'\n'])
            .unwrap();
        file.write_all(&[0xC3, 0xE0, 0xE9, 0xEA, 0xE0, b'\n']).unwrap();

        let lines = read_lines(file.path(), TextEncoding::Windows1251).unwrap();
        assert_eq!(lines, vec!["Болт М10", "Гайка"]);

        let err = read_lines(file.path(), TextEncoding::Utf8).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to decode source file"));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_lines(dir.path().join("missing.txt"), TextEncoding::Utf8).is_err());
    }

    #[test]
    fn test_source_number() {
        assert_eq!(source_number("csv_sources/3_source.csv"), 3);
        assert_eq!(source_number("data/inventory12-v2.txt"), 12);
        assert_eq!(source_number("7/inventory.txt"), 0);
        assert_eq!(source_number("inventory.txt"), 0);
    }
}
