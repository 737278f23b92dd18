//! Retired-mark normalization
//!
//! Catalog systems append a "not in use" sentinel to retired entries and a
//! "duplicate" sentinel to known doubles, often truncated by field length
//! limits. All of them are stripped in a single substitution pass.

use regex::Regex;
use std::sync::LazyLock;

/// Sentinel appended to retired entries
pub const RETIRED_MARK: &str = "_НЕ_ИСПОЛЬЗУЕТСЯ";

/// Sentinel appended to known duplicates
pub const DUPLICATE_MARK: &str = "_ДУБЛЬ";

static MARKS: LazyLock<Regex> = LazyLock::new(|| {
    let chars: Vec<char> = RETIRED_MARK.chars().collect();

    // Longest first so the alternation prefers the full mark
    let mut alternatives: Vec<String> = (2..=chars.len())
        .rev()
        .map(|len| regex::escape(&chars[..len].iter().collect::<String>()))
        .collect();
    alternatives.push(regex::escape(DUPLICATE_MARK));

    Regex::new(&alternatives.join("|")).expect("retired mark pattern is valid")
});

/// Remove retired and duplicate marks (and their truncations) from an item
pub fn remove_retired_mark(item: &str) -> String {
    MARKS.replace_all(item, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_mark_removed() {
        assert_eq!(remove_retired_mark("Болт М10_НЕ_ИСПОЛЬЗУЕТСЯ"), "Болт М10");
    }

    #[test]
    fn test_truncated_marks_removed() {
        assert_eq!(remove_retired_mark("Болт М10_НЕ_ИСП"), "Болт М10");
        assert_eq!(remove_retired_mark("Болт М10_НЕ"), "Болт М10");
        assert_eq!(remove_retired_mark("Болт М10_Н"), "Болт М10");
    }

    #[test]
    fn test_duplicate_mark_removed() {
        assert_eq!(remove_retired_mark("Гайка М8_ДУБЛЬ"), "Гайка М8");
    }

    #[test]
    fn test_plain_item_untouched() {
        assert_eq!(remove_retired_mark("Шайба 10 DIN 125"), "Шайба 10 DIN 125");
        // A lone underscore is not a mark
        assert_eq!(remove_retired_mark("Шайба_10"), "Шайба_10");
    }
}
