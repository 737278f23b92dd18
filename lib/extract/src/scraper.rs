//! Function-based extraction rules
//!
//! Some attributes are not cleanly isolable by a single pattern: a plating
//! is recognized from a fuzzy set of markers anywhere in the item, a strength
//! class needs whitespace boundary checks. Each capability is a variant of
//! [`Scraper`] and is referenced from the catalog by its stable identifier.

use dedupx_core::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Registered extraction capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scraper {
    /// Plating or material of a fastener, normalized to a short code
    #[serde(rename = "fastener_plating", alias = "get_fastener_plating")]
    FastenerPlating,
    /// Strength class of a fastener, normalized to a dotted value
    #[serde(rename = "fastener_class", alias = "get_fastener_class")]
    FastenerClass,
}

impl Scraper {
    pub const ALL: [Scraper; 2] = [Scraper::FastenerPlating, Scraper::FastenerClass];

    /// Stable identifier stored in the catalog
    pub fn id(&self) -> &'static str {
        match self {
            Scraper::FastenerPlating => "fastener_plating",
            Scraper::FastenerClass => "fastener_class",
        }
    }

    /// Run the capability on an item.
    ///
    /// `item` is the original catalog line, `residual` is what earlier rules
    /// left of it. Returns the captured value and the new residual.
    pub fn apply(&self, item: &str, residual: &str) -> (Option<String>, String) {
        match self {
            Scraper::FastenerPlating => fastener_plating(item, residual),
            Scraper::FastenerClass => fastener_class(residual),
        }
    }
}

impl fmt::Display for Scraper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Scraper {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let id = s.strip_prefix("get_").unwrap_or(s);
        Scraper::ALL
            .into_iter()
            .find(|scraper| scraper.id() == id)
            .ok_or_else(|| Error::InvalidConfig(format!("unknown extraction function: {}", s)))
    }
}

const ZINC: &[&str] = &["цинк", "zinc", "zn", " оц ", " оц.", " ц "];

// Standards and features that in practice come zinc plated
const IMPLIED_ZINC: &[&str] = &[
    "din", "iso", "гост", "анкер", "самоконтр", "стопор", "насеч", "фланец", "фланц", "бурт",
];

/// First matching class wins
const PLATINGS: &[(&str, &[&str])] = &[
    ("ZN", ZINC),
    ("A1", &["а1", "a1"]),
    ("A2", &["а2", "a2"]),
    ("A4", &["а4", "a4"]),
    ("SS", &["нерж"]),
    ("ST", &["ч/м", "б/п", "без покр"]),
    ("BR", &["латун"]),
    ("PA", &["полиам"]),
    ("ZN", IMPLIED_ZINC),
];

const PLATING_FRAGMENTS: &[&str] = &[
    "цинк", "zinc", "оц.", "ч/м", "б/п", "а2", "a2", "а4", "a4", "нерж", "латун", "никел",
    "полиам", "стал", "покрыт", "plat",
];

const PLATING_WORDS: &[&str] = &["zn", "оц", "ц", "без", "ni"];

fn fastener_plating(item: &str, residual: &str) -> (Option<String>, String) {
    // Padded so that whole-word markers also match at the line edges
    let haystack = format!(" {} ", item.to_lowercase());

    let plating = PLATINGS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| haystack.contains(m)))
        .map(|(code, _)| code.to_string());

    let cleaned: Vec<&str> = residual
        .split_whitespace()
        .filter(|word| {
            let word = word.to_lowercase();
            !PLATING_FRAGMENTS.iter().any(|f| word.contains(f))
                && !PLATING_WORDS.iter().any(|w| word == *w)
        })
        .collect();

    (plating, cleaned.join(" "))
}

static CLASS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<head>.*?\s)(?:класс|кл\.?)?\s*(?:пр\.?)?\s*(?P<class>(?:[3-689]|10|12)[.,]\d)(?P<tail>\s.*)$",
    )
    .expect("strength class pattern is valid")
});

fn fastener_class(residual: &str) -> (Option<String>, String) {
    let padded = format!(" {} ", residual);

    match CLASS_PATTERN.captures(&padded) {
        Some(caps) => {
            let class = caps["class"].replace(',', ".");
            let rest = format!("{} {}", &caps["head"], &caps["tail"]);
            (Some(class), rest.trim().to_string())
        }
        None => (None, residual.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plating_zinc_variants() {
        for item in ["Болт М10 цинк", "болт м10 оц", "Bolt M10 ZN", "Гайка М8 оц. кл.8"] {
            let (plating, _) = Scraper::FastenerPlating.apply(item, item);
            assert_eq!(plating.as_deref(), Some("ZN"), "item: {}", item);
        }
    }

    #[test]
    fn test_plating_stainless_and_others() {
        let cases = [
            ("Болт М10 А2", "A2"),
            ("Винт нерж. М5", "SS"),
            ("Шайба М8 латунная", "BR"),
            ("Болт М12 б/п", "ST"),
            ("Гайка полиамид М6", "PA"),
        ];
        for (item, expected) in cases {
            let (plating, _) = Scraper::FastenerPlating.apply(item, item);
            assert_eq!(plating.as_deref(), Some(expected), "item: {}", item);
        }
    }

    #[test]
    fn test_plating_implied_by_standard() {
        let (plating, _) = Scraper::FastenerPlating.apply("Болт DIN 933 М10", "Болт М10");
        assert_eq!(plating.as_deref(), Some("ZN"));

        let (plating, _) = Scraper::FastenerPlating.apply("Болт М10", "Болт М10");
        assert_eq!(plating, None);
    }

    #[test]
    fn test_plating_cleans_residual() {
        let (_, residual) =
            Scraper::FastenerPlating.apply("Болт М10 оц", "Болт М10 оц покрытие Zn");
        assert_eq!(residual, "Болт М10");
    }

    #[test]
    fn test_class_captured_and_removed() {
        let (class, residual) = Scraper::FastenerClass.apply("", "Болт М10х50 кл.пр. 8,8 цинк");
        assert_eq!(class.as_deref(), Some("8.8"));
        assert_eq!(residual, "Болт М10х50   цинк".trim());
        assert!(!residual.contains("8"));
    }

    #[test]
    fn test_class_at_line_end() {
        let (class, residual) = Scraper::FastenerClass.apply("", "Гайка М12 10.9");
        assert_eq!(class.as_deref(), Some("10.9"));
        assert_eq!(residual, "Гайка М12");
    }

    #[test]
    fn test_class_requires_boundaries() {
        let (class, residual) = Scraper::FastenerClass.apply("", "Болт М10х1,25");
        assert_eq!(class, None);
        assert_eq!(residual, "Болт М10х1,25");
    }

    #[test]
    fn test_scraper_ids() {
        assert_eq!("fastener_class".parse::<Scraper>().unwrap(), Scraper::FastenerClass);
        assert_eq!("get_fastener_plating".parse::<Scraper>().unwrap(), Scraper::FastenerPlating);
        assert!("get_something_else".parse::<Scraper>().is_err());

        let parsed: Scraper = serde_json::from_str("\"get_fastener_class\"").unwrap();
        assert_eq!(parsed, Scraper::FastenerClass);
        assert!(serde_json::from_str::<Scraper>("\"unknown\"").is_err());
    }
}
