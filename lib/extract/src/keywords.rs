//! Noun keywords
//!
//! Keywords are Russian nouns in normal form. They form the keyword set of
//! a parsed record and, counted over the items left out of the sample, the
//! keyword table that seeds the next query.

use crate::lemma::{Lemmatizer, PartOfSpeech};
use crate::normalize::remove_retired_mark;
use crate::stopwords::StopWords;
use ahash::AHashMap;
use regex::Regex;
use std::sync::LazyLock;

static WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[а-яё]{3,}").expect("word pattern is valid"));

/// Noun lemmas of the Cyrillic words (3+ letters) of a text, in text order.
///
/// Words without a confident noun reading and stop words are skipped.
pub fn noun_keywords(text: &str, lemmatizer: &dyn Lemmatizer, stopwords: &StopWords) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORDS
        .find_iter(&lowered)
        .filter_map(|m| lemmatizer.normal_form(&m.as_str().replace('ё', "е"), Some(PartOfSpeech::Noun)))
        .filter(|lemma| !stopwords.contains(lemma))
        .collect()
}

/// Count keywords over items and sort by descending count, then keyword
pub fn next_keywords<I, S>(items: I, lemmatizer: &dyn Lemmatizer, stopwords: &StopWords) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: AHashMap<String, usize> = AHashMap::new();
    for item in items {
        let item = remove_retired_mark(item.as_ref());
        for keyword in noun_keywords(&item, lemmatizer, stopwords) {
            *counts.entry(keyword).or_insert(0) += 1;
        }
    }

    let mut table: Vec<(String, usize)> = counts.into_iter().collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemma::{DictionaryLemmatizer, SurfaceLemmatizer};

    #[test]
    fn test_noun_keywords_filters_short_and_stop_words() {
        let keywords = noun_keywords("Болт для М10 с гайкой, артикул ёж", &SurfaceLemmatizer, &StopWords::default());
        assert_eq!(keywords, vec!["болт", "гайкой"]);
    }

    #[test]
    fn test_noun_keywords_replaces_yo() {
        let dict = DictionaryLemmatizer::new().with_noun("елка", "елка");
        let keywords = noun_keywords("Ёлка новогодняя", &dict, &StopWords::empty());
        assert_eq!(keywords, vec!["елка"]);
    }

    #[test]
    fn test_next_keywords_sorted_by_count() {
        let items = ["Гайка М8", "Шайба 10", "Гайка М10_НЕ_ИСП", "Шайба гровер", "Анкер"];
        let table = next_keywords(items, &SurfaceLemmatizer, &StopWords::default());
        assert_eq!(
            table,
            vec![
                ("гайка".to_string(), 2),
                ("шайба".to_string(), 2),
                ("анкер".to_string(), 1),
                ("гровер".to_string(), 1),
            ]
        );
    }
}
