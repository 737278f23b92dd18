// Integration tests for dedupx
use dedupx::prelude::*;
use dedupx::{partition, run, DictionaryLemmatizer, RunConfig, TesterKit, TextEncoding};
use dedupx_extract::{PatternRecord, Playlist};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn fastener_playlist() -> Playlist {
    RuleBook::new(Catalog::builtin()).unwrap().select(&["болт"])
}

fn parse(playlist: &Playlist, items: &[&str]) -> Vec<ParsedRecord> {
    let lemmatizer = SurfaceLemmatizer;
    let stopwords = StopWords::default();
    let fingerprinter = Fingerprinter::new(&lemmatizer, &stopwords);
    Extractor::new(playlist).parse(items, &fingerprinter)
}

#[test]
fn test_case_and_spelling_variants_are_duplicates() {
    let playlist = fastener_playlist();
    let records = parse(&playlist, &["Болт М10 DIN 933 цинк", "болт м10 дин 933 оц"]);

    for record in &records {
        assert_eq!(record.attribute("din"), Some("933"));
        assert_eq!(record.attribute("fastener_plating"), Some("ZN"));
        assert_eq!(record.tester.count("10"), 1);
        assert!(record.keywords.contains("болт"));
    }

    let behavior = AttributeBehavior::new().strong("din").grouped("fastener_plating");
    let results = SimilarityEngine::new(behavior, DEFAULT_THRESHOLD).compare(&records);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].leader, "Болт М10 DIN 933 цинк");
    assert_eq!(results[0].follower, "болт м10 дин 933 оц");
    assert!(results[0].ratio > 0.0 && results[0].ratio <= 1.0);
}

#[test]
fn test_strong_attribute_absent_on_one_side_is_rejected() {
    let playlist = fastener_playlist();
    let records = parse(&playlist, &["Болт М10 DIN 933", "Болт М10"]);
    assert_eq!(records[0].attribute("din"), Some("933"));
    assert_eq!(records[1].attribute("din"), None);

    let engine = SimilarityEngine::new(AttributeBehavior::new().strong("din"), DEFAULT_THRESHOLD);
    assert!(engine.compare(&records).is_empty());

    // absent on both sides passes with no strong match
    let records = parse(&playlist, &["Болт М10 шестигранный", "Болт М10"]);
    let results = engine.compare(&records);
    assert_eq!(results.len(), 1);
    let score = dedupx_similarity::gate_pair(&records[0], &records[1], engine.behavior()).unwrap();
    assert_eq!((score.smatch, score.stotal), (0, 1));
}

#[test]
fn test_low_keyword_overlap_rejected() {
    let record = |item: &str, keywords: &[&str]| {
        ParsedRecord::new(item)
            .with_tester(TesterKit::new())
            .with_keywords(keywords.iter().copied())
    };
    let records = vec![
        record("x", &["болт", "винт", "гайка"]),
        record("y", &["болт", "шайба"]),
    ];

    let strict = SimilarityEngine::new(AttributeBehavior::new(), 0.5);
    assert!(strict.compare(&records).is_empty());

    let loose = SimilarityEngine::new(AttributeBehavior::new(), 0.2);
    assert_eq!(loose.compare(&records)[0].ratio, 0.25);
}

#[test]
fn test_similarity_is_not_transitive() {
    let record = |item: &str, keywords: &[&str]| {
        ParsedRecord::new(item)
            .with_tester(["12"].into_iter().collect::<TesterKit>())
            .with_keywords(keywords.iter().copied())
    };
    let records = vec![
        record("A", &["болт", "винт"]),
        record("B", &["болт", "винт", "гайка"]),
        record("C", &["винт", "гайка"]),
    ];

    let results = SimilarityEngine::new(AttributeBehavior::new(), 0.5).compare(&records);
    let pairs: Vec<(&str, &str)> = results
        .iter()
        .map(|r| (r.leader.as_str(), r.follower.as_str()))
        .collect();
    assert_eq!(pairs, vec![("A", "B")]);
}

#[test]
fn test_no_item_follows_twice() {
    let playlist = fastener_playlist();
    let shapes = ["шестигранный", "полная резьба", "высокопрочный", "", "крупный"];
    let items: Vec<String> = (0..30)
        .map(|i| {
            format!(
                "Болт М{} DIN 933 {} {}",
                [8, 10][i % 2],
                ["цинк", "A2", "оц"][i % 3],
                shapes[i % 5]
            )
        })
        .collect();
    let partition = partition(items);
    let records = {
        let lemmatizer = SurfaceLemmatizer;
        let stopwords = StopWords::default();
        let fingerprinter = Fingerprinter::new(&lemmatizer, &stopwords);
        Extractor::new(&playlist).parse(&partition.sample, &fingerprinter)
    };

    let engine = SimilarityEngine::new(
        AttributeBehavior::new().grouped("fastener_plating").grouped("din"),
        DEFAULT_THRESHOLD,
    );
    let results = engine.compare(&records);

    let mut followers = HashSet::new();
    for result in &results {
        assert!(followers.insert(result.follower.clone()), "{} follows twice", result.follower);
        assert!(result.ratio > DEFAULT_THRESHOLD && result.ratio <= 1.0);
    }
    for result in &results {
        assert!(!followers.contains(&result.leader));
    }
    assert_eq!(engine.compare(&records), results);
}

#[test]
fn test_clone_exclusivity() {
    let lines = vec!["Гайка М8", "Болт М8", "Гайка М8", "Шайба 8", "Гайка М8", "Шайба 8", "Винт М4"];
    let partition = partition(lines.clone());

    let sample: HashSet<&str> = partition.sample.iter().map(String::as_str).collect();
    let clones: HashSet<&str> = partition.clones.iter().map(|c| c.item.as_str()).collect();
    let distinct: HashSet<&str> = lines.iter().copied().collect();

    assert!(sample.is_disjoint(&clones));
    assert_eq!(&sample | &clones, distinct);
    assert_eq!(partition.clone_lines() + partition.sample.len(), lines.len());
}

#[test]
fn test_extraction_is_idempotent() {
    let playlist = fastener_playlist();
    let extractor = Extractor::new(&playlist);

    for item in [
        "Болт М12х60 DIN 931 кл.пр. 8.8 оцинкованный",
        "Винт ГОСТ 17473-80 М5х20 нерж. A2 арт. 77-120",
        "Шайба ISO 7089 М10",
        "",
    ] {
        assert_eq!(extractor.extract(item), extractor.extract(item));
    }
}

#[test]
fn test_tester_equality_is_symmetric_and_necessary() {
    let playlist = fastener_playlist();
    let records = parse(
        &playlist,
        &["Болт М10х50 DIN 933", "Болт М10х50 DIN 933 цинк", "Болт М10х60 DIN 933"],
    );
    let behavior = AttributeBehavior::new();

    for x in &records {
        for y in &records {
            assert_eq!(x.tester == y.tester, y.tester == x.tester);
            if x.tester != y.tester {
                assert_eq!(dedupx_similarity::score_pair(x, y, &behavior, 0.0), None);
            }
        }
    }
}

#[test]
fn test_catalog_errors_are_fatal() {
    let mut catalog = Catalog::builtin();
    catalog.patterns.push(PatternRecord {
        pattern: r"(?P<head>.*)DIN(?P<tail>.*)".to_string(),
        attr_captured: "din".to_string(),
        tags: vec!["din".to_string()],
    });
    assert!(matches!(RuleBook::new(catalog), Err(Error::MissingCaptureGroup { .. })));

    let json = r#"{"version": 1, "functions": [{"func_name": "get_fastener_size", "attr_captured": "size", "tags": []}]}"#;
    assert!(Catalog::from_json(json).is_err());
}

#[test]
fn test_degraded_playlist_uses_proper_noun_extras() {
    let playlist = RuleBook::new(Catalog::builtin()).unwrap().select(&["холодильник"]);
    assert!(playlist.is_degraded());

    let records = parse(&playlist, &["Холодильник Бирюса 10", "Холодильник Атлант 10"]);
    assert_eq!(records[0].tester.count("Бирюса"), 1);
    assert!(!records[0].keywords.contains("бирюса"));
    assert!(SimilarityEngine::default().compare(&records).is_empty());
}

#[test]
fn test_pipeline_end_to_end() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("1_source.csv");
    fs::write(
        &source,
        "Болт М10 DIN 933 цинк\n\
         болт м10 дин 933 оц\n\
         Гайка М10 DIN 934 цинк\n\
         Болт М10 DIN 933 цинк\n\
         Болт М10 DIN 933 цинк\n\
         Саморез 4,2х16 по металлу_НЕ_ИСП\n\
         Болт М8 дюймовый\n",
    )
    .unwrap();

    let config = RunConfig {
        source_file: source,
        mode: SearchMode::Any,
        keywords: vec!["болт".to_string()],
        exclude: vec!["дюйм".to_string()],
        strong: vec!["din".to_string()],
        reports_dir: dir.path().join("reports"),
        sources_dir: dir.path().join("sources"),
        ..RunConfig::default()
    };

    let lemmatizer = DictionaryLemmatizer::new().with_noun("саморез", "саморез");
    let summary = run(&config, &lemmatizer, |attrs, preset| {
        assert!(attrs.contains(&"fastener_plating"));
        assert_eq!(preset.mode("din"), Some(CompareMode::Strong));
        let mut behavior = preset.clone();
        for attr in attrs {
            if preset.mode(attr).is_none() {
                behavior.set(*attr, CompareMode::Ignore);
            }
        }
        Ok(behavior)
    })
    .unwrap();

    assert_eq!(summary.selected, 4);
    assert_eq!(summary.clone_lines, 3);
    assert_eq!(summary.parsed, 1);
    assert_eq!(summary.pairs, 0);
    assert_eq!(summary.next_source, 3);
    assert!(!summary.degraded);
    assert_eq!(summary.reports.len(), 5);
    for path in &summary.reports {
        assert!(path.exists(), "{} missing", path.display());
    }

    let clones = fs::read_to_string(&summary.reports[1]).unwrap();
    assert_eq!(clones, "CLONE,COUNT\nБолт М10 DIN 933 цинк,3\n");

    let next_source = fs::read_to_string(dir.path().join("sources").join("2_source.csv")).unwrap();
    assert_eq!(next_source.lines().count(), 3);

    let keywords = fs::read_to_string(dir.path().join("sources").join("2_keywords.csv")).unwrap();
    assert!(keywords.starts_with("KEYWORD,COUNT\n"));
    assert!(keywords.contains("саморез,1"));
}

#[test]
fn test_pipeline_windows_1251_source() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("4_source.csv");
    let encode = |text: &str| TextEncoding::Windows1251.encode(text);
    fs::write(&source, encode("Болт М10 DIN 933 цинк\nболт м10 дин 933 оц\nГайка М10\n")).unwrap();

    let config = RunConfig {
        source_file: source.clone(),
        keywords: vec!["болт".to_string()],
        strong: vec!["din".to_string()],
        grouped: vec!["fastener_plating".to_string()],
        ignore: vec!["gost".to_string(), "iso".to_string(), "sku".to_string(), "fastener_class".to_string()],
        reports_dir: dir.path().join("reports"),
        sources_dir: dir.path().join("sources"),
        encoding: TextEncoding::Windows1251,
        ..RunConfig::default()
    };

    let summary = run(&config, &SurfaceLemmatizer, |_, preset| Ok(preset.clone())).unwrap();
    assert_eq!(summary.selected, 2);
    assert_eq!(summary.pairs, 1);

    let duplicates = fs::read(&summary.reports[2]).unwrap();
    assert!(String::from_utf8(duplicates.clone()).is_err());
    assert_eq!(
        TextEncoding::Windows1251.decode(&duplicates).unwrap(),
        "ITEM1,ITEM2,RATIO\nБолт М10 DIN 933 цинк,болт м10 дин 933 оц,1.0\n\n"
    );

    let next_source = fs::read(dir.path().join("sources").join("5_source.csv")).unwrap();
    assert_eq!(next_source, encode("Гайка М10\n"));

    let utf8 = RunConfig { encoding: TextEncoding::Utf8, ..config };
    assert!(run(&utf8, &SurfaceLemmatizer, |_, preset| Ok(preset.clone())).is_err());
}
