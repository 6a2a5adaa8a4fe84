use crate::{ActionMap, ArtifactSpec, Extractor, Vocabulary};
use proptest::prelude::*;

type Expected = Vec<(Option<&'static str>, Vec<&'static str>)>;

fn connector_vocabulary() -> Vocabulary {
    Vocabulary::new(vec![
        ArtifactSpec::new("S", Some("ScheduleState"), ["Defined", "InProgress", "Implemented", "Completed"]),
        ArtifactSpec::new("DE", Some("State"), ["Open", "Fixed", "Closed"]),
        ArtifactSpec::new("TA", Some("State"), ["Completed", "Vindicated"]),
        ArtifactSpec::new("TC", Some("State"), ["Replicated"]),
    ])
    .unwrap()
}

fn as_pairs(map: &ActionMap) -> Vec<(Option<&str>, Vec<&str>)> {
    map.iter().map(|e| (e.action.as_deref(), e.artifacts.iter().map(String::as_str).collect())).collect()
}

#[test]
fn commit_message_examples() {
    // Array of (message, expected entries in order)
    let cases: Vec<(&str, Expected)> = vec![
        ("Completed the work of 12 people in 1 hour", vec![]),
        ("STP9321 this is not a reference to a Completed DE15 artifact", vec![]),
        ("USB-2  not a valid artifact reference", vec![]),
        ("S123 Completed", vec![(Some("Completed"), vec!["S123"])]),
        ("DE103 when will this ever be fixed?", vec![(None, vec!["DE103"])]),
        ("DE123 Fixed and you can bank on it", vec![(Some("Fixed"), vec!["DE123"])]),
        ("S123 Completed Fixed TA123 S123", vec![(Some("Completed"), vec!["S123"]), (Some("Fixed"), vec!["TA123", "S123"])]),
        ("S1234 S3421 a wo0ookies work is never done...", vec![(None, vec!["S1234", "S3421"])]),
        ("TA123 TA345 Fixodent with molars behind", vec![(None, vec!["TA123", "TA345"])]),
        ("Fixed DE1054 4324 lower case chaos KG324", vec![(Some("Fixed"), vec!["DE1054"])]),
        ("Completed S3245", vec![(Some("Completed"), vec!["S3245"])]),
        ("Replicated DE123 DE832", vec![(Some("Replicated"), vec!["DE123", "DE832"])]),
        (
            "Fixed DE532 Completed S342 for your peace of mind",
            vec![(Some("Fixed"), vec!["DE532"]), (Some("Completed"), vec!["S342"])],
        ),
        ("Replicated DE123 DE832 Defiled S174", vec![(Some("Replicated"), vec!["DE123", "DE832"]), (None, vec!["S174"])]),
        (
            "Replicated DE234 DE329 Barfek S324 S432",
            vec![(Some("Replicated"), vec!["DE234", "DE329"]), (None, vec!["S324", "S432"])],
        ),
        (
            "Completed S432 Fixed DE549 Completed TA617 now go home",
            vec![(Some("Completed"), vec!["S432", "TA617"]), (Some("Fixed"), vec!["DE549"])],
        ),
        (
            "DE543 Completed DE322 Fixed S235 Completed overnight delivery",
            vec![(Some("Completed"), vec!["DE543", "S235"]), (Some("Fixed"), vec!["DE322"])],
        ),
        (
            "Completed Fixed DE1 Completed S1",
            vec![(Some("Completed"), vec!["S1"]), (Some("Fixed"), vec!["DE1"])],
        ),
        (
            "Fixed Completed S1 Fixed DE2 DE3",
            vec![(Some("Fixed"), vec!["DE2", "DE3"]), (Some("Completed"), vec!["S1"])],
        ),
        ("", vec![]),
        ("   \n\t  ", vec![]),
    ];

    let extractor = Extractor::new(connector_vocabulary());
    for (message, expected) in cases {
        let map = extractor.extract(message);
        assert_eq!(as_pairs(&map), expected, "message: {message:?}");
    }
}

#[test]
fn documented_vocabulary_scenarios() {
    // Abbreviations {S, DE, TA, TC} with one flat set of recognized actions.
    let actions = ["Completed", "Fixed", "Replicated", "Implemented", "Open", "Closed"];
    let vocabulary = Vocabulary::new(
        ["S", "DE", "TA", "TC"].into_iter().map(|abbrev| ArtifactSpec::new(abbrev, None, actions)).collect(),
    )
    .unwrap();

    let map = crate::extract("DE543 Completed DE322 Fixed S235 Completed overnight delivery", &vocabulary);
    assert_eq!(as_pairs(&map), vec![(Some("Completed"), vec!["DE543", "S235"]), (Some("Fixed"), vec!["DE322"])]);

    let map = crate::extract("Replicated DE123 DE832 Defiled S174", &vocabulary);
    assert_eq!(as_pairs(&map), vec![(Some("Replicated"), vec!["DE123", "DE832"]), (None, vec!["S174"])]);

    let map = crate::extract("S123 Completed Fixed TA123 S123", &vocabulary);
    assert_eq!(as_pairs(&map), vec![(Some("Completed"), vec!["S123"]), (Some("Fixed"), vec!["TA123", "S123"])]);
}

#[test]
fn multiline_messages_tokenize_across_lines() {
    let extractor = Extractor::new(connector_vocabulary());
    let map = extractor.extract("Fixed DE1\nDE2\r\n\tCompleted\n\nS3\n\nLonger description follows.");
    assert_eq!(as_pairs(&map), vec![(Some("Fixed"), vec!["DE1", "DE2"]), (Some("Completed"), vec!["S3"])]);
}

#[test]
fn middle_abbreviation_is_not_matched_as_substring() {
    // "E" sits inside "DE"; with exact membership it must still stop the scan.
    let extractor = Extractor::new(connector_vocabulary());
    let map = extractor.extract("Fixed DE1 E55 DE2");
    assert_eq!(as_pairs(&map), vec![(Some("Fixed"), vec!["DE1"])]);
}

#[test]
fn repeated_artifacts_are_kept() {
    let extractor = Extractor::new(connector_vocabulary());
    let map = extractor.extract("Fixed DE1 DE1 Fixed DE1");
    assert_eq!(as_pairs(&map), vec![(Some("Fixed"), vec!["DE1", "DE1", "DE1"])]);
}

// --- Properties -------------------------------------------------------------

const VALID_ARTIFACTS: &[&str] = &["S12", "S7", "DE3", "DE41", "TA7", "TC1"];
const ACTIONS: &[&str] = &["Completed", "Fixed", "Replicated", "Open"];
const UNRECOGNIZED: &[&str] = &["Barfek", "Defiled", "Fixodent"];
const NOISE: &[&str] = &["the", "fix", "12", "USB-2", "wo0ookies", "now"];
const INVALID_ARTIFACTS: &[&str] = &["KG324", "XY1", "STP9321", "E55"];

fn well_formed_word() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        4 => prop::sample::select(VALID_ARTIFACTS),
        3 => prop::sample::select(ACTIONS),
        1 => prop::sample::select(UNRECOGNIZED),
        2 => prop::sample::select(NOISE),
    ]
}

fn any_word() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        9 => well_formed_word(),
        1 => prop::sample::select(INVALID_ARTIFACTS),
    ]
}

fn is_subsequence(needle: &[String], haystack: &[&str]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|n| rest.any(|h| h == n))
}

proptest! {
    #[test]
    fn extraction_is_idempotent(words in prop::collection::vec(any_word(), 0..24)) {
        let extractor = Extractor::new(connector_vocabulary());
        let message = words.join(" ");
        prop_assert_eq!(extractor.extract(&message), extractor.extract(&message));
    }

    #[test]
    fn artifacts_keep_message_order(words in prop::collection::vec(well_formed_word(), 0..24)) {
        let extractor = Extractor::new(connector_vocabulary());
        let map = extractor.extract(&words.join(" "));
        for entry in &map {
            prop_assert!(is_subsequence(&entry.artifacts, &words), "{:?} not ordered in {:?}", entry, words);
        }
    }

    #[test]
    fn every_valid_artifact_is_reported_once_per_mention(words in prop::collection::vec(well_formed_word(), 0..24)) {
        let extractor = Extractor::new(connector_vocabulary());
        let map = extractor.extract(&words.join(" "));
        let mut reported: Vec<&str> = map.artifacts().collect();
        let mut mentioned: Vec<&str> = words.iter().copied().filter(|w| VALID_ARTIFACTS.contains(w)).collect();
        reported.sort_unstable();
        mentioned.sort_unstable();
        prop_assert_eq!(reported, mentioned);
    }

    #[test]
    fn nothing_after_an_invalid_prefix_contributes(
        head in prop::collection::vec(well_formed_word(), 0..12),
        bad in prop::sample::select(INVALID_ARTIFACTS),
        tail in prop::collection::vec(any_word(), 0..12),
    ) {
        let extractor = Extractor::new(connector_vocabulary());
        let cut = format!("{} {}", head.join(" "), bad);
        let full = format!("{} {}", cut, tail.join(" "));
        prop_assert_eq!(extractor.extract(&full), extractor.extract(&cut));
    }

    #[test]
    fn actions_are_ordered_by_first_mention(words in prop::collection::vec(well_formed_word(), 0..24)) {
        let extractor = Extractor::new(connector_vocabulary());
        let map = extractor.extract(&words.join(" "));
        let first_mentions: Vec<usize> = map
            .iter()
            .filter_map(|entry| entry.action.as_deref())
            .filter_map(|action| words.iter().position(|w| *w == action))
            .collect();
        prop_assert_eq!(first_mentions.len(), map.iter().filter(|e| e.action.is_some()).count());
        prop_assert!(first_mentions.windows(2).all(|w| w[0] < w[1]), "{} out of order for {:?}", map, words);
    }

    #[test]
    fn entries_are_never_empty(words in prop::collection::vec(any_word(), 0..24)) {
        let extractor = Extractor::new(connector_vocabulary());
        let map = extractor.extract(&words.join(" "));
        for entry in &map {
            prop_assert!(!entry.artifacts.is_empty());
        }
    }

    #[test]
    fn messages_without_artifacts_yield_nothing(
        words in prop::collection::vec(prop_oneof![prop::sample::select(ACTIONS), prop::sample::select(NOISE)], 0..16),
    ) {
        let extractor = Extractor::new(connector_vocabulary());
        prop_assert!(extractor.extract(&words.join(" ")).is_empty());
    }

    #[test]
    fn whitespace_shape_is_irrelevant(
        words in prop::collection::vec(any_word(), 0..16),
        sep in prop::sample::select(&[" ", "  ", "\t", "\n", " \r\n\t "][..]),
    ) {
        let extractor = Extractor::new(connector_vocabulary());
        prop_assert_eq!(extractor.extract(&words.join(sep)), extractor.extract(&words.join(" ")));
    }
}
