// Integration tests for the co-occurrence scrape.
//
// Drives CooccurrenceEngine against canned search responses: percent
// derivation, the three-count contract, abort semantics, alone-count modes
// and repeatability.

mod common;

use common::{strings, MockSearch};
use erpscanr::analysis::Polarity;
use erpscanr::counts::{AloneCounts, CooccurrenceEngine, CountsData};
use erpscanr::error::ScrapeError;
use erpscanr::vocab::TermVocabulary;

fn vocab() -> TermVocabulary {
    TermVocabulary::new(
        strings(&["P300", "N170", "ERN"]),
        strings(&["attention", "face", "error"]),
    )
}

/// Consistent responses: every pair reports the same alone-counts.
fn consistent_search() -> MockSearch {
    let targets = [("P300", 1000), ("N170", 400), ("ERN", 250)];
    let associations = [("attention", 50_000), ("face", 30_000), ("error", 20_000)];
    let joints = [[300, 20, 10], [15, 220, 2], [40, 1, 180]];

    let mut search = MockSearch::new();
    for (t, (target, t_alone)) in targets.iter().enumerate() {
        for (a, (association, a_alone)) in associations.iter().enumerate() {
            search = search.with_pair(target, association, [joints[t][a], *t_alone, *a_alone]);
        }
    }
    search
}

// ============================================================
// Matrix contents
// ============================================================

#[tokio::test]
async fn percent_equals_numbers_over_target_count() {
    let search = consistent_search();
    let mut vocab = vocab();
    let matrix = CooccurrenceEngine::new(&search).scrape(&mut vocab).await.unwrap();

    assert_eq!(vocab.target_counts(), &[1000, 400, 250]);
    assert_eq!(vocab.association_counts(), &[50_000, 30_000, 20_000]);

    for t in 0..3 {
        for a in 0..3 {
            let expected = matrix.numbers[t][a] as f64 / vocab.target_counts()[t] as f64;
            assert_eq!(matrix.percent[t][a], Some(expected), "pair ({t}, {a})");
        }
    }
    assert_eq!(matrix.numbers[1], vec![15, 220, 2]);
}

#[tokio::test]
async fn queries_are_exact_phrase_and_in_target_major_order() {
    let search = consistent_search();
    let mut vocab = vocab();
    CooccurrenceEngine::new(&search).scrape(&mut vocab).await.unwrap();

    let calls = search.calls();
    assert_eq!(calls.len(), 9);
    assert_eq!(calls[0], "\"P300\"AND\"attention\"");
    assert_eq!(calls[1], "\"P300\"AND\"face\"");
    assert_eq!(calls[3], "\"N170\"AND\"attention\"");
    assert_eq!(calls[8], "\"ERN\"AND\"error\"");
}

#[tokio::test]
async fn zero_target_count_leaves_percent_undefined() {
    let search = MockSearch::new()
        .with_pair("P1", "vision", [0, 0, 900])
        .with_pair("P1", "attention", [0, 0, 800]);
    let mut vocab = TermVocabulary::new(strings(&["P1"]), strings(&["vision", "attention"]));
    let matrix = CooccurrenceEngine::new(&search).scrape(&mut vocab).await.unwrap();

    assert_eq!(matrix.numbers[0], vec![0, 0]);
    assert_eq!(matrix.percent[0], vec![None, None]);
}

#[tokio::test]
async fn extra_counts_are_ignored() {
    let search = MockSearch::new().with_counts("\"P300\"AND\"memory\"", &[5, 100, 200, 7]);
    let mut vocab = TermVocabulary::new(strings(&["P300"]), strings(&["memory"]));
    let matrix = CooccurrenceEngine::new(&search).scrape(&mut vocab).await.unwrap();
    assert_eq!(matrix.numbers[0][0], 5);
    assert_eq!(vocab.association_counts(), &[200]);
}

// ============================================================
// Failure semantics
// ============================================================

#[tokio::test]
async fn fewer_than_three_counts_is_malformed() {
    let search = MockSearch::new()
        .with_pair("P300", "attention", [10, 100, 1000])
        .with_counts("\"P300\"AND\"face\"", &[3, 100]);
    let mut vocab = TermVocabulary::new(strings(&["P300"]), strings(&["attention", "face"]));

    let err = CooccurrenceEngine::new(&search)
        .scrape(&mut vocab)
        .await
        .unwrap_err();

    match err {
        ScrapeError::Pair {
            target,
            association,
            source,
        } => {
            assert_eq!(target, "P300");
            assert_eq!(association, "face");
            assert!(matches!(*source, ScrapeError::MalformedResponse { .. }));
        }
        other => panic!("expected pair error, got {other:?}"),
    }

    // Counts from the pairs that did succeed are not committed
    assert_eq!(vocab.target_counts(), &[0]);
    assert_eq!(vocab.association_counts(), &[0, 0]);
}

#[tokio::test]
async fn transport_failure_aborts_remaining_pairs() {
    // No response registered for N170 / face
    let search = MockSearch::new()
        .with_pair("N170", "attention", [1, 10, 100])
        .with_pair("P300", "attention", [1, 10, 100])
        .with_pair("P300", "face", [1, 10, 100]);
    let mut vocab = TermVocabulary::new(strings(&["N170", "P300"]), strings(&["attention", "face"]));

    let err = CooccurrenceEngine::new(&search)
        .scrape(&mut vocab)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("N170 / face"), "got: {err}");
    // Nothing after the failing pair was queried
    assert_eq!(search.calls().len(), 2);
}

// ============================================================
// Alone-count modes and repeatability
// ============================================================

#[tokio::test]
async fn last_pair_wins_for_alone_counts() {
    // The endpoint reports a different P300 count for each association
    let search = MockSearch::new()
        .with_pair("P300", "attention", [10, 100, 500])
        .with_pair("P300", "memory", [20, 105, 700]);
    let mut vocab = TermVocabulary::new(strings(&["P300"]), strings(&["attention", "memory"]));
    let matrix = CooccurrenceEngine::new(&search).scrape(&mut vocab).await.unwrap();

    assert_eq!(vocab.target_counts(), &[105]);
    // Each percent uses the count reported with its own pair
    assert_eq!(matrix.percent[0][0], Some(10.0 / 100.0));
    assert_eq!(matrix.percent[0][1], Some(20.0 / 105.0));
}

#[tokio::test]
async fn dedicated_mode_counts_each_term_once() {
    let search = MockSearch::new()
        .with_counts("\"P300\"", &[120])
        .with_counts("\"attention\"", &[5000])
        .with_counts("\"memory\"", &[7000])
        .with_pair("P300", "attention", [10, 100, 500])
        .with_pair("P300", "memory", [20, 105, 700]);
    let mut vocab = TermVocabulary::new(strings(&["P300"]), strings(&["attention", "memory"]));

    let matrix = CooccurrenceEngine::new(&search)
        .with_alone_counts(AloneCounts::Dedicated)
        .scrape(&mut vocab)
        .await
        .unwrap();

    assert_eq!(vocab.target_counts(), &[120]);
    assert_eq!(vocab.association_counts(), &[5000, 7000]);
    assert_eq!(matrix.percent[0][0], Some(10.0 / 120.0));
    assert_eq!(matrix.percent[0][1], Some(20.0 / 120.0));

    let calls = search.calls();
    assert_eq!(&calls[..3], &["\"P300\"", "\"attention\"", "\"memory\""]);
}

#[tokio::test]
async fn dedicated_mode_missing_count_names_term() {
    let search = MockSearch::new().with_counts("\"P300\"", &[]);
    let mut vocab = TermVocabulary::new(strings(&["P300"]), strings(&["memory"]));
    let err = CooccurrenceEngine::new(&search)
        .with_alone_counts(AloneCounts::Dedicated)
        .scrape(&mut vocab)
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::TermCount { ref term, .. } if term == "P300"));
}

#[tokio::test]
async fn rescrape_overwrites_rather_than_accumulates() {
    let search = consistent_search();
    let mut vocab = vocab();
    let engine = CooccurrenceEngine::new(&search);

    let first = engine.scrape(&mut vocab).await.unwrap();
    let first_counts = vocab.clone();
    let second = engine.scrape(&mut vocab).await.unwrap();

    assert_eq!(first.numbers, second.numbers);
    assert_eq!(first.percent, second.percent);
    assert_eq!(first_counts, vocab);
}

// ============================================================
// Downstream summaries
// ============================================================

#[tokio::test]
async fn summaries_and_time_associations_from_scrape() {
    let search = consistent_search();
    let mut vocab = vocab();
    let matrix = CooccurrenceEngine::new(&search).scrape(&mut vocab).await.unwrap();
    let data = CountsData::new(vocab, matrix);

    assert_eq!(data.strongest_association_for("N170").unwrap().term, "face");
    assert_eq!(data.strongest_target_for("error").unwrap().term, "ERN");
    assert_eq!(data.most_studied_target().unwrap().term, "P300");
    assert_eq!(data.most_studied_association().unwrap().value, 50_000);

    let times = data.time_associations();
    // ERN is not canonically named
    assert_eq!(times.len(), 2);
    assert_eq!(times[0].associated_term, "attention");
    assert_eq!((times[0].polarity, times[0].latency_ms), (Polarity::P, 300));
    assert_eq!(times[1].associated_term, "face");
    assert_eq!((times[1].polarity, times[1].latency_ms), (Polarity::N, 170));
}

#[tokio::test]
async fn zero_count_target_still_gets_time_association() {
    let search = MockSearch::new()
        .with_pair("P50", "gating", [0, 0, 800])
        .with_pair("P50", "memory", [0, 0, 9000])
        .with_pair("P300", "gating", [2, 1000, 800])
        .with_pair("P300", "memory", [90, 1000, 9000]);
    let mut vocab = TermVocabulary::new(strings(&["P50", "P300"]), strings(&["gating", "memory"]));
    let matrix = CooccurrenceEngine::new(&search).scrape(&mut vocab).await.unwrap();
    let data = CountsData::new(vocab, matrix);

    let times = data.time_associations();
    assert_eq!(times.len(), 2);
    assert_eq!(times[0].latency_ms, 50);
    assert_eq!(times[0].associated_term, "gating");
    assert_eq!(times[1].latency_ms, 300);
    assert_eq!(times[1].associated_term, "memory");
}
