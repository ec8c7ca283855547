//! Sentence classification and final routing precedence

use pretty_assertions::assert_eq;
use server::recall::assess;
use shared_types::{EligibilityReason, RecallRoute, RecallRouting};

use crate::common::*;

#[test]
fn assessing_twice_gives_equal_results() {
    let cases = vec![
        active_case("T20200001", vec![sds_sentence(Some(730), Some(date(2025, 1, 1)))]),
        active_case("T20200002", vec![extended_sentence(), legacy_sentence()]),
    ];
    let adjustments = vec![remand(date(2019, 1, 1), Some(date(2019, 6, 1)))];
    let messages = vec![non_critical_message()];

    let first = assess(&cases, &adjustments, &[], &messages, date(2024, 6, 1), None);
    let second = assess(&cases, &adjustments, &[], &messages, date(2024, 6, 1), None);
    assert_eq!(first, second);
}

#[test]
fn all_sds_and_clean_is_normal() {
    let cases = vec![
        active_case("T20200001", vec![sds_sentence(Some(200), None)]),
        active_case("T20200002", vec![sds_sentence(Some(90), None), sds_sentence(None, None)]),
    ];
    let assessment = assess(&cases, &[], &[], &[], date(2024, 6, 1), None);
    assert_eq!(assessment.routing, RecallRouting::Normal);
    assert!(assessment.is_valid);
    assert!(!assessment.has_non_sds_sentences);
    assert_eq!(assessment.eligible_sentence_count, 3);
}

#[test]
fn non_sds_sentence_forces_manual_review() {
    let cases = vec![active_case(
        "T20200001",
        vec![sds_sentence(Some(200), None), extended_sentence()],
    )];

    for messages in [vec![], vec![non_critical_message()]] {
        let assessment = assess(&cases, &[], &[], &messages, date(2024, 6, 1), None);
        assert_eq!(assessment.routing, RecallRouting::ManualReviewRequired);
        assert!(assessment.has_non_sds_sentences);
        assert_eq!(assessment.eligible_sentence_count, 1);
    }
}

#[test]
fn sds_filtering_drops_cases_left_without_sentences() {
    let cases = vec![
        active_case("T20200001", vec![sds_sentence(Some(200), None)]),
        active_case("T20200002", vec![extended_sentence()]),
    ];
    let assessment = assess(&cases, &[], &[], &[], date(2024, 6, 1), None);
    assert_eq!(assessment.court_case_summary.len(), 1);
    assert_eq!(assessment.court_case_summary[0].case_reference, "T20200001");
}

#[test]
fn only_non_sds_sentences_leave_nothing_to_recall() {
    let cases = vec![active_case("T20200001", vec![extended_sentence()])];
    let assessment = assess(&cases, &[], &[], &[], date(2024, 6, 1), None);
    assert!(assessment.has_non_sds_sentences);
    assert_eq!(assessment.eligible_sentence_count, 0);
    assert_eq!(assessment.routing, RecallRouting::NoSentencesForRecall);
}

#[test]
fn empty_or_blocked_cases_mean_no_sentences_for_recall() {
    let cases = vec![
        active_case("T20200001", vec![]),
        active_case(
            "T20200002",
            vec![
                non_recallable(sds_sentence(Some(200), None)),
                non_recallable(extended_sentence()),
            ],
        ),
    ];
    let assessment = assess(&cases, &[], &[], &[], date(2024, 6, 1), None);
    assert_eq!(assessment.routing, RecallRouting::NoSentencesForRecall);
    assert_eq!(assessment.eligible_sentence_count, 0);
    assert!(assessment.is_valid);
}

#[test]
fn critical_validation_blocks_clean_sentences() {
    let cases = vec![active_case("T20200001", vec![sds_sentence(Some(200), None)])];
    let assessment = assess(&cases, &[], &[], &[critical_message()], date(2024, 6, 1), None);
    assert_eq!(assessment.routing, RecallRouting::NoSentencesForRecall);
    assert_eq!(assessment.eligible_sentence_count, 1);
    assert_eq!(assessment.validation_messages, vec![critical_message()]);
}

#[test]
fn non_critical_validation_forces_manual_review() {
    let cases = vec![active_case("T20200001", vec![sds_sentence(Some(200), None)])];
    let assessment = assess(
        &cases,
        &[],
        &[],
        &[non_critical_message()],
        date(2024, 6, 1),
        None,
    );
    assert_eq!(assessment.routing, RecallRouting::ManualReviewRequired);
}

// Legacy sentences are routable for grouping and counting, yet their
// presence alone sends the recall to manual review.
#[test]
fn legacy_sentence_is_counted_as_routable_but_needs_manual_review() {
    let cases = vec![active_case(
        "T20200001",
        vec![sds_sentence(Some(200), None), legacy_sentence()],
    )];
    let assessment = assess(&cases, &[], &[], &[], date(2024, 6, 1), None);

    assert_eq!(assessment.eligible_sentence_count, 2);
    assert!(!assessment.has_non_sds_sentences);
    assert!(assessment.has_legacy_sentences());
    assert_eq!(assessment.routing, RecallRouting::ManualReviewRequired);

    let legacy = assessment.sentence_groups[0]
        .routable
        .iter()
        .find(|s| s.is_legacy())
        .unwrap();
    assert_eq!(legacy.reason, EligibilityReason::LegacySentence);
    assert_eq!(legacy.recall_route, RecallRoute::Manual);
    assert!(legacy.recall_route.is_routable());
}

#[test]
fn non_recallable_sentence_is_summarised_but_not_eligible() {
    let cases = vec![active_case(
        "T20200001",
        vec![
            sds_sentence(Some(200), None),
            non_recallable(sds_sentence(Some(200), None)),
        ],
    )];
    let assessment = assess(&cases, &[], &[], &[], date(2024, 6, 1), None);
    assert_eq!(assessment.eligible_sentence_count, 1);

    let summary = &assessment.court_case_summary[0];
    assert_eq!(summary.case_reference, "T20200001");
    assert_eq!(summary.court_name.as_deref(), Some("Birmingham Crown Court"));
    assert!(summary.has_eligible_sentences);
    assert_eq!(summary.sentence_count, 2);
}

#[test]
fn missing_optional_fields_never_panic() {
    let bare = shared_types::Sentence {
        classification: None,
        sentence_type_code: None,
        conviction_date: None,
        offence_start_date: None,
        sentence_length_days: None,
        ..sds_sentence(None, None)
    };
    let cases = vec![active_case("T20200001", vec![bare])];
    let assessment = assess(&cases, &[], &[], &[], date(2024, 6, 1), None);
    assert!(assessment.is_valid);
    assert_eq!(assessment.routing, RecallRouting::NoSentencesForRecall);
}
