//! `route_with_smart_filtering`: case filtering, smart override,
//! supplementary assessment and UAL proposals

use pretty_assertions::assert_eq;
use server::recall::route_with_smart_filtering;
use shared_types::{
    Adjustment, CourtCase, EditContext, EligibilityReason, RecallRouting, RecallType,
    RoutingConfig, SmartRoutingResponse, UalPeriod, UserJourney, ValidationMessage,
};

use crate::common::*;

fn smart_route(
    court_cases: &[CourtCase],
    adjustments: &[Adjustment],
    messages: &[ValidationMessage],
    edit_context: Option<&EditContext>,
    config: &RoutingConfig,
) -> SmartRoutingResponse {
    route_with_smart_filtering(
        "A1234BC",
        court_cases,
        adjustments,
        &[],
        None,
        messages,
        edit_context,
        config,
    )
}

fn recallable_and_blocked_cases() -> Vec<CourtCase> {
    vec![
        active_case("T20200001", vec![sds_sentence(Some(200), None)]),
        active_case(
            "T20200002",
            vec![non_recallable(sds_sentence(Some(200), None))],
        ),
    ]
}

#[test]
fn dropping_blocked_case_overrides_non_critical_manual_review() {
    let cases = recallable_and_blocked_cases();
    let response = smart_route(
        &cases,
        &[],
        &[non_critical_message()],
        None,
        &RoutingConfig::default(),
    );

    assert!(response.were_cases_filtered_out);
    assert!(response.smart_override_applied());
    assert_eq!(response.routing(), RecallRouting::Normal);
    assert_eq!(response.decision.eligibility, EligibilityReason::HappyPathPossible);
    assert_eq!(response.cases_to_use, vec![cases[0].clone()]);

    assert_eq!(response.session_updates.routing, RecallRouting::Normal);
    assert!(response.session_updates.smart_override_applied);
    assert!(response.session_updates.cases_filtered_out);
    assert!(!response.session_updates.manual_case_selection);
    assert_eq!(response.session_updates.active_case_count, 2);
    assert_eq!(response.session_updates.eligible_sentence_count, 1);
    assert_eq!(
        response.local_updates.filtered_out_case_references,
        vec!["T20200002".to_string()]
    );
    assert_eq!(response.local_updates.cases_to_use, response.cases_to_use);
    assert_eq!(response.next_steps.user_journey, UserJourney::AutomatedFlow);
}

#[test]
fn without_dropped_cases_manual_review_stands() {
    let cases = vec![active_case("T20200001", vec![sds_sentence(Some(200), None)])];
    let response = smart_route(
        &cases,
        &[],
        &[non_critical_message()],
        None,
        &RoutingConfig::default(),
    );

    assert!(!response.were_cases_filtered_out);
    assert!(!response.smart_override_applied());
    assert_eq!(response.routing(), RecallRouting::ManualReviewRequired);
    assert_eq!(
        response.decision.eligibility,
        EligibilityReason::NonCriticalValidationFail
    );
    assert!(response.session_updates.manual_case_selection);
    assert_eq!(response.cases_to_use, cases);
}

#[test]
fn critical_failure_is_never_overridden() {
    let cases = recallable_and_blocked_cases();
    let response = smart_route(
        &cases,
        &[],
        &[non_critical_message(), critical_message()],
        None,
        &RoutingConfig::default(),
    );

    assert!(response.were_cases_filtered_out);
    assert!(!response.smart_override_applied());
    assert_eq!(response.routing(), RecallRouting::NoSentencesForRecall);
    assert_eq!(
        response.decision.eligibility,
        EligibilityReason::CriticalValidationFail
    );
    assert_eq!(response.cases_to_use.len(), 2);
}

fn only_blocked_cases() -> Vec<CourtCase> {
    vec![active_case(
        "T20200002",
        vec![
            non_recallable(sds_sentence(Some(200), None)),
            non_recallable(extended_sentence()),
        ],
    )]
}

fn assert_cannot_proceed(response: &SmartRoutingResponse) {
    assert!(!response.smart_override_applied());
    assert_eq!(response.routing(), RecallRouting::NoSentencesForRecall);
    assert_eq!(response.session_updates.routing, RecallRouting::NoSentencesForRecall);
    assert_eq!(response.session_updates.eligible_sentence_count, 0);
    assert_eq!(response.next_steps.user_journey, UserJourney::CannotProceed);
    assert!(!response.next_steps.can_proceed_automatically);
    assert!(response.next_steps.recommended_recall_types.is_empty());
}

#[test]
fn override_does_not_fire_when_every_case_is_dropped() {
    let response = smart_route(
        &only_blocked_cases(),
        &[],
        &[non_critical_message()],
        None,
        &RoutingConfig::default(),
    );
    assert!(response.were_cases_filtered_out);
    assert_eq!(
        response.decision.eligibility,
        EligibilityReason::NonRecallable
    );
    assert_cannot_proceed(&response);
}

#[test]
fn clean_messages_with_nothing_recallable_cannot_proceed() {
    let response = smart_route(
        &only_blocked_cases(),
        &[],
        &[],
        None,
        &RoutingConfig::default(),
    );
    assert_cannot_proceed(&response);
}

#[test]
fn no_active_cases_cannot_proceed() {
    let cases = vec![inactive_case("T20180001", vec![sds_sentence(Some(200), None)])];
    let response = smart_route(&cases, &[], &[], None, &RoutingConfig::default());
    assert!(response.cases_to_use.is_empty());
    assert_cannot_proceed(&response);
}

#[test]
fn critical_failure_with_nothing_recallable_keeps_its_reason() {
    let response = smart_route(
        &only_blocked_cases(),
        &[],
        &[critical_message()],
        None,
        &RoutingConfig::default(),
    );
    assert_eq!(
        response.decision.eligibility,
        EligibilityReason::CriticalValidationFail
    );
    assert_cannot_proceed(&response);
}

#[test]
fn override_can_be_switched_off() {
    let cases = recallable_and_blocked_cases();
    let config = RoutingConfig {
        smart_override: false,
        ..RoutingConfig::default()
    };
    let response = smart_route(&cases, &[], &[non_critical_message()], None, &config);

    assert!(response.were_cases_filtered_out);
    assert_eq!(response.routing(), RecallRouting::ManualReviewRequired);
    assert_eq!(response.cases_to_use.len(), 2);
}

#[test]
fn clean_messages_route_normally() {
    let cases = vec![active_case("T20200001", vec![sds_sentence(Some(200), None)])];
    let response = smart_route(&cases, &[], &[], None, &RoutingConfig::default());
    assert_eq!(response.routing(), RecallRouting::Normal);
    assert!(!response.smart_override_applied());
    assert_eq!(
        response.next_steps.recommended_recall_types,
        vec![
            RecallType::Standard,
            RecallType::FourteenDayFixedTerm,
            RecallType::TwentyEightDayFixedTerm
        ]
    );
}

#[test]
fn only_active_cases_are_considered() {
    let cases = vec![
        active_case("T20200001", vec![sds_sentence(Some(200), None)]),
        inactive_case("T20180001", vec![sds_sentence(Some(200), None)]),
    ];
    let response = smart_route(&cases, &[], &[], None, &RoutingConfig::default());

    assert_eq!(response.session_updates.active_case_count, 1);
    assert_eq!(response.cases_to_use, vec![cases[0].clone()]);
    assert!(!response.were_cases_filtered_out);
    assert_eq!(response.local_updates.court_case_summary.len(), 1);
}

#[test]
fn no_assessment_without_a_revocation_date() {
    let cases = recallable_and_blocked_cases();
    let response = smart_route(&cases, &[], &[], None, &RoutingConfig::default());
    assert!(response.assessment.is_none());
    assert!(response.session_updates.invalid_recall_types.is_empty());
    assert_eq!(response.session_updates.ual_to_create, None);
}

#[test]
fn supplementary_assessment_does_not_change_routing() {
    let cases = recallable_and_blocked_cases();
    let context = EditContext::default().with_revocation_date(date(2024, 6, 1));
    let response = smart_route(
        &cases,
        &[],
        &[non_critical_message()],
        Some(&context),
        &RoutingConfig::default(),
    );

    let assessment = response.assessment.as_ref().unwrap();
    assert_eq!(assessment.routing, RecallRouting::ManualReviewRequired);
    assert_eq!(assessment.eligible_sentence_count, 1);
    assert_eq!(response.routing(), RecallRouting::Normal);
    assert_eq!(response.session_updates.routing, RecallRouting::Normal);
    assert_eq!(
        response.local_updates.court_case_summary,
        assessment.court_case_summary
    );
}

#[test]
fn conflicting_revocation_date_empties_local_groups_but_keeps_routing() {
    let cases = vec![active_case("T20200001", vec![sds_sentence(Some(200), None)])];
    let covering = remand(date(2024, 5, 1), Some(date(2024, 7, 1)));
    let context = EditContext::default().with_revocation_date(date(2024, 6, 1));
    let response = smart_route(
        &cases,
        &[covering],
        &[],
        Some(&context),
        &RoutingConfig::default(),
    );

    let assessment = response.assessment.as_ref().unwrap();
    assert_eq!(assessment.routing, RecallRouting::ConflictingAdjustments);
    assert!(!assessment.is_valid);
    assert!(!assessment.validation_messages.is_empty());

    assert_eq!(response.routing(), RecallRouting::Normal);
    assert_eq!(response.session_updates.routing, RecallRouting::Normal);
    assert_eq!(response.cases_to_use, cases);
    assert!(response.local_updates.sentence_groups.is_empty());
    assert!(response.local_updates.court_case_summary.is_empty());
    assert_eq!(response.session_updates.eligible_sentence_count, 0);
    assert_eq!(
        response.local_updates.validation_messages,
        assessment.validation_messages
    );
}

#[test]
fn supplementary_assessment_can_be_switched_off() {
    let cases = recallable_and_blocked_cases();
    let context = EditContext::default().with_revocation_date(date(2024, 6, 1));
    let config = RoutingConfig {
        supplementary_assessment: false,
        ..RoutingConfig::default()
    };
    let response = smart_route(&cases, &[], &[], Some(&context), &config);
    assert!(response.assessment.is_none());
}

#[test]
fn ual_period_is_proposed_between_revocation_and_return() {
    let cases = vec![active_case("T20200001", vec![sds_sentence(Some(200), None)])];
    let context = EditContext::default()
        .with_revocation_date(date(2024, 3, 1))
        .with_return_to_custody_date(date(2024, 3, 10));
    let response = smart_route(&cases, &[], &[], Some(&context), &RoutingConfig::default());

    let ual = response.session_updates.ual_to_create.unwrap();
    assert_eq!(
        ual,
        UalPeriod {
            first_day: date(2024, 3, 2),
            last_day: date(2024, 3, 9),
        }
    );
    assert_eq!(ual.days(), 8);
    assert!(response.session_updates.conflicting_adjustment_ids.is_empty());
}

#[test]
fn overlapping_remand_blocks_the_ual_period() {
    let cases = vec![active_case("T20200001", vec![sds_sentence(Some(200), None)])];
    let blocking = remand(date(2024, 3, 5), Some(date(2024, 3, 6)));
    let context = EditContext::default()
        .with_revocation_date(date(2024, 3, 1))
        .with_return_to_custody_date(date(2024, 3, 10));
    let response = smart_route(
        &cases,
        &[blocking.clone()],
        &[],
        Some(&context),
        &RoutingConfig::default(),
    );

    assert_eq!(response.session_updates.ual_to_create, None);
    assert_eq!(
        response.session_updates.conflicting_adjustment_ids,
        vec![blocking.id]
    );
}

#[test]
fn edited_recall_adjustments_do_not_block_its_own_ual() {
    let cases = vec![active_case("T20200001", vec![sds_sentence(Some(200), None)])];
    let recall = existing_recall(RecallType::Standard, date(2024, 3, 1), Some(date(2024, 3, 10)));
    let owned = Adjustment {
        recall_id: Some(recall.recall_id),
        ..remand(date(2024, 3, 2), Some(date(2024, 3, 10)))
    };
    let context = EditContext::editing(recall.recall_id)
        .with_revocation_date(date(2024, 3, 1))
        .with_return_to_custody_date(date(2024, 3, 10));
    let response = route_with_smart_filtering(
        "A1234BC",
        &cases,
        &[owned],
        &[recall],
        None,
        &[],
        Some(&context),
        &RoutingConfig::default(),
    );

    assert!(response.session_updates.ual_to_create.is_some());
    assert!(response.session_updates.conflicting_adjustment_ids.is_empty());
    let assessment = response.assessment.unwrap();
    assert!(assessment.is_valid);
}

#[test]
fn recall_owned_ual_never_blocks_a_new_period() {
    let cases = vec![active_case("T20200001", vec![sds_sentence(Some(200), None)])];
    let other_recall = uuid::Uuid::new_v4();
    let context = EditContext::default()
        .with_revocation_date(date(2024, 3, 1))
        .with_return_to_custody_date(date(2024, 3, 10));
    let response = smart_route(
        &cases,
        &[recall_ual(other_recall, date(2024, 3, 2), date(2024, 3, 10))],
        &[],
        Some(&context),
        &RoutingConfig::default(),
    );
    assert!(response.session_updates.ual_to_create.is_some());
}
