//! Recall eligibility assessor — 8-stage pipeline
//!
//! Pure function of its inputs:
//! 1. Validates the revocation date (short-circuits on any failure)
//! 2. Classifies every sentence and groups them by court case
//! 3. Derives the routing baseline from calculation validation messages
//! 4. Detects non-SDS sentences
//! 5. Reduces groups to SDS sentences when non-SDS sentences are present
//! 6. Rules out fixed-term recall types for the remaining sentences
//! 7. Resolves the final routing by precedence
//! 8. Assembles the EligibilityAssessment

use chrono::NaiveDate;
use shared_types::{
    Adjustment, ClassifiedSentence, CourtCase, EditContext, EligibilityAssessment,
    EligibilityReason, ExistingRecall, RecallRouting, Sentence, ValidationMessage,
};

use super::classification::{
    crds_baseline, group_cases, has_non_sds_sentences, retain_sds_sentences,
    routable_sentence_count,
};
use super::date_validation::validate_revocation_date;
use super::recall_types::invalid_recall_types;

/// Assess a proposed revocation date against a prisoner's record.
pub fn assess(
    court_cases: &[CourtCase],
    adjustments: &[Adjustment],
    existing_recalls: &[ExistingRecall],
    crds_validation_messages: &[ValidationMessage],
    revocation_date: NaiveDate,
    edit_context: Option<&EditContext>,
) -> EligibilityAssessment {
    let date_messages = validate_revocation_date(
        court_cases,
        adjustments,
        existing_recalls,
        revocation_date,
        edit_context,
    );
    if !date_messages.is_empty() {
        tracing::debug!(
            %revocation_date,
            failures = date_messages.len(),
            "Revocation date rejected"
        );
        return EligibilityAssessment::conflicting(date_messages);
    }

    let groups = group_cases(court_cases);
    let baseline = crds_baseline(crds_validation_messages);
    let has_non_sds = has_non_sds_sentences(&groups);
    let groups = if has_non_sds {
        retain_sds_sentences(groups)
    } else {
        groups
    };

    let eligible: Vec<&Sentence> = groups
        .iter()
        .flat_map(|g| g.routable.iter())
        .map(|s| &s.sentence)
        .collect();
    let has_legacy = groups
        .iter()
        .flat_map(|g| g.routable.iter())
        .any(ClassifiedSentence::is_legacy);

    let invalid = invalid_recall_types(&eligible, revocation_date);
    let eligible_sentence_count = routable_sentence_count(&groups);
    let routing = resolve_routing(baseline, eligible_sentence_count, has_non_sds, has_legacy);

    tracing::debug!(
        ?routing,
        ?baseline,
        eligible_sentence_count,
        has_non_sds,
        has_legacy,
        "Recall eligibility assessed"
    );

    EligibilityAssessment {
        routing,
        is_valid: true,
        eligible_sentence_count,
        invalid_recall_types: invalid,
        has_non_sds_sentences: has_non_sds,
        court_case_summary: groups.iter().map(|g| g.summary()).collect(),
        sentence_groups: groups,
        validation_messages: crds_validation_messages.to_vec(),
    }
}

/// Final routing, highest precedence first: a critical validation
/// failure, no eligible sentences, anything needing a person to look,
/// then the automated path.
fn resolve_routing(
    baseline: EligibilityReason,
    eligible_sentence_count: usize,
    has_non_sds: bool,
    has_legacy: bool,
) -> RecallRouting {
    match baseline.routing() {
        RecallRouting::NoSentencesForRecall => RecallRouting::NoSentencesForRecall,
        _ if eligible_sentence_count == 0 => RecallRouting::NoSentencesForRecall,
        RecallRouting::ManualReviewRequired => RecallRouting::ManualReviewRequired,
        _ if has_non_sds || has_legacy => RecallRouting::ManualReviewRequired,
        _ => RecallRouting::Normal,
    }
}
