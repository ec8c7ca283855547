//! Routing orchestrator
//!
//! Wraps the assessor for the two points in a recall journey where routing
//! is needed:
//! - `route`: a revocation date is known; assess and derive next steps.
//!   Any error preparing the assessment degrades to manual review.
//! - `route_with_smart_filtering`: no revocation date yet; decide from
//!   active cases and validation messages whether a recall is possible,
//!   applying the smart override when dropping non-recallable cases is
//!   what caused manual review.
//!
//! The orchestrator performs no I/O. Everything the caller should persist
//! is returned as typed update records.

use chrono::{DateTime, Utc};
use shared_types::{
    Adjustment, AppError, CalculationBreakdown, CourtCase, EditContext, EligibilityAssessment,
    EligibilityReason, ExistingRecall, LocalUpdates, NextSteps, RecallRouting, RecallType,
    RoutingConfig, RoutingDecision, RoutingRequest, RoutingResponse,
    ProcessingMetadata, SessionUpdates, SmartRoutingResponse, UserJourney, ValidationMessage,
};
use uuid::Uuid;

use super::assessor::assess;
use super::classification::{crds_baseline, group_cases, has_non_sds_sentences, routable_sentence_count};
use super::ual::proposed_ual;

// ─── Next steps ────────────────────────────────────────────────

/// Next steps for a routing. The assessment, when present, decides which
/// manual review action applies and which fixed-term recalls to offer.
pub fn next_steps(routing: RecallRouting, assessment: Option<&EligibilityAssessment>) -> NextSteps {
    let sentence_review = assessment.map_or(false, |a| {
        a.has_non_sds_sentences || a.has_legacy_sentences()
    });
    let invalid = assessment.map_or(&[][..], |a| a.invalid_recall_types.as_slice());
    build_next_steps(routing, sentence_review, invalid)
}

fn build_next_steps(
    routing: RecallRouting,
    sentence_review: bool,
    invalid_recall_types: &[RecallType],
) -> NextSteps {
    let recommended_recall_types = if routing.user_journey() == UserJourney::AutomatedFlow {
        std::iter::once(RecallType::Standard)
            .chain(
                [
                    RecallType::FourteenDayFixedTerm,
                    RecallType::TwentyEightDayFixedTerm,
                ]
                .into_iter()
                .filter(|t| !invalid_recall_types.contains(t)),
            )
            .collect()
    } else {
        Vec::new()
    };
    NextSteps {
        user_journey: routing.user_journey(),
        can_proceed_automatically: routing.can_proceed_automatically(),
        required_actions: routing.required_actions(sentence_review),
        recommended_recall_types,
    }
}

// ─── Route (revocation date known) ─────────────────────────────

/// Assess a routing request and describe the journey that follows.
///
/// Never fails: an error preparing the assessment produces a degraded
/// manual-review response with the error text in its metadata.
#[tracing::instrument(skip(request), fields(noms_id = %request.noms_id))]
pub fn route(request: RoutingRequest) -> RoutingResponse {
    let started_at = Utc::now();
    let request_id = Uuid::new_v4();
    let court_case_count = request.court_cases.len();
    let sentence_count = count_sentences(&request.court_cases);

    let assessment = match try_assess(&request) {
        Ok(assessment) => assessment,
        Err(err) => {
            return degraded_response(
                &request.noms_id,
                court_case_count,
                sentence_count,
                &err,
                started_at,
                request_id,
            );
        }
    };

    let completed_at = Utc::now();
    tracing::info!(
        routing = ?assessment.routing,
        eligible = assessment.eligible_sentence_count,
        "Recall routed"
    );

    RoutingResponse {
        noms_id: request.noms_id,
        routing: assessment.routing,
        next_steps: next_steps(assessment.routing, Some(&assessment)),
        validation_messages: assessment.validation_messages.clone(),
        metadata: ProcessingMetadata {
            request_id,
            started_at,
            completed_at,
            duration_ms: (completed_at - started_at).num_milliseconds(),
            court_case_count,
            sentence_count,
            eligible_sentence_count: assessment.eligible_sentence_count,
            error: None,
        },
        assessment: Some(assessment),
    }
}

fn try_assess(request: &RoutingRequest) -> Result<EligibilityAssessment, AppError> {
    let revocation_date = request.revocation_date.ok_or_else(|| {
        AppError::bad_request("A revocation date is required to assess recall eligibility")
    })?;
    Ok(assess(
        &request.court_cases,
        &request.adjustments,
        &request.existing_recalls,
        &request.validation_messages,
        revocation_date,
        request.edit_context.as_ref(),
    ))
}

/// Manual-review fallback used whenever routing input could not be
/// prepared.
pub(crate) fn degraded_response(
    noms_id: &str,
    court_case_count: usize,
    sentence_count: usize,
    error: &AppError,
    started_at: DateTime<Utc>,
    request_id: Uuid,
) -> RoutingResponse {
    tracing::warn!(%error, noms_id, "Recall routing degraded to manual review");
    let completed_at = Utc::now();
    let routing = RecallRouting::ManualReviewRequired;
    RoutingResponse {
        noms_id: noms_id.to_string(),
        routing,
        assessment: None,
        next_steps: next_steps(routing, None),
        validation_messages: vec![ValidationMessage::unsupported_sentence_type(
            "Recall eligibility could not be assessed automatically",
        )],
        metadata: ProcessingMetadata {
            request_id,
            started_at,
            completed_at,
            duration_ms: (completed_at - started_at).num_milliseconds(),
            court_case_count,
            sentence_count,
            eligible_sentence_count: 0,
            error: Some(error.to_string()),
        },
    }
}

fn count_sentences(court_cases: &[CourtCase]) -> usize {
    court_cases.iter().map(|c| c.sentences.len()).sum()
}

// ─── Smart routing (revocation date not yet known) ─────────────

/// Active cases split into those with recallable sentences and the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseFilterOutcome {
    pub active_cases: Vec<CourtCase>,
    pub recallable_cases: Vec<CourtCase>,
    pub dropped_cases: Vec<CourtCase>,
}

impl CaseFilterOutcome {
    pub fn were_cases_filtered_out(&self) -> bool {
        !self.dropped_cases.is_empty()
    }
}

/// Drop cases with no sentences or only non-recallable sentences.
pub fn filter_recallable_cases(active_cases: Vec<CourtCase>) -> CaseFilterOutcome {
    let (recallable_cases, dropped_cases): (Vec<_>, Vec<_>) = active_cases
        .iter()
        .cloned()
        .partition(CourtCase::has_recallable_sentences);
    CaseFilterOutcome {
        active_cases,
        recallable_cases,
        dropped_cases,
    }
}

/// Routing implied by the calculation validation messages alone.
pub fn initial_decision(messages: &[ValidationMessage]) -> RoutingDecision {
    RoutingDecision::from_reason(crds_baseline(messages))
}

/// Manual review was caused only by non-critical validation, at least
/// one case was dropped for having nothing recallable, and at least one
/// recallable case remains.
pub fn smart_override_applies(initial: &RoutingDecision, filtered: &CaseFilterOutcome) -> bool {
    initial.routing == RecallRouting::ManualReviewRequired
        && initial.eligibility == EligibilityReason::NonCriticalValidationFail
        && filtered.were_cases_filtered_out()
        && !filtered.recallable_cases.is_empty()
}

pub fn apply_smart_override(initial: RoutingDecision, filtered: &CaseFilterOutcome) -> RoutingDecision {
    if smart_override_applies(&initial, filtered) {
        RoutingDecision {
            routing: RecallRouting::Normal,
            eligibility: EligibilityReason::HappyPathPossible,
            smart_override_applied: true,
        }
    } else {
        initial
    }
}

/// With no active case left holding a recallable sentence there is
/// nothing to recall, whatever the validation messages said.
pub fn require_recallable_cases(
    decision: RoutingDecision,
    filtered: &CaseFilterOutcome,
) -> RoutingDecision {
    if filtered.recallable_cases.is_empty()
        && decision.routing != RecallRouting::NoSentencesForRecall
    {
        RoutingDecision::from_reason(EligibilityReason::NonRecallable)
    } else {
        decision
    }
}

/// Fill missing unadjusted release dates from the calculation breakdown.
pub fn enrich_with_breakdown(
    court_cases: &[CourtCase],
    breakdown: Option<&CalculationBreakdown>,
) -> Vec<CourtCase> {
    let Some(breakdown) = breakdown else {
        return court_cases.to_vec();
    };
    court_cases
        .iter()
        .cloned()
        .map(|mut court_case| {
            for sentence in &mut court_case.sentences {
                if let Some(dates) = breakdown.for_sentence(sentence.sentence_id) {
                    sentence.unadjusted_crd = sentence.unadjusted_crd.or(dates.unadjusted_crd);
                    sentence.unadjusted_sled = sentence.unadjusted_sled.or(dates.unadjusted_sled);
                    sentence.unadjusted_sed = sentence.unadjusted_sed.or(dates.unadjusted_sed);
                }
            }
            court_case
        })
        .collect()
}

/// Decide whether a recall is possible before a revocation date is known.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(skip_all, fields(noms_id = %noms_id))]
pub fn route_with_smart_filtering(
    noms_id: &str,
    court_cases: &[CourtCase],
    adjustments: &[Adjustment],
    existing_recalls: &[ExistingRecall],
    breakdown: Option<&CalculationBreakdown>,
    crds_validation_messages: &[ValidationMessage],
    edit_context: Option<&EditContext>,
    config: &RoutingConfig,
) -> SmartRoutingResponse {
    let active_cases: Vec<CourtCase> = court_cases.iter().filter(|c| c.is_active()).cloned().collect();
    let filtered = filter_recallable_cases(active_cases);

    let initial = initial_decision(crds_validation_messages);
    let decision = if config.smart_override {
        apply_smart_override(initial, &filtered)
    } else {
        initial
    };
    let decision = require_recallable_cases(decision, &filtered);
    if decision.smart_override_applied {
        tracing::info!(
            dropped = filtered.dropped_cases.len(),
            "Smart override applied: non-recallable cases were the only cause of manual review"
        );
    }

    let cases_to_use = if decision.smart_override_applied {
        filtered.recallable_cases.clone()
    } else {
        filtered.active_cases.clone()
    };

    let assessment = match edit_context.and_then(|c| c.revocation_date) {
        Some(revocation_date) if config.supplementary_assessment => {
            let enriched = enrich_with_breakdown(&cases_to_use, breakdown);
            Some(assess(
                &enriched,
                adjustments,
                existing_recalls,
                crds_validation_messages,
                revocation_date,
                edit_context,
            ))
        }
        _ => None,
    };

    let (ual_to_create, conflicting_adjustment_ids) = proposed_ual(adjustments, edit_context);
    if !conflicting_adjustment_ids.is_empty() {
        tracing::warn!(
            conflicts = conflicting_adjustment_ids.len(),
            "UAL period overlaps existing adjustments"
        );
    }

    let groups = match &assessment {
        Some(a) => a.sentence_groups.clone(),
        None => group_cases(&cases_to_use),
    };
    let has_non_sds = assessment
        .as_ref()
        .map_or_else(|| has_non_sds_sentences(&groups), |a| a.has_non_sds_sentences);
    let eligible_sentence_count = assessment
        .as_ref()
        .map_or_else(|| routable_sentence_count(&groups), |a| a.eligible_sentence_count);

    let has_legacy = groups
        .iter()
        .flat_map(|g| g.routable.iter())
        .any(|s| s.is_legacy());

    let session_updates = SessionUpdates {
        routing: decision.routing,
        eligibility: decision.eligibility,
        manual_case_selection: decision.routing == RecallRouting::ManualReviewRequired,
        cases_filtered_out: filtered.were_cases_filtered_out(),
        smart_override_applied: decision.smart_override_applied,
        active_case_count: filtered.active_cases.len(),
        eligible_sentence_count,
        invalid_recall_types: assessment
            .as_ref()
            .map(|a| a.invalid_recall_types.clone())
            .unwrap_or_default(),
        ual_to_create,
        conflicting_adjustment_ids,
    };

    let local_updates = LocalUpdates {
        cases_to_use: cases_to_use.clone(),
        filtered_out_case_references: filtered
            .dropped_cases
            .iter()
            .map(CourtCase::display_reference)
            .collect(),
        court_case_summary: groups.iter().map(|g| g.summary()).collect(),
        sentence_groups: groups,
        validation_messages: assessment
            .as_ref()
            .map(|a| a.validation_messages.clone())
            .unwrap_or_else(|| crds_validation_messages.to_vec()),
        has_non_sds_sentences: has_non_sds,
    };

    let steps = build_next_steps(
        decision.routing,
        has_non_sds || has_legacy,
        &session_updates.invalid_recall_types,
    );

    SmartRoutingResponse {
        noms_id: noms_id.to_string(),
        decision,
        were_cases_filtered_out: filtered.were_cases_filtered_out(),
        cases_to_use,
        next_steps: steps,
        assessment,
        session_updates,
        local_updates,
    }
}
