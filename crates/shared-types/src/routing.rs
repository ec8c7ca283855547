//! Routing orchestrator domain types
//!
//! Requests and responses of the routing orchestrator, the user-journey
//! state table, and the typed update records handed to the caller's
//! session storage.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::eligibility::{
    CaseSentenceGroup, CourtCaseSummary, EligibilityAssessment, EligibilityReason, RecallRouting,
};
use crate::recall::{Adjustment, CourtCase, EditContext, ExistingRecall, ValidationMessage};
use crate::recall_type::RecallType;

// ─── User journeys ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserJourney {
    AutomatedFlow,
    ManualReview,
    CannotProceed,
    ResolveConflicts,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequiredAction {
    SelectRecallType,
    ConfirmDetails,
    ReviewNonSdsSentences,
    ReviewValidationIssues,
    ContactSupport,
    ReviewAdjustments,
    SelectDifferentDate,
}

impl RecallRouting {
    pub fn user_journey(&self) -> UserJourney {
        match self {
            Self::Normal => UserJourney::AutomatedFlow,
            Self::ManualReviewRequired => UserJourney::ManualReview,
            Self::NoSentencesForRecall => UserJourney::CannotProceed,
            Self::ConflictingAdjustments => UserJourney::ResolveConflicts,
        }
    }

    pub fn can_proceed_automatically(&self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Required actions for this routing. `sentence_review` selects the
    /// sentence-level review action over the validation review for
    /// manual review.
    pub fn required_actions(&self, sentence_review: bool) -> Vec<RequiredAction> {
        match self {
            Self::Normal => vec![RequiredAction::SelectRecallType, RequiredAction::ConfirmDetails],
            Self::ManualReviewRequired if sentence_review => {
                vec![RequiredAction::ReviewNonSdsSentences]
            }
            Self::ManualReviewRequired => vec![RequiredAction::ReviewValidationIssues],
            Self::NoSentencesForRecall => vec![RequiredAction::ContactSupport],
            Self::ConflictingAdjustments => vec![
                RequiredAction::ReviewAdjustments,
                RequiredAction::SelectDifferentDate,
            ],
        }
    }
}

/// What the caller should do next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NextSteps {
    pub user_journey: UserJourney,
    pub can_proceed_automatically: bool,
    pub required_actions: Vec<RequiredAction>,
    /// Only populated for the automated flow.
    pub recommended_recall_types: Vec<RecallType>,
}

// ─── Route (revocation date known) ─────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RoutingRequest {
    pub noms_id: String,
    #[serde(default)]
    pub court_cases: Vec<CourtCase>,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
    #[serde(default)]
    pub existing_recalls: Vec<ExistingRecall>,
    #[serde(default)]
    pub validation_messages: Vec<ValidationMessage>,
    #[serde(default)]
    pub revocation_date: Option<NaiveDate>,
    #[serde(default)]
    pub edit_context: Option<EditContext>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProcessingMetadata {
    pub request_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub court_case_count: usize,
    pub sentence_count: usize,
    pub eligible_sentence_count: usize,
    /// Error text when the response is a degraded fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RoutingResponse {
    pub noms_id: String,
    pub routing: RecallRouting,
    /// Absent for degraded responses.
    pub assessment: Option<EligibilityAssessment>,
    pub next_steps: NextSteps,
    pub validation_messages: Vec<ValidationMessage>,
    pub metadata: ProcessingMetadata,
}

impl RoutingResponse {
    pub fn is_degraded(&self) -> bool {
        self.metadata.error.is_some()
    }
}

// ─── Smart routing (before a revocation date is known) ─────────

/// Routing paired with the reason that produced it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RoutingDecision {
    pub routing: RecallRouting,
    pub eligibility: EligibilityReason,
    pub smart_override_applied: bool,
}

impl RoutingDecision {
    pub fn from_reason(eligibility: EligibilityReason) -> Self {
        Self {
            routing: eligibility.routing(),
            eligibility,
            smart_override_applied: false,
        }
    }
}

/// Inclusive range of days the prisoner was unlawfully at large.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UalPeriod {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
}

impl UalPeriod {
    pub fn days(&self) -> i64 {
        (self.last_day - self.first_day).num_days() + 1
    }
}

/// Fields for the caller to persist in the recall's session record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdates {
    pub routing: RecallRouting,
    pub eligibility: EligibilityReason,
    pub manual_case_selection: bool,
    pub cases_filtered_out: bool,
    pub smart_override_applied: bool,
    pub active_case_count: usize,
    pub eligible_sentence_count: usize,
    pub invalid_recall_types: Vec<RecallType>,
    pub ual_to_create: Option<UalPeriod>,
    pub conflicting_adjustment_ids: Vec<Uuid>,
}

/// View-scoped data for the current request only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LocalUpdates {
    pub cases_to_use: Vec<CourtCase>,
    pub filtered_out_case_references: Vec<String>,
    pub court_case_summary: Vec<CourtCaseSummary>,
    pub sentence_groups: Vec<CaseSentenceGroup>,
    pub validation_messages: Vec<ValidationMessage>,
    pub has_non_sds_sentences: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SmartRoutingResponse {
    pub noms_id: String,
    pub decision: RoutingDecision,
    pub were_cases_filtered_out: bool,
    pub cases_to_use: Vec<CourtCase>,
    pub next_steps: NextSteps,
    /// Present when the edit context carried a revocation date.
    pub assessment: Option<EligibilityAssessment>,
    pub session_updates: SessionUpdates,
    pub local_updates: LocalUpdates,
}

impl SmartRoutingResponse {
    pub fn routing(&self) -> RecallRouting {
        self.decision.routing
    }

    pub fn smart_override_applied(&self) -> bool {
        self.decision.smart_override_applied
    }
}
