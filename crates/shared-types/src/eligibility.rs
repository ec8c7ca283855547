//! Eligibility assessment domain types
//!
//! Output of the recall eligibility assessor: the routing verdict, the
//! per-case sentence groups it was derived from, and the recall types
//! ruled out for the proposed revocation date.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recall::{Sentence, ValidationMessage};
use crate::recall_type::RecallType;

// ─── Routing ───────────────────────────────────────────────────

/// The routing verdict. Exactly one is produced per assessment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecallRouting {
    Normal,
    ManualReviewRequired,
    NoSentencesForRecall,
    ConflictingAdjustments,
}

/// How a single sentence can be taken through the recall journey.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecallRoute {
    Normal,
    Manual,
    NotPossible,
}

impl RecallRoute {
    /// Anything but `NotPossible`. This is the grouping notion of
    /// eligibility: a manual-only sentence is routable even though no
    /// recall type has been confirmed as permissible for it.
    pub fn is_routable(&self) -> bool {
        !matches!(self, Self::NotPossible)
    }
}

// ─── Eligibility reasons ───────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityReason {
    HappyPathPossible,
    NonSds,
    LegacySentence,
    NonRecallable,
    CriticalValidationFail,
    NonCriticalValidationFail,
}

impl EligibilityReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::HappyPathPossible => "Sentence can be recalled automatically",
            Self::NonSds => "Sentence is not a standard determinate sentence",
            Self::LegacySentence => "Sentence was recorded without a sentence type",
            Self::NonRecallable => "Sentence cannot be recalled",
            Self::CriticalValidationFail => "Sentence calculation has a critical validation error",
            Self::NonCriticalValidationFail => "Sentence calculation has validation issues to review",
        }
    }

    pub fn recall_route(&self) -> RecallRoute {
        match self {
            Self::HappyPathPossible => RecallRoute::Normal,
            Self::NonSds | Self::LegacySentence | Self::NonCriticalValidationFail => {
                RecallRoute::Manual
            }
            Self::NonRecallable | Self::CriticalValidationFail => RecallRoute::NotPossible,
        }
    }

    /// Routing implied by a reason on its own.
    pub fn routing(&self) -> RecallRouting {
        match self.recall_route() {
            RecallRoute::Normal => RecallRouting::Normal,
            RecallRoute::Manual => RecallRouting::ManualReviewRequired,
            RecallRoute::NotPossible => RecallRouting::NoSentencesForRecall,
        }
    }
}

// ─── Sentence groups ───────────────────────────────────────────

/// A sentence with the reason and route the assessor gave it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedSentence {
    pub sentence: Sentence,
    pub reason: EligibilityReason,
    pub recall_route: RecallRoute,
}

impl ClassifiedSentence {
    pub fn new(sentence: Sentence, reason: EligibilityReason) -> Self {
        Self {
            sentence,
            recall_route: reason.recall_route(),
            reason,
        }
    }

    pub fn is_sds(&self) -> bool {
        self.sentence.is_sds()
    }

    pub fn is_legacy(&self) -> bool {
        self.reason == EligibilityReason::LegacySentence
    }
}

/// Sentences of one court case, partitioned by [`RecallRoute::is_routable`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CaseSentenceGroup {
    pub case_id: Uuid,
    pub case_reference: String,
    pub court_name: Option<String>,
    pub court_code: Option<String>,
    pub routable: Vec<ClassifiedSentence>,
    pub unroutable: Vec<ClassifiedSentence>,
}

impl CaseSentenceGroup {
    pub fn sentences(&self) -> impl Iterator<Item = &ClassifiedSentence> {
        self.routable.iter().chain(self.unroutable.iter())
    }

    pub fn sentence_count(&self) -> usize {
        self.routable.len() + self.unroutable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentence_count() == 0
    }

    pub fn summary(&self) -> CourtCaseSummary {
        CourtCaseSummary {
            case_id: self.case_id,
            case_reference: self.case_reference.clone(),
            court_name: self.court_name.clone(),
            has_eligible_sentences: !self.routable.is_empty(),
            sentence_count: self.sentence_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CourtCaseSummary {
    pub case_id: Uuid,
    pub case_reference: String,
    pub court_name: Option<String>,
    pub has_eligible_sentences: bool,
    pub sentence_count: usize,
}

// ─── Assessment ────────────────────────────────────────────────

/// Result of assessing a proposed revocation date.
///
/// `is_valid` is false exactly when `routing` is `ConflictingAdjustments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EligibilityAssessment {
    pub routing: RecallRouting,
    pub is_valid: bool,
    /// Routable sentences left after SDS filtering.
    pub eligible_sentence_count: usize,
    pub invalid_recall_types: Vec<RecallType>,
    pub has_non_sds_sentences: bool,
    pub court_case_summary: Vec<CourtCaseSummary>,
    pub sentence_groups: Vec<CaseSentenceGroup>,
    pub validation_messages: Vec<ValidationMessage>,
}

impl EligibilityAssessment {
    /// An assessment rejected by the date checks.
    pub fn conflicting(validation_messages: Vec<ValidationMessage>) -> Self {
        Self {
            routing: RecallRouting::ConflictingAdjustments,
            is_valid: false,
            eligible_sentence_count: 0,
            invalid_recall_types: Vec::new(),
            has_non_sds_sentences: false,
            court_case_summary: Vec::new(),
            sentence_groups: Vec::new(),
            validation_messages,
        }
    }

    pub fn is_recall_type_valid(&self, recall_type: RecallType) -> bool {
        !self.invalid_recall_types.contains(&recall_type)
    }

    pub fn has_legacy_sentences(&self) -> bool {
        self.sentence_groups
            .iter()
            .flat_map(|g| g.routable.iter())
            .any(ClassifiedSentence::is_legacy)
    }
}
