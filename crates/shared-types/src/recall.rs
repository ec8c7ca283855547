//! Recall engine input types.
//!
//! Shapes of the data supplied by the court-case, adjustments,
//! recall-history and sentence-calculation collaborators. Field names
//! follow the collaborators' camelCase JSON.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recall_type::RecallType;

/// Sentences of this length or longer are "twelve months or more".
pub const TWELVE_MONTHS_IN_DAYS: u32 = 365;

/// Add calendar days, saturating at the end of the supported calendar.
pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

/// Subtract calendar days, saturating at the start of the supported calendar.
pub fn sub_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}

// ─── Sentences ─────────────────────────────────────────────────

/// Sentence classification reported by the court-case service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentenceClassification {
    Standard,
    Extended,
    Sopc,
    Indeterminate,
    Botus,
    Dto,
    Fine,
    Civil,
    Legacy,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Sentence {
    pub sentence_id: Uuid,
    #[serde(default)]
    pub classification: Option<SentenceClassification>,
    /// Absent for sentences recorded before sentence types were captured.
    #[serde(default)]
    pub sentence_type_code: Option<String>,
    #[serde(default)]
    pub conviction_date: Option<NaiveDate>,
    #[serde(default)]
    pub offence_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub sentence_length_days: Option<u32>,
    #[serde(default)]
    pub unadjusted_crd: Option<NaiveDate>,
    #[serde(default)]
    pub unadjusted_sled: Option<NaiveDate>,
    #[serde(default)]
    pub unadjusted_sed: Option<NaiveDate>,
    #[serde(default = "default_recallable")]
    pub is_recallable: bool,
}

fn default_recallable() -> bool {
    true
}

impl Sentence {
    /// Standard Determinate Sentence. A missing classification is not SDS.
    pub fn is_sds(&self) -> bool {
        self.classification == Some(SentenceClassification::Standard)
    }

    /// Recorded without a sentence type code.
    pub fn is_legacy(&self) -> bool {
        self.sentence_type_code
            .as_deref()
            .map_or(true, |code| code.trim().is_empty())
    }

    /// Conviction date, falling back to the offence start date.
    pub fn sentence_date(&self) -> Option<NaiveDate> {
        self.conviction_date.or(self.offence_start_date)
    }

    /// Twelve months or more. An unknown length counts as under twelve months.
    pub fn is_twelve_months_or_more(&self) -> bool {
        self.sentence_length_days
            .map_or(false, |days| days >= TWELVE_MONTHS_IN_DAYS)
    }

    /// Unadjusted licence expiry: SLED, or SED when no SLED is recorded.
    pub fn unadjusted_expiry(&self) -> Option<NaiveDate> {
        self.unadjusted_sled.or(self.unadjusted_sed)
    }
}

// ─── Court cases ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourtCaseStatus {
    Active,
    Inactive,
    Draft,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CourtCase {
    pub case_id: Uuid,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub court_name: Option<String>,
    #[serde(default)]
    pub court_code: Option<String>,
    pub status: CourtCaseStatus,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

impl CourtCase {
    pub fn is_active(&self) -> bool {
        self.status == CourtCaseStatus::Active
    }

    /// At least one sentence that has not been marked non-recallable.
    pub fn has_recallable_sentences(&self) -> bool {
        self.sentences.iter().any(|s| s.is_recallable)
    }

    /// Reference for display, falling back to the case identifier.
    pub fn display_reference(&self) -> String {
        self.reference
            .clone()
            .unwrap_or_else(|| self.case_id.to_string())
    }
}

// ─── Adjustments ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentType {
    UnlawfullyAtLarge,
    Remand,
    LawfullyAtLarge,
    #[serde(other)]
    Other,
}

/// Sub-type of an unlawfully-at-large adjustment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UalType {
    Recall,
    Escape,
    SentencedInAbsence,
    ImmigrationDetention,
    #[serde(other)]
    Other,
}

/// A dated adjustment over the interval `[from_date, to_date)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub id: Uuid,
    pub adjustment_type: AdjustmentType,
    #[serde(default)]
    pub ual_type: Option<UalType>,
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    /// An adjustment missing either date covers and overlaps nothing.
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    #[serde(default)]
    pub recall_id: Option<Uuid>,
}

impl Adjustment {
    /// Owned by the recall system: a UAL adjustment of sub-type `RECALL`.
    pub fn is_recall_ual(&self) -> bool {
        self.adjustment_type == AdjustmentType::UnlawfullyAtLarge
            && self.ual_type == Some(UalType::Recall)
    }

    /// Blocks creation of a new UAL period when it overlaps one.
    pub fn is_relevant(&self) -> bool {
        match self.adjustment_type {
            AdjustmentType::Remand | AdjustmentType::LawfullyAtLarge => true,
            AdjustmentType::UnlawfullyAtLarge => !self.is_recall_ual(),
            AdjustmentType::Other => false,
        }
    }

    /// `from_date <= date < to_date`. Covers nothing unless both dates are
    /// recorded.
    pub fn covers(&self, date: NaiveDate) -> bool {
        match (self.from_date, self.to_date) {
            (Some(from), Some(to)) => from <= date && date < to,
            _ => false,
        }
    }

    /// Whether `[from_date, to_date)` shares a day with the inclusive range
    /// `first..=last`.
    pub fn overlaps(&self, first: NaiveDate, last: NaiveDate) -> bool {
        match (self.from_date, self.to_date) {
            (Some(from), Some(to)) => from <= last && first < to,
            _ => false,
        }
    }

    pub fn is_linked_to(&self, recall_id: Uuid) -> bool {
        self.recall_id == Some(recall_id)
    }
}

// ─── Existing recalls ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExistingRecall {
    pub recall_id: Uuid,
    pub revocation_date: NaiveDate,
    #[serde(default)]
    pub return_to_custody_date: Option<NaiveDate>,
    pub recall_type: RecallType,
    #[serde(default)]
    pub sentence_ids: Vec<Uuid>,
    #[serde(default)]
    pub court_case_ids: Vec<Uuid>,
}

// ─── Validation & context ──────────────────────────────────────

/// A message from the sentence-calculation validation pass, or one raised
/// by the engine's own date checks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ValidationMessage {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

/// Context of the journey the caller is in.
///
/// `recall_id` is set when an existing recall is being edited; its own
/// adjustments and revocation date are then not treated as conflicts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EditContext {
    #[serde(default)]
    pub recall_id: Option<Uuid>,
    #[serde(default)]
    pub revocation_date: Option<NaiveDate>,
    #[serde(default)]
    pub return_to_custody_date: Option<NaiveDate>,
}

impl EditContext {
    pub fn editing(recall_id: Uuid) -> Self {
        Self {
            recall_id: Some(recall_id),
            ..Self::default()
        }
    }

    pub fn with_revocation_date(mut self, date: NaiveDate) -> Self {
        self.revocation_date = Some(date);
        self
    }

    pub fn with_return_to_custody_date(mut self, date: NaiveDate) -> Self {
        self.return_to_custody_date = Some(date);
        self
    }
}

/// Per-sentence unadjusted release dates from the calculation service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SentenceReleaseDates {
    pub sentence_id: Uuid,
    #[serde(default)]
    pub unadjusted_crd: Option<NaiveDate>,
    #[serde(default)]
    pub unadjusted_sled: Option<NaiveDate>,
    #[serde(default)]
    pub unadjusted_sed: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CalculationBreakdown {
    #[serde(default)]
    pub sentences: Vec<SentenceReleaseDates>,
}

impl CalculationBreakdown {
    pub fn for_sentence(&self, sentence_id: Uuid) -> Option<&SentenceReleaseDates> {
        self.sentences.iter().find(|s| s.sentence_id == sentence_id)
    }
}
