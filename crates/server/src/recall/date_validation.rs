//! Revocation date checks
//!
//! Three independent checks run before any sentence is classified:
//! 1. The date is not before the earliest sentence date
//! 2. The date is not inside an existing adjustment
//! 3. The date is after every existing recall and outside every
//!    fixed-term recall's exclusion window
//!
//! Every failing check contributes one message. The recall being edited
//! (if any) is never checked against itself.

use chrono::NaiveDate;
use shared_types::{
    add_days, Adjustment, CourtCase, EditContext, ExistingRecall, ValidationMessage,
};
use uuid::Uuid;

use super::ual::ual_period;

/// Run every revocation date check and collect the failures.
pub fn validate_revocation_date(
    court_cases: &[CourtCase],
    adjustments: &[Adjustment],
    existing_recalls: &[ExistingRecall],
    revocation_date: NaiveDate,
    edit_context: Option<&EditContext>,
) -> Vec<ValidationMessage> {
    let editing = edit_context.and_then(|c| c.recall_id);
    let mut messages = Vec::new();

    if earliest_sentence_date(court_cases).map_or(false, |earliest| revocation_date < earliest) {
        messages.push(ValidationMessage::revocation_before_sentence_date());
    }

    if adjustments_under_consideration(adjustments, editing).any(|a| a.covers(revocation_date)) {
        messages.push(ValidationMessage::revocation_inside_adjustment());
    }

    let recalls: Vec<&ExistingRecall> = existing_recalls
        .iter()
        .filter(|r| Some(r.recall_id) != editing)
        .collect();

    if recalls.iter().any(|r| revocation_date <= r.revocation_date) {
        messages.push(ValidationMessage::revocation_not_after_existing_recall());
    }

    let inside_fixed_term = recalls
        .iter()
        .filter_map(|r| ftr_exclusion_window(r))
        .any(|(start, end)| start <= revocation_date && revocation_date < end);
    if inside_fixed_term {
        messages.push(ValidationMessage::revocation_inside_fixed_term());
    }

    messages
}

/// Earliest conviction (or offence start) date across every sentence.
pub fn earliest_sentence_date(court_cases: &[CourtCase]) -> Option<NaiveDate> {
    court_cases
        .iter()
        .flat_map(|c| c.sentences.iter())
        .filter_map(|s| s.sentence_date())
        .min()
}

fn adjustments_under_consideration(
    adjustments: &[Adjustment],
    editing: Option<Uuid>,
) -> impl Iterator<Item = &Adjustment> {
    adjustments
        .iter()
        .filter(move |a| !editing.map_or(false, |id| a.is_linked_to(id)))
}

/// Day a fixed-term recall's exclusion window starts.
///
/// Return-to-custody date when the prisoner was unlawfully at large;
/// revocation date when no return-to-custody date is recorded (already in
/// custody); otherwise the day after revocation.
pub fn ftr_reference_date(recall: &ExistingRecall) -> NaiveDate {
    match recall.return_to_custody_date {
        Some(returned) if ual_period(recall.revocation_date, returned).is_some() => returned,
        None => recall.revocation_date,
        Some(_) => add_days(recall.revocation_date, 1),
    }
}

/// Half-open `[start, end)` window covered by a fixed-term recall.
/// `None` for recall types without a fixed term.
pub fn ftr_exclusion_window(recall: &ExistingRecall) -> Option<(NaiveDate, NaiveDate)> {
    let days = recall.recall_type.fixed_term_days()?;
    let start = ftr_reference_date(recall);
    Some((start, add_days(start, u64::from(days))))
}
