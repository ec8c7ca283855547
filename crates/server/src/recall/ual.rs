//! Unlawfully-at-large periods
//!
//! A prisoner who is not returned to custody on the day after revocation
//! was unlawfully at large from the day after revocation up to the day
//! before their return. A recall-owned UAL adjustment can only be created
//! for that period when no relevant adjustment already overlaps it.

use chrono::NaiveDate;
use shared_types::{add_days, sub_days, Adjustment, EditContext, UalPeriod};
use uuid::Uuid;

/// The UAL period between revocation and return to custody, if any.
pub fn ual_period(revocation_date: NaiveDate, return_to_custody_date: NaiveDate) -> Option<UalPeriod> {
    let first_day = add_days(revocation_date, 1);
    let last_day = sub_days(return_to_custody_date, 1);
    (first_day <= last_day).then_some(UalPeriod {
        first_day,
        last_day,
    })
}

/// Relevant adjustments overlapping `period`. Adjustments owned by the
/// recall being edited never conflict with its own UAL.
pub fn conflicting_adjustments(
    period: &UalPeriod,
    adjustments: &[Adjustment],
    edit_context: Option<&EditContext>,
) -> Vec<Uuid> {
    let editing = edit_context.and_then(|c| c.recall_id);
    adjustments
        .iter()
        .filter(|a| a.is_relevant())
        .filter(|a| !editing.map_or(false, |id| a.is_linked_to(id)))
        .filter(|a| a.overlaps(period.first_day, period.last_day))
        .map(|a| a.id)
        .collect()
}

/// UAL period for the journey's dates, with the ids of any relevant
/// adjustments that block creating it.
pub fn proposed_ual(
    adjustments: &[Adjustment],
    edit_context: Option<&EditContext>,
) -> (Option<UalPeriod>, Vec<Uuid>) {
    let period = edit_context.and_then(|c| match (c.revocation_date, c.return_to_custody_date) {
        (Some(revocation), Some(returned)) => ual_period(revocation, returned),
        _ => None,
    });
    match period {
        Some(period) => {
            let conflicts = conflicting_adjustments(&period, adjustments, edit_context);
            if conflicts.is_empty() {
                (Some(period), conflicts)
            } else {
                (None, conflicts)
            }
        }
        None => (None, Vec::new()),
    }
}
