//! Fixed-term recall permissibility
//!
//! Decides which fixed-term recall periods are available for the
//! sentences left after SDS filtering. Sentences of twelve months or more
//! whose licence runs past the fixed term rule out the 14-day period and
//! are what make the 28-day period available for mixed-length sets.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use shared_types::{add_days, RecallType, Sentence};

const FOURTEEN_DAYS: u32 = 14;
const TWENTY_EIGHT_DAYS: u32 = 28;

/// Latest unadjusted expiry among sentences of twelve months or more is
/// strictly after `revocation_date + 14 days`.
fn long_sentence_outlasts_fixed_term(sentences: &[&Sentence], revocation_date: NaiveDate) -> bool {
    let threshold = add_days(revocation_date, u64::from(FOURTEEN_DAYS));
    sentences
        .iter()
        .filter(|s| s.is_twelve_months_or_more())
        .filter_map(|s| s.unadjusted_expiry())
        .max()
        .map_or(false, |latest| latest > threshold)
}

pub fn fourteen_day_recall_possible(sentences: &[&Sentence], revocation_date: NaiveDate) -> bool {
    !long_sentence_outlasts_fixed_term(sentences, revocation_date)
}

pub fn twenty_eight_day_recall_possible(sentences: &[&Sentence], revocation_date: NaiveDate) -> bool {
    let long = sentences
        .iter()
        .filter(|s| s.is_twelve_months_or_more())
        .count();
    if long == 0 {
        return false;
    }
    if long == sentences.len() {
        return true;
    }
    long_sentence_outlasts_fixed_term(sentences, revocation_date)
}

/// Recall types ruled out for these sentences, HDC and non-HDC variants
/// together, in catalogue order.
pub fn invalid_recall_types(sentences: &[&Sentence], revocation_date: NaiveDate) -> Vec<RecallType> {
    let mut invalid = BTreeSet::new();
    if !fourteen_day_recall_possible(sentences, revocation_date) {
        invalid.extend(RecallType::fixed_term_variants(FOURTEEN_DAYS));
    }
    if !twenty_eight_day_recall_possible(sentences, revocation_date) {
        invalid.extend(RecallType::fixed_term_variants(TWENTY_EIGHT_DAYS));
    }
    invalid.into_iter().collect()
}
