//! Sentence classification and grouping
//!
//! Gives each sentence an eligibility reason, groups sentences by court
//! case, and derives the routing baseline from the calculation service's
//! validation messages.

use shared_types::{
    CaseSentenceGroup, ClassifiedSentence, CourtCase, EligibilityReason, Sentence,
    ValidationMessage,
};

/// Reason for a single sentence. Precedence: non-recallable, legacy,
/// SDS, everything else.
pub fn classify_sentence(sentence: &Sentence) -> ClassifiedSentence {
    let reason = if !sentence.is_recallable {
        EligibilityReason::NonRecallable
    } else if sentence.is_legacy() {
        EligibilityReason::LegacySentence
    } else if sentence.is_sds() {
        EligibilityReason::HappyPathPossible
    } else {
        EligibilityReason::NonSds
    };
    ClassifiedSentence::new(sentence.clone(), reason)
}

/// A case with no sentences, or only non-recallable ones, is skipped.
pub fn is_under_consideration(court_case: &CourtCase) -> bool {
    court_case.has_recallable_sentences()
}

/// Classify every sentence of a case and partition by routability.
pub fn group_sentences(court_case: &CourtCase) -> CaseSentenceGroup {
    let (routable, unroutable): (Vec<_>, Vec<_>) = court_case
        .sentences
        .iter()
        .map(classify_sentence)
        .partition(|s| s.recall_route.is_routable());

    CaseSentenceGroup {
        case_id: court_case.case_id,
        case_reference: court_case.display_reference(),
        court_name: court_case.court_name.clone(),
        court_code: court_case.court_code.clone(),
        routable,
        unroutable,
    }
}

/// Groups for every case under consideration, in input order.
pub fn group_cases(court_cases: &[CourtCase]) -> Vec<CaseSentenceGroup> {
    court_cases
        .iter()
        .filter(|c| is_under_consideration(c))
        .map(group_sentences)
        .collect()
}

/// Routing baseline from calculation validation messages.
pub fn crds_baseline(messages: &[ValidationMessage]) -> EligibilityReason {
    if messages.is_empty() {
        EligibilityReason::HappyPathPossible
    } else if messages.iter().any(ValidationMessage::is_critical) {
        EligibilityReason::CriticalValidationFail
    } else {
        EligibilityReason::NonCriticalValidationFail
    }
}

pub fn has_non_sds_sentences(groups: &[CaseSentenceGroup]) -> bool {
    groups.iter().flat_map(|g| g.sentences()).any(|s| !s.is_sds())
}

/// Reduce every group to its SDS sentences, dropping emptied groups.
pub fn retain_sds_sentences(groups: Vec<CaseSentenceGroup>) -> Vec<CaseSentenceGroup> {
    groups
        .into_iter()
        .filter_map(|mut group| {
            group.routable.retain(ClassifiedSentence::is_sds);
            group.unroutable.retain(ClassifiedSentence::is_sds);
            (!group.is_empty()).then_some(group)
        })
        .collect()
}

pub fn routable_sentence_count(groups: &[CaseSentenceGroup]) -> usize {
    groups.iter().map(|g| g.routable.len()).sum()
}
