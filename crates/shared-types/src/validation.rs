//! Validation code catalogue.
//!
//! Codes reported by the sentence-calculation validation pass, plus the
//! codes the recall engine raises from its own date checks. A code is
//! critical when it makes a recall impossible; every other code forces
//! manual review.

use crate::recall::ValidationMessage;

pub mod codes {
    pub const REMAND_ON_OR_AFTER_SENTENCE_DATE: &str = "REMAND_ON_OR_AFTER_SENTENCE_DATE";
    pub const ADJUSTMENT_FUTURE_DATED_UAL: &str = "ADJUSTMENT_FUTURE_DATED_UAL";
    pub const CONCURRENT_CONSECUTIVE_SENTENCES_DURATION: &str =
        "CONCURRENT_CONSECUTIVE_SENTENCES_DURATION";
    pub const FTR_SENTENCES_CONFLICT_WITH_EACH_OTHER: &str =
        "FTR_SENTENCES_CONFLICT_WITH_EACH_OTHER";
    pub const UNSUPPORTED_SENTENCE_TYPE: &str = "UNSUPPORTED_SENTENCE_TYPE";

    pub const CUSTODIAL_PERIOD_EXTINGUISHED_REMAND: &str = "CUSTODIAL_PERIOD_EXTINGUISHED_REMAND";
    pub const CUSTODIAL_PERIOD_EXTINGUISHED_TAGGED_BAIL: &str =
        "CUSTODIAL_PERIOD_EXTINGUISHED_TAGGED_BAIL";
    pub const ADJUSTMENT_AFTER_RELEASE_ADA: &str = "ADJUSTMENT_AFTER_RELEASE_ADA";
    pub const ADJUSTMENT_AFTER_RELEASE_RADA: &str = "ADJUSTMENT_AFTER_RELEASE_RADA";
    pub const ZERO_IMPRISONMENT_TERM: &str = "ZERO_IMPRISONMENT_TERM";
    pub const PRISONER_SUBJECT_TO_PTD: &str = "PRISONER_SUBJECT_TO_PTD";
    pub const OFFENCE_MISSING_DATE: &str = "OFFENCE_MISSING_DATE";
    pub const MORE_THAN_ONE_IMPRISONMENT_TERM: &str = "MORE_THAN_ONE_IMPRISONMENT_TERM";
}

/// Codes that block a recall entirely.
pub const CRITICAL_VALIDATION_CODES: &[&str] = &[
    codes::CUSTODIAL_PERIOD_EXTINGUISHED_REMAND,
    codes::CUSTODIAL_PERIOD_EXTINGUISHED_TAGGED_BAIL,
    codes::ADJUSTMENT_AFTER_RELEASE_ADA,
    codes::ADJUSTMENT_AFTER_RELEASE_RADA,
    codes::ZERO_IMPRISONMENT_TERM,
    codes::PRISONER_SUBJECT_TO_PTD,
    codes::OFFENCE_MISSING_DATE,
    codes::MORE_THAN_ONE_IMPRISONMENT_TERM,
];

pub fn is_critical_code(code: &str) -> bool {
    CRITICAL_VALIDATION_CODES.contains(&code)
}

impl ValidationMessage {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<String>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn is_critical(&self) -> bool {
        is_critical_code(&self.code)
    }

    pub fn revocation_before_sentence_date() -> Self {
        Self::new(
            codes::REMAND_ON_OR_AFTER_SENTENCE_DATE,
            "Revocation date must be on or after the earliest sentence date",
        )
    }

    pub fn revocation_inside_adjustment() -> Self {
        Self::new(
            codes::ADJUSTMENT_FUTURE_DATED_UAL,
            "Revocation date falls within an existing adjustment period",
        )
    }

    pub fn revocation_not_after_existing_recall() -> Self {
        Self::new(
            codes::CONCURRENT_CONSECUTIVE_SENTENCES_DURATION,
            "Revocation date must be after the revocation date of every existing recall",
        )
    }

    pub fn revocation_inside_fixed_term() -> Self {
        Self::new(
            codes::FTR_SENTENCES_CONFLICT_WITH_EACH_OTHER,
            "Revocation date falls within the fixed term of an existing recall",
        )
    }

    pub fn unsupported_sentence_type(detail: impl Into<String>) -> Self {
        Self::new(codes::UNSUPPORTED_SENTENCE_TYPE, detail)
    }
}
