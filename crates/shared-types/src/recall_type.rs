use serde::{Deserialize, Serialize};

/// Recall types a recall can be recorded as.
///
/// Wire codes match the recall-history service (`LR`, `FTR_14`, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum RecallType {
    /// Standard recall to sentence expiry.
    #[serde(rename = "LR")]
    Standard,
    #[serde(rename = "FTR_14")]
    FourteenDayFixedTerm,
    #[serde(rename = "FTR_28")]
    TwentyEightDayFixedTerm,
    #[serde(rename = "FTR_HDC_14")]
    HdcFourteenDayFixedTerm,
    #[serde(rename = "FTR_HDC_28")]
    HdcTwentyEightDayFixedTerm,
    #[serde(rename = "CUR_HDC")]
    HdcCurfewViolation,
    #[serde(rename = "IN_HDC")]
    HdcInabilityToMonitor,
    /// A code this catalogue does not know. Never offered to the user.
    #[serde(rename = "UNKNOWN")]
    #[serde(other)]
    Unknown,
}

impl RecallType {
    pub const ALL: [RecallType; 7] = [
        Self::Standard,
        Self::FourteenDayFixedTerm,
        Self::TwentyEightDayFixedTerm,
        Self::HdcFourteenDayFixedTerm,
        Self::HdcTwentyEightDayFixedTerm,
        Self::HdcCurfewViolation,
        Self::HdcInabilityToMonitor,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Standard => "LR",
            Self::FourteenDayFixedTerm => "FTR_14",
            Self::TwentyEightDayFixedTerm => "FTR_28",
            Self::HdcFourteenDayFixedTerm => "FTR_HDC_14",
            Self::HdcTwentyEightDayFixedTerm => "FTR_HDC_28",
            Self::HdcCurfewViolation => "CUR_HDC",
            Self::HdcInabilityToMonitor => "IN_HDC",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::FourteenDayFixedTerm => "14-day fixed term",
            Self::TwentyEightDayFixedTerm => "28-day fixed term",
            Self::HdcFourteenDayFixedTerm => "14-day fixed term from HDC",
            Self::HdcTwentyEightDayFixedTerm => "28-day fixed term from HDC",
            Self::HdcCurfewViolation => "Standard recall from HDC curfew violation",
            Self::HdcInabilityToMonitor => "Standard recall from HDC inability to monitor",
            Self::Unknown => "Unrecognised recall type",
        }
    }

    /// Length of the fixed term in days, `None` for standard-style recalls.
    pub fn fixed_term_days(&self) -> Option<u32> {
        match self {
            Self::FourteenDayFixedTerm | Self::HdcFourteenDayFixedTerm => Some(14),
            Self::TwentyEightDayFixedTerm | Self::HdcTwentyEightDayFixedTerm => Some(28),
            Self::Standard
            | Self::HdcCurfewViolation
            | Self::HdcInabilityToMonitor
            | Self::Unknown => None,
        }
    }

    pub fn is_fixed_term(&self) -> bool {
        self.fixed_term_days().is_some()
    }

    pub fn is_hdc(&self) -> bool {
        matches!(
            self,
            Self::HdcFourteenDayFixedTerm
                | Self::HdcTwentyEightDayFixedTerm
                | Self::HdcCurfewViolation
                | Self::HdcInabilityToMonitor
        )
    }

    /// Both the HDC and non-HDC recall types for a fixed-term period.
    pub fn fixed_term_variants(days: u32) -> Vec<RecallType> {
        Self::ALL
            .into_iter()
            .filter(|t| t.fixed_term_days() == Some(days))
            .collect()
    }

    /// Look up a recall type by its wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}
