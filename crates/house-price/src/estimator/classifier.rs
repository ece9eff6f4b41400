use serde::Serialize;

/// Share of the point estimate reported as the ± range. Not a statistical interval.
pub const CONFIDENCE_BAND_RATIO: f64 = 0.10;
/// Predictions strictly below this are in the lower tier.
pub const MODERATE_TIER_FLOOR: f64 = 300_000.0;
/// Predictions at or above this are in the higher tier.
pub const HIGHER_TIER_FLOOR: f64 = 600_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    Lower,
    Moderate,
    Higher,
}

impl PriceTier {
    pub fn from_prediction(prediction: f64) -> Self {
        if prediction < MODERATE_TIER_FLOOR {
            Self::Lower
        } else if prediction < HIGHER_TIER_FLOOR {
            Self::Moderate
        } else {
            Self::Higher
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Lower => "Lower",
            Self::Moderate => "Moderate",
            Self::Higher => "Higher",
        }
    }

    pub const fn advisory(self) -> &'static str {
        match self {
            Self::Lower => "This property is in the lower price range for the area.",
            Self::Moderate => "This property is moderately priced for the area.",
            Self::Higher => "This property is in the higher price range for the area.",
        }
    }

    /// Higher-priced properties are flagged more prominently than the rest.
    pub const fn severity(self) -> AdvisorySeverity {
        match self {
            Self::Lower | Self::Moderate => AdvisorySeverity::Info,
            Self::Higher => AdvisorySeverity::Warning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorySeverity {
    Info,
    Warning,
}

/// Presentation-ready view of a raw model prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub band: f64,
    pub tier: PriceTier,
}

pub fn classify(prediction: f64) -> Classification {
    Classification {
        band: prediction * CONFIDENCE_BAND_RATIO,
        tier: PriceTier::from_prediction(prediction),
    }
}
