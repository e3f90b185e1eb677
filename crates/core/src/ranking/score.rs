use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

use super::types::SignalProfile;
use super::WEIGHT_SUM_TOLERANCE;

/// Weights for the three composite signals. Each weight must be a finite
/// non-negative number and the triple must sum to 1.0; deviations are
/// rejected outright, never renormalized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub revenue: f64,
    pub popularity: f64,
    pub margin: f64,
}

impl ScoreWeights {
    pub fn new(revenue: f64, popularity: f64, margin: f64) -> Result<Self, DomainError> {
        for value in [revenue, popularity, margin] {
            if !value.is_finite() || value < 0.0 {
                return Err(DomainError::InvalidWeight { value });
            }
        }

        let sum = revenue + popularity + margin;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(DomainError::UnbalancedWeights { sum });
        }

        Ok(Self { revenue, popularity, margin })
    }

    /// Weighted sum of normalized signals. With signals in [0, 1] and the
    /// weight-sum invariant, the composite lands in [0, 1] as well.
    pub fn composite(&self, signals: &SignalProfile) -> f64 {
        signals.revenue * self.revenue
            + signals.popularity * self.popularity
            + signals.margin * self.margin
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}
