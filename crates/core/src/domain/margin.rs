use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Fractional profit margin. Source files carry margins as percent strings
/// ("12.5%"); internally the value is always the fraction (0.125).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Margin(Decimal);

impl Margin {
    /// Parse a percent string into a fraction. The value must end in `%`;
    /// the numeric part before it is divided by 100. A missing suffix, or a
    /// numeric part that does not parse, surfaces as
    /// [`DomainError::MalformedMargin`], never as a silent zero.
    pub fn parse_percent(raw: &str) -> Result<Self, DomainError> {
        let number = match raw.trim().strip_suffix('%') {
            Some(number) => number.trim_end(),
            None => return Err(DomainError::MalformedMargin { raw: raw.to_owned() }),
        };

        if number.is_empty() {
            return Err(DomainError::MalformedMargin { raw: raw.to_owned() });
        }

        let percent = Decimal::from_str(number)
            .map_err(|_| DomainError::MalformedMargin { raw: raw.to_owned() })?;

        Ok(Self(percent / Decimal::ONE_HUNDRED))
    }

    /// Wrap an already-fractional value.
    pub fn from_fraction(fraction: Decimal) -> Self {
        Self(fraction)
    }

    pub fn as_fraction(&self) -> Decimal {
        self.0
    }

    pub fn as_percent(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
