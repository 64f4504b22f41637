use crate::error::MutationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A positive whole amount in the payload currency.
///
/// The currency has no minor unit, so fractional values are rejected
/// instead of being rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, MutationError> {
        if value >= Decimal::ONE && value.fract().is_zero() {
            Ok(Self(value.normalize()))
        } else {
            Err(MutationError::InvalidAmount(value.to_string()))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Decimal digits with no leading zeros and no scale, as stored in tag `54`.
    pub fn canonical(&self) -> String {
        self.0.trunc().normalize().to_string()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = MutationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i64> for Amount {
    type Error = MutationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
