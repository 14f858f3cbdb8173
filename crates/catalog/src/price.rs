//! Money amounts in the smallest currency unit.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use bazaar_core::{DomainError, ValueObject};

/// Non-negative price held as integer cents.
///
/// The backend stores prices as a decimal column and ships them as JSON
/// numbers (`19.99`); conversion rounds to the nearest cent once, at the edge.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Convert a decimal amount (as sent by the backend or typed into a form).
    pub fn from_decimal(amount: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::validation("Enter a valid price"));
        }
        Ok(Self((amount * 100.0).round() as u64))
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn as_decimal(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    pub fn plus(self, other: Price) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// `percent`% of this amount, rounded half-up to the cent.
    pub fn percent(self, percent: u64) -> Self {
        Self(self.0.saturating_mul(percent).saturating_add(50) / 100)
    }
}

impl ValueObject for Price {}

impl core::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        iter.fold(Price::ZERO, Price::plus)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Price::from_decimal(amount).map_err(serde::de::Error::custom)
    }
}
