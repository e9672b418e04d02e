//! Price value object.
//!
//! Held in minor currency units (cents) so comparisons and sums are exact;
//! on the wire it is a decimal number of major units, as backend rows store it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use stockroom_core::{DomainError, DomainResult, ValueObject};

const MINOR_PER_MAJOR: u64 = 100;

/// Non-negative unit price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl ValueObject for Price {}

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Parse a decimal amount of major units, rounding to the nearest minor unit.
    pub fn from_major(major: f64) -> DomainResult<Self> {
        if !major.is_finite() {
            return Err(DomainError::invalid_argument(format!(
                "price must be finite (got {major})"
            )));
        }
        if major < 0.0 {
            return Err(DomainError::invalid_argument(format!(
                "price must be >= 0 (got {major})"
            )));
        }
        let minor = (major * MINOR_PER_MAJOR as f64).round();
        if minor >= u64::MAX as f64 {
            return Err(DomainError::invalid_argument(format!(
                "price out of range (got {major})"
            )));
        }
        Ok(Self(minor as u64))
    }

    pub const fn minor(&self) -> u64 {
        self.0
    }

    /// Decimal amount of major units.
    pub fn major(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Value of `quantity` units at this price, saturating at `u64::MAX`.
    pub fn times(&self, quantity: u64) -> u64 {
        self.0.saturating_mul(quantity)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / MINOR_PER_MAJOR,
            self.0 % MINOR_PER_MAJOR
        )
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.major())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let major = f64::deserialize(deserializer)?;
        Price::from_major(major).map_err(serde::de::Error::custom)
    }
}
