//! Fixed-point monetary amounts
//!
//! An [`Amount`] is a signed count of minor units (pennies, cents, yen) in a
//! single [`Currency`]. Zero and negative quantities can be represented on
//! purpose: a proposer may put anything in a state, and it is the verifier
//! that decides what is legal.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Three-letter currency code, e.g. `GBP`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(Error::InvalidCurrency(code))
        }
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// Number of minor-unit digits for this currency
    pub fn fraction_digits(&self) -> u32 {
        match self.0.as_str() {
            "JPY" | "KRW" | "VND" | "CLP" | "ISK" => 0,
            "BHD" | "KWD" | "OMR" | "TND" | "JOD" => 3,
            _ => 2,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.fraction_digits())
    }
}

impl TryFrom<String> for Currency {
    type Error = Error;

    fn try_from(code: String) -> Result<Self> {
        Self::new(code)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A quantity of minor units in one currency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// Minor units (e.g. pennies for GBP)
    pub quantity: i64,
    pub currency: Currency,
}

impl Amount {
    pub fn new(quantity: i64, currency: Currency) -> Self {
        Self { quantity, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Build an amount from whole major units: `from_major(1, GBP)` is 100 pennies.
    pub fn from_major(units: i64, currency: Currency) -> Result<Self> {
        let quantity = units
            .checked_mul(currency.minor_per_major())
            .ok_or(Error::Overflow)?;
        Ok(Self::new(quantity, currency))
    }

    pub fn is_positive(&self) -> bool {
        self.quantity > 0
    }

    pub fn is_zero(&self) -> bool {
        self.quantity == 0
    }

    pub fn same_currency(&self, other: &Amount) -> bool {
        self.currency == other.currency
    }

    pub fn checked_add(&self, other: &Amount) -> Result<Amount> {
        self.ensure_same_currency(other)?;
        let quantity = self
            .quantity
            .checked_add(other.quantity)
            .ok_or(Error::Overflow)?;
        Ok(Amount::new(quantity, self.currency.clone()))
    }

    pub fn checked_sub(&self, other: &Amount) -> Result<Amount> {
        self.ensure_same_currency(other)?;
        let quantity = self
            .quantity
            .checked_sub(other.quantity)
            .ok_or(Error::Overflow)?;
        Ok(Amount::new(quantity, self.currency.clone()))
    }

    fn ensure_same_currency(&self, other: &Amount) -> Result<()> {
        if self.same_currency(other) {
            Ok(())
        } else {
            Err(Error::CurrencyMismatch {
                left: self.currency.to_string(),
                right: other.currency.to_string(),
            })
        }
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.currency.fraction_digits();
        if digits == 0 {
            return write!(f, "{} {}", self.quantity, self.currency);
        }
        let per_major = self.currency.minor_per_major().unsigned_abs();
        let magnitude = self.quantity.unsigned_abs();
        let sign = if self.quantity < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            magnitude / per_major,
            magnitude % per_major,
            self.currency,
            width = digits as usize
        )
    }
}
