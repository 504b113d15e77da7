//! Domain Value Objects
//!
//! Immutable value types for the ledger domain.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{LedgerError, LedgerResult};

/// Wire and cursor date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Money
// ============================================================================

/// Signed amount in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(i64);

impl Cents {
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Round to 2 places, half away from zero, then scale by 100
    pub fn from_dollars(dollars: Decimal) -> LedgerResult<Self> {
        dollars
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Self)
            .ok_or(LedgerError::InvalidAmount)
    }

    /// Exact: cents carry no more precision than 2 decimal places
    pub fn to_dollars(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Nonzero amount for a stored transaction
    pub fn nonzero(self) -> LedgerResult<Self> {
        if self.0 == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        Ok(self)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

// ============================================================================
// Calendar date
// ============================================================================

/// Calendar date, strictly `YYYY-MM-DD` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionDate(NaiveDate);

impl TransactionDate {
    pub fn parse(s: &str) -> LedgerResult<Self> {
        let date =
            NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| LedgerError::InvalidDateFormat)?;
        // chrono accepts unpadded fields; the wire form does not
        if date.format(DATE_FORMAT).to_string() != s {
            return Err(LedgerError::InvalidDateFormat);
        }
        Ok(Self(date))
    }

    pub fn into_inner(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for TransactionDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for TransactionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

// ============================================================================
// Merchant
// ============================================================================

/// Maximum merchant length in characters
const MERCHANT_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merchant(String);

impl Merchant {
    pub fn new(merchant: &str) -> LedgerResult<Self> {
        let merchant = merchant.trim();
        if merchant.is_empty() || merchant.chars().count() > MERCHANT_MAX_LENGTH {
            return Err(LedgerError::InvalidMerchant);
        }
        Ok(Self(merchant.to_string()))
    }

    pub fn from_db(merchant: impl Into<String>) -> Self {
        Self(merchant.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Page size
// ============================================================================

/// Page size after the upper bound has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize {
    pub effective: i32,
    pub clamped: bool,
}

impl PageSize {
    pub fn new(requested: i32, max: i32) -> LedgerResult<Self> {
        if requested <= 0 {
            return Err(LedgerError::InvalidPageSizeNonPositive);
        }
        if requested > max {
            return Ok(Self {
                effective: max,
                clamped: true,
            });
        }
        Ok(Self {
            effective: requested,
            clamped: false,
        })
    }

    /// Rows to fetch including the probe row
    pub fn fetch_limit(&self) -> i64 {
        i64::from(self.effective) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_cents_from_dollars() {
        assert_eq!(Cents::from_dollars(dec("125.98")).unwrap().value(), 12598);
        assert_eq!(Cents::from_dollars(dec("-4.5")).unwrap().value(), -450);
        assert_eq!(Cents::from_dollars(dec("0.01")).unwrap().value(), 1);
    }

    #[test]
    fn test_cents_rounding_half_away_from_zero() {
        assert_eq!(Cents::from_dollars(dec("0.005")).unwrap().value(), 1);
        assert_eq!(Cents::from_dollars(dec("-0.005")).unwrap().value(), -1);
        assert_eq!(Cents::from_dollars(dec("1.0049")).unwrap().value(), 100);
        assert_eq!(Cents::from_dollars(dec("2.675")).unwrap().value(), 268);
    }

    #[test]
    fn test_to_dollars_exact() {
        assert_eq!(Cents::new(12598).to_dollars(), dec("125.98"));
        assert_eq!(Cents::new(-1).to_dollars(), dec("-0.01"));
    }

    #[test]
    fn test_zero_rejected() {
        assert!(matches!(
            Cents::from_dollars(dec("0.004")).unwrap().nonzero(),
            Err(LedgerError::InvalidAmount)
        ));
    }

    #[test]
    fn test_date_strict() {
        assert!(TransactionDate::parse("2025-03-05").is_ok());
        for bad in ["2025-3-5", "2025/03/05", "05-03-2025", "2025-02-30", "2025-03-05T00:00:00Z", ""] {
            assert!(
                matches!(TransactionDate::parse(bad), Err(LedgerError::InvalidDateFormat)),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_date_display() {
        let date = TransactionDate::parse("2025-03-05").unwrap();
        assert_eq!(date.to_string(), "2025-03-05");
    }

    #[test]
    fn test_merchant() {
        assert_eq!(Merchant::new("  costco ").unwrap().as_str(), "costco");
        assert!(Merchant::new("   ").is_err());
        assert!(Merchant::new(&"m".repeat(256)).is_err());
    }

    #[test]
    fn test_page_size() {
        assert_eq!(
            PageSize::new(10, 100).unwrap(),
            PageSize {
                effective: 10,
                clamped: false
            }
        );
        assert_eq!(
            PageSize::new(500, 100).unwrap(),
            PageSize {
                effective: 100,
                clamped: true
            }
        );
        assert!(PageSize::new(0, 100).is_err());
        assert!(PageSize::new(-3, 100).is_err());
        assert_eq!(PageSize::new(1, 100).unwrap().fetch_limit(), 2);
    }
}
