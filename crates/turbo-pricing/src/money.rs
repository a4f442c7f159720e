//! Money type for representing monetary values.
//!
//! Amounts are integers in the currency's minor unit (millimes for TND,
//! cents for EUR/USD). Every arithmetic operation is checked: overflow and
//! currency mixing are errors, never wrapped or coerced.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Tunisian dinar, 1000 millimes.
    #[default]
    TND,
    EUR,
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "TND").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::TND => "TND",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
        }
    }

    /// Number of decimal places of the minor unit.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::TND => 3,
            Currency::EUR | Currency::USD => 2,
        }
    }

    /// Minor units in one major unit.
    pub fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "TND" => Some(Currency::TND),
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Create a Money value from an exact decimal amount in major units.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use turbo_pricing::money::{Currency, Money};
    /// let price = Money::from_decimal(Decimal::new(15500, 3), Currency::TND).unwrap();
    /// assert_eq!(price.amount_minor, 15500);
    /// ```
    pub fn from_decimal(amount: Decimal, currency: Currency) -> PricingResult<Self> {
        let scaled = amount
            .checked_mul(Decimal::from(currency.minor_per_major()))
            .ok_or(PricingError::Overflow)?;

        if !scaled.fract().is_zero() {
            return Err(PricingError::ExcessPrecision {
                amount: amount.to_string(),
                currency: currency.code().to_string(),
            });
        }

        let amount_minor = scaled.to_i64().ok_or(PricingError::Overflow)?;
        Ok(Self::new(amount_minor, currency))
    }

    /// Parse a decimal string such as `"15.000"`.
    pub fn parse(amount: &str, currency: Currency) -> PricingResult<Self> {
        let decimal: Decimal = amount
            .trim()
            .parse()
            .map_err(|_| PricingError::InvalidAmount(amount.to_string()))?;
        Self::from_decimal(decimal, currency)
    }

    /// Convert to an exact decimal in major units.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.amount_minor, self.currency.decimal_places())
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Format without the currency code (e.g., "15.000").
    pub fn display_amount(&self) -> String {
        self.to_decimal().to_string()
    }

    /// Format as a display string (e.g., "15.000 TND").
    pub fn display(&self) -> String {
        format!("{} {}", self.display_amount(), self.currency.code())
    }

    /// Fail unless `other` is in the same currency.
    pub fn ensure_same_currency(&self, other: &Money) -> PricingResult<()> {
        if self.currency != other.currency {
            return Err(PricingError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: other.currency.code().to_string(),
            });
        }
        Ok(())
    }

    /// Add another Money value.
    pub fn checked_add(&self, other: &Money) -> PricingResult<Money> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount_minor
            .checked_add(other.amount_minor)
            .ok_or(PricingError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Subtract another Money value. The result may be negative.
    pub fn checked_sub(&self, other: &Money) -> PricingResult<Money> {
        self.ensure_same_currency(other)?;
        let amount = self
            .amount_minor
            .checked_sub(other.amount_minor)
            .ok_or(PricingError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// Subtract, flooring the result at zero.
    pub fn sub_floor_zero(&self, other: &Money) -> PricingResult<Money> {
        let diff = self.checked_sub(other)?;
        Ok(if diff.is_negative() {
            Money::zero(self.currency)
        } else {
            diff
        })
    }

    /// Multiply by an integer factor.
    pub fn checked_mul(&self, factor: i64) -> PricingResult<Money> {
        let amount = self
            .amount_minor
            .checked_mul(factor)
            .ok_or(PricingError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// `rate` percent of this amount, rounded down to the minor unit.
    pub fn percentage_floor(&self, rate: Decimal) -> PricingResult<Money> {
        let amount = Decimal::from(self.amount_minor)
            .checked_mul(rate)
            .and_then(|d| d.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(PricingError::Overflow)?
            .floor()
            .to_i64()
            .ok_or(PricingError::Overflow)?;
        Ok(Money::new(amount, self.currency))
    }

    /// The smaller of two amounts in the same currency.
    pub fn min(&self, other: &Money) -> PricingResult<Money> {
        self.ensure_same_currency(other)?;
        Ok(if other.amount_minor < self.amount_minor {
            *other
        } else {
            *self
        })
    }

    /// The larger of two amounts in the same currency.
    pub fn max(&self, other: &Money) -> PricingResult<Money> {
        self.ensure_same_currency(other)?;
        Ok(if other.amount_minor > self.amount_minor {
            *other
        } else {
            *self
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_from_minor() {
        let m = Money::new(15000, Currency::TND);
        assert_eq!(m.amount_minor, 15000);
        assert_eq!(m.currency, Currency::TND);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(dec!(49.99), Currency::EUR).unwrap();
        assert_eq!(m.amount_minor, 4999);

        let m = Money::from_decimal(dec!(7), Currency::TND).unwrap();
        assert_eq!(m.amount_minor, 7000);
    }

    #[test]
    fn test_money_from_decimal_excess_precision() {
        let err = Money::from_decimal(dec!(1.0005), Currency::TND).unwrap_err();
        assert!(matches!(err, PricingError::ExcessPrecision { .. }));
    }

    #[test]
    fn test_money_parse() {
        let m = Money::parse(" 15.500 ", Currency::TND).unwrap();
        assert_eq!(m.amount_minor, 15500);
        assert!(Money::parse("fifteen", Currency::TND).is_err());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(15000, Currency::TND).display(), "15.000 TND");
        assert_eq!(Money::new(4999, Currency::USD).display(), "49.99 USD");
        assert_eq!(Money::new(5, Currency::TND).display_amount(), "0.005");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::TND);
        let b = Money::new(500, Currency::TND);
        assert_eq!(a.checked_add(&b).unwrap().amount_minor, 1500);
    }

    #[test]
    fn test_money_overflow_is_error() {
        let a = Money::new(i64::MAX, Currency::TND);
        let b = Money::new(1, Currency::TND);
        assert_eq!(a.checked_add(&b), Err(PricingError::Overflow));
        assert_eq!(a.checked_mul(2), Err(PricingError::Overflow));
    }

    #[test]
    fn test_money_currency_mismatch() {
        let tnd = Money::new(1000, Currency::TND);
        let eur = Money::new(1000, Currency::EUR);
        assert!(matches!(
            tnd.checked_add(&eur),
            Err(PricingError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_sub_floor_zero() {
        let a = Money::new(300, Currency::TND);
        let b = Money::new(1000, Currency::TND);
        assert!(a.sub_floor_zero(&b).unwrap().is_zero());
        assert_eq!(b.sub_floor_zero(&a).unwrap().amount_minor, 700);
    }

    #[test]
    fn test_percentage_rounds_down() {
        // 15% of 0.333 = 0.04995, floored to 0.049
        let m = Money::new(333, Currency::TND);
        assert_eq!(m.percentage_floor(dec!(15)).unwrap().amount_minor, 49);

        let m = Money::new(100_000, Currency::TND);
        assert_eq!(m.percentage_floor(dec!(20)).unwrap().amount_minor, 20_000);
    }


    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("TND"), Some(Currency::TND));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
