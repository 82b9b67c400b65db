//! This module contains definitions for monetary entities and routines.
//!
//! Amounts are stored as i64 minor units (cents), which gives exact
//! two-decimal arithmetic without floating point.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use thiserror::Error;

/// The currency assumed when a record doesn't specify one.
pub const DEFAULT_CURRENCY: &str = "PLN";

#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error("not a decimal number")]
    NotANumber,
    #[error("more than two fractional digits")]
    TooPrecise,
    #[error("amount out of range")]
    OutOfRange,
}

#[derive(Debug, Error)]
#[error("not a 3-letter currency code")]
pub struct InvalidCurrency;

/// A monetary amount in minor units (cents).
#[derive(Debug, Clone, Copy, Default, PartialOrd, Ord, PartialEq, Eq)]
pub struct Amount(pub i64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    /// Parses a decimal string with up to two fractional digits, e.g.
    /// "100", "100.5", "-0.50" or ".75".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (units, frac) = match s.split_once('.') {
            Some((units, frac)) => (units, frac),
            None => (s, ""),
        };
        if units.is_empty() && frac.is_empty() {
            return Err(ParseAmountError::NotANumber);
        }
        if frac.len() > 2 {
            return Err(ParseAmountError::TooPrecise);
        }
        if !units.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseAmountError::NotANumber);
        }
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseAmountError::NotANumber);
        }
        let units: i64 = if units.is_empty() {
            0
        } else {
            units.parse().map_err(|_| ParseAmountError::OutOfRange)?
        };
        let mut cents_frac: i64 = if frac.is_empty() {
            0
        } else {
            frac.parse().map_err(|_| ParseAmountError::NotANumber)?
        };
        if frac.len() == 1 {
            cents_frac *= 10;
        }
        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents_frac))
            .ok_or(ParseAmountError::OutOfRange)?;
        Ok(Self(if negative { -cents } else { cents }))
    }
}

/// A three-letter currency code, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Currency(String);

impl Currency {
    /// Accepts exactly three ASCII letters; anything else is rejected.
    pub fn new(code: &str) -> Result<Self, InvalidCurrency> {
        let code = code.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(InvalidCurrency)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self(DEFAULT_CURRENCY.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!("100".parse::<Amount>().unwrap(), Amount(10000));
        assert_eq!("100.5".parse::<Amount>().unwrap(), Amount(10050));
        assert_eq!("123.45".parse::<Amount>().unwrap(), Amount(12345));
        assert_eq!(".75".parse::<Amount>().unwrap(), Amount(75));
        assert_eq!("0.00".parse::<Amount>().unwrap(), Amount(0));
        assert_eq!("-10".parse::<Amount>().unwrap(), Amount(-1000));
        assert_eq!("-0.50".parse::<Amount>().unwrap(), Amount(-50));
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!("".parse::<Amount>().is_err());
        assert!("-".parse::<Amount>().is_err());
        assert!("abc".parse::<Amount>().is_err());
        assert!("1,50".parse::<Amount>().is_err());
        assert!("1.2.3".parse::<Amount>().is_err());
        assert!("10.999".parse::<Amount>().is_err());
        assert!("1e3".parse::<Amount>().is_err());
    }

    #[test]
    fn displays_with_two_decimals() {
        assert_eq!(Amount(15000).to_string(), "150.00");
        assert_eq!(Amount(2075).to_string(), "20.75");
        assert_eq!(Amount(5).to_string(), "0.05");
        assert_eq!(Amount(0).to_string(), "0.00");
        assert_eq!(Amount(-50).to_string(), "-0.50");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for cents in [0, 1, 99, 100, 12345, -12345] {
            let amount = Amount(cents);
            assert_eq!(amount.to_string().parse::<Amount>().unwrap(), amount);
        }
    }

    #[test]
    fn currency_codes_are_uppercased() {
        assert_eq!(Currency::new("pln").unwrap().as_str(), "PLN");
        assert_eq!(Currency::new("EUR").unwrap().as_str(), "EUR");
        assert!(Currency::new("").is_err());
        assert!(Currency::new("PLNX").is_err());
        assert!(Currency::new("P1N").is_err());
        assert_eq!(Currency::default().as_str(), DEFAULT_CURRENCY);
    }
}
