//! Handles the creation and validation of users' expense records.
//!
//! Create a record by calling [`Expense::create`] with the raw form input. Validation is
//! field-scoped: each [`Error`] variant names the offending input field so the caller can
//! re-present the form for correction. Records are never updated in place; they are either
//! created or deleted.

use crate::{
    auth,
    money::{Amount, Currency, ParseAmountError},
    user,
};
use chrono::{DateTime, NaiveDate, Utc};
use const_format::formatcp;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid title: {0}")]
    InvalidTitle(&'static str),
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),
    #[error("invalid category: {0}")]
    InvalidCategory(&'static str),
    #[error("invalid date: {0}")]
    InvalidDate(&'static str),
    #[error("invalid currency: {0}")]
    InvalidCurrency(&'static str),
}

pub const REQUIRED: &str = "This field is required.";
pub const AMOUNT_NOT_POSITIVE: &str = "Amount must be greater than 0.";
pub const AMOUNT_NOT_DECIMAL: &str = "Enter a valid number with up to 2 decimal places.";
pub const BAD_DATE: &str = "Enter a valid date.";
pub const BAD_CURRENCY: &str = "Enter a valid 3-letter currency code.";

const MAX_FIELD_CHARS: usize = 255;
const TOO_LONG: &str = formatcp!("Can be at most {} characters.", MAX_FIELD_CHARS);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Id(pub Uuid);

/// Raw form input for a new expense, exactly as submitted by the caller. Amount and date arrive
/// as strings so that malformed values surface as field errors instead of body parse failures.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub title: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub currency: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Expense {
    pub id: Id,
    pub user_id: user::Id,
    pub title: String,
    pub amount: Amount,
    pub category: String,
    pub date: NaiveDate,
    pub currency: Currency,
    pub created: DateTime<Utc>,
}

impl Expense {
    /// Validates the form input and builds a record owned by the grant holder. The owner is
    /// taken from the grant and is immutable afterwards.
    pub fn create(grant: &auth::WriteGrant, form: NewExpense) -> Result<Self, Error> {
        let title = required_text(form.title).map_err(Error::InvalidTitle)?;
        let category = required_text(form.category).map_err(Error::InvalidCategory)?;
        let amount: Amount = form.amount.parse().map_err(|e| match e {
            ParseAmountError::TooPrecise => Error::InvalidAmount(AMOUNT_NOT_DECIMAL),
            ParseAmountError::OutOfRange => Error::InvalidAmount(AMOUNT_NOT_DECIMAL),
            ParseAmountError::NotANumber if form.amount.trim().is_empty() => {
                Error::InvalidAmount(REQUIRED)
            }
            ParseAmountError::NotANumber => Error::InvalidAmount(AMOUNT_NOT_DECIMAL),
        })?;
        if !amount.is_positive() {
            return Err(Error::InvalidAmount(AMOUNT_NOT_POSITIVE));
        }
        let date = if form.date.trim().is_empty() {
            return Err(Error::InvalidDate(REQUIRED));
        } else {
            NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d")
                .map_err(|_| Error::InvalidDate(BAD_DATE))?
        };
        let currency = match form.currency.as_deref().map(str::trim) {
            None | Some("") => Currency::default(),
            Some(code) => Currency::new(code).map_err(|_| Error::InvalidCurrency(BAD_CURRENCY))?,
        };
        Ok(Self {
            id: Id(Uuid::new_v4()),
            user_id: grant.user_id,
            title,
            amount,
            category,
            date,
            currency,
            created: Utc::now(),
        })
    }
}

fn required_text(value: String) -> Result<String, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        Err(REQUIRED)
    } else if value.chars().count() > MAX_FIELD_CHARS {
        Err(TOO_LONG)
    } else {
        Ok(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{TokenId, WriteGrant};

    fn grant() -> WriteGrant {
        WriteGrant {
            token_id: TokenId(Uuid::from_u128(1)),
            user_id: user::Id(Uuid::from_u128(2)),
        }
    }

    fn form() -> NewExpense {
        NewExpense {
            title: "Taxi Ride".to_owned(),
            amount: "50.00".to_owned(),
            category: "Transport".to_owned(),
            date: "2024-03-14".to_owned(),
            currency: Some("PLN".to_owned()),
        }
    }

    #[test]
    fn creates_a_record_owned_by_the_grant_holder() {
        let grant = grant();
        let expense = Expense::create(&grant, form()).unwrap();
        assert_eq!(expense.user_id, grant.user_id);
        assert_eq!(expense.title, "Taxi Ride");
        assert_eq!(expense.amount, Amount(5000));
        assert_eq!(expense.category, "Transport");
        assert_eq!(
            expense.date,
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
        );
        assert_eq!(expense.currency.as_str(), "PLN");
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        for amount in ["0", "0.00", "-10"] {
            let mut form = form();
            form.amount = amount.to_owned();
            match Expense::create(&grant(), form) {
                Err(Error::InvalidAmount(message)) => assert_eq!(message, AMOUNT_NOT_POSITIVE),
                other => panic!("expected amount error, got {:?}", other),
            }
        }
    }

    #[test]
    fn malformed_amounts_are_rejected() {
        for amount in ["abc", "10.999", "1,50"] {
            let mut form = form();
            form.amount = amount.to_owned();
            match Expense::create(&grant(), form) {
                Err(Error::InvalidAmount(message)) => assert_eq!(message, AMOUNT_NOT_DECIMAL),
                other => panic!("expected amount error, got {:?}", other),
            }
        }
    }

    #[test]
    fn empty_fields_are_rejected() {
        let mut missing_title = form();
        missing_title.title = "  ".to_owned();
        assert!(matches!(
            Expense::create(&grant(), missing_title),
            Err(Error::InvalidTitle(REQUIRED))
        ));

        let mut missing_category = form();
        missing_category.category = String::new();
        assert!(matches!(
            Expense::create(&grant(), missing_category),
            Err(Error::InvalidCategory(REQUIRED))
        ));

        let mut missing_amount = form();
        missing_amount.amount = String::new();
        assert!(matches!(
            Expense::create(&grant(), missing_amount),
            Err(Error::InvalidAmount(REQUIRED))
        ));

        let mut missing_date = form();
        missing_date.date = String::new();
        assert!(matches!(
            Expense::create(&grant(), missing_date),
            Err(Error::InvalidDate(REQUIRED))
        ));
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let mut overlong = form();
        overlong.title = "x".repeat(256);
        assert!(matches!(
            Expense::create(&grant(), overlong),
            Err(Error::InvalidTitle(_))
        ));
    }

    #[test]
    fn unparseable_dates_are_rejected() {
        for date in ["invalid-date", "2024-13-01", "14-03-2024"] {
            let mut form = form();
            form.date = date.to_owned();
            assert!(matches!(
                Expense::create(&grant(), form),
                Err(Error::InvalidDate(BAD_DATE))
            ));
        }
    }

    #[test]
    fn currency_defaults_when_unspecified() {
        let mut no_currency = form();
        no_currency.currency = None;
        let expense = Expense::create(&grant(), no_currency).unwrap();
        assert_eq!(expense.currency.as_str(), "PLN");

        let mut blank_currency = form();
        blank_currency.currency = Some("  ".to_owned());
        let expense = Expense::create(&grant(), blank_currency).unwrap();
        assert_eq!(expense.currency.as_str(), "PLN");

        let mut bad_currency = form();
        bad_currency.currency = Some("ZLOTY".to_owned());
        assert!(matches!(
            Expense::create(&grant(), bad_currency),
            Err(Error::InvalidCurrency(BAD_CURRENCY))
        ));
    }
}
