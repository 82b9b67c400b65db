use super::{FilterError, YearFilter, LIST_URI};
use crate::{
    access,
    error::{self, JsonError, JsonResult},
    state::RocketState,
};
use app::{expense, report};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rocket::{delete, get, post, response::Redirect, serde::json::Json, State};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Every key is optional at the body level so that an absent key surfaces as a field-scoped
/// "required" error from validation instead of a body parse failure.
#[derive(Debug, Deserialize)]
pub(super) struct ExpenseRequest {
    /// Short label for the record.
    title: Option<String>,
    /// Decimal amount with up to two fractional digits, e.g. "123.45".
    amount: Option<String>,
    /// Free-text category label.
    category: Option<String>,
    /// Calendar date of the expense, as YYYY-MM-DD.
    date: Option<String>,
    /// Three-letter currency code; defaults to PLN when omitted.
    currency: Option<String>,
}

impl ExpenseRequest {
    fn into_form(self) -> expense::NewExpense {
        expense::NewExpense {
            title: self.title.unwrap_or_default(),
            amount: self.amount.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            currency: self.currency,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ExpenseResponse {
    expense: ExpenseModel,
}

#[derive(Debug, Serialize)]
pub(super) struct ExpensesResponse {
    expenses: Vec<ExpenseModel>,
    /// Exactly twelve entries, January first, zero totals for empty months.
    monthly_totals: Vec<MonthlyTotalModel>,
    /// The year the monthly totals cover.
    year: i32,
    /// Distinct years in which the caller has records, newest first.
    years: Vec<i32>,
}

#[derive(Debug, Serialize)]
struct ExpenseModel {
    id: Uuid,
    title: String,
    /// Amount formatted with two decimals.
    amount: String,
    category: String,
    date: NaiveDate,
    currency: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct MonthlyTotalModel {
    /// Month of year, 1 through 12.
    month: u32,
    /// Summed amount formatted with two decimals; "0.00" for empty months.
    total: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(super) enum Error {
    /// Missing or unusable title.
    InvalidTitle,
    /// Missing, malformed, or non-positive amount.
    InvalidAmount,
    /// Missing or unusable category.
    InvalidCategory,
    /// Missing or unparseable date.
    InvalidDate,
    /// Not a 3-letter currency code.
    InvalidCurrency,
}

impl ExpenseModel {
    fn from_entity(expense: &expense::Expense) -> Self {
        Self {
            id: expense.id.0,
            title: expense.title.clone(),
            amount: expense.amount.to_string(),
            category: expense.category.clone(),
            date: expense.date,
            currency: expense.currency.as_str().to_owned(),
            created_at: expense.created,
        }
    }
}

impl MonthlyTotalModel {
    fn from_entity(total: &report::MonthlyTotal) -> Self {
        Self {
            month: total.month,
            total: total.total.to_string(),
        }
    }
}

/// List the caller's expenses together with the twelve-month breakdown. Without a year filter
/// the listing covers all records and the breakdown covers the current year.
#[get("/expenses?<filter..>")]
pub(super) async fn list(
    state: &State<RocketState>,
    guard: access::ReadGuard,
    filter: YearFilter,
) -> JsonResult<ExpensesResponse, FilterError> {
    let year_filter = filter.year()?;
    let report_year = year_filter.unwrap_or_else(|| Utc::now().year());
    let expenses = expense::list(guard.grant(), &state.db, year_filter).await;
    let monthly_totals = report::monthly_totals(guard.grant(), &state.db, report_year).await;
    let years = expense::years(guard.grant(), &state.db).await;
    Ok(Json(ExpensesResponse {
        expenses: expenses.iter().map(ExpenseModel::from_entity).collect(),
        monthly_totals: monthly_totals
            .iter()
            .map(MonthlyTotalModel::from_entity)
            .collect(),
        year: report_year,
        years,
    }))
}

/// Get one expense. Another owner's record behaves as if it did not exist.
#[get("/expenses/<expense_id>")]
pub(super) async fn get(
    state: &State<RocketState>,
    guard: access::ReadGuard,
    expense_id: String,
) -> Option<Json<ExpenseResponse>> {
    match Uuid::from_str(&expense_id) {
        Ok(expense_id) => {
            expense::get(guard.grant(), &state.db, expense::Id(expense_id))
                .await
                .map(|expense| {
                    Json(ExpenseResponse {
                        expense: ExpenseModel::from_entity(&expense),
                    })
                })
        }
        Err(_) => None,
    }
}

/// Record a new expense owned by the caller. Success redirects to the list view; validation
/// failures are field-scoped and persist nothing.
#[post("/expenses", data = "<req>")]
pub(super) async fn post(
    state: &State<RocketState>,
    req: Json<ExpenseRequest>,
    guard: access::WriteGuard,
) -> Result<Redirect, JsonError<Error>> {
    expense::create(guard.grant(), &state.db, req.into_inner().into_form())
        .await
        .map(|_| Redirect::to(LIST_URI))
        .map_err(|e| match e {
            expense::Error::InvalidTitle(message) => {
                error::field_error("title", Error::InvalidTitle, message.to_owned())
            }
            expense::Error::InvalidAmount(message) => {
                error::field_error("amount", Error::InvalidAmount, message.to_owned())
            }
            expense::Error::InvalidCategory(message) => {
                error::field_error("category", Error::InvalidCategory, message.to_owned())
            }
            expense::Error::InvalidDate(message) => {
                error::field_error("date", Error::InvalidDate, message.to_owned())
            }
            expense::Error::InvalidCurrency(message) => {
                error::field_error("currency", Error::InvalidCurrency, message.to_owned())
            }
        })
}

/// Delete one of the caller's expenses and redirect to the list view. A foreign or unknown id
/// is a plain 404 and removes nothing.
#[delete("/expenses/<expense_id>")]
pub(super) async fn delete(
    state: &State<RocketState>,
    guard: access::WriteGuard,
    expense_id: String,
) -> Option<Redirect> {
    let expense_id = Uuid::from_str(&expense_id).ok()?;
    expense::delete(guard.grant(), &state.db, expense::Id(expense_id))
        .await
        .map(|_| Redirect::to(LIST_URI))
}
