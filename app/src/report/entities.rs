//! Provides the monthly spending breakdown. This is a building block for the listing surface:
//! given one owner's records for a year, it folds them into exactly twelve per-month totals.
//! The fold is pure so it can be exercised against a plain slice, without a store.

use crate::expense::Expense;
use crate::money::Amount;
use chrono::Datelike;

/// The total spent in one calendar month. `month` is 1-based, January first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub month: u32,
    pub total: Amount,
}

/// Groups the records by calendar month of their date and sums the amounts with exact
/// minor-unit arithmetic. Records dated outside `year` are ignored.
///
/// The result always has exactly 12 entries in chronological order, with [`Amount::ZERO`] for
/// months that have no records.
pub fn monthly_breakdown(year: i32, expenses: &[Expense]) -> Vec<MonthlyTotal> {
    let mut totals = [Amount::ZERO; 12];
    for expense in expenses {
        if expense.date.year() == year {
            totals[expense.date.month0() as usize] += expense.amount;
        }
    }
    totals
        .iter()
        .enumerate()
        .map(|(index, &total)| MonthlyTotal {
            month: index as u32 + 1,
            total,
        })
        .collect()
}
