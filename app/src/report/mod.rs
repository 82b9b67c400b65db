use crate::{auth, expense};

mod entities;

pub use entities::{monthly_breakdown, MonthlyTotal};

/// Computes the owner's twelve per-month totals for `year`: a pure read over a snapshot of the
/// store, safe to call repeatedly. Years outside the representable date range skip the fetch and
/// degrade to twelve zero totals.
pub async fn monthly_totals(
    grant: &auth::ReadGrant,
    store: &(impl expense::Store + Sync),
    year: i32,
) -> Vec<MonthlyTotal> {
    let expenses = match expense::year_range(year) {
        Some((start, end)) => store.list_range(grant.user_id, start, end).await,
        None => Vec::new(),
    };
    monthly_breakdown(year, &expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{ReadGrant, TokenId, WriteGrant};
    use crate::expense::{testing::MemoryStore, NewExpense};
    use crate::money::Amount;
    use crate::user;
    use uuid::Uuid;

    fn write_grant(user: u128) -> WriteGrant {
        WriteGrant {
            token_id: TokenId(Uuid::from_u128(user * 10)),
            user_id: user::Id(Uuid::from_u128(user)),
        }
    }

    fn read_grant(user: u128) -> ReadGrant {
        ReadGrant {
            token_id: TokenId(Uuid::from_u128(user * 10)),
            user_id: user::Id(Uuid::from_u128(user)),
        }
    }

    fn form(amount: &str, date: &str) -> NewExpense {
        NewExpense {
            title: "Expense".to_owned(),
            amount: amount.to_owned(),
            category: "Misc".to_owned(),
            date: date.to_owned(),
            currency: None,
        }
    }

    #[tokio::test]
    async fn totals_cover_only_the_callers_records() {
        let store = MemoryStore::default();
        expense::create(&write_grant(1), &store, form("150.00", "2024-01-05"))
            .await
            .unwrap();
        expense::create(&write_grant(1), &store, form("20.00", "2024-01-20"))
            .await
            .unwrap();
        expense::create(&write_grant(2), &store, form("999.99", "2024-01-15"))
            .await
            .unwrap();

        let totals = monthly_totals(&read_grant(1), &store, 2024).await;
        assert_eq!(totals.len(), 12);
        assert_eq!(totals[0].total, Amount(17000));
        assert!(totals[1..].iter().all(|t| t.total == Amount::ZERO));
    }

    #[tokio::test]
    async fn unrepresentable_years_yield_twelve_zero_totals() {
        let store = MemoryStore::default();
        expense::create(&write_grant(1), &store, form("150.00", "2024-01-05"))
            .await
            .unwrap();

        let totals = monthly_totals(&read_grant(1), &store, i32::MAX).await;
        assert_eq!(totals.len(), 12);
        assert!(totals.iter().all(|t| t.total == Amount::ZERO));
    }
}
