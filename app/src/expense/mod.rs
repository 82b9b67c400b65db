use crate::{auth, database, user};
use async_trait::async_trait;
use chrono::NaiveDate;

mod entities;

pub use entities::{Error, Expense, Id, NewExpense};

/// Store access for expense records, passed explicitly into every operation. All access is
/// owner-scoped: a record is invisible to any user id other than its owner's, so a foreign id
/// behaves exactly like an absent one.
#[async_trait]
pub trait Store {
    async fn insert(&self, expense: &Expense);
    async fn get(&self, id: Id, user_id: user::Id) -> Option<Expense>;
    async fn list(&self, user_id: user::Id) -> Vec<Expense>;
    async fn list_range(
        &self,
        user_id: user::Id,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Expense>;
    async fn delete(&self, id: Id, user_id: user::Id) -> Option<Id>;
    async fn years(&self, user_id: user::Id) -> Vec<i32>;
}

pub async fn create(
    grant: &auth::WriteGrant,
    store: &(impl Store + Sync),
    form: NewExpense,
) -> Result<Expense, Error> {
    let expense = Expense::create(grant, form)?;
    store.insert(&expense).await;
    Ok(expense)
}

pub async fn get(
    grant: &auth::ReadGrant,
    store: &(impl Store + Sync),
    id: Id,
) -> Option<Expense> {
    store.get(id, grant.user_id).await
}

/// Lists the owner's expenses, newest date first. With a year filter, only records dated in that
/// year are returned; a year outside the representable date range matches nothing.
pub async fn list(
    grant: &auth::ReadGrant,
    store: &(impl Store + Sync),
    year: Option<i32>,
) -> Vec<Expense> {
    match year {
        Some(year) => match year_range(year) {
            Some((start, end)) => store.list_range(grant.user_id, start, end).await,
            None => Vec::new(),
        },
        None => store.list(grant.user_id).await,
    }
}

/// Deletes one of the owner's expenses. A foreign or unknown id deletes nothing and returns
/// `None`; the caller cannot tell the two cases apart.
pub async fn delete(
    grant: &auth::WriteGrant,
    store: &(impl Store + Sync),
    id: Id,
) -> Option<Id> {
    store.delete(id, grant.user_id).await
}

/// The distinct years in which the owner has records, newest first.
pub async fn years(grant: &auth::ReadGrant, store: &(impl Store + Sync)) -> Vec<i32> {
    store.years(grant.user_id).await
}

/// The half-open date range `[Jan 1 of year, Jan 1 of year + 1)`. `None` when the year falls
/// outside the representable date range.
pub(crate) fn year_range(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
    Some((start, end))
}

#[async_trait]
impl Store for database::Database {
    async fn insert(&self, expense: &Expense) {
        let mut data_tx = self.begin().await.unwrap();
        queries::insert(&mut data_tx, expense).await;
        data_tx.commit().await.unwrap();
    }

    async fn get(&self, id: Id, user_id: user::Id) -> Option<Expense> {
        queries::get(self, id, user_id).await
    }

    async fn list(&self, user_id: user::Id) -> Vec<Expense> {
        queries::list(self, user_id).await
    }

    async fn list_range(
        &self,
        user_id: user::Id,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Expense> {
        queries::list_range(self, user_id, start, end).await
    }

    async fn delete(&self, id: Id, user_id: user::Id) -> Option<Id> {
        queries::delete(self, id, user_id).await
    }

    async fn years(&self, user_id: user::Id) -> Vec<i32> {
        queries::years(self, user_id).await
    }
}

mod queries {
    use super::{Expense, Id};
    use crate::{
        database::{self, Database, YearRow},
        money::{Amount, Currency},
        user,
    };
    use chrono::{DateTime, NaiveDate, Utc};
    use const_format::formatcp;
    use uuid::Uuid;

    const COLUMNS: &str = "id, user_id, title, amount_cents, category, date, currency, created";

    pub(super) async fn insert(data_tx: &mut database::Transaction, expense: &Expense) {
        sqlx::query(formatcp!(
            "INSERT INTO expenses ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            COLUMNS
        ))
        .bind(expense.id.0)
        .bind(expense.user_id.0)
        .bind(expense.title.clone())
        .bind(expense.amount.0)
        .bind(expense.category.clone())
        .bind(expense.date)
        .bind(expense.currency.as_str().to_owned())
        .bind(expense.created)
        .execute(&mut *data_tx)
        .await
        .unwrap();
    }

    pub(super) async fn get(db: &Database, id: Id, user_id: user::Id) -> Option<Expense> {
        sqlx::query_as::<_, ExpenseRow>(formatcp!(
            "SELECT {} FROM expenses WHERE id = $1 AND user_id = $2",
            COLUMNS
        ))
        .bind(id.0)
        .bind(user_id.0)
        .fetch_optional(db)
        .await
        .unwrap()
        .map(|row| row.into_entity())
    }

    pub(super) async fn list(db: &Database, user_id: user::Id) -> Vec<Expense> {
        sqlx::query_as::<_, ExpenseRow>(formatcp!(
            "SELECT {} FROM expenses WHERE user_id = $1 ORDER BY date DESC, created DESC",
            COLUMNS
        ))
        .bind(user_id.0)
        .fetch_all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.into_entity())
        .collect()
    }

    pub(super) async fn list_range(
        db: &Database,
        user_id: user::Id,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Expense> {
        sqlx::query_as::<_, ExpenseRow>(formatcp!(
            "SELECT {} FROM expenses WHERE user_id = $1 AND date >= $2 AND date < $3 ORDER BY date DESC, created DESC",
            COLUMNS
        ))
        .bind(user_id.0)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.into_entity())
        .collect()
    }

    pub(super) async fn delete(db: &Database, id: Id, user_id: user::Id) -> Option<Id> {
        sqlx::query_as::<_, database::IdRow>(
            "DELETE FROM expenses WHERE id = $1 AND user_id = $2 RETURNING id",
        )
        .bind(id.0)
        .bind(user_id.0)
        .fetch_optional(db)
        .await
        .unwrap()
        .map(|row| Id(row.id))
    }

    pub(super) async fn years(db: &Database, user_id: user::Id) -> Vec<i32> {
        sqlx::query_as::<_, YearRow>(
            r#"SELECT DISTINCT CAST(EXTRACT(YEAR FROM date) AS INT) AS year
                FROM expenses WHERE user_id = $1 ORDER BY year DESC"#,
        )
        .bind(user_id.0)
        .fetch_all(db)
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.year)
        .collect()
    }

    #[derive(sqlx::FromRow, Debug)]
    struct ExpenseRow {
        id: Uuid,
        user_id: Uuid,
        title: String,
        amount_cents: i64,
        category: String,
        date: NaiveDate,
        currency: String,
        created: DateTime<Utc>,
    }

    impl ExpenseRow {
        fn into_entity(self) -> Expense {
            Expense {
                id: Id(self.id),
                user_id: user::Id(self.user_id),
                title: self.title,
                amount: Amount(self.amount_cents),
                category: self.category,
                date: self.date,
                currency: Currency::new(&self.currency).unwrap(),
                created: self.created,
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{Expense, Id, Store};
    use crate::user;
    use async_trait::async_trait;
    use chrono::{Datelike, NaiveDate};
    use std::sync::Mutex;

    /// An in-memory store with the same owner-scoping contract as the database-backed one.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        records: Mutex<Vec<Expense>>,
    }

    #[async_trait]
    impl Store for MemoryStore {
        async fn insert(&self, expense: &Expense) {
            self.records.lock().unwrap().push(expense.clone());
        }

        async fn get(&self, id: Id, user_id: user::Id) -> Option<Expense> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == id && e.user_id == user_id)
                .cloned()
        }

        async fn list(&self, user_id: user::Id) -> Vec<Expense> {
            let mut records: Vec<Expense> = self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect();
            records.sort_by(|a, b| b.date.cmp(&a.date));
            records
        }

        async fn list_range(
            &self,
            user_id: user::Id,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Vec<Expense> {
            let mut records: Vec<Expense> = self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user_id && e.date >= start && e.date < end)
                .cloned()
                .collect();
            records.sort_by(|a, b| b.date.cmp(&a.date));
            records
        }

        async fn delete(&self, id: Id, user_id: user::Id) -> Option<Id> {
            let mut records = self.records.lock().unwrap();
            let position = records
                .iter()
                .position(|e| e.id == id && e.user_id == user_id)?;
            records.remove(position);
            Some(id)
        }

        async fn years(&self, user_id: user::Id) -> Vec<i32> {
            let mut years: Vec<i32> = self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.user_id == user_id)
                .map(|e| e.date.year())
                .collect();
            years.sort_unstable_by(|a, b| b.cmp(a));
            years.dedup();
            years
        }
    }
}
