use super::{Database, Transaction};
use crate::{auth, money};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

pub async fn seed_development_data(db: &Database) {
    let mut data_tx = db.begin().await.unwrap();
    seed_test_user(&mut data_tx, 1).await;
    seed_test_user(&mut data_tx, 2).await;
    seed_sample_expenses(&mut data_tx, 1).await;
    data_tx.commit().await.unwrap();
}

async fn seed_test_user(data_tx: &mut Transaction, index: u128) {
    let row = sqlx::query(r#"SELECT id FROM users WHERE id = $1"#)
        .bind(Uuid::from_u128(index))
        .fetch_optional(&mut *data_tx)
        .await
        .unwrap();
    if row.is_some() {
        return;
    }
    log::info!("seeding test user {}", index);
    sqlx::query("INSERT INTO users (id, email, password, created) VALUES ($1, $2, $3, $4)")
        .bind(Uuid::from_u128(index))
        .bind(format!("test-{}@user.net", index))
        .bind(format!("test-{}", index))
        .bind(Utc::now())
        .execute(&mut *data_tx)
        .await
        .unwrap();
    seed_token(data_tx, index, 1, "read_only", true, false, None).await;
    seed_token(data_tx, index, 2, "write_only", false, true, None).await;
    seed_token(data_tx, index, 3, "all", true, true, None).await;
    seed_token(data_tx, index, 4, "disabled", true, true, Some(Utc::now())).await;
}

async fn seed_token(
    data_tx: &mut Transaction,
    user_index: u128,
    token_index: u128,
    name: &str,
    can_read: bool,
    can_write: bool,
    disabled: Option<DateTime<Utc>>,
) {
    let name = format!("{}_{}", name, user_index);
    sqlx::query(
        r#"INSERT INTO auth_tokens (id, user_id, name, token_hash, can_read, can_write, created, disabled)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)"#,
    )
    .bind(Uuid::from_u128(user_index * 100 + token_index))
    .bind(Uuid::from_u128(user_index))
    .bind(name.clone())
    .bind(auth::TokenHash::generate(&name).as_str())
    .bind(can_read)
    .bind(can_write)
    .bind(Utc::now())
    .bind(disabled)
    .execute(&mut *data_tx)
    .await
    .unwrap();
}

async fn seed_sample_expenses(data_tx: &mut Transaction, user_index: u128) {
    let row = sqlx::query("SELECT id FROM expenses WHERE user_id = $1 LIMIT 1")
        .bind(Uuid::from_u128(user_index))
        .fetch_optional(&mut *data_tx)
        .await
        .unwrap();
    if row.is_some() {
        return;
    }
    let samples = [
        ("Groceries", 15000_i64, "Food", (1, 10)),
        ("Restaurant", 5000, "Food", (1, 15)),
        ("Bus ticket", 2000, "Transport", (2, 5)),
        ("Electricity", 20000, "Bills", (5, 10)),
    ];
    let year = 2024;
    for (offset, (title, cents, category, (month, day))) in samples.into_iter().enumerate() {
        sqlx::query(
            r#"INSERT INTO expenses (id, user_id, title, amount_cents, category, date, currency, created)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(Uuid::from_u128(user_index * 1000 + offset as u128))
        .bind(Uuid::from_u128(user_index))
        .bind(title)
        .bind(cents)
        .bind(category)
        .bind(NaiveDate::from_ymd_opt(year, month, day).unwrap())
        .bind(money::DEFAULT_CURRENCY)
        .bind(Utc::now())
        .execute(&mut *data_tx)
        .await
        .unwrap();
    }
}
