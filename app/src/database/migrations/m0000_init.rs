use super::{Migration, SimpleSqlMigration};

pub fn migration() -> impl Migration {
    SimpleSqlMigration {
        serial_number: 0,
        sql: vec![
            r#"
            CREATE TABLE users (
                id UUID PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password TEXT NOT NULL,
                created TIMESTAMP WITH TIME ZONE NOT NULL
            )"#,
            r#"CREATE INDEX user_email ON users (email)"#,
            r#"
            CREATE TABLE auth_tokens (
                id UUID PRIMARY KEY,
                user_id UUID NOT NULL REFERENCES users,
                name TEXT UNIQUE NOT NULL,
                token_hash TEXT UNIQUE NOT NULL,
                can_read BOOLEAN NOT NULL,
                can_write BOOLEAN NOT NULL,
                created TIMESTAMP WITH TIME ZONE NOT NULL,
                disabled TIMESTAMP WITH TIME ZONE
            )"#,
            // Amounts are minor units of the record's own currency; no conversion happens
            // between currencies.
            r#"
            CREATE TABLE expenses (
                id UUID PRIMARY KEY,
                user_id UUID NOT NULL REFERENCES users,
                title TEXT NOT NULL,
                amount_cents BIGINT NOT NULL CHECK (amount_cents > 0),
                category TEXT NOT NULL,
                date DATE NOT NULL,
                currency TEXT NOT NULL,
                created TIMESTAMP WITH TIME ZONE NOT NULL
            )"#,
            r#"CREATE INDEX expense_user_date ON expenses (user_id, date)"#,
        ],
    }
}
