use crate::{auth, database::Database};

mod entities;

pub use entities::{Email, Id, User};

pub async fn get(grant: &auth::ReadGrant, db: &Database) -> Option<User> {
    queries::get(db, grant.user_id).await
}

mod queries {
    use super::{Email, Id, User};
    use crate::database::Database;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    pub(super) async fn get(db: &Database, id: Id) -> Option<User> {
        sqlx::query_as::<_, UserRow>("SELECT id, email, created FROM users WHERE id = $1")
            .bind(id.0)
            .fetch_optional(db)
            .await
            .unwrap()
            .map(|row| row.into_entity())
    }

    #[derive(sqlx::FromRow, Debug)]
    struct UserRow {
        id: Uuid,
        email: String,
        created: DateTime<Utc>,
    }

    impl UserRow {
        fn into_entity(self) -> User {
            User {
                id: Id(self.id),
                email: Email(self.email),
                created: self.created,
            }
        }
    }
}
