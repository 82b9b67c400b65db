use crate::database::Database;

mod entities;

pub use entities::{AccessDenied, ReadGrant, TokenHash, TokenId, WriteGrant};

pub async fn get_read_grant(db: &Database, token: &str) -> Result<ReadGrant, AccessDenied> {
    queries::get_token(db, token)
        .await
        .ok_or(AccessDenied)?
        .read_grant()
}

pub async fn get_write_grant(db: &Database, token: &str) -> Result<WriteGrant, AccessDenied> {
    queries::get_token(db, token)
        .await
        .ok_or(AccessDenied)?
        .write_grant()
}

mod queries {
    use super::entities::{Permissions, Token};
    use super::{TokenHash, TokenId};
    use crate::{database::Database, user};
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    pub(super) async fn get_token(db: &Database, token: &str) -> Option<Token> {
        let token_hash = TokenHash::generate(token);
        sqlx::query_as::<_, TokenRow>(
            r#"SELECT id, user_id, can_read, can_write, disabled FROM auth_tokens
                WHERE token_hash = $1"#,
        )
        .bind(token_hash.as_str())
        .fetch_optional(db)
        .await
        .unwrap()
        .map(|row| row.into_entity())
    }

    #[derive(Debug, sqlx::FromRow)]
    struct TokenRow {
        id: Uuid,
        user_id: Uuid,
        can_read: bool,
        can_write: bool,
        disabled: Option<DateTime<Utc>>,
    }

    impl TokenRow {
        fn into_entity(self) -> Token {
            Token {
                id: TokenId(self.id),
                user_id: user::Id(self.user_id),
                permissions: Permissions {
                    can_read: self.can_read,
                    can_write: self.can_write,
                },
                disabled: self.disabled,
            }
        }
    }
}
