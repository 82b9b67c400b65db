//! Handles user authentication, authorization, and tokens. Authentication is proven by possession
//! of a token; authorization is proven by possession of a grant. There are two different grants:
//! read and write, and they're encoded as two separate types in the type system.

use crate::user;
use chrono::{DateTime, Utc};
use sha2::Digest;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
#[error("access denied")]
pub struct AccessDenied;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TokenId(pub Uuid);

/// This grant represents a compile-time proof that the token is authorized to read the owner's
/// records.
#[derive(Debug)]
pub struct ReadGrant {
    pub token_id: TokenId,
    pub user_id: user::Id,
}

/// This grant represents a compile-time proof that the token is authorized to create and delete
/// the owner's records.
#[derive(Debug)]
pub struct WriteGrant {
    pub token_id: TokenId,
    pub user_id: user::Id,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Permissions {
    pub can_read: bool,
    pub can_write: bool,
}

/// A hex-encoded hash of the token; this is what gets stored, never the token itself.
pub struct TokenHash(String);

impl TokenHash {
    /// Hashes a token with a specific hashing algorithm.
    ///
    /// Currently, SHA256 is used, without salting. The reason why a fast algorithm like SHA256 is
    /// good enough is because the tokens are generated randomly, so they have a high entropy. High
    /// entropy is also the reason why salting is unnecessary.
    pub(crate) fn generate(token: &str) -> Self {
        let mut hasher = sha2::Sha256::new();
        hasher.update(token);
        let sha = hasher.finalize();
        Self(hex::encode(sha))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// A token proves the identity of a user. A user can generate as many tokens as they want, with
/// different or same permissions.
#[derive(Debug)]
pub struct Token {
    pub(crate) id: TokenId,
    pub(crate) user_id: user::Id,
    pub(crate) permissions: Permissions,
    pub(crate) disabled: Option<DateTime<Utc>>,
}

impl Token {
    pub(crate) fn read_grant(&self) -> Result<ReadGrant, AccessDenied> {
        if self.is_enabled() && self.permissions.can_read {
            Ok(ReadGrant {
                token_id: self.id,
                user_id: self.user_id,
            })
        } else {
            Err(AccessDenied)
        }
    }

    pub(crate) fn write_grant(&self) -> Result<WriteGrant, AccessDenied> {
        if self.is_enabled() && self.permissions.can_write {
            Ok(WriteGrant {
                token_id: self.id,
                user_id: self.user_id,
            })
        } else {
            Err(AccessDenied)
        }
    }

    fn is_enabled(&self) -> bool {
        self.disabled.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(can_read: bool, can_write: bool, disabled: bool) -> Token {
        Token {
            id: TokenId(Uuid::from_u128(1)),
            user_id: user::Id(Uuid::from_u128(2)),
            permissions: Permissions {
                can_read,
                can_write,
            },
            disabled: disabled.then(Utc::now),
        }
    }

    #[test]
    fn grants_follow_permissions() {
        let read_only = token(true, false, false);
        assert!(read_only.read_grant().is_ok());
        assert!(read_only.write_grant().is_err());

        let write_only = token(false, true, false);
        assert!(write_only.read_grant().is_err());
        assert!(write_only.write_grant().is_ok());
    }

    #[test]
    fn disabled_tokens_grant_nothing() {
        let disabled = token(true, true, true);
        assert!(disabled.read_grant().is_err());
        assert!(disabled.write_grant().is_err());
    }
}
