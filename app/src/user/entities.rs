use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug)]
pub struct Email(pub String);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(pub Uuid);

#[derive(Debug)]
pub struct User {
    pub id: Id,
    pub email: Email,
    pub created: DateTime<Utc>,
}
