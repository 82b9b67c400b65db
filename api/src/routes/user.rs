//! Routes for querying user information.

use chrono::{DateTime, Utc};
use rocket::{get, serde::json::Json, State};
use serde::Serialize;

use app::user;

use crate::{access, state::RocketState};

#[derive(Debug, Serialize)]
struct UserModel {
    /// Registered user email.
    email: String,
    /// When the account was created.
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct UserResponse {
    user: UserModel,
}

/// Get details of the authenticated account.
#[get("/user")]
pub(super) async fn get(
    guard: access::ReadGuard,
    state: &State<RocketState>,
) -> Option<Json<UserResponse>> {
    user::get(guard.grant(), &state.db).await.map(|user| {
        Json(UserResponse {
            user: UserModel {
                email: user.email.0,
                created_at: user.created,
            },
        })
    })
}
