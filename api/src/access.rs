use std::future::Future;

use app::{database::Database, user};
use rocket::{
    async_trait,
    http::Status,
    request::{FromRequest, Outcome},
    Request,
};
use thiserror::Error;

use crate::state::RocketState;

pub struct ReadGuard(app::auth::ReadGrant);

impl ReadGuard {
    pub fn grant(&self) -> &app::auth::ReadGrant {
        &self.0
    }
}

pub struct WriteGuard(app::auth::WriteGrant);

impl WriteGuard {
    pub fn grant(&self) -> &app::auth::WriteGrant {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("no token supplied")]
    Unauthenticated,
    #[error("access denied")]
    AccessDenied(#[from] app::auth::AccessDenied),
    #[error("rate limit exceeded")]
    RateLimited,
}

pub const TOKEN_HEADER: &str = "X-Auth-Token";

#[async_trait]
impl<'r> FromRequest<'r> for ReadGuard {
    type Error = Error;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        guard_impl(req, app::auth::get_read_grant, Self).await
    }
}

#[async_trait]
impl<'r> FromRequest<'r> for WriteGuard {
    type Error = Error;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        guard_impl(req, app::auth::get_write_grant, Self).await
    }
}

/// Requests without a token are 401, which the catcher turns into a redirect to the
/// authentication entry point. Requests with an unusable token are 403.
async fn guard_impl<
    'a,
    'b,
    G: AnyGrant,
    F: Future<Output = Result<G, app::auth::AccessDenied>> + 'a,
    R,
>(
    req: &'a Request<'b>,
    get_grant: impl FnOnce(&'a Database, &'a str) -> F,
    create_guard: impl FnOnce(G) -> R,
) -> Outcome<R, Error> {
    match req.headers().get_one(TOKEN_HEADER) {
        Some(token) => {
            let state = req.rocket().state::<RocketState>().unwrap();
            match get_grant(&state.db, token).await {
                Ok(grant) => {
                    if state.rate_limit.limit(grant.user_id()) {
                        log::info!("rate limiting user {:?}", grant.user_id());
                        Outcome::Error((Status::TooManyRequests, Error::RateLimited))
                    } else {
                        Outcome::Success(create_guard(grant))
                    }
                }
                Err(e) => Outcome::Error((Status::Forbidden, e.into())),
            }
        }
        None => Outcome::Error((Status::Unauthorized, Error::Unauthenticated)),
    }
}

/// Helper trait implemented for all grant types.
trait AnyGrant {
    /// Every grant applies to a user.
    fn user_id(&self) -> user::Id;
}

impl AnyGrant for app::auth::ReadGrant {
    fn user_id(&self) -> user::Id {
        self.user_id
    }
}

impl AnyGrant for app::auth::WriteGrant {
    fn user_id(&self) -> user::Id {
        self.user_id
    }
}
