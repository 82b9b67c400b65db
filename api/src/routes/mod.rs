//! Add top-level routes as submodules here.

use crate::{
    error::{self, JsonError},
    state::RocketState,
};
use const_format::formatcp;
use rocket::{catch, catchers, get, response::Redirect, routes, serde::json::Json, Build, FromForm, Rocket};
use serde::Serialize;

mod expenses;
mod user;

pub(crate) const VERSION: &str = "/v0";

/// Where successful mutations redirect to.
pub(crate) const LIST_URI: &str = formatcp!("{}/expenses", VERSION);
const LOGIN_URI: &str = formatcp!("{}/login", VERSION);

/// Year filter parsed from the query string. An absent year means "all records" for the listing
/// and "the current year" for the monthly breakdown; the year's numeric value itself is not
/// validated further, a nonsensical year just matches nothing.
#[derive(FromForm)]
pub(super) struct YearFilter {
    year: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterError {
    /// Invalid year.
    InvalidYear,
}

impl YearFilter {
    pub(super) fn year(self) -> Result<Option<i32>, JsonError<FilterError>> {
        match self.year {
            None => Ok(None),
            Some(s) => s.trim().parse().map(Some).map_err(|_| {
                error::bad_request(FilterError::InvalidYear, "year is not a number".to_owned())
            }),
        }
    }
}

pub fn register(rocket: Rocket<Build>, state: RocketState) -> Rocket<Build> {
    rocket
        .manage(state)
        .mount(
            VERSION,
            routes![
                expenses::list,
                expenses::get,
                expenses::post,
                expenses::delete,
                user::get,
                login,
            ],
        )
        .register(VERSION, catchers![unauthorized])
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    message: &'static str,
}

/// The authentication entry point. Identity management is external to this service; requests
/// authenticate by presenting a token in the header named here.
#[get("/login")]
fn login() -> Json<LoginResponse> {
    Json(LoginResponse {
        message: formatcp!(
            "authenticate by sending a token in the \"{}\" header",
            crate::access::TOKEN_HEADER
        ),
    })
}

/// Unauthenticated requests are sent to the authentication entry point.
#[catch(401)]
fn unauthorized() -> Redirect {
    Redirect::to(LOGIN_URI)
}
