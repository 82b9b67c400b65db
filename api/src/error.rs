use rocket::{http::Status, serde::json::Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Error<E: Serialize> {
    pub error: Inner<E>,
}

#[derive(Debug, Serialize)]
pub struct Inner<E: Serialize> {
    pub code: u16,
    pub description: String,
    pub reason: Option<&'static str>,
    pub status: E,
    /// Set when the error is scoped to one input field rather than the whole request.
    pub field: Option<&'static str>,
}

impl<E: Serialize> Error<E> {
    fn new(
        http_status: Status,
        description: String,
        error: E,
        field: Option<&'static str>,
    ) -> Self {
        Self {
            error: Inner {
                code: http_status.code,
                description,
                reason: http_status.reason(),
                status: error,
                field,
            },
        }
    }
}

pub type JsonError<E> = (Status, Json<Error<E>>);

pub type JsonResult<T, E> = Result<Json<T>, JsonError<E>>;

pub fn bad_request<E: Serialize>(error: E, description: String) -> JsonError<E> {
    (
        Status::BadRequest,
        Json(Error::new(Status::BadRequest, description, error, None)),
    )
}

/// A validation failure attached to one specific input field.
pub fn field_error<E: Serialize>(
    field: &'static str,
    error: E,
    description: String,
) -> JsonError<E> {
    (
        Status::BadRequest,
        Json(Error::new(
            Status::BadRequest,
            description,
            error,
            Some(field),
        )),
    )
}
