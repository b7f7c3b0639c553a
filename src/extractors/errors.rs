use std::{error::Error, fmt};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

/// Error returned by the extractors when nothing was stored for the request.
///
/// This happens when a route is not wrapped by
/// [`AuthorizationParser`](crate::middleware::AuthorizationParser).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingAuthorization;

impl fmt::Display for MissingAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("authorization was not parsed for this request; is `AuthorizationParser` registered?")
    }
}

impl Error for MissingAuthorization {}

impl ResponseError for MissingAuthorization {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).finish()
    }
}
