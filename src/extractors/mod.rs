//! Access to the parsed authorization from handlers, guards and downstream middleware.
//!
//! [`AuthorizationParser`](crate::middleware::AuthorizationParser) stores a
//! [`ParsedAuthorization`] and a [`Username`] in the request extensions. Both types implement
//! [`FromRequest`], and [`AuthorizationExt`] reads them from other request types.

use actix_utils::future::{ready, Ready};
use actix_web::{
    dev::{Payload, ServiceRequest, ServiceResponse},
    guard::GuardContext,
    FromRequest, HttpMessage, HttpRequest,
};

use crate::headers::authorization::{ParsedAuthorization, Username};

mod errors;

pub use self::errors::MissingAuthorization;

/// Helper trait to read what [`AuthorizationParser`](crate::middleware::AuthorizationParser)
/// stored for a request.
///
/// Both methods return `None` if the middleware has not run for the request.
pub trait AuthorizationExt {
    /// Parsed `Authorization` header.
    fn get_authorization(&self) -> Option<ParsedAuthorization>;

    /// Effective username.
    fn get_username(&self) -> Option<Username>;
}

impl AuthorizationExt for HttpRequest {
    fn get_authorization(&self) -> Option<ParsedAuthorization> {
        self.extensions().get::<ParsedAuthorization>().cloned()
    }

    fn get_username(&self) -> Option<Username> {
        self.extensions().get::<Username>().cloned()
    }
}

impl AuthorizationExt for ServiceRequest {
    fn get_authorization(&self) -> Option<ParsedAuthorization> {
        self.extensions().get::<ParsedAuthorization>().cloned()
    }

    fn get_username(&self) -> Option<Username> {
        self.extensions().get::<Username>().cloned()
    }
}

impl<B> AuthorizationExt for ServiceResponse<B> {
    fn get_authorization(&self) -> Option<ParsedAuthorization> {
        self.request().get_authorization()
    }

    fn get_username(&self) -> Option<Username> {
        self.request().get_username()
    }
}

impl AuthorizationExt for GuardContext<'_> {
    fn get_authorization(&self) -> Option<ParsedAuthorization> {
        self.req_data().get::<ParsedAuthorization>().cloned()
    }

    fn get_username(&self) -> Option<Username> {
        self.req_data().get::<Username>().cloned()
    }
}

/// Extractor for the parsed `Authorization` header.
///
/// # Example
///
/// ```
/// use actix_web_authparser::headers::authorization::ParsedAuthorization;
///
/// async fn index(auth: ParsedAuthorization) -> String {
///     format!("scheme: {}", auth.scheme().unwrap_or("none"))
/// }
/// ```
impl FromRequest for ParsedAuthorization {
    type Error = MissingAuthorization;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(req.get_authorization().ok_or_else(|| {
            log::error!("`ParsedAuthorization` requested but `AuthorizationParser` did not run");
            MissingAuthorization
        }))
    }
}

/// Extractor for the effective username.
///
/// # Example
///
/// ```
/// use actix_web_authparser::headers::authorization::Username;
///
/// async fn index(username: Username) -> String {
///     format!("Hello, {}!", username)
/// }
/// ```
impl FromRequest for Username {
    type Error = MissingAuthorization;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(req.get_username().ok_or_else(|| {
            log::error!("`Username` requested but `AuthorizationParser` did not run");
            MissingAuthorization
        }))
    }
}
