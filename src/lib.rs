//! `Authorization` header parsing for [actix-web](https://actix.rs).
//!
//! Provides:
//! - A [`ParsedAuthorization`] value holding the raw scheme and credentials of the header,
//!   plus the decoded credentials for known schemes
//! - [Middleware] that parses the header once per request and stores the result, together
//!   with the request's [`Username`], in the request extensions
//! - [Extractors] to read both from handlers, guards and downstream middleware
//!
//! Credentials are only parsed and classified, never verified.
//!
//! ## Supported schemes
//!
//! - `Basic`, as defined in [RFC7617](https://tools.ietf.org/html/rfc7617)
//! - `Signature`, delegated to a user-supplied [`SignatureParser`] with the accepted
//!   algorithms pinned to [`ALGORITHMS`]
//!
//! Other schemes are recorded verbatim but not decoded. A header with no scheme at all is
//! taken to be bare `Basic` credentials.
//!
//! [`ParsedAuthorization`]: crate::headers::authorization::ParsedAuthorization
//! [`Username`]: crate::headers::authorization::Username
//! [`SignatureParser`]: crate::headers::authorization::SignatureParser
//! [`ALGORITHMS`]: crate::headers::authorization::ALGORITHMS
//! [Middleware]: crate::middleware::AuthorizationParser
//! [Extractors]: crate::extractors

#![deny(missing_docs, nonstandard_style, rust_2018_idioms)]
#![deny(clippy::all)]

pub mod extractors;
pub mod headers;
pub mod middleware;
