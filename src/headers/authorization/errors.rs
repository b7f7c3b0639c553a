use std::{error::Error, fmt, str};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

/// Error returned when an `Authorization` header is present but cannot be parsed.
///
/// Every variant is the same kind of failure to callers: the header is invalid. Variants only
/// record which stage rejected it, so that [`source`](Error::source) can point at the
/// underlying cause.
#[derive(Debug)]
pub enum InvalidHeader {
    /// Header value could not be split into a scheme and credentials.
    Malformed,

    /// `Basic` credentials did not decode to a non-empty UTF-8 string.
    Basic(BasicError),

    /// Signature parser rejected the header. Holds the parser's message.
    Signature(String),
}

/// Reason the `Basic` decoder rejected its payload.
#[derive(Debug)]
pub enum BasicError {
    /// Malformed base64 string.
    Base64DecodeError(base64::DecodeError),

    /// Malformed UTF-8 string.
    Utf8Error(str::Utf8Error),

    /// Payload decoded to nothing.
    Empty,
}

impl InvalidHeader {
    /// Returns `true` if the header failed to split into scheme and credentials.
    pub fn is_malformed(&self) -> bool {
        matches!(self, InvalidHeader::Malformed)
    }
}

impl fmt::Display for InvalidHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidHeader::Malformed => f.write_str("header content is invalid"),
            InvalidHeader::Basic(_) => f.write_str("Authorization header invalid"),
            InvalidHeader::Signature(msg) => write!(f, "Authorization header invalid: {msg}"),
        }
    }
}

impl Error for InvalidHeader {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            InvalidHeader::Malformed => None,
            InvalidHeader::Basic(err) => Some(err),
            InvalidHeader::Signature(_) => None,
        }
    }
}

impl ResponseError for InvalidHeader {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}

impl fmt::Display for BasicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasicError::Base64DecodeError(err) => fmt::Display::fmt(err, f),
            BasicError::Utf8Error(err) => fmt::Display::fmt(err, f),
            BasicError::Empty => f.write_str("empty credentials"),
        }
    }
}

impl Error for BasicError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BasicError::Base64DecodeError(err) => Some(err),
            BasicError::Utf8Error(err) => Some(err),
            BasicError::Empty => None,
        }
    }
}

impl From<BasicError> for InvalidHeader {
    fn from(err: BasicError) -> Self {
        InvalidHeader::Basic(err)
    }
}

impl From<base64::DecodeError> for InvalidHeader {
    fn from(err: base64::DecodeError) -> Self {
        InvalidHeader::Basic(BasicError::Base64DecodeError(err))
    }
}

impl From<str::Utf8Error> for InvalidHeader {
    fn from(err: str::Utf8Error) -> Self {
        InvalidHeader::Basic(BasicError::Utf8Error(err))
    }
}
