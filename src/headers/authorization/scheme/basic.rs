use std::{fmt, str};

use actix_web::{
    http::header::{HeaderValue, InvalidHeaderValue, TryIntoHeaderValue},
    web::{BufMut, BytesMut},
};
use base64::{prelude::BASE64_STANDARD, Engine};

use crate::headers::authorization::errors::{BasicError, InvalidHeader};

/// Credentials for `Basic` authentication scheme, defined in [RFC 7617](https://tools.ietf.org/html/rfc7617)
///
/// Both slots are optional: an empty username or password is stored as `None`, never as an
/// empty string.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Basic {
    username: Option<String>,
    password: Option<String>,
}

impl Basic {
    /// Creates `Basic` credentials with provided `username` and `password`.
    ///
    /// Empty strings are normalized to `None`.
    ///
    /// # Examples
    /// ```
    /// # use actix_web_authparser::headers::authorization::Basic;
    /// let credentials = Basic::new(Some("Aladdin"), Some("open sesame"));
    /// assert_eq!(credentials.username(), Some("Aladdin"));
    /// ```
    pub fn new<U, P>(username: Option<U>, password: Option<P>) -> Basic
    where
        U: Into<String>,
        P: Into<String>,
    {
        Basic {
            username: username.map(Into::into).filter(|u| !u.is_empty()),
            password: password.map(Into::into).filter(|p| !p.is_empty()),
        }
    }

    /// Decodes the base64 `user:pass` token that follows the `Basic` scheme name.
    ///
    /// A token without a colon is taken as a username with no password.
    ///
    /// # Examples
    /// ```
    /// # use actix_web_authparser::headers::authorization::Basic;
    /// let credentials = Basic::decode("QWxhZGRpbjpvcGVuIHNlc2FtZQ==").unwrap();
    /// assert_eq!(credentials.username(), Some("Aladdin"));
    /// assert_eq!(credentials.password(), Some("open sesame"));
    /// ```
    pub fn decode(token: &str) -> Result<Self, InvalidHeader> {
        let decoded = BASE64_STANDARD.decode(token)?;
        let decoded = str::from_utf8(&decoded)?;

        if decoded.is_empty() {
            return Err(BasicError::Empty.into());
        }

        let (username, password) = match decoded.split_once(':') {
            Some((username, password)) => (username, Some(password)),
            None => (decoded, None),
        };

        Ok(Basic::new(Some(username), password))
    }

    /// Returns client's username, if one was supplied.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns client's password, if one was supplied.
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Consumes the credentials, returning `(username, password)`.
    pub fn into_parts(self) -> (Option<String>, Option<String>) {
        (self.username, self.password)
    }
}

impl fmt::Debug for Basic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Basic")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "******"))
            .finish()
    }
}

impl fmt::Display for Basic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "Basic {}:******",
            self.username.as_deref().unwrap_or_default()
        ))
    }
}

impl TryIntoHeaderValue for Basic {
    type Error = InvalidHeaderValue;

    fn try_into_value(self) -> Result<HeaderValue, Self::Error> {
        let username = self.username.unwrap_or_default();
        let password = self.password.unwrap_or_default();

        let credential_length = username.len() + 1 + password.len();
        let mut value = String::with_capacity(6 + 4 * credential_length.div_ceil(3));
        let mut credentials = BytesMut::with_capacity(credential_length);

        credentials.extend_from_slice(username.as_bytes());
        credentials.put_u8(b':');
        credentials.extend_from_slice(password.as_bytes());

        value.push_str("Basic ");
        BASE64_STANDARD.encode_string(&credentials, &mut value);

        HeaderValue::from_maybe_shared(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        let scheme = Basic::decode("QWxhZGRpbjpvcGVuIHNlc2FtZQ==");

        assert!(scheme.is_ok());
        let scheme = scheme.unwrap();
        assert_eq!(scheme.username(), Some("Aladdin"));
        assert_eq!(scheme.password(), Some("open sesame"));
    }

    #[test]
    fn test_empty_password() {
        let scheme = Basic::decode("QWxhZGRpbjo=").unwrap();

        assert_eq!(scheme.username(), Some("Aladdin"));
        assert_eq!(scheme.password(), None);
    }

    #[test]
    fn test_empty_username() {
        // ":open sesame"
        let scheme = Basic::decode("Om9wZW4gc2VzYW1l").unwrap();

        assert_eq!(scheme.username(), None);
        assert_eq!(scheme.password(), Some("open sesame"));
    }

    #[test]
    fn test_lone_colon() {
        let scheme = Basic::decode("Og==").unwrap();

        assert_eq!(scheme.into_parts(), (None, None));
    }

    #[test]
    fn test_missing_colon() {
        let scheme = Basic::decode("QWxsYWRpbg==").unwrap();

        assert_eq!(scheme.username(), Some("Alladin"));
        assert_eq!(scheme.password(), None);
    }

    #[test]
    fn test_password_keeps_later_colons() {
        // "user:pa:ss"
        let scheme = Basic::decode("dXNlcjpwYTpzcw==").unwrap();

        assert_eq!(scheme.username(), Some("user"));
        assert_eq!(scheme.password(), Some("pa:ss"));
    }

    #[test]
    fn test_empty_token() {
        let err = Basic::decode("").unwrap_err();
        assert!(matches!(err, InvalidHeader::Basic(BasicError::Empty)));
    }

    #[test]
    fn test_invalid_base64() {
        let err = Basic::decode("not base64!").unwrap_err();
        assert!(matches!(
            err,
            InvalidHeader::Basic(BasicError::Base64DecodeError(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        // 0xff 0xfe
        let err = Basic::decode("//4=").unwrap_err();
        assert!(matches!(err, InvalidHeader::Basic(BasicError::Utf8Error(_))));
    }

    #[test]
    fn test_new_normalizes_empty_slots() {
        let basic = Basic::new(Some(""), Some(""));
        assert_eq!(basic, Basic::new(None::<String>, None::<String>));
    }

    #[test]
    fn test_debug_masks_password() {
        let basic = Basic::new(Some("Aladdin"), Some("open sesame"));
        let debug = format!("{basic:?}");

        assert!(debug.contains("Aladdin"));
        assert!(!debug.contains("open sesame"));
        assert_eq!(basic.to_string(), "Basic Aladdin:******");
    }

    #[test]
    fn test_into_header_value() {
        let basic = Basic::new(Some("Aladdin"), Some("open sesame"));

        let result = basic.try_into_value();
        assert!(result.is_ok());
        assert_eq!(
            result.unwrap(),
            HeaderValue::from_static("Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==")
        );
    }
}
