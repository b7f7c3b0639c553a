use actix_web::{http::header::AUTHORIZATION, HttpRequest};

use crate::headers::authorization::{
    errors::InvalidHeader,
    scheme::{
        basic::Basic,
        signature::{self, ParsedSignature, SignatureOptions, SignatureParser},
        SchemeKind,
    },
    username::Username,
};

/// Parsed contents of the `Authorization` header, defined in [RFC 7235](https://tools.ietf.org/html/rfc7235#section-4.2)
///
/// The raw scheme and credentials are kept verbatim. Credentials are decoded only for the
/// schemes this crate knows about (`Basic` and `Signature`), so at most one of
/// [`basic`](Self::basic) and [`signature`](Self::signature) is ever set.
///
/// An empty value (no scheme, no credentials) means the request carried no `Authorization`
/// header.
///
/// # Example
///
/// ```
/// # use actix_web_authparser::headers::authorization::ParsedAuthorization;
/// async fn handler(auth: ParsedAuthorization) -> String {
///     match auth.basic() {
///         Some(basic) => format!("Hello, {}!", basic.username().unwrap_or("stranger")),
///         None => "Hello!".to_owned(),
///     }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAuthorization {
    scheme: Option<String>,
    credentials: Option<String>,
    payload: Payload,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Payload {
    #[default]
    None,
    Basic(Basic),
    Signature(ParsedSignature),
}

impl ParsedAuthorization {
    /// Parse the `Authorization` header of `req`.
    ///
    /// A missing or empty header is not an error and yields an empty value. A header with an
    /// unknown scheme is not an error either; only its raw parts are recorded.
    ///
    /// `Signature` credentials are handed to `parser` along with `options`, whose algorithm
    /// list is replaced by [`ALGORITHMS`](signature::ALGORITHMS) first.
    pub fn parse<P>(
        req: &HttpRequest,
        parser: &P,
        options: &SignatureOptions,
    ) -> Result<Self, InvalidHeader>
    where
        P: SignatureParser + ?Sized,
    {
        let header = match req.headers().get(AUTHORIZATION) {
            Some(header) if !header.is_empty() => header,
            _ => return Ok(ParsedAuthorization::default()),
        };

        let header = header.to_str().map_err(|err| {
            log::debug!("Authorization header is not visible ASCII: {err}");
            InvalidHeader::Malformed
        })?;

        let (scheme, credentials) = split(header)?;

        let payload = match SchemeKind::from_token(scheme) {
            SchemeKind::Basic => Payload::Basic(Basic::decode(credentials)?),
            SchemeKind::Signature => {
                Payload::Signature(signature::decode(req, parser, options)?)
            }
            SchemeKind::Unknown => {
                log::trace!("leaving credentials of unknown scheme `{scheme}` undecoded");
                Payload::None
            }
        };

        Ok(ParsedAuthorization {
            scheme: Some(scheme.to_owned()),
            credentials: Some(credentials.to_owned()),
            payload,
        })
    }

    /// Scheme token as it appeared in the header, or `"Basic"` for a header without one.
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Everything in the header after the scheme token.
    pub fn credentials(&self) -> Option<&str> {
        self.credentials.as_deref()
    }

    /// Classification of [`scheme`](Self::scheme), if a header was present.
    pub fn scheme_kind(&self) -> Option<SchemeKind> {
        self.scheme.as_deref().map(SchemeKind::from_token)
    }

    /// Decoded `Basic` credentials.
    pub fn basic(&self) -> Option<&Basic> {
        match &self.payload {
            Payload::Basic(basic) => Some(basic),
            _ => None,
        }
    }

    /// Result of the signature parser.
    pub fn signature(&self) -> Option<&ParsedSignature> {
        match &self.payload {
            Payload::Signature(signature) => Some(signature),
            _ => None,
        }
    }

    /// Returns `true` if the request had no `Authorization` header.
    pub fn is_empty(&self) -> bool {
        self.scheme.is_none()
    }

    /// Username implied by these credentials.
    ///
    /// This is the `Basic` username (possibly `None`), the signature's key identifier, or
    /// [`Username::anonymous`] otherwise.
    pub fn username(&self) -> Username {
        match &self.payload {
            Payload::None => Username::anonymous(),
            Payload::Basic(basic) => Username::new(basic.username().map(str::to_owned)),
            Payload::Signature(signature) => Username::from(signature.key_id()),
        }
    }
}

/// Split a header value into `(scheme, credentials)` at the first space.
///
/// A value without any space is taken to be bare `Basic` credentials.
fn split(header: &str) -> Result<(&str, &str), InvalidHeader> {
    match header.split_once(' ') {
        Some((scheme, credentials)) if !scheme.is_empty() && !credentials.is_empty() => {
            Ok((scheme, credentials))
        }
        Some(_) => Err(InvalidHeader::Malformed),
        None => Ok(("Basic", header)),
    }
}
