//! Delegation of the `Signature` scheme to an external parser.
//!
//! This crate does not understand the signature grammar or verify anything cryptographic.
//! A [`SignatureParser`] does the parsing; this module pins the algorithms it may accept
//! and converts its failures into [`InvalidHeader`].

use std::{borrow::Cow, collections::BTreeMap, fmt};

use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};

use crate::headers::authorization::errors::InvalidHeader;

/// Algorithms a signature parser is allowed to accept.
///
/// Always replaces whatever [`SignatureOptions::algorithms`] the caller configured.
pub const ALGORITHMS: [&str; 7] = [
    "rsa-sha1",
    "rsa-sha256",
    "rsa-sha512",
    "dsa-sha1",
    "hmac-sha1",
    "hmac-sha256",
    "hmac-sha512",
];

/// Options handed to a [`SignatureParser`].
///
/// # Examples
/// ```
/// # use actix_web_authparser::headers::authorization::SignatureOptions;
/// let options = SignatureOptions::default()
///     .headers(["(request-target)", "host", "date"])
///     .clock_skew(300);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignatureOptions {
    /// Accepted signing algorithms.
    pub algorithms: Vec<Cow<'static, str>>,

    /// Headers that must be covered by the signature.
    pub headers: Vec<String>,

    /// Maximum allowed skew, in seconds, between the `Date` header and the server clock.
    pub clock_skew: Option<u64>,

    /// Whether the parser should reject deprecated parameter forms.
    pub strict: bool,
}

impl SignatureOptions {
    /// Set the accepted signing algorithms.
    ///
    /// Note that [`AuthorizationParser`](crate::middleware::AuthorizationParser) overrides
    /// this list with [`ALGORITHMS`] before calling the parser.
    pub fn algorithms<I, T>(mut self, algorithms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Cow<'static, str>>,
    {
        self.algorithms = algorithms.into_iter().map(Into::into).collect();
        self
    }

    /// Set the headers that must be covered by the signature.
    pub fn headers<I, T>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the maximum allowed clock skew in seconds.
    pub fn clock_skew(mut self, seconds: u64) -> Self {
        self.clock_skew = Some(seconds);
        self
    }

    /// Set strict parsing mode.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Returns a copy of these options with `algorithms` pinned to [`ALGORITHMS`].
    pub fn effective(&self) -> Self {
        SignatureOptions {
            algorithms: ALGORITHMS.iter().copied().map(Cow::Borrowed).collect(),
            ..self.clone()
        }
    }
}

/// Result of parsing a `Signature` authorization header.
///
/// Produced by a [`SignatureParser`]. Only [`key_id`](Self::key_id) is read by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSignature {
    key_id: String,
    scheme: String,
    algorithm: Option<String>,
    headers: Vec<String>,
    signature: Option<String>,
    signing_string: Option<String>,
    params: BTreeMap<String, String>,
}

impl ParsedSignature {
    /// Creates a parsed signature for `key_id` with every other field empty.
    pub fn new(key_id: impl Into<String>) -> Self {
        ParsedSignature {
            key_id: key_id.into(),
            scheme: "Signature".to_owned(),
            algorithm: None,
            headers: Vec::new(),
            signature: None,
            signing_string: None,
            params: BTreeMap::new(),
        }
    }

    /// Set the signing algorithm.
    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// Set the list of signed headers.
    pub fn headers<I, T>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the encoded signature.
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Set the reconstructed signing string.
    pub fn signing_string(mut self, signing_string: impl Into<String>) -> Self {
        self.signing_string = Some(signing_string.into());
        self
    }

    /// Add a raw header parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Key identifier, used as the request's username.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Scheme name as it appeared in the header.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Signing algorithm, if the header named one.
    pub fn get_algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    /// Signed header names.
    pub fn get_headers(&self) -> &[String] {
        &self.headers
    }

    /// Encoded signature.
    pub fn get_signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Reconstructed signing string.
    pub fn get_signing_string(&self) -> Option<&str> {
        self.signing_string.as_deref()
    }

    /// All raw header parameters.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

/// Parser for the `Signature` authorization scheme.
///
/// Implemented for any `Fn(&HttpRequest, &SignatureOptions) -> Result<ParsedSignature, E>`
/// closure where `E: Display`.
pub trait SignatureParser {
    /// Error returned by the parser. Only its message is kept.
    type Error: fmt::Display;

    /// Parse the signature carried by `req`.
    fn parse_signature(
        &self,
        req: &HttpRequest,
        options: &SignatureOptions,
    ) -> Result<ParsedSignature, Self::Error>;
}

impl<F, E> SignatureParser for F
where
    F: Fn(&HttpRequest, &SignatureOptions) -> Result<ParsedSignature, E>,
    E: fmt::Display,
{
    type Error = E;

    fn parse_signature(
        &self,
        req: &HttpRequest,
        options: &SignatureOptions,
    ) -> Result<ParsedSignature, Self::Error> {
        (self)(req, options)
    }
}

/// Run `parser` against `req` with the algorithm whitelist enforced.
pub fn decode<P>(
    req: &HttpRequest,
    parser: &P,
    options: &SignatureOptions,
) -> Result<ParsedSignature, InvalidHeader>
where
    P: SignatureParser + ?Sized,
{
    parser
        .parse_signature(req, &options.effective())
        .map_err(|err| {
            log::debug!("signature parser rejected header: {err}");
            InvalidHeader::Signature(err.to_string())
        })
}
