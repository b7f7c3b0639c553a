pub mod basic;
pub mod signature;

/// Authentication scheme named by the first token of an `Authorization` header.
///
/// Matching is case-insensitive; the token itself is kept separately by
/// [`ParsedAuthorization`](super::ParsedAuthorization) in its original casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    /// HTTP `Basic`, decoded by [`Basic`](basic::Basic).
    Basic,

    /// `Signature`, handed off to a [`SignatureParser`](signature::SignatureParser).
    Signature,

    /// Any other scheme. Not decoded.
    Unknown,
}

impl SchemeKind {
    /// Classify a scheme token.
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("basic") {
            SchemeKind::Basic
        } else if token.eq_ignore_ascii_case("signature") {
            SchemeKind::Signature
        } else {
            SchemeKind::Unknown
        }
    }
}
