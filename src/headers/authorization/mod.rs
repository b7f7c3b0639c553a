//! `Authorization` header parsing and the supported schemes.

mod errors;
mod header;
mod scheme;
mod username;

pub use self::{
    errors::{BasicError, InvalidHeader},
    header::ParsedAuthorization,
    scheme::{
        basic::Basic,
        signature::{
            self, ParsedSignature, SignatureOptions, SignatureParser, ALGORITHMS,
        },
        SchemeKind,
    },
    username::{Username, ANONYMOUS},
};
