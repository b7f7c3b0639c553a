use std::fmt;

/// Username given to requests that carry no usable credentials.
pub const ANONYMOUS: &str = "anonymous";

/// Effective username of a request.
///
/// Defaults to [`ANONYMOUS`]. Set to the decoded `Basic` username or to the key identifier of
/// a parsed signature.
///
/// A `Basic` payload with an empty username (e.g. `":"`) yields a username of `None`. That
/// means "credentials were sent, but without a username" and is distinct from
/// the anonymous default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(Option<String>);

impl Username {
    /// Creates a username, where `None` stands for an explicitly empty one.
    pub fn new(username: Option<String>) -> Self {
        Username(username)
    }

    /// The `"anonymous"` username.
    pub fn anonymous() -> Self {
        Username(Some(ANONYMOUS.to_owned()))
    }

    /// Returns the username, or `None` if the credentials supplied an empty one.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns `true` for the literal `"anonymous"` username.
    pub fn is_anonymous(&self) -> bool {
        self.as_str() == Some(ANONYMOUS)
    }

    /// Consumes the username, returning the inner value.
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

impl Default for Username {
    fn default() -> Self {
        Username::anonymous()
    }
}

impl From<&str> for Username {
    fn from(username: &str) -> Self {
        Username(Some(username.to_owned()))
    }
}

impl From<String> for Username {
    fn from(username: String) -> Self {
        Username(Some(username))
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or_default())
    }
}
