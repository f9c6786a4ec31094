//! Error types.

use std::{error, fmt};

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseErrorKind {
    /// Invalid percent-encoded octet that is either non-hexadecimal or incomplete.
    ///
    /// The error index points to the percent character "%" of the octet.
    InvalidOctet,
    /// Unexpected character that is not allowed by the URI syntax.
    ///
    /// The error index points to the first byte of the character.
    UnexpectedChar,
    /// Invalid IPv6 address.
    ///
    /// The error index points to the first byte of the address.
    InvalidIpv6Addr,
}

/// An error occurred when parsing a URI or an authority.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    /// Returns the byte index at which the error occurred.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseError")
            .field("index", &self.index)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ParseErrorKind::InvalidOctet => "invalid percent-encoded octet",
            ParseErrorKind::UnexpectedChar => "unexpected character",
            ParseErrorKind::InvalidIpv6Addr => "invalid IPv6 address",
        };
        write!(f, "{msg} at index {}", self.index)
    }
}

impl error::Error for ParseError {}

/// Detailed cause of a [`BuildError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BuildErrorKind {
    /// An `http` or `https` URI with no host, or a blank one.
    BlankHttpHost,
    /// The serialized components do not form a valid URI.
    Syntax(ParseError),
}

/// An error occurred when building a URI.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BuildError(pub(crate) BuildErrorKind);

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            BuildErrorKind::BlankHttpHost => {
                f.write_str("http/https URI cannot have an empty host identifier")
            }
            BuildErrorKind::Syntax(e) => write!(f, "built string is not a valid URI: {e}"),
        }
    }
}

impl error::Error for BuildError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.0 {
            BuildErrorKind::Syntax(e) => Some(e),
            BuildErrorKind::BlankHttpHost => None,
        }
    }
}

impl From<ParseError> for BuildError {
    fn from(e: ParseError) -> Self {
        BuildError(BuildErrorKind::Syntax(e))
    }
}
