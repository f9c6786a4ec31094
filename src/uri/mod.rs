//! The URI value type.

mod parser;

use crate::{
    component::Scheme,
    encoding::{self, charset::UTF_8},
    error::ParseError,
};
use std::{fmt, hash, num::NonZeroUsize, str::FromStr};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Meta {
    // The index of the trailing colon.
    pub(crate) scheme_end: Option<NonZeroUsize>,
    pub(crate) auth: Option<AuthMeta>,
    pub(crate) path_bounds: (usize, usize),
    // One byte past the last byte of query.
    pub(crate) query_end: Option<NonZeroUsize>,
    // One byte past the "#".
    pub(crate) fragment_start: Option<NonZeroUsize>,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct AuthMeta {
    pub(crate) start: usize,
    pub(crate) end: usize,
    // `None` when the authority does not take the server form
    // `[userinfo "@"] host [":" port]`. Brackets of an IP literal are
    // included in the bounds.
    pub(crate) host_bounds: Option<(usize, usize)>,
}

/// An immutable, parsed URI reference.
///
/// This type holds the string form of the reference together with the
/// positions of its components, and hands out both the *raw*
/// (percent-encoded) and the *decoded* form of each component. It sits
/// at both ends of [`UriBuilder`]: a builder can be populated from a
/// `Uri` and produces one with [`build`].
///
/// An authority is kept undecomposed when it does not match the server
/// form `[userinfo "@"] host [":" port]` (for instance when the port is
/// not numeric). In that case [`raw_authority`] is present while
/// [`host`] is `None`.
///
/// [`UriBuilder`]: crate::UriBuilder
/// [`build`]: crate::UriBuilder::build
/// [`raw_authority`]: Self::raw_authority
/// [`host`]: Self::host
///
/// # Examples
///
/// ```
/// use uri_forge::Uri;
///
/// let uri = Uri::parse("foo://user@example.com:8042/over/there?name=ferret#nose")?;
///
/// assert_eq!(uri.scheme().unwrap().as_str(), "foo");
/// assert_eq!(uri.raw_authority(), Some("user@example.com:8042"));
/// assert_eq!(uri.host(), Some("example.com"));
/// assert_eq!(uri.port(), 8042);
/// assert_eq!(uri.raw_path(), Some("/over/there"));
/// assert_eq!(uri.raw_query(), Some("name=ferret"));
/// assert_eq!(uri.raw_fragment(), Some("nose"));
/// # Ok::<_, uri_forge::ParseError>(())
/// ```
#[derive(Clone)]
pub struct Uri {
    val: String,
    meta: Meta,
}

impl Uri {
    /// Parses a URI reference from a string.
    ///
    /// # Errors
    ///
    /// Returns `Err` with the index of the offending byte if the input
    /// is not a valid URI reference.
    pub fn parse(s: impl Into<String>) -> Result<Uri, ParseError> {
        let val = s.into();
        let meta = parser::parse(val.as_bytes())?;
        Ok(Uri { val, meta })
    }

    /// Returns the URI reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.val
    }

    /// Returns the optional scheme component.
    #[must_use]
    pub fn scheme(&self) -> Option<&Scheme> {
        self.meta
            .scheme_end
            .map(|end| Scheme::new_validated(&self.val[..end.get()]))
    }

    /// Returns the raw scheme-specific part: everything between the
    /// scheme colon and the fragment.
    #[must_use]
    pub fn raw_scheme_specific_part(&self) -> &str {
        let start = self.meta.scheme_end.map_or(0, |end| end.get() + 1);
        let end = self
            .meta
            .fragment_start
            .map_or(self.val.len(), |fs| fs.get() - 1);
        &self.val[start..end]
    }

    /// Returns the raw authority component.
    #[must_use]
    pub fn raw_authority(&self) -> Option<&str> {
        self.meta.auth.map(|a| &self.val[a.start..a.end])
    }

    /// Returns the raw userinfo subcomponent.
    #[must_use]
    pub fn raw_userinfo(&self) -> Option<&str> {
        let a = self.meta.auth?;
        let (host_start, _) = a.host_bounds?;
        (host_start > a.start).then(|| &self.val[a.start..host_start - 1])
    }

    /// Returns the decoded userinfo subcomponent.
    #[must_use]
    pub fn userinfo(&self) -> Option<String> {
        self.raw_userinfo().map(|s| encoding::decode(s, UTF_8))
    }

    /// Returns the host subcomponent, brackets included for an IP
    /// literal.
    ///
    /// Returns `None` when there is no authority or when the authority
    /// is not in server form.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        let a = self.meta.auth?;
        a.host_bounds.map(|(start, end)| &self.val[start..end])
    }

    /// Returns the port subcomponent as a signed integer, `-1` when
    /// absent or empty.
    #[must_use]
    pub fn port(&self) -> i32 {
        let port = self.raw_port().unwrap_or("");
        port.parse().unwrap_or(-1)
    }

    fn raw_port(&self) -> Option<&str> {
        let a = self.meta.auth?;
        let (_, host_end) = a.host_bounds?;
        (host_end < a.end).then(|| &self.val[host_end + 1..a.end])
    }

    /// Returns the raw path component.
    ///
    /// Returns `None` for an opaque URI: the path of `mailto:a@b` is
    /// part of the scheme-specific part, not a hierarchical component.
    #[must_use]
    pub fn raw_path(&self) -> Option<&str> {
        (!self.is_opaque()).then(|| self.raw_path_unchecked())
    }

    fn raw_path_unchecked(&self) -> &str {
        let (start, end) = self.meta.path_bounds;
        &self.val[start..end]
    }

    /// Returns the raw query component.
    #[must_use]
    pub fn raw_query(&self) -> Option<&str> {
        self.meta
            .query_end
            .map(|end| &self.val[self.meta.path_bounds.1 + 1..end.get()])
    }

    /// Returns the raw fragment component.
    #[must_use]
    pub fn raw_fragment(&self) -> Option<&str> {
        self.meta.fragment_start.map(|start| &self.val[start.get()..])
    }

    /// Returns the decoded fragment component.
    #[must_use]
    pub fn fragment(&self) -> Option<String> {
        self.raw_fragment().map(|s| encoding::decode(s, UTF_8))
    }

    /// Checks whether the URI reference is absolute, i.e., carries a
    /// scheme.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.meta.scheme_end.is_some()
    }

    /// Checks whether the URI is opaque: absolute, with no authority,
    /// and with a scheme-specific part that does not start with `'/'`.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.is_absolute()
            && self.meta.auth.is_none()
            && !self.raw_path_unchecked().is_empty()
            && !self.raw_path_unchecked().starts_with('/')
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl PartialEq<str> for Uri {
    fn eq(&self, other: &str) -> bool {
        self.val == other
    }
}

impl PartialEq<&str> for Uri {
    fn eq(&self, other: &&str) -> bool {
        self.val == *other
    }
}

impl PartialEq<Uri> for str {
    fn eq(&self, other: &Uri) -> bool {
        self == other.val
    }
}

impl Eq for Uri {}

impl hash::Hash for Uri {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.val.hash(state);
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.val)
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Uri").field(&self.val).finish()
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Uri, ParseError> {
        Uri::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Uri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Uri::parse(s).map_err(de::Error::custom)
    }
}
