//! URI components and endpoint value types.

use crate::{
    encoding::table,
    error::{ParseError, ParseErrorKind},
    ip,
};
use ref_cast::{ref_cast_custom, RefCastCustom};
use std::{fmt, hash};

/// A validated [scheme] name.
///
/// Scheme names are case-insensitive, and `==` on this type honors
/// that: two schemes compare equal when they differ only in ASCII
/// letter case. The spelling found in the input is preserved and
/// available through [`as_str`](Self::as_str).
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
///
/// # Examples
///
/// ```
/// use uri_forge::{component::Scheme, Uri};
///
/// let uri = Uri::parse("WSS://gateway.example/feed")?;
/// let scheme = uri.scheme().unwrap();
///
/// assert_eq!(scheme, Scheme::new_or_panic("wss"));
/// assert_eq!(scheme.as_str(), "WSS");
/// assert_eq!(scheme.default_port(), Some(443));
/// # Ok::<_, uri_forge::ParseError>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

impl Scheme {
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme name according to
    /// [Section 3.1 of RFC 3986][scheme]. For a non-panicking variant,
    /// use [`new`](Self::new).
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.1
    #[inline]
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Self::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Converts a string slice to `&Scheme`, returning `None` if the
    /// conversion fails.
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        if matches!(s.as_bytes(), [first, rem @ ..]
        if first.is_ascii_alphabetic() && table::SCHEME.allows_all(rem))
        {
            Some(Scheme::new_validated(s))
        } else {
            None
        }
    }

    /// Returns the scheme component as a string slice, in its original
    /// letter case.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the default port of the scheme, for the schemes commonly
    /// met in HTTP-adjacent code that are registered at IANA with a
    /// permanent status.
    #[must_use]
    pub fn default_port(&self) -> Option<u16> {
        const MAX_LEN: usize = 6;

        let len = self.inner.len();
        if len > MAX_LEN {
            return None;
        }
        let mut buf = [0u8; MAX_LEN];
        for (i, x) in self.inner.bytes().enumerate() {
            buf[i] = x.to_ascii_lowercase();
        }
        match &buf[..len] {
            b"ftp" => Some(21),
            b"gopher" => Some(70),
            b"http" | b"ws" => Some(80),
            b"https" | b"wss" => Some(443),
            b"imap" => Some(143),
            b"ldap" => Some(389),
            b"nntp" => Some(119),
            b"pop" => Some(110),
            b"rtsp" => Some(554),
            b"telnet" => Some(23),
            _ => None,
        }
    }
}

impl PartialEq for Scheme {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

impl hash::Hash for Scheme {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for x in self.inner.bytes() {
            x.to_ascii_lowercase().hash(state);
        }
    }
}

impl fmt::Debug for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Scheme").field(&&self.inner).finish()
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

/// An [authority] value: optional userinfo, host, and optional port.
///
/// The host never carries the square brackets of an IPv6 literal; they
/// are an encoding detail of the URI. A port of `-1` means unset.
///
/// [authority]: https://datatracker.ietf.org/doc/html/rfc3986#section-3.2
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Authority {
    userinfo: Option<String>,
    host: String,
    port: i32,
}

impl Authority {
    /// Creates an authority from its parts. A negative port normalizes
    /// to `-1` (unset).
    pub fn new(userinfo: Option<String>, host: impl Into<String>, port: i32) -> Authority {
        Authority {
            userinfo,
            host: host.into(),
            port: port.max(-1),
        }
    }

    /// Parses an authority of the form `user:info@host:port`.
    ///
    /// The userinfo ends at the first `'@'`. A bracketed IPv6 literal is
    /// accepted as host, with the brackets stripped. The port, if
    /// present, must be a decimal integer; an empty port reads as unset.
    /// No percent-decoding is performed.
    ///
    /// # Errors
    ///
    /// Returns `Err` on an unmatched or invalid IPv6 literal, a
    /// non-numeric port, or a bare host containing `':'` more than once.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_forge::component::Authority;
    ///
    /// let auth = Authority::parse("user@[::1]:8080")?;
    /// assert_eq!(auth.userinfo(), Some("user"));
    /// assert_eq!(auth.host(), "::1");
    /// assert_eq!(auth.port(), 8080);
    /// # Ok::<_, uri_forge::ParseError>(())
    /// ```
    pub fn parse(s: &str) -> Result<Authority, ParseError> {
        let (userinfo, rest, host_at) = match s.split_once('@') {
            Some((userinfo, rest)) => (Some(userinfo), rest, userinfo.len() + 1),
            None => (None, s, 0),
        };

        let (host, port_str, port_at) = if let Some(bracketed) = rest.strip_prefix('[') {
            let close = match bracketed.find(']') {
                Some(i) => i,
                None => {
                    return Err(ParseError {
                        index: host_at,
                        kind: ParseErrorKind::InvalidIpv6Addr,
                    })
                }
            };
            let literal = &bracketed[..close];
            if ip::parse_v6(literal).is_none() {
                return Err(ParseError {
                    index: host_at,
                    kind: ParseErrorKind::InvalidIpv6Addr,
                });
            }
            let after = &bracketed[close + 1..];
            let port_at = host_at + close + 3;
            match after {
                "" => (literal, None, port_at),
                _ => match after.strip_prefix(':') {
                    Some(port) => (literal, Some(port), port_at),
                    None => {
                        return Err(ParseError {
                            index: host_at + close + 2,
                            kind: ParseErrorKind::UnexpectedChar,
                        })
                    }
                },
            }
        } else {
            match rest.rsplit_once(':') {
                Some((host, _)) if host.contains(':') => {
                    return Err(ParseError {
                        index: host_at,
                        kind: ParseErrorKind::UnexpectedChar,
                    })
                }
                Some((host, port)) => (host, Some(port), host_at + host.len() + 1),
                None => (rest, None, 0),
            }
        };

        let port = match port_str {
            None | Some("") => -1,
            Some(port) => port.parse::<i32>().map_err(|_| ParseError {
                index: port_at,
                kind: ParseErrorKind::UnexpectedChar,
            })?,
        };

        Ok(Authority {
            userinfo: userinfo.map(str::to_owned),
            host: host.to_owned(),
            port: port.max(-1),
        })
    }

    /// Returns the optional userinfo.
    #[must_use]
    pub fn userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }

    /// Returns the host, without brackets for an IPv6 literal.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port, `-1` when unset.
    #[must_use]
    pub fn port(&self) -> i32 {
        self.port
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(userinfo) = &self.userinfo {
            write!(f, "{userinfo}@")?;
        }
        if ip::is_ipv6(&self.host) {
            write!(f, "[{}]", self.host)?;
        } else {
            f.write_str(&self.host)?;
        }
        if self.port >= 0 {
            write!(f, ":{}", self.port)?;
        }
        Ok(())
    }
}

/// A scheme / host / port endpoint, as carried by HTTP-adjacent code.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpHost {
    scheme: String,
    host: String,
    port: i32,
}

impl HttpHost {
    /// Creates an endpoint from its parts. A negative port normalizes to
    /// `-1` (unset).
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: i32) -> HttpHost {
        HttpHost {
            scheme: scheme.into(),
            host: host.into(),
            port: port.max(-1),
        }
    }

    /// Returns the scheme name.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the host name.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port, `-1` when unset.
    #[must_use]
    pub fn port(&self) -> i32 {
        self.port
    }
}

impl fmt::Display for HttpHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://", self.scheme)?;
        if ip::is_ipv6(&self.host) {
            write!(f, "[{}]", self.host)?;
        } else {
            f.write_str(&self.host)?;
        }
        if self.port >= 0 {
            write!(f, ":{}", self.port)?;
        }
        Ok(())
    }
}
