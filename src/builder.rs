//! The mutable URI builder.

use crate::{
    component::{Authority, HttpHost},
    encoding::{
        self,
        charset::{Charset, UTF_8},
        table::{self, Table},
    },
    error::{BuildError, BuildErrorKind, ParseError},
    ip, path,
    query::{self, Param},
    uri::Uri,
};
use std::{fmt, net::IpAddr};

/// The encoding policy selecting the per-component safe sets used when
/// serializing a [`UriBuilder`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EncodingPolicy {
    /// Encodes all reserved characters, leaving only the `unreserved`
    /// set (and, for whole-query and fragment payloads, sub-delims)
    /// unencoded. A conservative policy for maximum encoding.
    #[default]
    Strict,
    /// Follows the component-specific rules of RFC 3986: each slot keeps
    /// the characters its grammar allows, such as `':'`, `'@'`, `'/'`
    /// and `'?'` in a query.
    Rfc3986,
}

/// A mutable builder for URIs.
///
/// The builder keeps up to two representations of every component: the
/// *raw* (percent-encoded) form captured from a parsed URI, and the
/// *decoded* form set through the mutators. Serialization prefers the
/// raw form, so an unmodified component round-trips byte for byte;
/// mutating a component drops its raw form and the raw forms of the
/// enclosing components, which are then re-encoded on the next
/// serialization.
///
/// A builder is not thread-safe; the [`Uri`] produced by [`build`] is.
///
/// [`build`]: Self::build
///
/// # Examples
///
/// Build a URI from scratch:
///
/// ```
/// use uri_forge::UriBuilder;
///
/// let uri = UriBuilder::new()
///     .set_scheme("https")
///     .set_host("example.com")
///     .set_path_segments(["path", "to", "thing"])
///     .add_parameter("q", "hello world")
///     .build()?;
///
/// assert_eq!(uri, "https://example.com/path/to/thing?q=hello%20world");
/// # Ok::<_, uri_forge::BuildError>(())
/// ```
///
/// Rework a parsed URI:
///
/// ```
/// use uri_forge::UriBuilder;
///
/// let mut builder = UriBuilder::parse("http://example.com/a?x=1")?;
/// builder.set_host("example.org").set_parameter("x", "2");
/// assert_eq!(builder.to_string(), "http://example.org/a?x=2");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub struct UriBuilder {
    scheme: Option<String>,
    encoded_scheme_specific_part: Option<String>,
    encoded_authority: Option<String>,
    userinfo: Option<String>,
    encoded_userinfo: Option<String>,
    host: Option<String>,
    port: i32,
    encoded_path: Option<String>,
    path_rootless: bool,
    path_segments: Option<Vec<String>>,
    encoded_query: Option<String>,
    query_params: Option<Vec<Param>>,
    query: Option<String>,
    charset: &'static dyn Charset,
    fragment: Option<String>,
    encoded_fragment: Option<String>,
    encoding_policy: EncodingPolicy,
    plus_as_blank: bool,
}

fn non_blank(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_owned())
    }
}

impl UriBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> UriBuilder {
        UriBuilder {
            scheme: None,
            encoded_scheme_specific_part: None,
            encoded_authority: None,
            userinfo: None,
            encoded_userinfo: None,
            host: None,
            port: -1,
            encoded_path: None,
            path_rootless: false,
            path_segments: None,
            encoded_query: None,
            query_params: None,
            query: None,
            charset: UTF_8,
            fragment: None,
            encoded_fragment: None,
            encoding_policy: EncodingPolicy::default(),
            plus_as_blank: false,
        }
    }

    /// Creates a builder from a URI string, with UTF-8 transcoding.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the input is not a valid URI reference.
    pub fn parse(s: &str) -> Result<UriBuilder, ParseError> {
        Self::parse_with(s, UTF_8)
    }

    /// Creates a builder from a URI string, with the given transcoding.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the input is not a valid URI reference.
    pub fn parse_with(s: &str, charset: &'static dyn Charset) -> Result<UriBuilder, ParseError> {
        let uri = Uri::parse(s)?;
        Ok(Self::digest(&uri, charset))
    }

    /// Creates a builder populated from a URI, with UTF-8 transcoding.
    #[must_use]
    pub fn from_uri(uri: &Uri) -> UriBuilder {
        Self::digest(uri, UTF_8)
    }

    /// Creates a builder populated from a URI, with the given
    /// transcoding.
    #[must_use]
    pub fn from_uri_with(uri: &Uri, charset: &'static dyn Charset) -> UriBuilder {
        Self::digest(uri, charset)
    }

    fn digest(uri: &Uri, charset: &'static dyn Charset) -> UriBuilder {
        let mut b = UriBuilder::new();
        b.charset = charset;
        b.scheme = uri.scheme().map(|s| s.as_str().to_owned());
        b.encoded_scheme_specific_part = Some(uri.raw_scheme_specific_part().to_owned());
        b.encoded_authority = uri.raw_authority().map(str::to_owned);
        // Brackets are an encoding detail of the URI, not part of the host.
        b.host = uri.host().map(|host| {
            match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
                Some(stripped) => stripped.to_owned(),
                None => host.to_owned(),
            }
        });
        b.port = uri.port();
        b.encoded_userinfo = uri.raw_userinfo().map(str::to_owned);
        b.userinfo = uri.userinfo();
        if b.encoded_authority.is_some() && b.host.is_none() {
            // The authority did not take the server form. Retry with the
            // lenient parser; on failure the host simply stays unset.
            let raw = b.encoded_authority.as_deref().unwrap_or("");
            if let Ok(authority) = Authority::parse(raw) {
                b.encoded_userinfo = authority.userinfo().map(str::to_owned);
                b.userinfo = authority.userinfo().map(|u| encoding::decode(u, charset));
                b.host = Some(encoding::decode(authority.host(), charset));
                b.port = authority.port();
            }
        }
        b.encoded_path = uri.raw_path().map(str::to_owned);
        b.path_segments = Some(path::parse_path(uri.raw_path().unwrap_or(""), charset));
        b.path_rootless = uri.raw_path().map_or(true, |p| !p.starts_with('/'));
        b.encoded_query = uri.raw_query().map(str::to_owned);
        b.query_params = uri
            .raw_query()
            .map(|q| query::parse_query(q, charset, b.plus_as_blank));
        b.encoded_fragment = uri.raw_fragment().map(str::to_owned);
        b.fragment = uri.fragment();
        b
    }

    /// Sets the URI scheme. A blank value unsets it.
    pub fn set_scheme(&mut self, scheme: &str) -> &mut Self {
        self.scheme = non_blank(scheme);
        self
    }

    /// Sets the raw scheme-specific part. A blank value unsets it.
    ///
    /// While set, it is emitted verbatim between the scheme and the
    /// fragment, and the authority, path and query components are not
    /// serialized. Any component mutation unsets it.
    pub fn set_scheme_specific_part(&mut self, ssp: &str) -> &mut Self {
        self.encoded_scheme_specific_part = non_blank(ssp);
        self
    }

    /// Sets the raw scheme-specific part and appends name/value pairs to
    /// it as a query.
    pub fn set_scheme_specific_part_with_params(
        &mut self,
        ssp: &str,
        params: &[Param],
    ) -> &mut Self {
        self.encoded_scheme_specific_part = None;
        if !ssp.trim().is_empty() {
            let mut buf = String::from(ssp);
            if !params.is_empty() {
                buf.push('?');
                query::format_query(&mut buf, params, self.charset, table::UNRESERVED, false);
            }
            self.encoded_scheme_specific_part = Some(buf);
        }
        self
    }

    /// Sets the userinfo. The value is expected to be unescaped and may
    /// contain non-ASCII characters. A blank value unsets it.
    pub fn set_userinfo(&mut self, userinfo: &str) -> &mut Self {
        self.userinfo = non_blank(userinfo);
        self.encoded_scheme_specific_part = None;
        self.encoded_authority = None;
        self.encoded_userinfo = None;
        self
    }

    /// Sets the host. The value is expected to be unescaped: `::1` is a
    /// valid IPv6 host while `[::1]` is not, as the brackets are an
    /// encoding detail added on serialization. A blank value unsets the
    /// host.
    pub fn set_host(&mut self, host: &str) -> &mut Self {
        self.host = non_blank(host);
        self.encoded_scheme_specific_part = None;
        self.encoded_authority = None;
        self
    }

    /// Sets the host from an IP address, in its textual form.
    pub fn set_host_addr(&mut self, addr: IpAddr) -> &mut Self {
        self.host = Some(addr.to_string());
        self.encoded_scheme_specific_part = None;
        self.encoded_authority = None;
        self
    }

    /// Sets the userinfo, host and port from an authority value.
    pub fn set_authority(&mut self, authority: &Authority) -> &mut Self {
        self.set_userinfo(authority.userinfo().unwrap_or(""));
        self.set_host(authority.host());
        self.set_port(authority.port())
    }

    /// Sets the scheme, host and port from an endpoint value.
    pub fn set_http_host(&mut self, http_host: &HttpHost) -> &mut Self {
        self.set_scheme(http_host.scheme());
        self.set_host(http_host.host());
        self.set_port(http_host.port())
    }

    /// Sets the port. A negative value normalizes to `-1` (unset).
    pub fn set_port(&mut self, port: i32) -> &mut Self {
        self.port = port.max(-1);
        self.encoded_scheme_specific_part = None;
        self.encoded_authority = None;
        self
    }

    /// Sets the path, re-splitting it into segments. The value is
    /// expected to be unescaped and may contain non-ASCII characters.
    /// An empty value unsets the path.
    pub fn set_path(&mut self, path: &str) -> &mut Self {
        self.set_path_segments(path::split_path(path));
        self.path_rootless = !path.starts_with('/');
        self
    }

    /// Appends a path to the current segments. The value is expected to
    /// be unescaped and may contain non-ASCII characters.
    pub fn append_path(&mut self, path: &str) -> &mut Self {
        self.append_path_segments(path::split_path(path))
    }

    /// Sets the path segments, replacing any current path. The values
    /// are expected to be unescaped and may contain non-ASCII
    /// characters. An empty sequence unsets the path.
    pub fn set_path_segments<I>(&mut self, segments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        self.path_segments = if segments.is_empty() {
            None
        } else {
            Some(segments)
        };
        self.encoded_scheme_specific_part = None;
        self.encoded_path = None;
        self.path_rootless = false;
        self
    }

    /// Sets a rootless path from segments: the first segment is not
    /// preceded by `'/'` on serialization.
    pub fn set_path_segments_rootless<I>(&mut self, segments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.set_path_segments(segments);
        self.path_rootless = true;
        self
    }

    /// Appends segments to the path.
    pub fn append_path_segments<I>(&mut self, segments: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if !segments.is_empty() {
            self.path_segments
                .get_or_insert_with(Vec::new)
                .extend(segments);
            self.encoded_scheme_specific_part = None;
            self.encoded_path = None;
        }
        self
    }

    /// Removes the query component entirely.
    pub fn remove_query(&mut self) -> &mut Self {
        self.query_params = None;
        self.query = None;
        self.encoded_query = None;
        self.encoded_scheme_specific_part = None;
        self
    }

    /// Sets the query parameters, replacing any current ones. The names
    /// and values are expected to be unescaped and may contain non-ASCII
    /// characters.
    ///
    /// Query parameters and the custom query are mutually exclusive;
    /// this method removes the custom query.
    pub fn set_parameters<I>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = Param>,
    {
        self.query_params = Some(params.into_iter().collect());
        self.encoded_query = None;
        self.encoded_scheme_specific_part = None;
        self.query = None;
        self
    }

    /// Adds query parameters. The names and values are expected to be
    /// unescaped and may contain non-ASCII characters.
    ///
    /// Query parameters and the custom query are mutually exclusive;
    /// this method removes the custom query.
    pub fn add_params<I>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = Param>,
    {
        self.query_params.get_or_insert_with(Vec::new).extend(params);
        self.encoded_query = None;
        self.encoded_scheme_specific_part = None;
        self.query = None;
        self
    }

    /// Adds a name/value parameter to the query.
    ///
    /// Query parameters and the custom query are mutually exclusive;
    /// this method removes the custom query.
    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.add_param(Param::new(name, value))
    }

    /// Adds a parameter to the query; use [`Param::without_value`] for a
    /// bare name.
    ///
    /// Query parameters and the custom query are mutually exclusive;
    /// this method removes the custom query.
    pub fn add_param(&mut self, param: Param) -> &mut Self {
        self.query_params.get_or_insert_with(Vec::new).push(param);
        self.encoded_query = None;
        self.encoded_scheme_specific_part = None;
        self.query = None;
        self
    }

    /// Removes every parameter with the given name, if any.
    ///
    /// Query parameters and the custom query are mutually exclusive;
    /// this method removes the custom query even when no parameter was
    /// actually removed.
    pub fn remove_parameter(&mut self, name: &str) -> &mut Self {
        if let Some(params) = &mut self.query_params {
            params.retain(|p| p.name() != name);
        }
        self.encoded_query = None;
        self.encoded_scheme_specific_part = None;
        self.query = None;
        self
    }

    /// Sets a name/value parameter, removing existing parameters with
    /// the same name first.
    ///
    /// Query parameters and the custom query are mutually exclusive;
    /// this method removes the custom query.
    pub fn set_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.set_param(Param::new(name, value))
    }

    /// Sets a parameter, removing existing parameters with the same name
    /// first; use [`Param::without_value`] for a bare name.
    ///
    /// Query parameters and the custom query are mutually exclusive;
    /// this method removes the custom query.
    pub fn set_param(&mut self, param: Param) -> &mut Self {
        let params = self.query_params.get_or_insert_with(Vec::new);
        params.retain(|p| p.name() != param.name());
        params.push(param);
        self.encoded_query = None;
        self.encoded_scheme_specific_part = None;
        self.query = None;
        self
    }

    /// Clears the query parameters, leaving a custom query untouched.
    pub fn clear_parameters(&mut self) -> &mut Self {
        self.query_params = None;
        self.encoded_query = None;
        self.encoded_scheme_specific_part = None;
        self
    }

    /// Sets a custom query. The value is expected to be unescaped and
    /// may contain non-ASCII characters. A blank value unsets it.
    ///
    /// Query parameters and the custom query are mutually exclusive;
    /// this method removes the query parameters.
    pub fn set_custom_query(&mut self, query: &str) -> &mut Self {
        self.query = non_blank(query);
        self.encoded_query = None;
        self.encoded_scheme_specific_part = None;
        self.query_params = None;
        self
    }

    /// Sets the fragment. The value is expected to be unescaped and may
    /// contain non-ASCII characters. A blank value unsets it.
    pub fn set_fragment(&mut self, fragment: &str) -> &mut Self {
        self.fragment = non_blank(fragment);
        self.encoded_fragment = None;
        self
    }

    /// Sets the charset used to transcode non-ASCII payload.
    pub fn set_charset(&mut self, charset: &'static dyn Charset) -> &mut Self {
        self.charset = charset;
        self
    }

    /// Sets whether `'+'` in the query decodes to a space.
    ///
    /// If a raw query is cached from a parsed URI, it is re-parsed with
    /// the updated flag; structured parameters set through the mutators
    /// are left untouched.
    pub fn set_plus_as_blank(&mut self, plus_as_blank: bool) -> &mut Self {
        self.plus_as_blank = plus_as_blank;
        if let Some(encoded_query) = &self.encoded_query {
            self.query_params = Some(query::parse_query(
                encoded_query,
                self.charset,
                plus_as_blank,
            ));
        }
        self
    }

    /// Sets the encoding policy applied on serialization.
    pub fn set_encoding_policy(&mut self, policy: EncodingPolicy) -> &mut Self {
        self.encoding_policy = policy;
        self
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the raw scheme-specific part, if cached.
    #[must_use]
    pub fn scheme_specific_part(&self) -> Option<&str> {
        self.encoded_scheme_specific_part.as_deref()
    }

    /// Returns the decoded userinfo.
    #[must_use]
    pub fn userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }

    /// Returns the host. IPv6 hosts come without brackets.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the port, `-1` when unset.
    #[must_use]
    pub fn port(&self) -> i32 {
        self.port
    }

    /// Synthesizes an authority value from the userinfo, host and port.
    #[must_use]
    pub fn authority(&self) -> Authority {
        Authority::new(
            self.userinfo.clone(),
            self.host.clone().unwrap_or_default(),
            self.port,
        )
    }

    /// Returns the decoded path segments.
    #[must_use]
    pub fn path_segments(&self) -> &[String] {
        self.path_segments.as_deref().unwrap_or(&[])
    }

    /// Reconstructs the decoded path from its segments, `None` when no
    /// segments exist.
    #[must_use]
    pub fn path(&self) -> Option<String> {
        self.path_segments.as_ref().map(|segments| {
            let mut out = String::new();
            for segment in segments {
                out.push('/');
                out.push_str(segment);
            }
            out
        })
    }

    /// Checks whether the path is empty.
    #[must_use]
    pub fn is_path_empty(&self) -> bool {
        self.path_segments.as_ref().map_or(true, Vec::is_empty)
            && self.encoded_path.as_ref().map_or(true, String::is_empty)
    }

    /// Returns the decoded query parameters.
    #[must_use]
    pub fn query_params(&self) -> &[Param] {
        self.query_params.as_deref().unwrap_or(&[])
    }

    /// Returns the first parameter with the given name.
    #[must_use]
    pub fn first_query_param(&self, name: &str) -> Option<&Param> {
        self.query_params().iter().find(|p| p.name() == name)
    }

    /// Checks whether the query is empty.
    #[must_use]
    pub fn is_query_empty(&self) -> bool {
        self.query_params.as_ref().map_or(true, Vec::is_empty) && self.encoded_query.is_none()
    }

    /// Returns the decoded fragment.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns the charset used to transcode non-ASCII payload.
    #[must_use]
    pub fn charset(&self) -> &'static dyn Charset {
        self.charset
    }

    /// Returns the encoding policy.
    #[must_use]
    pub fn encoding_policy(&self) -> EncodingPolicy {
        self.encoding_policy
    }

    /// Returns whether `'+'` in the query decodes to a space.
    #[must_use]
    pub fn plus_as_blank(&self) -> bool {
        self.plus_as_blank
    }

    /// Checks whether the URI is absolute, i.e., carries a scheme.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Checks whether the URI is opaque, i.e., has no path component in
    /// either representation.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.path_segments.is_none() && self.encoded_path.is_none()
    }

    /// Optimizes the URI components if the path has a root:
    ///
    /// - the scheme and host are converted to lower case,
    /// - dot segments are removed from the path,
    /// - percent-encoding of all components is re-applied.
    ///
    /// Some URI consumers may consider the optimized components
    /// semantically different from the original ones.
    pub fn optimize(&mut self) -> &mut Self {
        if let Some(scheme) = &mut self.scheme {
            *scheme = scheme.to_lowercase();
        }

        if self.path_rootless {
            return self;
        }

        // Force re-encoding of every component.
        self.encoded_scheme_specific_part = None;
        self.encoded_authority = None;
        self.encoded_userinfo = None;
        self.encoded_path = None;
        self.encoded_query = None;
        self.encoded_fragment = None;

        if let Some(host) = &mut self.host {
            *host = host.to_lowercase();
        }

        if let Some(input_segments) = self.path_segments.take() {
            if input_segments.is_empty() {
                self.path_segments = Some(vec![String::new()]);
            } else {
                let mut output_segments: Vec<String> = Vec::with_capacity(input_segments.len());
                for segment in &input_segments {
                    if segment.is_empty() || segment == "." {
                        continue;
                    }
                    if segment == ".." {
                        output_segments.pop();
                    } else {
                        output_segments.push(segment.clone());
                    }
                }
                if input_segments.last().map_or(false, String::is_empty) {
                    // Preserve the trailing slash.
                    output_segments.push(String::new());
                }
                self.path_segments = Some(output_segments);
            }
        }

        self
    }

    /// Builds the URI.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an `http` or `https` URI with no host or a
    /// blank one, or when the serialized components do not form a valid
    /// URI.
    pub fn build(&self) -> Result<Uri, BuildError> {
        if let Some(scheme) = &self.scheme {
            let http = scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https");
            if http && self.host.as_deref().map_or(true, |h| h.trim().is_empty()) {
                return Err(BuildError(BuildErrorKind::BlankHttpHost));
            }
        }
        Uri::parse(self.build_string()).map_err(BuildError::from)
    }

    fn userinfo_table(&self) -> &'static Table {
        match self.encoding_policy {
            EncodingPolicy::Strict => table::UNRESERVED,
            EncodingPolicy::Rfc3986 => table::USERINFO,
        }
    }

    fn host_table(&self) -> &'static Table {
        match self.encoding_policy {
            EncodingPolicy::Strict => table::UNRESERVED,
            EncodingPolicy::Rfc3986 => table::REG_NAME,
        }
    }

    fn path_table(&self) -> &'static Table {
        match self.encoding_policy {
            EncodingPolicy::Strict => table::UNRESERVED,
            EncodingPolicy::Rfc3986 => table::PATH_SEGMENT,
        }
    }

    fn params_table(&self) -> &'static Table {
        match self.encoding_policy {
            EncodingPolicy::Strict => table::UNRESERVED,
            EncodingPolicy::Rfc3986 => table::QUERY,
        }
    }

    fn custom_query_table(&self) -> &'static Table {
        match self.encoding_policy {
            EncodingPolicy::Strict => table::URIC,
            EncodingPolicy::Rfc3986 => table::QUERY,
        }
    }

    fn fragment_table(&self) -> &'static Table {
        match self.encoding_policy {
            EncodingPolicy::Strict => table::URIC,
            EncodingPolicy::Rfc3986 => table::FRAGMENT,
        }
    }

    fn build_string(&self) -> String {
        let mut sb = String::new();
        if let Some(scheme) = &self.scheme {
            sb.push_str(scheme);
            sb.push(':');
        }
        if let Some(ssp) = &self.encoded_scheme_specific_part {
            sb.push_str(ssp);
        } else {
            let authority_specified;
            if let Some(encoded_authority) = &self.encoded_authority {
                sb.push_str("//");
                sb.push_str(encoded_authority);
                authority_specified = true;
            } else if let Some(host) = &self.host {
                sb.push_str("//");
                if let Some(encoded_userinfo) = &self.encoded_userinfo {
                    sb.push_str(encoded_userinfo);
                    sb.push('@');
                } else if let Some(userinfo) = &self.userinfo {
                    match userinfo.split_once(':') {
                        Some((user, password)) => {
                            encoding::encode_to(
                                &mut sb,
                                user,
                                self.charset,
                                self.userinfo_table(),
                                false,
                            );
                            sb.push(':');
                            encoding::encode_to(
                                &mut sb,
                                password,
                                self.charset,
                                self.userinfo_table(),
                                false,
                            );
                        }
                        None => encoding::encode_to(
                            &mut sb,
                            userinfo,
                            self.charset,
                            self.userinfo_table(),
                            false,
                        ),
                    }
                    sb.push('@');
                }
                if ip::is_ipv6(host) {
                    sb.push('[');
                    sb.push_str(host);
                    sb.push(']');
                } else {
                    encoding::encode_to(&mut sb, host, self.charset, self.host_table(), false);
                }
                if self.port >= 0 {
                    sb.push(':');
                    sb.push_str(&self.port.to_string());
                }
                authority_specified = true;
            } else {
                authority_specified = false;
            }
            if let Some(encoded_path) = &self.encoded_path {
                if authority_specified && !encoded_path.is_empty() && !encoded_path.starts_with('/')
                {
                    sb.push('/');
                }
                sb.push_str(encoded_path);
            } else if let Some(segments) = &self.path_segments {
                path::format_path(
                    &mut sb,
                    segments,
                    !authority_specified && self.path_rootless,
                    self.charset,
                    self.path_table(),
                );
            }
            if let Some(encoded_query) = &self.encoded_query {
                sb.push('?');
                sb.push_str(encoded_query);
            } else if self.query_params.as_ref().map_or(false, |p| !p.is_empty()) {
                sb.push('?');
                query::format_query(
                    &mut sb,
                    self.query_params.as_deref().unwrap_or(&[]),
                    self.charset,
                    self.params_table(),
                    false,
                );
            } else if let Some(query) = &self.query {
                sb.push('?');
                encoding::encode_to(&mut sb, query, self.charset, self.custom_query_table(), false);
            }
        }
        if let Some(encoded_fragment) = &self.encoded_fragment {
            sb.push('#');
            sb.push_str(encoded_fragment);
        } else if let Some(fragment) = &self.fragment {
            sb.push('#');
            encoding::encode_to(&mut sb, fragment, self.charset, self.fragment_table(), false);
        }
        sb
    }
}

impl Default for UriBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Uri> for UriBuilder {
    fn from(uri: &Uri) -> Self {
        Self::from_uri(uri)
    }
}

impl fmt::Display for UriBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_string())
    }
}
