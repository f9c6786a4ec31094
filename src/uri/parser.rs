use super::{AuthMeta, Meta};
use crate::{
    encoding::table::{self, Table},
    error::{ParseError, ParseErrorKind::*},
    ip,
};
use std::num::NonZeroUsize;

type Result<T> = std::result::Result<T, ParseError>;

/// Returns immediately with a syntax error.
macro_rules! err {
    ($index:expr, $kind:expr) => {
        return Err(ParseError {
            index: $index,
            kind: $kind,
        })
    };
}

pub(crate) fn parse(s: &[u8]) -> Result<Meta> {
    let mut parser = Parser {
        buf: s,
        pos: 0,
        mark: 0,
        out: Meta::default(),
    };
    parser.parse_from_scheme()?;
    Ok(parser.out)
}

struct Parser<'a> {
    buf: &'a [u8],
    pos: usize,
    mark: usize,
    out: Meta,
}

enum PathKind {
    General,
    AbEmpty,
    ContinuedNoScheme,
}

impl<'a> Parser<'a> {
    fn has_remaining(&self) -> bool {
        self.pos < self.buf.len()
    }

    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn skip(&mut self, n: usize) {
        self.pos += n;
    }

    fn mark(&mut self) {
        self.mark = self.pos;
    }

    fn marked_len(&self) -> usize {
        self.pos - self.mark
    }

    fn read_str(&mut self, s: &str) -> bool {
        let res = self.buf[self.pos..].starts_with(s.as_bytes());
        if res {
            self.skip(s.len());
        }
        res
    }

    /// Advances over bytes contained in the table.
    fn scan(&mut self, table: &Table) {
        while let Some(x) = self.peek() {
            if !table.allows(x) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Advances over bytes contained in the table or valid
    /// percent-encoded octets.
    fn scan_pct(&mut self, table: &Table) -> Result<()> {
        while let Some(x) = self.peek() {
            if x == b'%' {
                if self.pos + 2 >= self.buf.len() {
                    err!(self.pos, InvalidOctet);
                }
                let (hi, lo) = (self.buf[self.pos + 1], self.buf[self.pos + 2]);
                if !hi.is_ascii_hexdigit() || !lo.is_ascii_hexdigit() {
                    err!(self.pos, InvalidOctet);
                }
                self.pos += 3;
            } else if table.allows(x) {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn parse_from_scheme(&mut self) -> Result<()> {
        // Mark initially set to 0.
        self.scan(table::SCHEME);

        if self.peek() == Some(b':') {
            // Scheme starts with a letter.
            if self.marked_len() == 0 || !self.buf[0].is_ascii_alphabetic() {
                err!(0, UnexpectedChar);
            }
            self.out.scheme_end = NonZeroUsize::new(self.pos);

            self.skip(1);
            self.parse_from_authority()
        } else if self.marked_len() == 0 {
            // Nothing scanned.
            self.parse_from_authority()
        } else {
            // Scheme chars are valid for path.
            self.parse_from_path(PathKind::ContinuedNoScheme)
        }
    }

    fn parse_from_authority(&mut self) -> Result<()> {
        if !self.read_str("//") {
            return self.parse_from_path(PathKind::General);
        }
        let start = self.pos;
        let mut host_bounds = None;

        self.mark();
        self.scan_pct(table::USERINFO)?;

        if self.peek() == Some(b'@') {
            // Userinfo present.
            self.skip(1);
            let bracketed = self.peek() == Some(b'[');
            host_bounds = Some(self.read_host()?);
            self.read_port();
            if !matches!(self.peek(), None | Some(b'/' | b'?' | b'#')) {
                if bracketed {
                    err!(self.pos, UnexpectedChar);
                }
                // Not in server form; keep the whole authority raw.
                self.scan_pct(table::AUTHORITY)?;
                host_bounds = None;
            }
        } else if self.marked_len() == 0 {
            // Nothing scanned. We're now at the start of an IP literal,
            // an empty host, or the path.
            if self.peek() == Some(b'[') {
                host_bounds = Some(self.read_ip_literal()?);
                self.read_port();
                if !matches!(self.peek(), None | Some(b'/' | b'?' | b'#')) {
                    err!(self.pos, UnexpectedChar);
                }
            } else {
                host_bounds = Some((self.pos, self.pos));
            }
        } else {
            // The whole authority scanned. Try to split off a port;
            // failing that, keep the authority raw.
            host_bounds = self.split_host_port(self.mark, self.pos);
        }

        self.out.auth = Some(AuthMeta {
            start,
            end: self.pos,
            host_bounds,
        });
        self.parse_from_path(PathKind::AbEmpty)
    }

    /// Splits a `host[:port]` span on its last colon. Returns `None` when
    /// the span is not in server form (several bare colons, or a port
    /// that is not a decimal integer).
    fn split_host_port(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        let span = &self.buf[start..end];
        let mut colons = span.iter().enumerate().filter(|(_, &x)| x == b':');
        match (colons.next_back(), colons.next_back()) {
            (None, _) => Some((start, end)),
            (Some((i, _)), None) => {
                let port = &span[i + 1..];
                let valid = port.iter().all(u8::is_ascii_digit)
                    && (port.is_empty()
                        || std::str::from_utf8(port)
                            .map_or(false, |p| p.parse::<i32>().is_ok()));
                valid.then_some((start, start + i))
            }
            _ => None,
        }
    }

    fn read_host(&mut self) -> Result<(usize, usize)> {
        if self.peek() == Some(b'[') {
            self.read_ip_literal()
        } else {
            let start = self.pos;
            self.scan_pct(table::REG_NAME)?;
            Ok((start, self.pos))
        }
    }

    /// Reads a bracketed IP literal, brackets included in the bounds.
    fn read_ip_literal(&mut self) -> Result<(usize, usize)> {
        let start = self.pos;
        self.skip(1);
        let close = match self.buf[self.pos..].iter().position(|&x| x == b']') {
            Some(i) => self.pos + i,
            None => err!(start, InvalidIpv6Addr),
        };
        let inside = &self.buf[self.pos..close];
        if matches!(inside.first(), Some(b'v' | b'V')) {
            if !is_ipv_future(inside) {
                err!(start + 1, UnexpectedChar);
            }
        } else {
            let valid = std::str::from_utf8(inside)
                .map_or(false, |s| ip::parse_v6(s).is_some());
            if !valid {
                err!(start + 1, InvalidIpv6Addr);
            }
        }
        self.pos = close + 1;
        Ok((start, self.pos))
    }

    fn read_port(&mut self) {
        if self.read_str(":") {
            self.scan(table::DIGIT);
        }
    }

    fn parse_from_path(&mut self, kind: PathKind) -> Result<()> {
        let path_start = match kind {
            PathKind::General => {
                let start = self.pos;
                self.scan_pct(table::PATH)?;
                start
            }
            PathKind::AbEmpty => {
                let start = self.pos;
                self.scan_pct(table::PATH)?;
                if self.pos > start && self.buf[start] != b'/' {
                    err!(start, UnexpectedChar);
                }
                start
            }
            PathKind::ContinuedNoScheme => {
                self.scan_pct(table::SEGMENT_NZ_NC)?;
                if self.peek() == Some(b':') {
                    // In a relative reference, the first path
                    // segment cannot contain a colon character.
                    err!(self.pos, UnexpectedChar);
                }
                self.scan_pct(table::PATH)?;
                self.mark
            }
        };
        self.out.path_bounds = (path_start, self.pos);

        if self.read_str("?") {
            self.scan_pct(table::QUERY)?;
            self.out.query_end = NonZeroUsize::new(self.pos);
        }

        if self.read_str("#") {
            self.out.fragment_start = NonZeroUsize::new(self.pos);
            self.scan_pct(table::FRAGMENT)?;
        }

        if self.has_remaining() {
            err!(self.pos, UnexpectedChar);
        }
        Ok(())
    }
}

// IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
fn is_ipv_future(s: &[u8]) -> bool {
    let Some(dot) = s.iter().position(|&x| x == b'.') else {
        return false;
    };
    let (version, addr) = (&s[1..dot], &s[dot + 1..]);
    !version.is_empty()
        && version.iter().all(u8::is_ascii_hexdigit)
        && !addr.is_empty()
        && table::USERINFO.allows_all(addr)
}
