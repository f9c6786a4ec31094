//! Percent-encoding utilities.

pub mod charset;
pub mod table;

use self::{charset::Charset, table::Table};

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Encodes `content` and appends the result onto `buf`.
///
/// The content is first transcoded into bytes with `charset`. A byte
/// contained in `safe` is emitted verbatim; `0x20` (space) is emitted as
/// `'+'` when `blank_as_plus` is set; any other byte is percent-encoded
/// with uppercase hexadecimal digits.
///
/// # Examples
///
/// ```
/// use uri_forge::encoding::{self, charset::UTF_8, table};
///
/// let mut buf = String::new();
/// encoding::encode_to(&mut buf, "Gödel", UTF_8, table::UNRESERVED, false);
/// assert_eq!(buf, "G%C3%B6del");
/// ```
pub fn encode_to(
    buf: &mut String,
    content: &str,
    charset: &dyn Charset,
    safe: &Table,
    blank_as_plus: bool,
) {
    let mut bytes = Vec::with_capacity(content.len());
    charset.encode_onto(content, &mut bytes);
    for &x in &bytes {
        if safe.allows(x) {
            buf.push(x as char);
        } else if blank_as_plus && x == b' ' {
            buf.push('+');
        } else {
            buf.push('%');
            buf.push(HEX_UPPER[(x >> 4) as usize] as char);
            buf.push(HEX_UPPER[(x & 0xf) as usize] as char);
        }
    }
}

/// Encodes `content` with the `unreserved` safe set and no `'+'` substitution.
#[must_use]
pub fn encode(content: &str, charset: &dyn Charset) -> String {
    let mut buf = String::new();
    encode_to(&mut buf, content, charset, table::UNRESERVED, false);
    buf
}

/// Decodes a percent-encoded string.
///
/// Decoding is *forgiving*: a `'%'` followed by anything other than two
/// hexadecimal digits passes through literally instead of failing. A
/// `'+'` decodes to `0x20` (space) when `plus_as_blank` is set. The
/// resulting bytes are transcoded into text with `charset`, replacing
/// malformed sequences.
///
/// The input is expected to be ASCII, as produced by [`encode_to`];
/// other characters are clipped to their low eight bits.
///
/// # Examples
///
/// ```
/// use uri_forge::encoding::{self, charset::UTF_8};
///
/// assert_eq!(encoding::decode_with("G%C3%B6del", UTF_8, false), "Gödel");
/// assert_eq!(encoding::decode_with("a%ZZb", UTF_8, false), "a%ZZb");
/// assert_eq!(encoding::decode_with("a+b", UTF_8, true), "a b");
/// ```
#[must_use]
pub fn decode_with(content: &str, charset: &dyn Charset, plus_as_blank: bool) -> String {
    let mut bytes = Vec::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            let mut rest = chars.clone();
            if let (Some(hi), Some(lo)) = (rest.next(), rest.next()) {
                chars = rest;
                match (hi.to_digit(16), lo.to_digit(16)) {
                    (Some(hi), Some(lo)) => bytes.push(((hi << 4) + lo) as u8),
                    _ => {
                        bytes.push(b'%');
                        bytes.push(hi as u32 as u8);
                        bytes.push(lo as u32 as u8);
                    }
                }
            } else {
                bytes.push(b'%');
            }
        } else if plus_as_blank && c == '+' {
            bytes.push(b' ');
        } else {
            bytes.push(c as u32 as u8);
        }
    }
    charset.decode(&bytes)
}

/// Decodes a percent-encoded string, leaving `'+'` untouched.
#[must_use]
pub fn decode(content: &str, charset: &dyn Charset) -> String {
    decode_with(content, charset, false)
}

/// A reusable percent-codec bound to a fixed safe set.
///
/// Two presets are provided: [`RFC3986`](Self::RFC3986) keeps only the
/// `unreserved` characters unencoded, and [`RFC5987`](Self::RFC5987)
/// keeps the `attr-char` set of RFC 5987. Both transcode with UTF-8 and
/// never substitute `'+'` for space.
///
/// # Examples
///
/// ```
/// use uri_forge::encoding::PercentCodec;
///
/// assert_eq!(PercentCodec::RFC3986.encode("Gödel"), "G%C3%B6del");
/// assert_eq!(PercentCodec::RFC3986.decode("G%C3%B6del"), "Gödel");
/// ```
pub struct PercentCodec {
    safe: &'static Table,
}

impl PercentCodec {
    /// The codec with the `unreserved` safe set of RFC 3986.
    pub const RFC3986: PercentCodec = PercentCodec {
        safe: table::UNRESERVED,
    };

    /// The codec with the `attr-char` safe set of RFC 5987.
    pub const RFC5987: PercentCodec = PercentCodec {
        safe: table::RFC5987_UNRESERVED,
    };

    /// Encodes `content` and appends the result onto `buf`.
    pub fn encode_to(&self, buf: &mut String, content: &str) {
        encode_to(buf, content, charset::UTF_8, self.safe, false);
    }

    /// Encodes `content` into a new string.
    #[must_use]
    pub fn encode(&self, content: &str) -> String {
        let mut buf = String::new();
        self.encode_to(&mut buf, content);
        buf
    }

    /// Decodes a percent-encoded string.
    #[must_use]
    pub fn decode(&self, content: &str) -> String {
        decode_with(content, charset::UTF_8, false)
    }
}
