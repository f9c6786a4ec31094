//! The charset seam used for percent-codec transcoding.

/// A byte-level text transcoder.
///
/// The percent-codec transcodes text into bytes with a `Charset` before
/// encoding, and back into text after decoding. Both directions replace
/// unrepresentable input instead of failing, matching the forgiving
/// behavior of the codec itself.
pub trait Charset: Sync {
    /// Returns the canonical name of the charset, e.g. `"UTF-8"`.
    fn name(&self) -> &'static str;

    /// Encodes `s` and appends the resulting bytes onto `out`.
    ///
    /// Characters the charset cannot represent are replaced with `b'?'`.
    fn encode_onto(&self, s: &str, out: &mut Vec<u8>);

    /// Decodes `bytes` into a string.
    ///
    /// Malformed sequences are replaced with U+FFFD.
    fn decode(&self, bytes: &[u8]) -> String;
}

/// The UTF-8 charset.
pub struct Utf8;

impl Charset for Utf8 {
    fn name(&self) -> &'static str {
        "UTF-8"
    }

    fn encode_onto(&self, s: &str, out: &mut Vec<u8>) {
        out.extend_from_slice(s.as_bytes());
    }

    fn decode(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// The ISO-8859-1 (Latin-1) charset.
pub struct Latin1;

impl Charset for Latin1 {
    fn name(&self) -> &'static str {
        "ISO-8859-1"
    }

    fn encode_onto(&self, s: &str, out: &mut Vec<u8>) {
        for ch in s.chars() {
            out.push(if (ch as u32) <= 0xff { ch as u8 } else { b'?' });
        }
    }

    fn decode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&x| x as char).collect()
    }
}

/// UTF-8, the default transcoding.
pub static UTF_8: &dyn Charset = &Utf8;

/// ISO-8859-1 (Latin-1).
pub static ISO_8859_1: &dyn Charset = &Latin1;
