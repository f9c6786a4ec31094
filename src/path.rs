//! Path component splitting and formatting.

use crate::encoding::{self, charset::Charset, table::Table};

const PATH_SEPARATOR: char = '/';

/// Splits a path into raw, still-encoded segments.
///
/// At most one leading `'/'` is skipped; a trailing `'/'` yields a
/// trailing empty segment; an empty input yields no segments.
#[must_use]
pub fn split_path(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    let s = s.strip_prefix(PATH_SEPARATOR).unwrap_or(s);
    s.split(PATH_SEPARATOR).map(str::to_owned).collect()
}

/// Splits a path into segments and percent-decodes each of them.
#[must_use]
pub fn parse_path(s: &str, charset: &dyn Charset) -> Vec<String> {
    split_path(s)
        .iter()
        .map(|segment| encoding::decode(segment, charset))
        .collect()
}

/// Formats path segments onto `buf`, percent-encoding each of them.
///
/// Segments are joined with `'/'`; a leading `'/'` is emitted unless the
/// path is rootless.
pub fn format_path(
    buf: &mut String,
    segments: &[String],
    rootless: bool,
    charset: &dyn Charset,
    safe: &Table,
) {
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 || !rootless {
            buf.push(PATH_SEPARATOR);
        }
        encoding::encode_to(buf, segment, charset, safe, false);
    }
}
