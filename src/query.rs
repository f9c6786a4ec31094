//! Query component parsing and formatting.

use crate::{
    encoding::{self, charset::Charset, table::Table},
    tokenizer::{self, Cursor},
};

const QUERY_PARAM_SEPARATOR: char = '&';
const PARAM_VALUE_SEPARATOR: char = '=';

static QUERY_PARAM_SEPARATORS: &Table = &Table::new(b"&=");
static QUERY_VALUE_SEPARATORS: &Table = &Table::new(b"&");

/// An order-preserving name/value pair of a query string.
///
/// The value is optional: `a=1&flag` parses into one pair with a value
/// and one without.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Param {
    name: String,
    value: Option<String>,
}

impl Param {
    /// Creates a pair with the given name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Param {
        Param {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Creates a pair with no value.
    pub fn without_value(name: impl Into<String>) -> Param {
        Param {
            name: name.into(),
            value: None,
        }
    }

    /// Returns the name of the pair.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the optional value of the pair.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Parses a raw query string into a list of decoded name/value pairs.
///
/// Pairs are separated by `'&'`; a pair without `'='` yields `None` for
/// its value; pairs with an empty name are dropped. Names and values are
/// percent-decoded with `charset`, interpreting `'+'` as space when
/// `plus_as_blank` is set.
///
/// # Examples
///
/// ```
/// use uri_forge::encoding::charset::UTF_8;
/// use uri_forge::query::{parse_query, Param};
///
/// assert_eq!(
///     parse_query("a=1&b=&c&=d", UTF_8, false),
///     [Param::new("a", "1"), Param::new("b", ""), Param::without_value("c")]
/// );
/// ```
pub fn parse_query(s: &str, charset: &dyn Charset, plus_as_blank: bool) -> Vec<Param> {
    let mut cursor = Cursor::new(0, s.len());
    let mut params = Vec::new();
    while !cursor.at_end() {
        let name = tokenizer::parse_token(s, &mut cursor, QUERY_PARAM_SEPARATORS);
        let mut value = None;
        if !cursor.at_end() {
            let delim = s.as_bytes()[cursor.pos()];
            cursor.update_pos(cursor.pos() + 1);
            if delim == PARAM_VALUE_SEPARATOR as u8 {
                value = Some(tokenizer::parse_token(s, &mut cursor, QUERY_VALUE_SEPARATORS));
                if !cursor.at_end() {
                    cursor.update_pos(cursor.pos() + 1);
                }
            }
        }
        if !name.is_empty() {
            params.push(Param {
                name: encoding::decode_with(&name, charset, plus_as_blank),
                value: value.map(|v| encoding::decode_with(&v, charset, plus_as_blank)),
            });
        }
    }
    params
}

/// Formats name/value pairs into a query string, appending onto `buf`.
///
/// Pairs are joined with `'&'`; a pair without a value is emitted as a
/// bare name with no `'='`. Names and values are percent-encoded with
/// the given safe table.
pub fn format_query<'a>(
    buf: &mut String,
    params: impl IntoIterator<Item = &'a Param>,
    charset: &dyn Charset,
    safe: &Table,
    blank_as_plus: bool,
) {
    for (i, param) in params.into_iter().enumerate() {
        if i > 0 {
            buf.push(QUERY_PARAM_SEPARATOR);
        }
        encoding::encode_to(buf, &param.name, charset, safe, blank_as_plus);
        if let Some(value) = &param.value {
            buf.push(PARAM_VALUE_SEPARATOR);
            encoding::encode_to(buf, value, charset, safe, blank_as_plus);
        }
    }
}
