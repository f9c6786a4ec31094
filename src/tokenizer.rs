//! Minimal cursor-based token scanner, shared by the query parser.

use crate::encoding::table::Table;

/// A cursor over a region of a character sequence.
#[derive(Clone, Copy, Debug)]
pub struct Cursor {
    lower: usize,
    upper: usize,
    pos: usize,
}

impl Cursor {
    /// Creates a cursor over the byte range `lower..upper`.
    #[must_use]
    pub fn new(lower: usize, upper: usize) -> Cursor {
        debug_assert!(lower <= upper);
        Cursor {
            lower,
            upper,
            pos: lower,
        }
    }

    /// Returns the lower bound of the cursor.
    #[must_use]
    pub fn lower(&self) -> usize {
        self.lower
    }

    /// Returns the upper bound of the cursor.
    #[must_use]
    pub fn upper(&self) -> usize {
        self.upper
    }

    /// Returns the current position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Moves the cursor to the given position.
    pub fn update_pos(&mut self, pos: usize) {
        debug_assert!(pos >= self.lower && pos <= self.upper);
        self.pos = pos;
    }

    /// Checks whether the cursor has reached its upper bound.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.upper
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Reads a token from `src`, advancing the cursor until the end of the
/// region or a character contained in `delims`, whichever comes first.
///
/// The delimiter is not consumed. Whitespace is skipped, so the returned
/// token carries no leading or trailing blanks.
pub fn parse_token(src: &str, cursor: &mut Cursor, delims: &Table) -> String {
    let mut token = String::new();
    while !cursor.at_end() {
        let Some(c) = src[cursor.pos()..cursor.upper()].chars().next() else {
            break;
        };
        if c.is_ascii() && delims.allows(c as u8) {
            break;
        }
        if !is_whitespace(c) {
            token.push(c);
        }
        cursor.update_pos(cursor.pos() + c.len_utf8());
    }
    token
}
