//! Character classes and keywords.
//!
//! The grammar is scannerless: these are the terminal symbols the rules in
//! [`crate::parser`] match directly against the input.

use crate::error::{ClassPart, Expectation};

/// A set of characters matched as one terminal.
#[derive(Debug, Clone, Copy)]
pub struct CharClass {
    pub parts: &'static [ClassPart],
    pub inverted: bool,
}

impl CharClass {
    const fn of(parts: &'static [ClassPart]) -> Self {
        CharClass {
            parts,
            inverted: false,
        }
    }

    pub fn matches(&self, c: char) -> bool {
        self.parts.iter().any(|p| p.contains(c)) != self.inverted
    }

    pub fn expectation(&self) -> Expectation {
        Expectation::Class {
            parts: self.parts.to_vec(),
            inverted: self.inverted,
        }
    }
}

use ClassPart::{Char, Range};

pub const NAME_START: CharClass = CharClass::of(&[Range('a', 'z'), Range('A', 'Z'), Char('_')]);
pub const NAME_CONTINUE: CharClass =
    CharClass::of(&[Range('a', 'z'), Range('A', 'Z'), Char('_'), Range('0', '9')]);
pub const DIGIT: CharClass = CharClass::of(&[Range('0', '9')]);
pub const NONZERO_DIGIT: CharClass = CharClass::of(&[Range('1', '9')]);
pub const HEX_DIGIT: CharClass = CharClass::of(&[Range('0', '9'), Range('a', 'f'), Range('A', 'F')]);
pub const SIMPLE_ESCAPE: CharClass = CharClass::of(&[
    Char('"'),
    Char('\\'),
    Char('/'),
    Char('b'),
    Char('f'),
    Char('n'),
    Char('r'),
    Char('t'),
]);
/// Printable ASCII minus `"`, `[`, `\` and `]`.
pub const PRINTABLE: CharClass =
    CharClass::of(&[Char(' '), Char('!'), Range('#', 'Z'), Range('^', '~')]);
pub const WHITESPACE: CharClass = CharClass::of(&[Char(' '), Char('\t'), Char('\r'), Char('\n')]);

/// Case-insensitive keywords. Each letter is matched on its own against
/// the two-character class `[Xx]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Func,
    Begin,
    End,
    True,
    False,
}

impl Keyword {
    pub fn spelling(self) -> &'static str {
        match self {
            Keyword::Func => "FUNC",
            Keyword::Begin => "BEGIN",
            Keyword::End => "END",
            Keyword::True => "TRUE",
            Keyword::False => "FALSE",
        }
    }
}

/// Matcher for one keyword letter, e.g. `[Ff]`.
pub(crate) fn letter_matches(upper: char, c: char) -> bool {
    c == upper || c == upper.to_ascii_lowercase()
}

pub(crate) fn letter_expectation(upper: char) -> Expectation {
    Expectation::Class {
        parts: vec![Char(upper), Char(upper.to_ascii_lowercase())],
        inverted: false,
    }
}

/// Decode a simple escape letter (the character after `\`).
pub(crate) fn unescape(c: char) -> char {
    match c {
        'b' => '\u{08}',
        'f' => '\u{0C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        other => other,
    }
}
