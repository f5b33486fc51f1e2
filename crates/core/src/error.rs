use serde::Serialize;

/// One element of a character class: a single character or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ClassPart {
    Char(char),
    Range(char, char),
}

impl ClassPart {
    pub fn contains(&self, c: char) -> bool {
        match *self {
            ClassPart::Char(x) => c == x,
            ClassPart::Range(lo, hi) => lo <= c && c <= hi,
        }
    }
}

/// Something the parser would have accepted at the failure position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Expectation {
    Literal { text: String },
    Class { parts: Vec<ClassPart>, inverted: bool },
    Any,
    End,
    Other { description: String },
}

impl Expectation {
    pub fn literal(text: impl Into<String>) -> Self {
        Expectation::Literal { text: text.into() }
    }

    pub fn other(description: impl Into<String>) -> Self {
        Expectation::Other {
            description: description.into(),
        }
    }

    /// Human-readable form used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Expectation::Literal { text } => format!("\"{}\"", literal_escape(text)),
            Expectation::Class { parts, inverted } => {
                let mut out = String::from("[");
                if *inverted {
                    out.push('^');
                }
                for part in parts {
                    match *part {
                        ClassPart::Char(c) => out.push_str(&class_escape(c)),
                        ClassPart::Range(lo, hi) => {
                            out.push_str(&class_escape(lo));
                            out.push('-');
                            out.push_str(&class_escape(hi));
                        }
                    }
                }
                out.push(']');
                out
            }
            Expectation::Any => "any character".to_string(),
            Expectation::End => "end of input".to_string(),
            Expectation::Other { description } => description.clone(),
        }
    }
}

/// A resolved point in the source text. `offset` counts characters;
/// `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

/// A parse failure, reported at the furthest position any rule reached.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub expected: Vec<Expectation>,
    /// The character at the failure position, `None` at end of input.
    pub found: Option<char>,
    pub location: SourceLocation,
}

impl SyntaxError {
    pub fn new(expected: Vec<Expectation>, found: Option<char>, location: SourceLocation) -> Self {
        let mut unique: Vec<Expectation> = Vec::with_capacity(expected.len());
        for e in expected {
            if !unique.contains(&e) {
                unique.push(e);
            }
        }
        SyntaxError {
            message: build_message(&unique, found),
            expected: unique,
            found,
            location,
        }
    }

    pub fn expects(&self, expectation: &Expectation) -> bool {
        self.expected.contains(expectation)
    }
}

/// Errors returned by [`crate::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    #[error(transparent)]
    Syntax(SyntaxError),

    /// Raised before any input is examined.
    #[error("Can't start parsing from rule \"{rule}\".")]
    InvalidStartRule { rule: String },
}

impl From<SyntaxError> for ParseError {
    fn from(e: SyntaxError) -> Self {
        ParseError::Syntax(e)
    }
}

/// `Expected <alternatives> but <found> found.`
pub fn build_message(expected: &[Expectation], found: Option<char>) -> String {
    let mut descriptions: Vec<String> = expected.iter().map(Expectation::describe).collect();
    descriptions.sort();
    descriptions.dedup();

    let alternatives = match descriptions.as_slice() {
        [] => "nothing".to_string(),
        [only] => only.clone(),
        [first, second] => format!("{} or {}", first, second),
        [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
    };

    let found = match found {
        Some(c) => format!("\"{}\"", literal_escape(&c.to_string())),
        None => "end of input".to_string(),
    };

    format!("Expected {} but {} found.", alternatives, found)
}

fn escape_control(c: char, out: &mut String) -> bool {
    match c {
        '\0' => out.push_str("\\0"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\u{01}'..='\u{0F}' => out.push_str(&format!("\\x0{:X}", c as u32)),
        '\u{10}'..='\u{1F}' | '\u{7F}'..='\u{9F}' => out.push_str(&format!("\\x{:X}", c as u32)),
        _ => return false,
    }
    true
}

fn literal_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => {
                if !escape_control(c, &mut out) {
                    out.push(c);
                }
            }
        }
    }
    out
}

fn class_escape(c: char) -> String {
    let mut out = String::new();
    match c {
        '\\' => out.push_str("\\\\"),
        ']' => out.push_str("\\]"),
        '^' => out.push_str("\\^"),
        '-' => out.push_str("\\-"),
        _ => {
            if !escape_control(c, &mut out) {
                out.push(c);
            }
        }
    }
    out
}
