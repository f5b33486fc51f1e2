//! Backtracking grammar engine for FUNC definitions.
//!
//! Rules are methods on [`Parser`] returning [`Parsed`]. A rule that fails
//! leaves the cursor where it found it; every failed terminal match is
//! reported to the [`FailureTracker`] so the final error names what was
//! expected at the furthest position reached.

use crate::ast::FunctionDefinition;
use crate::error::{Expectation, ParseError, SyntaxError};
use crate::failure::FailureTracker;
use crate::lexer::{self, CharClass, Keyword};
use crate::source::PositionCache;

mod body;
mod definition;
mod literals;
mod structure;

/// The only rule parsing may start from.
pub const START_RULE: &str = "FuncDefinition";

/// Default limit on nested objects, arrays and body blocks.
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Must be [`START_RULE`] when given.
    pub start_rule: Option<String>,
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            start_rule: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Marker for a rule that did not match. What was expected lives in the
/// parser's failure tracker, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NoMatch;

pub(crate) type Parsed<T> = Result<T, NoMatch>;

pub(crate) struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
    max_depth: usize,
    failures: FailureTracker,
    positions: PositionCache,
}

impl Parser {
    pub(crate) fn new(input: &str, max_depth: usize) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let positions = PositionCache::new(chars.len());
        Parser {
            chars,
            pos: 0,
            depth: 0,
            max_depth,
            failures: FailureTracker::new(),
            positions,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn text(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn fail<T>(&mut self, make: impl FnOnce() -> Expectation) -> Parsed<T> {
        self.failures.record(self.pos, make);
        Err(NoMatch)
    }

    // -- Combinators ---------------------------------------------

    /// Run `rule`, restoring the cursor if it fails.
    fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> Parsed<T>) -> Parsed<T> {
        let start = self.pos;
        let result = rule(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    /// Negative lookahead: succeeds, consuming nothing, iff `rule` fails.
    /// Failures inside are not reported.
    fn not_ahead<T>(&mut self, rule: impl FnOnce(&mut Self) -> Parsed<T>) -> Parsed<()> {
        let start = self.pos;
        let previous = self.failures.suppress();
        let result = rule(self);
        self.failures.restore(previous);
        self.pos = start;
        match result {
            Ok(_) => Err(NoMatch),
            Err(NoMatch) => Ok(()),
        }
    }

    /// Guard for recursive rules.
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> Parsed<T>) -> Parsed<T> {
        if self.depth >= self.max_depth {
            let limit = self.max_depth;
            return self.fail(|| {
                Expectation::other(format!("nesting depth of at most {}", limit))
            });
        }
        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    // -- Terminals -----------------------------------------------

    fn literal(&mut self, expected: char) -> Parsed<char> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(c)
            }
            _ => self.fail(|| Expectation::literal(expected.to_string())),
        }
    }

    fn class(&mut self, class: &CharClass) -> Parsed<char> {
        match self.peek() {
            Some(c) if class.matches(c) => {
                self.pos += 1;
                Ok(c)
            }
            _ => self.fail(|| class.expectation()),
        }
    }

    fn any_char(&mut self) -> Parsed<char> {
        match self.peek() {
            Some(c) => {
                self.pos += 1;
                Ok(c)
            }
            None => self.fail(|| Expectation::Any),
        }
    }

    /// Zero or more of `[ \t\r\n]`. Cannot fail, so never reports.
    fn whitespace(&mut self) {
        while self.peek().is_some_and(|c| lexer::WHITESPACE.matches(c)) {
            self.pos += 1;
        }
    }

    fn keyword(&mut self, keyword: Keyword) -> Parsed<()> {
        self.attempt(|p| {
            for upper in keyword.spelling().chars() {
                match p.peek() {
                    Some(c) if lexer::letter_matches(upper, c) => p.pos += 1,
                    _ => return p.fail(|| lexer::letter_expectation(upper)),
                }
            }
            Ok(())
        })
    }

    /// `[A-Za-z_][A-Za-z0-9_]*`
    fn name(&mut self) -> Parsed<String> {
        let start = self.pos;
        self.class(&lexer::NAME_START)?;
        while self.class(&lexer::NAME_CONTINUE).is_ok() {}
        Ok(self.text(start, self.pos))
    }

    // -- Error construction --------------------------------------

    fn into_syntax_error(mut self) -> SyntaxError {
        let pos = self.failures.furthest();
        let found = self.chars.get(pos).copied();
        let end = if found.is_some() { pos + 1 } else { pos };
        let location = self.positions.location(&self.chars, pos, end);
        SyntaxError::new(self.failures.into_expected(), found, location)
    }
}

/// Parse a complete FUNC definition.
///
/// The whole input must be consumed. On failure the error describes the
/// furthest position any alternative reached.
pub fn parse(input: &str, options: &ParseOptions) -> Result<FunctionDefinition, ParseError> {
    if let Some(rule) = &options.start_rule {
        if rule != START_RULE {
            return Err(ParseError::InvalidStartRule { rule: rule.clone() });
        }
    }

    let mut parser = Parser::new(input, options.max_depth);
    match parser.func_definition() {
        Ok(def) if parser.at_end() => Ok(def),
        Ok(_) => {
            parser.failures.force(parser.pos, Expectation::End);
            Err(parser.into_syntax_error().into())
        }
        Err(NoMatch) => Err(parser.into_syntax_error().into()),
    }
}

/// [`parse`] with default options.
pub fn parse_str(input: &str) -> Result<FunctionDefinition, ParseError> {
    parse(input, &ParseOptions::default())
}
