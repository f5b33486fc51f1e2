#![allow(clippy::result_large_err)]
//! funcdef-core: parser for FUNC definition scripts.
//!
//! A script names a function, gives it a configuration object, wraps its
//! body in `BEGIN ... END` and closes with `@key="value";` annotations:
//!
//! ```text
//! FUNC Greet (lang="en", retries=3) BEGIN print(1) END @owner="x";
//! ```
//!
//! # Public API
//!
//! - [`parse()`] / [`parse_str()`] -- parse a whole script
//! - [`FunctionDefinition`] -- the parse result
//! - [`ParseValue`] -- configuration values
//! - [`ParseError`] / [`SyntaxError`] -- failures, with the furthest
//!   position reached and what was expected there

pub mod ast;
pub mod error;
mod failure;
pub mod lexer;
pub mod parser;
mod source;

// ── Convenience re-exports ───────────────────────────────────────────

pub use ast::{AnnotationMap, ConfigurationObject, FunctionDefinition, ParseValue};
pub use error::{ClassPart, Expectation, ParseError, SourceLocation, SourcePosition, SyntaxError};
pub use parser::{parse, parse_str, ParseOptions, DEFAULT_MAX_DEPTH, START_RULE};
