//! Values produced by a successful parse.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ParseError;

/// Configuration attached to a function: `(key=value, ...)`.
pub type ConfigurationObject = IndexMap<String, ParseValue>;

/// `@key="value"` metadata, in first-occurrence order.
pub type AnnotationMap = IndexMap<String, String>;

/// A literal value from the configuration grammar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParseValue {
    Object(IndexMap<String, ParseValue>),
    Array(Vec<ParseValue>),
    String(String),
    Number(f64),
    Boolean(bool),
}

impl ParseValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParseValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParseValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParseValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ParseValue]> {
        match self {
            ParseValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, ParseValue>> {
        match self {
            ParseValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Member lookup on objects; `None` for every other variant.
    pub fn get(&self, key: &str) -> Option<&ParseValue> {
        self.as_object().and_then(|m| m.get(key))
    }
}

impl From<ConfigurationObject> for ParseValue {
    fn from(map: ConfigurationObject) -> Self {
        ParseValue::Object(map)
    }
}

/// Renders the value in the same literal syntax the parser accepts.
impl fmt::Display for ParseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseValue::Object(map) => {
                f.write_str("(")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", k, v)?;
                }
                f.write_str(")")
            }
            ParseValue::Array(items) => {
                f.write_str("[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
            ParseValue::String(s) => write_quoted(f, s),
            ParseValue::Number(n) => write!(f, "{}", n),
            ParseValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            '[' | ']' => write!(f, "{}", c)?,
            c if crate::lexer::PRINTABLE.matches(c) => write!(f, "{}", c)?,
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(f, "\\u{:04X}", unit)?;
                }
            }
        }
    }
    f.write_str("\"")
}

/// The result of parsing one `FUNC ... BEGIN ... END @k="v";` script.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDefinition {
    pub function_name: String,
    pub configuration: ConfigurationObject,
    /// Body text between BEGIN and END, line breaks removed.
    pub definition: String,
    pub annotations: AnnotationMap,
}

impl FromStr for FunctionDefinition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(entries: Vec<(&str, ParseValue)>) -> ParseValue {
        ParseValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn accessors_match_variants() {
        let v = object(vec![
            ("name", ParseValue::String("x".into())),
            ("n", ParseValue::Number(2.5)),
            ("flag", ParseValue::Boolean(true)),
            ("list", ParseValue::Array(vec![ParseValue::Number(1.0)])),
        ]);
        assert_eq!(v.get("name").and_then(ParseValue::as_str), Some("x"));
        assert_eq!(v.get("n").and_then(ParseValue::as_f64), Some(2.5));
        assert_eq!(v.get("flag").and_then(ParseValue::as_bool), Some(true));
        assert_eq!(v.get("list").and_then(ParseValue::as_array).map(<[_]>::len), Some(1));
        assert!(v.get("missing").is_none());
        assert!(ParseValue::Number(1.0).get("n").is_none());
        assert!(ParseValue::String("s".into()).as_f64().is_none());
    }

    #[test]
    fn display_uses_literal_syntax() {
        let v = object(vec![
            ("a", ParseValue::Number(1.0)),
            ("b", ParseValue::Number(-0.5)),
            (
                "c",
                ParseValue::Array(vec![
                    ParseValue::String("q\"[x]\n".into()),
                    ParseValue::Boolean(false),
                ]),
            ),
            ("d", object(vec![])),
        ]);
        assert_eq!(v.to_string(), r#"(a=1, b=-0.5, c=["q\"[x]\n", false], d=())"#);
    }

    #[test]
    fn display_escapes_non_printable_as_unicode() {
        let v = ParseValue::String("é😀".into());
        assert_eq!(v.to_string(), r#""\u00E9\uD83D\uDE00""#);
    }

    #[test]
    fn serializes_untagged_with_camel_case_fields() {
        let mut configuration = ConfigurationObject::new();
        configuration.insert("lang".into(), ParseValue::String("en".into()));
        configuration.insert("retries".into(), ParseValue::Number(3.0));
        let mut annotations = AnnotationMap::new();
        annotations.insert("owner".into(), "x".into());
        let def = FunctionDefinition {
            function_name: "Greet".into(),
            configuration,
            definition: "print(1)".into(),
            annotations,
        };
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "functionName": "Greet",
                "configuration": { "lang": "en", "retries": 3.0 },
                "definition": "print(1)",
                "annotations": { "owner": "x" }
            })
        );
    }
}
