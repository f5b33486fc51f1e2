use indexmap::IndexMap;

use super::{Parsed, Parser};
use crate::ast::{ConfigurationObject, ParseValue};

impl Parser {
    /// Ordered choice: object, array, number, string, boolean.
    pub(super) fn value(&mut self) -> Parsed<ParseValue> {
        if let Ok(map) = self.object() {
            return Ok(ParseValue::Object(map));
        }
        if let Ok(items) = self.array() {
            return Ok(ParseValue::Array(items));
        }
        if let Ok(n) = self.number() {
            return Ok(ParseValue::Number(n));
        }
        if let Ok(s) = self.string() {
            return Ok(ParseValue::String(s));
        }
        self.boolean().map(ParseValue::Boolean)
    }

    /// `ws Name ws '=' ws Value`
    fn pair(&mut self) -> Parsed<(String, ParseValue)> {
        self.attempt(|p| {
            p.whitespace();
            let key = p.name()?;
            p.whitespace();
            p.literal('=')?;
            p.whitespace();
            let value = p.value()?;
            Ok((key, value))
        })
    }

    /// `ws '(' ws (Pair (ws ',' ws Pair)*)? ws ')'`
    ///
    /// A repeated key keeps its first position and takes the last value.
    pub(super) fn object(&mut self) -> Parsed<ConfigurationObject> {
        self.nested(|p| {
            p.attempt(|p| {
                p.whitespace();
                p.literal('(')?;
                p.whitespace();
                let mut map = IndexMap::new();
                if let Ok((key, value)) = p.pair() {
                    map.insert(key, value);
                    while let Ok((key, value)) = p.attempt(|p| {
                        p.whitespace();
                        p.literal(',')?;
                        p.whitespace();
                        p.pair()
                    }) {
                        map.insert(key, value);
                    }
                }
                p.whitespace();
                p.literal(')')?;
                Ok(map)
            })
        })
    }

    /// `ws '[' ws (Value (ws ',' ws Value)*)? ws ']'`
    pub(super) fn array(&mut self) -> Parsed<Vec<ParseValue>> {
        self.nested(|p| {
            p.attempt(|p| {
                p.whitespace();
                p.literal('[')?;
                p.whitespace();
                let mut items = Vec::new();
                if let Ok(first) = p.value() {
                    items.push(first);
                    while let Ok(item) = p.attempt(|p| {
                        p.whitespace();
                        p.literal(',')?;
                        p.whitespace();
                        p.value()
                    }) {
                        items.push(item);
                    }
                }
                p.whitespace();
                p.literal(']')?;
                Ok(items)
            })
        })
    }
}
