use indexmap::IndexMap;

use super::body::tidy_body;
use super::{Parsed, Parser};
use crate::ast::{AnnotationMap, FunctionDefinition};
use crate::lexer::Keyword;

impl Parser {
    /// `ws FUNC ws Name ws Object ws FunctionBody Annotations`
    pub(super) fn func_definition(&mut self) -> Parsed<FunctionDefinition> {
        self.attempt(|p| {
            p.whitespace();
            p.keyword(Keyword::Func)?;
            p.whitespace();
            let function_name = p.name()?;
            p.whitespace();
            let configuration = p.object()?;
            p.whitespace();
            let (start, end) = p.function_body()?;
            let definition = tidy_body(&p.chars[start..end]);
            let annotations = p.annotations()?;
            Ok(FunctionDefinition {
                function_name,
                configuration,
                definition,
                annotations,
            })
        })
    }

    /// `Annotation (ws ',' Annotation)* ws ';'`, at least one entry.
    /// A repeated key keeps its first position and takes the last value.
    fn annotations(&mut self) -> Parsed<AnnotationMap> {
        self.attempt(|p| {
            let mut map = IndexMap::new();
            let (key, value) = p.annotation()?;
            map.insert(key, value);
            while let Ok((key, value)) = p.attempt(|p| {
                p.whitespace();
                p.literal(',')?;
                p.annotation()
            }) {
                map.insert(key, value);
            }
            p.whitespace();
            p.literal(';')?;
            Ok(map)
        })
    }

    /// `ws '@' Name ws '=' String`
    fn annotation(&mut self) -> Parsed<(String, String)> {
        self.attempt(|p| {
            p.whitespace();
            p.literal('@')?;
            let key = p.name()?;
            p.whitespace();
            p.literal('=')?;
            let value = p.string()?;
            Ok((key, value))
        })
    }
}
