use super::{Parsed, Parser};
use crate::lexer::Keyword;

impl Parser {
    /// `BEGIN (FunctionBody | !BEGIN !END any)* END`
    ///
    /// Returns the character range between the outer keywords. Nested
    /// blocks are skipped over whole, so their END does not close this one.
    pub(super) fn function_body(&mut self) -> Parsed<(usize, usize)> {
        self.nested(|p| {
            p.attempt(|p| {
                p.keyword(Keyword::Begin)?;
                let start = p.pos;
                loop {
                    if p.function_body().is_ok() {
                        continue;
                    }
                    if p.body_char().is_err() {
                        break;
                    }
                }
                let end = p.pos;
                p.keyword(Keyword::End)?;
                Ok((start, end))
            })
        })
    }

    fn body_char(&mut self) -> Parsed<char> {
        self.attempt(|p| {
            p.not_ahead(|p| p.keyword(Keyword::Begin))?;
            p.not_ahead(|p| p.keyword(Keyword::End))?;
            p.any_char()
        })
    }
}

/// Turn the raw text between BEGIN and END into the stored definition:
/// drop one separator at each edge, then every `\r?\n`.
pub(super) fn tidy_body(raw: &[char]) -> String {
    let mut body = raw;
    body = match body {
        [' ' | '\t', rest @ ..] => rest,
        ['\r', '\n', rest @ ..] => rest,
        ['\n', rest @ ..] => rest,
        _ => body,
    };
    body = match body {
        [rest @ .., ' ' | '\t'] => rest,
        [rest @ .., '\r', '\n'] => rest,
        [rest @ .., '\n'] => rest,
        _ => body,
    };

    let mut out = String::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        match body[i] {
            '\r' if body.get(i + 1) == Some(&'\n') => i += 2,
            '\n' => i += 1,
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Expectation;
    use crate::parser::DEFAULT_MAX_DEPTH;

    fn body(src: &str) -> Option<String> {
        let mut p = Parser::new(src, DEFAULT_MAX_DEPTH);
        let (start, end) = p.function_body().ok()?;
        Some(tidy_body(&p.chars[start..end]))
    }

    fn tidy(s: &str) -> String {
        tidy_body(&s.chars().collect::<Vec<_>>())
    }

    #[test]
    fn simple_body_drops_edge_spaces() {
        assert_eq!(body("BEGIN print(1) END").as_deref(), Some("print(1)"));
    }

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(body("begin x eNd").as_deref(), Some("x"));
    }

    #[test]
    fn nested_block_is_kept_verbatim() {
        assert_eq!(
            body("BEGIN a BEGIN b END c END").as_deref(),
            Some("a BEGIN b END c")
        );
        assert_eq!(
            body("BEGIN BEGIN BEGIN x END END END").as_deref(),
            Some("BEGIN BEGIN x END END")
        );
    }

    #[test]
    fn line_breaks_are_removed() {
        assert_eq!(
            body("BEGIN\n  step1\n  step2\nEND").as_deref(),
            Some("  step1  step2")
        );
        assert_eq!(
            body("BEGIN\r\n  a;\r\n  b;\r\nEND").as_deref(),
            Some("  a;  b;")
        );
    }

    #[test]
    fn empty_bodies() {
        assert_eq!(body("BEGINEND").as_deref(), Some(""));
        assert_eq!(body("BEGIN END").as_deref(), Some(""));
        assert_eq!(body("BEGIN\nEND").as_deref(), Some(""));
    }

    #[test]
    fn end_inside_a_word_closes_the_block() {
        let mut p = Parser::new("BEGIN append(x) END", DEFAULT_MAX_DEPTH);
        let (start, end) = p.function_body().unwrap();
        assert_eq!(p.text(start, end), " app");
        assert_eq!(p.pos, 12);
    }

    #[test]
    fn unterminated_block_fails_at_end_of_input() {
        let mut p = Parser::new("BEGIN abc", DEFAULT_MAX_DEPTH);
        assert!(p.function_body().is_err());
        assert_eq!(p.pos, 0);
        let err = p.into_syntax_error();
        assert_eq!(err.found, None);
        assert_eq!(err.location.start.offset, 9);
        assert!(err.expects(&Expectation::Any));
        assert!(err.expects(&lexer_class('E')));
    }

    #[test]
    fn unbalanced_inner_block_fails_the_outer() {
        assert_eq!(body("BEGIN a BEGIN b END"), None);
    }

    #[test]
    fn tidy_removes_one_separator_per_edge() {
        assert_eq!(tidy("  x  "), " x ");
        assert_eq!(tidy("\tx\t"), "x");
        assert_eq!(tidy("\n\nx\n\n"), "x");
        assert_eq!(tidy("a\rb"), "a\rb");
        assert_eq!(tidy(""), "");
        assert_eq!(tidy(" "), "");
    }

    fn lexer_class(upper: char) -> Expectation {
        crate::lexer::letter_expectation(upper)
    }
}
