use super::{NoMatch, Parsed, Parser};
use crate::error::Expectation;
use crate::lexer::{self, Keyword};

impl Parser {
    // -- Number ----------------------------------------------------

    /// `-? (0 | [1-9][0-9]*) ('.' [0-9]+)?`
    ///
    /// Literals too large for an `f64` do not match.
    pub(super) fn number(&mut self) -> Parsed<f64> {
        self.attempt(|p| {
            let start = p.pos;
            p.literal('-').ok();
            if p.literal('0').is_err() {
                p.class(&lexer::NONZERO_DIGIT)?;
                while p.class(&lexer::DIGIT).is_ok() {}
            }
            p.attempt(|p| {
                p.literal('.')?;
                p.class(&lexer::DIGIT)?;
                while p.class(&lexer::DIGIT).is_ok() {}
                Ok(())
            })
            .ok();
            match p.text(start, p.pos).parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(n),
                _ => p.fail(|| Expectation::other("finite number")),
            }
        })
    }

    // -- String ----------------------------------------------------

    /// `ws '"' (escape | printable | '[' | ']')* '"'`
    ///
    /// Characters are gathered as UTF-16 code units so that `\uXXXX`
    /// surrogate pairs combine into one character.
    pub(super) fn string(&mut self) -> Parsed<String> {
        self.attempt(|p| {
            p.whitespace();
            p.literal('"')?;
            let mut units: Vec<u16> = Vec::new();
            loop {
                if let Ok(()) = p.escape(&mut units) {
                    continue;
                }
                let plain = p
                    .class(&lexer::PRINTABLE)
                    .or_else(|_| p.literal('['))
                    .or_else(|_| p.literal(']'));
                match plain {
                    Ok(c) => {
                        let mut buf = [0u16; 2];
                        units.extend_from_slice(c.encode_utf16(&mut buf));
                    }
                    Err(NoMatch) => break,
                }
            }
            p.literal('"')?;
            Ok(String::from_utf16_lossy(&units))
        })
    }

    /// `'\\' (["\\/bfnrt] | 'u' hex hex hex hex)`
    fn escape(&mut self, units: &mut Vec<u16>) -> Parsed<()> {
        self.attempt(|p| {
            p.literal('\\')?;
            if let Ok(c) = p.class(&lexer::SIMPLE_ESCAPE) {
                units.push(lexer::unescape(c) as u16);
                return Ok(());
            }
            p.literal('u')?;
            let mut unit: u16 = 0;
            for _ in 0..4 {
                let digit = p.class(&lexer::HEX_DIGIT)?;
                let value = digit.to_digit(16).ok_or(NoMatch)?;
                unit = (unit << 4) | value as u16;
            }
            units.push(unit);
            Ok(())
        })
    }

    // -- Boolean ---------------------------------------------------

    pub(super) fn boolean(&mut self) -> Parsed<bool> {
        if self.keyword(Keyword::True).is_ok() {
            return Ok(true);
        }
        self.keyword(Keyword::False).map(|()| false)
    }
}
