//! Offset to line/column resolution over a parse's character buffer.
//!
//! Resolved positions are memoized, so error reporting that asks for the
//! same offsets repeatedly walks the input at most once.

use crate::error::{SourceLocation, SourcePosition};

#[derive(Debug, Clone, Copy)]
struct LineColumn {
    line: u32,
    column: u32,
}

/// Per-parse position cache. Slot `i` holds the resolved line/column of
/// character offset `i` once it has been asked for.
pub(crate) struct PositionCache {
    cache: Vec<Option<LineColumn>>,
}

impl PositionCache {
    pub(crate) fn new(len: usize) -> Self {
        let mut cache = vec![None; len + 1];
        cache[0] = Some(LineColumn { line: 1, column: 1 });
        PositionCache { cache }
    }

    pub(crate) fn position(&mut self, chars: &[char], offset: usize) -> SourcePosition {
        let offset = offset.min(self.cache.len() - 1);
        if let Some(lc) = self.cache[offset] {
            return SourcePosition {
                offset,
                line: lc.line,
                column: lc.column,
            };
        }

        // Slot 0 is always populated, so this terminates.
        let mut p = offset;
        while self.cache[p].is_none() {
            p -= 1;
        }
        let mut lc = self.cache[p].unwrap_or(LineColumn { line: 1, column: 1 });

        while p < offset {
            if chars.get(p) == Some(&'\n') {
                lc.line += 1;
                lc.column = 1;
            } else {
                lc.column += 1;
            }
            p += 1;
        }

        self.cache[offset] = Some(lc);
        SourcePosition {
            offset,
            line: lc.line,
            column: lc.column,
        }
    }

    pub(crate) fn location(&mut self, chars: &[char], start: usize, end: usize) -> SourceLocation {
        SourceLocation {
            start: self.position(chars, start),
            end: self.position(chars, end),
        }
    }

    #[cfg(test)]
    fn cached(&self, offset: usize) -> bool {
        self.cache.get(offset).is_some_and(Option::is_some)
    }
}
