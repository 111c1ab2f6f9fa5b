use crate::model::{Location, Position};

/// A point in the source: byte offset plus 1-indexed line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Spot {
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) offset: usize,
}

impl Spot {
    pub(crate) fn start() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// The source span from this point up to (excluding) `end`.
    pub(crate) fn location_to(self, end: Self) -> Location {
        Location {
            absolute_start: self.offset,
            absolute_end: end.offset,
            start: Position {
                line: self.line,
                column: self.column,
            },
            end: Position {
                line: end.line,
                column: end.column,
            },
        }
    }
}

/// A character cursor over the source with lookahead-1.
///
/// Copying the cursor is how sub-construct attempts snapshot their input
/// position; restoring is a plain assignment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    spot: Spot,
}

impl<'a> Cursor<'a> {
    pub(crate) fn at(source: &'a str, spot: Spot) -> Self {
        Self { source, spot }
    }

    pub(crate) fn spot(&self) -> Spot {
        self.spot
    }

    /// The next character, without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        self.source.get(self.spot.offset..)?.chars().next()
    }

    /// Consume one character, keeping line/column bookkeeping in sync.
    pub(crate) fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.spot.offset += c.len_utf8();
            if c == '\n' {
                self.spot.line += 1;
                self.spot.column = 1;
            } else {
                self.spot.column += 1;
            }
        }
    }
}
