use serde::Serialize;

/// A `Location` represents a span in the source document.
///
/// `absolute_start`/`absolute_end` are byte offsets; `start`/`end` are
/// human-readable positions. `end` is exclusive: it is the position of the
/// character immediately after the span. That convention is what makes the
/// attachment adjacency rules exact (a span-inline list attaches when its
/// `start` equals the preceding node's `end`).
#[derive(Debug, Default, Clone, Hash, Eq, PartialEq, Serialize)]
pub struct Location {
    /// The absolute start offset of the location, in bytes.
    pub absolute_start: usize,
    /// The absolute end offset of the location, in bytes (exclusive).
    pub absolute_end: usize,

    /// The start position of the location.
    pub start: Position,
    /// The position immediately after the location.
    pub end: Position,
}

impl Location {
    /// Whether this location was never filled in.
    ///
    /// Trees built programmatically (rather than by `parse`) may leave
    /// locations at their default; the transform treats such locations as
    /// absent position data.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "location.start({}), location.end({})",
            self.start, self.end
        )
    }
}

/// A `Position` represents a human-readable position in a document.
#[derive(Debug, Default, Clone, Copy, Hash, Eq, PartialEq, Serialize)]
pub struct Position {
    /// The line number of the position (1-indexed).
    pub line: usize,
    /// The column number of the position (1-indexed, counted in Unicode
    /// scalar values).
    #[serde(rename = "col")]
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line: {}, column: {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let location = Location {
            absolute_start: 2,
            absolute_end: 20,
            start: Position { line: 1, column: 2 },
            end: Position { line: 3, column: 4 },
        };
        assert_eq!(
            format!("{location}"),
            "location.start(line: 1, column: 2), location.end(line: 3, column: 4)"
        );
    }

    #[test]
    fn test_unset_location() {
        assert!(Location::default().is_unset());
        let location = Location {
            absolute_start: 0,
            absolute_end: 1,
            start: Position { line: 1, column: 1 },
            end: Position { line: 1, column: 2 },
        };
        assert!(!location.is_unset());
    }
}
