use crate::model::Position;

/// Internal-contract failures.
///
/// Grammar mismatches never produce an `Error`: a candidate construct that
/// fails to match falls back to literal text. The variants here indicate a
/// tokenizer/resolver/tree-builder desynchronization, which is a bug rather
/// than a data problem, so processing aborts instead of recovering.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("token resolver desynchronized: expected {expected}, found {found}, position: {position}")]
    ResolverDesync {
        expected: &'static str,
        found: String,
        position: Position,
    },

    #[error("tree builder: expected an open {expected} node")]
    MissingOpenNode { expected: &'static str },

    #[error("tree builder: unexpected {found} token for the current node, position: {position}")]
    UnexpectedToken { found: String, position: Position },
}

impl Error {
    /// Extract position information from this error if available.
    #[must_use]
    pub fn position(&self) -> Option<&Position> {
        match self {
            Self::ResolverDesync { position, .. } | Self::UnexpectedToken { position, .. } => {
                Some(position)
            }
            Self::MissingOpenNode { .. } => None,
        }
    }

    /// Get advice for this error if available.
    #[must_use]
    pub fn advice(&self) -> Option<&'static str> {
        match self {
            Self::ResolverDesync { .. } | Self::MissingOpenNode { .. } | Self::UnexpectedToken { .. } => {
                Some("this indicates a tokenizer bug in attrlist-parser, not a problem with the input")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_desync_display() {
        let error = Error::ResolverDesync {
            expected: "keyValueAttributeValue",
            found: "attributeListSpace".to_string(),
            position: Position { line: 2, column: 7 },
        };
        assert_eq!(
            format!("{error}"),
            "token resolver desynchronized: expected keyValueAttributeValue, found attributeListSpace, position: line: 2, column: 7"
        );
        assert!(error.position().is_some());
        assert!(error.advice().is_some());
    }
}
