use crate::model::{Location, Position};

use super::cursor::Spot;

/// The label of a tokenized span.
///
/// `ReferenceNameIsh` is provisional: the resolver pass reclassifies it as a
/// key-value key, a reference-attribute name, or a definition reference name
/// once lookahead can tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    AttributeList,
    AttributeListSpace,

    ReferenceNameIsh,

    ReferenceAttribute,
    ReferenceAttributeName,

    IdNameAttribute,
    IdNameAttributeMarker,
    IdNameAttributeName,

    ClassNameAttribute,
    ClassNameAttributeMarker,
    ClassNameAttributeName,

    KeyValueAttribute,
    KeyValueAttributeKey,
    KeyValueAttributeEquals,
    KeyValueAttributeValue,
    KeyValueAttributeValueMarker,
    KeyValueAttributeValueString,

    Definition,
    DefinitionMarker,
    DefinitionReference,
    DefinitionReferenceMarker,
    DefinitionReferenceName,

    BlockInlineList,
    BlockInlineListMarker,

    SpanInlineList,
    SpanInlineListMarker,
}

impl TokenKind {
    /// Human-readable label, used in internal-invariant error messages.
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::AttributeList => "attributeList",
            Self::AttributeListSpace => "attributeListSpace",
            Self::ReferenceNameIsh => "referenceNameIsh",
            Self::ReferenceAttribute => "referenceAttribute",
            Self::ReferenceAttributeName => "referenceAttributeName",
            Self::IdNameAttribute => "idNameAttribute",
            Self::IdNameAttributeMarker => "idNameAttributeMarker",
            Self::IdNameAttributeName => "idNameAttributeName",
            Self::ClassNameAttribute => "classNameAttribute",
            Self::ClassNameAttributeMarker => "classNameAttributeMarker",
            Self::ClassNameAttributeName => "classNameAttributeName",
            Self::KeyValueAttribute => "keyValueAttribute",
            Self::KeyValueAttributeKey => "keyValueAttributeKey",
            Self::KeyValueAttributeEquals => "keyValueAttributeEquals",
            Self::KeyValueAttributeValue => "keyValueAttributeValue",
            Self::KeyValueAttributeValueMarker => "keyValueAttributeValueMarker",
            Self::KeyValueAttributeValueString => "keyValueAttributeValueString",
            Self::Definition => "attributeListDefinition",
            Self::DefinitionMarker => "attributeListDefinitionMarker",
            Self::DefinitionReference => "attributeListDefinitionReference",
            Self::DefinitionReferenceMarker => "attributeListDefinitionReferenceMarker",
            Self::DefinitionReferenceName => "attributeListDefinitionReferenceName",
            Self::BlockInlineList => "blockInlineAttributeList",
            Self::BlockInlineListMarker => "blockInlineAttributeListMarker",
            Self::SpanInlineList => "spanInlineAttributeList",
            Self::SpanInlineListMarker => "spanInlineAttributeListMarker",
        }
    }
}

/// A labeled source span. Tokens live in the tokenizer's arena; enter/exit
/// events refer to them by index, so reclassifying a token is visible from
/// both of its events.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) start: Spot,
    pub(crate) end: Spot,
}

impl Token {
    pub(crate) fn location(&self) -> Location {
        Location {
            absolute_start: self.start.offset,
            absolute_end: self.end.offset,
            start: Position {
                line: self.start.line,
                column: self.start.column,
            },
            end: Position {
                line: self.end.line,
                column: self.end.column,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKind {
    Enter,
    Exit,
}

/// One entry of the flat token event list; enter/exit pairs nest, forming an
/// implicit tree over the source.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Event {
    pub(crate) kind: EventKind,
    pub(crate) token: usize,
}
