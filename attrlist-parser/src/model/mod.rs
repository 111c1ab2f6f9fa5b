//! The typed tree produced by parsing.
//!
//! The node set mirrors the markdown constructs the host driver recognizes
//! plus the three attribute-list node kinds. Attribute-list nodes only exist
//! between `parse` and `transform`; the transform projects their contents onto
//! sibling nodes and strips them.

use rustc_hash::FxHashMap;
use serde::Serialize;

mod location;

pub use location::{Location, Position};

/// Render properties attached to a node by attribute assignment.
pub type Properties = FxHashMap<String, String>;

/// Out-of-band data carried by nodes that can receive attributes.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct NodeData {
    /// Identifier assigned through an `#id` or `id="..."` attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The render-properties bag.
    #[serde(rename = "hProperties", skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl NodeData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.properties.is_empty()
    }
}

/// A single item of an attribute list, in source order.
///
/// References are expanded away during the transform; the other three kinds
/// survive resolution (see `ResolvedAttribute`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Attribute {
    /// A bare name citing a definition (`reference`).
    #[serde(rename = "referenceAttribute")]
    Reference { name: String },
    /// An identifier item (`#id-name`).
    #[serde(rename = "idNameAttribute")]
    IdName { name: String },
    /// A class item (`.class-name`).
    #[serde(rename = "classNameAttribute")]
    ClassName { name: String },
    /// A key-value item (`key="value"`), value already unescaped.
    #[serde(rename = "keyValueAttribute")]
    KeyValue { key: String, value: String },
}

/// The document root.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Root {
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Location::is_unset")]
    pub location: Location,
}

impl Root {
    /// Reset every location in the tree to the default.
    ///
    /// Useful for comparing trees structurally, ignoring where their nodes
    /// came from in the source.
    pub fn strip_locations(&mut self) {
        self.location = Location::default();
        for child in &mut self.children {
            child.strip_locations();
        }
    }
}

/// Any non-root node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    #[serde(rename = "paragraph")]
    Paragraph(Paragraph),
    #[serde(rename = "heading")]
    Heading(Heading),
    #[serde(rename = "code")]
    Code(Code),
    #[serde(rename = "text")]
    Text(Text),
    #[serde(rename = "emphasis")]
    Emphasis(Emphasis),
    #[serde(rename = "element")]
    Element(Element),
    #[serde(rename = "attributeListDefinition")]
    AttributeListDefinition(AttributeListDefinition),
    #[serde(rename = "blockInlineAttributeList")]
    BlockInlineAttributeList(BlockInlineAttributeList),
    #[serde(rename = "spanInlineAttributeList")]
    SpanInlineAttributeList(SpanInlineAttributeList),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "NodeData::is_empty")]
    pub data: NodeData,
    #[serde(skip_serializing_if = "Location::is_unset")]
    pub location: Location,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub depth: u8,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "NodeData::is_empty")]
    pub data: NodeData,
    #[serde(skip_serializing_if = "Location::is_unset")]
    pub location: Location,
}

/// An indented code block. `lang` and `meta` are always empty for indented
/// code but kept so the serialized shape stays stable if fenced code is ever
/// added.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Code {
    pub lang: Option<String>,
    pub meta: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "NodeData::is_empty")]
    pub data: NodeData,
    #[serde(skip_serializing_if = "Location::is_unset")]
    pub location: Location,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Text {
    pub value: String,
    #[serde(skip_serializing_if = "Location::is_unset")]
    pub location: Location,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Emphasis {
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "NodeData::is_empty")]
    pub data: NodeData,
    #[serde(skip_serializing_if = "Location::is_unset")]
    pub location: Location,
}

/// An embedded markup element (the JSX-style assignment target).
///
/// The host driver never produces these; they enter trees through the
/// programmatic `transform` boundary.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<ElementAttribute>,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "NodeData::is_empty")]
    pub data: NodeData,
    #[serde(skip_serializing_if = "Location::is_unset")]
    pub location: Location,
}

/// A named attribute on an `Element`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementAttribute {
    pub name: String,
    pub value: String,
}

/// A named attribute-list definition (`{:label: ...}`).
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AttributeListDefinition {
    pub name: String,
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "Location::is_unset")]
    pub location: Location,
}

/// An anonymous attribute list attaching to a sibling block (`{: ...}` on its
/// own line).
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct BlockInlineAttributeList {
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "Location::is_unset")]
    pub location: Location,
}

/// An anonymous attribute list attaching to a sibling inline span
/// (`{: ...}` or `{::}` in text content).
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SpanInlineAttributeList {
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "Location::is_unset")]
    pub location: Location,
}

impl Node {
    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            Self::Paragraph(n) => &n.location,
            Self::Heading(n) => &n.location,
            Self::Code(n) => &n.location,
            Self::Text(n) => &n.location,
            Self::Emphasis(n) => &n.location,
            Self::Element(n) => &n.location,
            Self::AttributeListDefinition(n) => &n.location,
            Self::BlockInlineAttributeList(n) => &n.location,
            Self::SpanInlineAttributeList(n) => &n.location,
        }
    }

    #[must_use]
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Self::Paragraph(n) => Some(&n.children),
            Self::Heading(n) => Some(&n.children),
            Self::Emphasis(n) => Some(&n.children),
            Self::Element(n) => Some(&n.children),
            Self::Code(_)
            | Self::Text(_)
            | Self::AttributeListDefinition(_)
            | Self::BlockInlineAttributeList(_)
            | Self::SpanInlineAttributeList(_) => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Paragraph(n) => Some(&mut n.children),
            Self::Heading(n) => Some(&mut n.children),
            Self::Emphasis(n) => Some(&mut n.children),
            Self::Element(n) => Some(&mut n.children),
            Self::Code(_)
            | Self::Text(_)
            | Self::AttributeListDefinition(_)
            | Self::BlockInlineAttributeList(_)
            | Self::SpanInlineAttributeList(_) => None,
        }
    }

    /// The render-properties data of nodes that can receive attributes.
    pub(crate) fn data_mut(&mut self) -> Option<&mut NodeData> {
        match self {
            Self::Paragraph(n) => Some(&mut n.data),
            Self::Heading(n) => Some(&mut n.data),
            Self::Code(n) => Some(&mut n.data),
            Self::Emphasis(n) => Some(&mut n.data),
            Self::Element(n) => Some(&mut n.data),
            Self::Text(_)
            | Self::AttributeListDefinition(_)
            | Self::BlockInlineAttributeList(_)
            | Self::SpanInlineAttributeList(_) => None,
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<&NodeData> {
        match self {
            Self::Paragraph(n) => Some(&n.data),
            Self::Heading(n) => Some(&n.data),
            Self::Code(n) => Some(&n.data),
            Self::Emphasis(n) => Some(&n.data),
            Self::Element(n) => Some(&n.data),
            Self::Text(_)
            | Self::AttributeListDefinition(_)
            | Self::BlockInlineAttributeList(_)
            | Self::SpanInlineAttributeList(_) => None,
        }
    }

    /// Whether this node is one of the three attribute-list kinds the
    /// transform consumes and strips.
    #[must_use]
    pub fn is_attribute_list(&self) -> bool {
        matches!(
            self,
            Self::AttributeListDefinition(_)
                | Self::BlockInlineAttributeList(_)
                | Self::SpanInlineAttributeList(_)
        )
    }

    pub fn strip_locations(&mut self) {
        match self {
            Self::Paragraph(n) => {
                n.location = Location::default();
                n.children.iter_mut().for_each(Node::strip_locations);
            }
            Self::Heading(n) => {
                n.location = Location::default();
                n.children.iter_mut().for_each(Node::strip_locations);
            }
            Self::Emphasis(n) => {
                n.location = Location::default();
                n.children.iter_mut().for_each(Node::strip_locations);
            }
            Self::Element(n) => {
                n.location = Location::default();
                n.children.iter_mut().for_each(Node::strip_locations);
            }
            Self::Code(n) => n.location = Location::default(),
            Self::Text(n) => n.location = Location::default(),
            Self::AttributeListDefinition(n) => n.location = Location::default(),
            Self::BlockInlineAttributeList(n) => n.location = Location::default(),
            Self::SpanInlineAttributeList(n) => n.location = Location::default(),
        }
    }
}
