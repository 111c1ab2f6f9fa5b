//! A parser for attribute lists in markdown-style documents.
//!
//! Attribute lists annotate existing content with ids, classes, and
//! arbitrary key-value pairs without changing how that content renders:
//!
//! ```markdown
//! {:summary: .note appearance="compact"}
//!
//! # Usage
//! {:#usage summary}
//!
//! Read *this part*{:.important} first.
//! ```
//!
//! A definition (`{:label: ...}`) names a reusable list. A block inline list
//! (`{:...}` alone on a line) attaches to the adjacent sibling block,
//! preferring the one directly above. A span inline list attaches to the
//! inline node it directly follows. [`parse`] produces a tree in which the
//! attribute lists are still nodes; [`transform`] resolves references,
//! assigns attributes to their targets, and strips the list nodes;
//! [`process`] chains the two.
//!
//! ```
//! use attrlist_parser::{process, Options};
//!
//! let root = process("# Usage\n{:#usage .note}\n", &Options::default())?;
//! let heading = root.children[0].data().unwrap();
//! assert_eq!(heading.id.as_deref(), Some("usage"));
//! assert_eq!(heading.properties["className"], "note");
//! # Ok::<(), attrlist_parser::Error>(())
//! ```

mod error;
mod grammar;
pub mod model;
mod options;
mod transform;
mod tree_builder;

pub use error::Error;
pub use model::{
    Attribute, AttributeListDefinition, BlockInlineAttributeList, Code, Element,
    ElementAttribute, Emphasis, Heading, Location, Node, NodeData, Paragraph, Position,
    Properties, Root, SpanInlineAttributeList, Text,
};
pub use options::{Options, OptionsBuilder};
pub use transform::transform;

/// Parse a document into a tree, attribute-list nodes included.
///
/// # Errors
///
/// Returns an error only on an internal tokenizer/resolver contract
/// violation; malformed attribute-list syntax parses as literal text.
#[tracing::instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn parse(input: &str, options: &Options) -> Result<Root, Error> {
    grammar::parse_document(input, options)
}

/// Parse a document and apply its attribute lists.
///
/// # Errors
///
/// Same failure surface as [`parse`]; the transform itself is infallible.
pub fn process(input: &str, options: &Options) -> Result<Root, Error> {
    let mut root = parse(input, options)?;
    transform(&mut root, options);
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parsed(source: &str) -> Root {
        let mut root = parse(source, &Options::default()).unwrap();
        root.strip_locations();
        root
    }

    fn processed(source: &str) -> Root {
        let mut root = process(source, &Options::default()).unwrap();
        root.strip_locations();
        root
    }

    fn text(value: &str) -> Node {
        Node::Text(Text {
            value: value.to_string(),
            ..Text::default()
        })
    }

    fn data(id: Option<&str>, properties: &[(&str, &str)]) -> NodeData {
        NodeData {
            id: id.map(str::to_string),
            properties: properties
                .iter()
                .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
                .collect(),
        }
    }

    #[rstest::rstest]
    #[trace]
    fn for_each_sample(#[files("fixtures/samples/**/input.md")] path: std::path::PathBuf) {
        let input = std::fs::read_to_string(&path).unwrap();
        let mut root = process(&input, &Options::default()).unwrap();
        root.strip_locations();
        let actual = serde_json::to_value(&root).unwrap();

        let tree_path = path.with_file_name("tree.json");
        let expected: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(tree_path).unwrap()).unwrap();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_parses_typical_attribute_list() {
        assert_eq!(
            parsed("{:name:ref #id .cls key=\"value\"}\n"),
            Root {
                children: vec![Node::AttributeListDefinition(AttributeListDefinition {
                    name: "name".to_string(),
                    attributes: vec![
                        Attribute::Reference {
                            name: "ref".to_string()
                        },
                        Attribute::IdName {
                            name: "id".to_string()
                        },
                        Attribute::ClassName {
                            name: "cls".to_string()
                        },
                        Attribute::KeyValue {
                            key: "key".to_string(),
                            value: "value".to_string()
                        },
                    ],
                    ..AttributeListDefinition::default()
                })],
                ..Root::default()
            }
        );
    }

    #[test]
    fn test_does_not_parse_empty_attribute_list() {
        assert_eq!(
            parsed("{:name:}\n"),
            Root {
                children: vec![Node::Paragraph(Paragraph {
                    children: vec![text("{:name:}")],
                    ..Paragraph::default()
                })],
                ..Root::default()
            }
        );
    }

    #[test]
    fn test_does_not_parse_attributes_without_separating_space() {
        assert_eq!(
            parsed("{:name:.c1.c2}\n"),
            Root {
                children: vec![Node::Paragraph(Paragraph {
                    children: vec![text("{:name:.c1.c2}")],
                    ..Paragraph::default()
                })],
                ..Root::default()
            }
        );
    }

    #[test]
    fn test_accepts_up_to_three_spaces_of_indent() {
        let root = parsed("   {:name:.cls}\n");
        assert!(matches!(
            root.children[0],
            Node::AttributeListDefinition(_)
        ));

        let root = parsed("    {:name:.cls}\n");
        assert_eq!(
            root.children[0],
            Node::Code(Code {
                value: "{:name:.cls}".to_string(),
                ..Code::default()
            })
        );

        let root = parsed("   {:.cls}\n");
        assert!(matches!(root.children[0], Node::BlockInlineAttributeList(_)));

        let root = parsed("    {:.cls}\n");
        assert_eq!(
            root.children[0],
            Node::Code(Code {
                value: "{:.cls}".to_string(),
                ..Code::default()
            })
        );
    }

    #[test]
    fn test_parses_empty_span_inline_attribute_list() {
        assert_eq!(
            parsed("{::}\n"),
            Root {
                children: vec![Node::Paragraph(Paragraph {
                    children: vec![Node::SpanInlineAttributeList(
                        SpanInlineAttributeList::default()
                    )],
                    ..Paragraph::default()
                })],
                ..Root::default()
            }
        );
    }

    #[test]
    fn test_attaches_attribute_list_to_block_element() {
        let root = processed("{:ref:.cls key=\"value\"}\n\n# Heading\n{:#id ref}\n");
        assert_eq!(
            root.children[0].data().unwrap(),
            &data(
                Some("id"),
                &[("id", "id"), ("className", "cls"), ("key", "value")]
            )
        );
    }

    #[test]
    fn test_attaches_attribute_list_to_span_element() {
        let root = processed("{:ref:.cls key=\"value\"}\n\n*Emphasis*{:#id ref}\n");
        let Node::Paragraph(p) = &root.children[0] else {
            panic!("expected a paragraph");
        };
        assert_eq!(
            p.children[0].data().unwrap(),
            &data(
                Some("id"),
                &[("id", "id"), ("className", "cls"), ("key", "value")]
            )
        );
    }

    #[test]
    fn test_resolves_references_recursively() {
        let root = processed("{:ref:.cls}\n{:ref2:ref}\n\n# Heading\n{:ref2}\n");
        assert_eq!(
            root.children[0].data().unwrap(),
            &data(None, &[("className", "cls")])
        );
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_ignores_undefined_reference() {
        let root = processed("# Heading\n{:ref}\n");
        assert!(root.children[0].data().unwrap().is_empty());
    }

    #[test]
    fn test_attaches_to_following_block_element() {
        let root = processed("{:.cls}\n# Heading\n");
        assert_eq!(
            root.children[0].data().unwrap(),
            &data(None, &[("className", "cls")])
        );
    }

    #[test]
    fn test_prefers_preceding_block_element() {
        let root = processed("# Heading\n{:.cls}\n# Heading\n");
        assert_eq!(
            root.children[0].data().unwrap(),
            &data(None, &[("className", "cls")])
        );
        assert!(root.children[1].data().unwrap().is_empty());
    }

    #[test]
    fn test_does_not_attach_across_blank_lines() {
        let root = processed("# Heading\n\n{:.cls}\n\n#Heading\n");
        assert!(root.children[0].data().unwrap().is_empty());
        assert!(root.children[1].data().unwrap().is_empty());
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn test_span_list_does_not_attach_to_text() {
        let root = processed("Some {:.cls}*Emphasis*\n");
        let Node::Paragraph(p) = &root.children[0] else {
            panic!("expected a paragraph");
        };
        assert_eq!(p.children[0], text("Some "));
        assert!(p.children[1].data().unwrap().is_empty());
    }

    #[test]
    fn test_span_list_requires_directly_preceding_element() {
        let root = processed("Some *Emphasis* {:.cls}\n");
        let Node::Paragraph(p) = &root.children[0] else {
            panic!("expected a paragraph");
        };
        assert!(p.children[1].data().unwrap().is_empty());
        assert_eq!(p.children[2], text(" "));
    }

    #[test]
    fn test_appends_or_replaces_class_name() {
        let root = processed(
            "# Heading\n{:.cls1 .cls2}\n\n\
             # Heading\n{:class=\"cls1\" .cls2}\n\n\
             # Heading\n{:class=\"something\" class=\"cls1\" .cls2}\n\n\
             # Heading\n{:class=\"cls1 cls2\"}\n",
        );
        for child in &root.children {
            assert_eq!(
                child.data().unwrap(),
                &data(None, &[("className", "cls1 cls2")])
            );
        }
    }

    #[test]
    fn test_option_allows_glued_attribute_names() {
        let options = Options::builder().with_allow_no_space_before_name().build();

        let mut root = parse("{:name:.cls1.cls2}\n", &options).unwrap();
        root.strip_locations();
        assert_eq!(
            root.children[0],
            Node::AttributeListDefinition(AttributeListDefinition {
                name: "name".to_string(),
                attributes: vec![
                    Attribute::ClassName {
                        name: "cls1".to_string()
                    },
                    Attribute::ClassName {
                        name: "cls2".to_string()
                    },
                ],
                ..AttributeListDefinition::default()
            })
        );

        let mut root = parse("{:ref#id}\n", &options).unwrap();
        root.strip_locations();
        assert_eq!(
            root.children[0],
            Node::BlockInlineAttributeList(BlockInlineAttributeList {
                attributes: vec![
                    Attribute::Reference {
                        name: "ref".to_string()
                    },
                    Attribute::IdName {
                        name: "id".to_string()
                    },
                ],
                ..BlockInlineAttributeList::default()
            })
        );
    }

    #[test]
    fn test_option_allows_underscore_in_id() {
        let options = Options::builder().with_allow_underscore_in_id().build();
        let mut root = parse("{:ref:#id_name}\n", &options).unwrap();
        root.strip_locations();
        assert_eq!(
            root.children[0],
            Node::AttributeListDefinition(AttributeListDefinition {
                name: "ref".to_string(),
                attributes: vec![Attribute::IdName {
                    name: "id_name".to_string()
                }],
                ..AttributeListDefinition::default()
            })
        );
    }

    #[test]
    fn test_transform_on_programmatic_element_tree() {
        let options = Options::builder().with_allow_no_space_before_name().build();
        let mut root = Root {
            children: vec![
                Node::Element(Element {
                    name: "Callout".to_string(),
                    ..Element::default()
                }),
                Node::BlockInlineAttributeList(BlockInlineAttributeList {
                    attributes: vec![Attribute::ClassName {
                        name: "wide".to_string(),
                    }],
                    ..BlockInlineAttributeList::default()
                }),
            ],
            ..Root::default()
        };
        transform(&mut root, &options);

        assert_eq!(root.children.len(), 1);
        let Node::Element(element) = &root.children[0] else {
            panic!("expected an element");
        };
        assert_eq!(
            element.attributes,
            vec![ElementAttribute {
                name: "className".to_string(),
                value: "wide".to_string()
            }]
        );
    }
}
