//! Bridge from token events to attribute-list tree nodes.
//!
//! After a construct matches, its enter/exit events are replayed in order and
//! folded into one of the three attribute-list node kinds. Names and keys are
//! plain source slices; quoted values have their backslash escapes removed
//! here, so the tree never carries escape sequences.

use crate::grammar::{EventKind, TokenKind, Tokenizer};
use crate::model::{
    Attribute, AttributeListDefinition, BlockInlineAttributeList, Node, SpanInlineAttributeList,
};
use crate::Error;

/// Fold the events emitted since `first_event` into the attribute-list node
/// they describe.
pub(crate) fn build_list_node(tok: &Tokenizer, first_event: usize) -> Result<Node, Error> {
    let mut definition_name: Option<String> = None;
    let mut attributes: Vec<Attribute> = Vec::new();
    let mut pending_reference: Option<String> = None;
    let mut pending_key: Option<String> = None;
    let mut pending_value: Option<String> = None;

    for event in &tok.events[first_event..] {
        if event.kind != EventKind::Exit {
            continue;
        }
        let token = tok.tokens[event.token];
        match token.kind {
            TokenKind::DefinitionReferenceName => {
                definition_name = Some(tok.slice(&token).to_string());
            }
            TokenKind::ReferenceAttributeName => {
                pending_reference = Some(tok.slice(&token).to_string());
            }
            TokenKind::ReferenceAttribute => {
                let name = pending_reference.take().ok_or(Error::MissingOpenNode {
                    expected: TokenKind::ReferenceAttributeName.label(),
                })?;
                attributes.push(Attribute::Reference { name });
            }
            TokenKind::IdNameAttributeName => {
                attributes.push(Attribute::IdName {
                    name: tok.slice(&token).to_string(),
                });
            }
            TokenKind::ClassNameAttributeName => {
                attributes.push(Attribute::ClassName {
                    name: tok.slice(&token).to_string(),
                });
            }
            TokenKind::KeyValueAttributeKey => {
                pending_key = Some(tok.slice(&token).to_string());
            }
            TokenKind::KeyValueAttributeValueString => {
                pending_value = Some(unescape(tok.slice(&token)));
            }
            TokenKind::KeyValueAttribute => {
                let key = pending_key.take().ok_or(Error::MissingOpenNode {
                    expected: TokenKind::KeyValueAttributeKey.label(),
                })?;
                let value = pending_value.take().ok_or(Error::MissingOpenNode {
                    expected: TokenKind::KeyValueAttributeValueString.label(),
                })?;
                attributes.push(Attribute::KeyValue { key, value });
            }
            TokenKind::Definition => {
                let name = definition_name.take().ok_or(Error::MissingOpenNode {
                    expected: TokenKind::DefinitionReferenceName.label(),
                })?;
                return Ok(Node::AttributeListDefinition(AttributeListDefinition {
                    name,
                    attributes,
                    location: token.location(),
                }));
            }
            TokenKind::BlockInlineList => {
                return Ok(Node::BlockInlineAttributeList(BlockInlineAttributeList {
                    attributes,
                    location: token.location(),
                }));
            }
            TokenKind::SpanInlineList => {
                return Ok(Node::SpanInlineAttributeList(SpanInlineAttributeList {
                    attributes,
                    location: token.location(),
                }));
            }
            _ => {}
        }
    }

    Err(Error::MissingOpenNode {
        expected: TokenKind::AttributeList.label(),
    })
}

/// Remove single-character backslash escapes: `\X` becomes `X` for any `X`.
/// A trailing lone backslash is kept as-is.
fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::cursor::Spot;
    use crate::grammar::definition::definition;
    use crate::grammar::inline::span_inline_list;
    use crate::Options;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builds_definition_node_in_source_order() {
        let options = Options::default();
        let mut tok = Tokenizer::new("{:label: ref #id .cls key=\"v\"}", Spot::start());
        assert!(tok.attempt(|t| definition(t, &options)).unwrap());

        let node = build_list_node(&tok, 0).unwrap();
        let Node::AttributeListDefinition(def) = node else {
            panic!("expected a definition node");
        };
        assert_eq!(def.name, "label");
        assert_eq!(
            def.attributes,
            vec![
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
                    value: "v".to_string()
                },
            ]
        );
        assert_eq!(def.location.absolute_end, "{:label: ref #id .cls key=\"v\"}".len());
    }

    #[test]
    fn test_value_escapes_are_removed() {
        let options = Options::default();
        let mut tok = Tokenizer::new("{: key=\"a\\\"b\\\\c\"}", Spot::start());
        assert!(tok
            .attempt(|t| span_inline_list(t, &options))
            .unwrap());

        let node = build_list_node(&tok, 0).unwrap();
        let Node::SpanInlineAttributeList(list) = node else {
            panic!("expected a span list node");
        };
        assert_eq!(
            list.attributes,
            vec![Attribute::KeyValue {
                key: "key".to_string(),
                value: "a\"b\\c".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_span_list_has_no_attributes() {
        let options = Options::default();
        let mut tok = Tokenizer::new("{::}", Spot::start());
        assert!(tok.attempt(|t| span_inline_list(t, &options)).unwrap());

        let node = build_list_node(&tok, 0).unwrap();
        let Node::SpanInlineAttributeList(list) = node else {
            panic!("expected a span list node");
        };
        assert!(list.attributes.is_empty());
    }

    #[test]
    fn test_unescape_keeps_trailing_backslash() {
        assert_eq!(unescape("plain"), "plain");
        assert_eq!(unescape("a\\'b"), "a'b");
        assert_eq!(unescape("tail\\"), "tail\\");
    }
}
