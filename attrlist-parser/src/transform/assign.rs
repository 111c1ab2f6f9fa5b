use crate::model::{Element, ElementAttribute, Node, NodeData};

use super::definitions::ResolvedAttribute;

/// Write resolved attributes onto a target node.
///
/// `Element` targets receive named attributes directly; every other target
/// gets render properties in its data. In both cases `class` folds into
/// `className`, repeated class names append with a space, everything else
/// replaces, and an `id` is mirrored into the node data.
pub(crate) fn assign_attributes(target: &mut Node, attributes: &[ResolvedAttribute]) {
    if let Node::Element(element) = target {
        for attribute in attributes {
            match attribute {
                ResolvedAttribute::IdName { name } => {
                    upsert_element_attribute(element, "id", name, false);
                }
                ResolvedAttribute::ClassName { name } => {
                    upsert_element_attribute(element, "className", name, true);
                }
                ResolvedAttribute::KeyValue { key, value } => {
                    upsert_element_attribute(element, key, value, false);
                }
            }
        }
    } else if let Some(data) = target.data_mut() {
        for attribute in attributes {
            match attribute {
                ResolvedAttribute::IdName { name } => upsert_property(data, "id", name, false),
                ResolvedAttribute::ClassName { name } => {
                    upsert_property(data, "className", name, true);
                }
                ResolvedAttribute::KeyValue { key, value } => {
                    upsert_property(data, key, value, false);
                }
            }
        }
    } else {
        tracing::trace!("target node cannot carry attributes, dropping them");
    }
}

fn upsert_property(data: &mut NodeData, name: &str, value: &str, append: bool) {
    let name = if name == "class" { "className" } else { name };
    match data.properties.get_mut(name) {
        Some(existing) if append => {
            existing.push(' ');
            existing.push_str(value);
        }
        Some(existing) => value.clone_into(existing),
        None => {
            data.properties.insert(name.to_string(), value.to_string());
        }
    }
    if name == "id" {
        data.id = Some(value.to_string());
    }
}

fn upsert_element_attribute(element: &mut Element, name: &str, value: &str, append: bool) {
    let name = if name == "class" { "className" } else { name };
    match element.attributes.iter_mut().find(|a| a.name == name) {
        Some(existing) if append => {
            existing.value.push(' ');
            existing.value.push_str(value);
        }
        Some(existing) => value.clone_into(&mut existing.value),
        None => element.attributes.push(ElementAttribute {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
    if name == "id" {
        element.data.id = Some(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Heading;
    use pretty_assertions::assert_eq;

    fn class(name: &str) -> ResolvedAttribute {
        ResolvedAttribute::ClassName {
            name: name.to_string(),
        }
    }

    fn key_value(key: &str, value: &str) -> ResolvedAttribute {
        ResolvedAttribute::KeyValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_class_names_accumulate() {
        let mut target = Node::Heading(Heading::default());
        assign_attributes(&mut target, &[class("one"), class("two")]);
        let data = target.data().unwrap();
        assert_eq!(data.properties["className"], "one two");
    }

    #[test]
    fn test_class_key_folds_into_class_name() {
        let mut target = Node::Heading(Heading::default());
        assign_attributes(
            &mut target,
            &[key_value("class", "base"), class("extra")],
        );
        let data = target.data().unwrap();
        assert_eq!(data.properties["className"], "base extra");
        assert!(!data.properties.contains_key("class"));
    }

    #[test]
    fn test_key_value_replaces_but_class_appends() {
        let mut target = Node::Heading(Heading::default());
        assign_attributes(
            &mut target,
            &[
                key_value("class", "something"),
                key_value("class", "base"),
                class("extra"),
            ],
        );
        let data = target.data().unwrap();
        assert_eq!(data.properties["className"], "base extra");
    }

    #[test]
    fn test_id_mirrors_into_data() {
        let mut target = Node::Heading(Heading::default());
        assign_attributes(
            &mut target,
            &[ResolvedAttribute::IdName {
                name: "anchor".to_string(),
            }],
        );
        let data = target.data().unwrap();
        assert_eq!(data.id.as_deref(), Some("anchor"));
        assert_eq!(data.properties["id"], "anchor");
    }

    #[test]
    fn test_element_targets_get_named_attributes() {
        let mut target = Node::Element(Element {
            name: "Callout".to_string(),
            ..Element::default()
        });
        assign_attributes(
            &mut target,
            &[
                ResolvedAttribute::IdName {
                    name: "anchor".to_string(),
                },
                class("one"),
                class("two"),
            ],
        );
        let Node::Element(element) = &target else {
            panic!("expected element");
        };
        assert_eq!(
            element.attributes,
            vec![
                ElementAttribute {
                    name: "id".to_string(),
                    value: "anchor".to_string()
                },
                ElementAttribute {
                    name: "className".to_string(),
                    value: "one two".to_string()
                },
            ]
        );
        assert_eq!(element.data.id.as_deref(), Some("anchor"));
    }
}
