//! Attribute attachment.
//!
//! Three passes over a parsed tree: collect every definition into a table,
//! attach each block and span inline list to its target sibling, then strip
//! all attribute-list nodes. A list whose target or attributes are missing is
//! dropped silently; the syntax is non-destructive by design.

use crate::model::{Attribute, Node, Root};
use crate::Options;

mod assign;
mod definitions;
mod find_target;

use assign::assign_attributes;
use definitions::Definitions;
use find_target::find_target;

/// Apply every attribute list in the tree and remove the list nodes.
#[tracing::instrument(level = "debug", skip_all)]
pub fn transform(root: &mut Root, options: &Options) {
    let mut definitions = Definitions::default();
    collect_definitions(&root.children, &mut definitions);
    apply(&mut root.children, &definitions, options);
    strip(&mut root.children);
}

fn collect_definitions(children: &[Node], definitions: &mut Definitions) {
    for node in children {
        if let Node::AttributeListDefinition(definition) = node {
            definitions.set(&definition.name, &definition.attributes);
        }
        if let Some(grandchildren) = node.children() {
            collect_definitions(grandchildren, definitions);
        }
    }
}

fn list_attributes(node: &Node) -> Option<&[Attribute]> {
    match node {
        Node::BlockInlineAttributeList(list) => Some(&list.attributes),
        Node::SpanInlineAttributeList(list) => Some(&list.attributes),
        Node::Paragraph(_)
        | Node::Heading(_)
        | Node::Code(_)
        | Node::Text(_)
        | Node::Emphasis(_)
        | Node::Element(_)
        | Node::AttributeListDefinition(_) => None,
    }
}

fn apply(children: &mut [Node], definitions: &Definitions, options: &Options) {
    for index in 0..children.len() {
        if let Some(attributes) = list_attributes(&children[index]) {
            let attributes = attributes.to_vec();
            if let Some(target) = find_target(children, index, options) {
                let resolved = definitions.resolve(&attributes);
                if resolved.is_empty() {
                    tracing::trace!(index, "attribute list resolved to nothing");
                } else {
                    assign_attributes(&mut children[target], &resolved);
                }
            } else {
                tracing::trace!(index, "attribute list has no target");
            }
        }

        if let Some(grandchildren) = children[index].children_mut() {
            apply(grandchildren, definitions, options);
        }
    }
}

fn strip(children: &mut Vec<Node>) {
    children.retain(|node| !node.is_attribute_list());
    for node in children {
        if let Some(grandchildren) = node.children_mut() {
            strip(grandchildren);
        }
    }
}
