use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::Attribute;

/// An attribute that survives reference expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResolvedAttribute {
    IdName { name: String },
    ClassName { name: String },
    KeyValue { key: String, value: String },
}

/// The definitions table collected from a tree before attachment.
///
/// Later definitions with the same label replace earlier ones.
#[derive(Debug, Default)]
pub(crate) struct Definitions {
    map: FxHashMap<String, Vec<Attribute>>,
}

impl Definitions {
    pub(crate) fn set(&mut self, name: &str, attributes: &[Attribute]) {
        self.map.insert(name.to_string(), attributes.to_vec());
    }

    /// Expand a list's references into the concrete attributes they stand
    /// for.
    ///
    /// References are worked off a LIFO stack, so the last reference of a
    /// list is expanded first. Every name is expanded at most once, which
    /// makes cyclic definitions terminate instead of looping. Popping a name
    /// with no definition ends the expansion outright; remaining stack
    /// entries are dropped.
    pub(crate) fn resolve<'a>(&'a self, list: &'a [Attribute]) -> Vec<ResolvedAttribute> {
        let mut current = list;
        let mut stack: Vec<&'a str> = Vec::new();
        let mut visited: FxHashSet<&'a str> = FxHashSet::default();
        let mut resolved = Vec::new();

        loop {
            for attribute in current {
                match attribute {
                    Attribute::Reference { name } => {
                        if visited.insert(name.as_str()) {
                            stack.push(name);
                        }
                    }
                    Attribute::IdName { name } => resolved.push(ResolvedAttribute::IdName {
                        name: name.clone(),
                    }),
                    Attribute::ClassName { name } => {
                        resolved.push(ResolvedAttribute::ClassName {
                            name: name.clone(),
                        });
                    }
                    Attribute::KeyValue { key, value } => {
                        resolved.push(ResolvedAttribute::KeyValue {
                            key: key.clone(),
                            value: value.clone(),
                        });
                    }
                }
            }

            let Some(name) = stack.pop() else { break };
            let Some(next) = self.map.get(name) else {
                tracing::trace!(reference = name, "reference has no definition, expansion stops");
                break;
            };
            current = next;
        }

        resolved
    }
}
