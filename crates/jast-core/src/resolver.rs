//! Reference resolver.
//!
//! Runs once over a freshly built graph. Every native node found in an
//! attribute, directly or inside lists nested to any depth, is replaced by a
//! [`NodeRef`] to the graph node built from it. The output payload type has
//! no room for native nodes, so a resolved graph cannot leak them.

use std::collections::BTreeSet;
use std::rc::Rc;

use indexmap::IndexMap;
use petgraph::graph::NodeIndex;

use crate::builder::{AstGraph, IdentityMap, PendingGraph, PendingNode};
use crate::error::AstError;
use crate::id::NodeId;
use crate::native::{NativeNode, NativeSet, NativeValue};
use crate::node::{NodeData, StandardNode};
use crate::value::{AttributeValue, NodeRef};

pub(crate) struct Resolver<'m> {
    identity: &'m IdentityMap,
}

/// Node and attribute being resolved, for error reports.
struct Site<'a> {
    node: NodeId,
    attribute: &'a str,
}

impl<'m> Resolver<'m> {
    pub(crate) fn new(identity: &'m IdentityMap) -> Self {
        Resolver { identity }
    }

    /// Resolves every node of `pending`, keeping node indices and edges.
    pub(crate) fn resolve(&self, pending: PendingGraph) -> Result<AstGraph, AstError> {
        let mut resolved: Vec<Rc<NodeData>> = Vec::with_capacity(pending.node_count());
        for idx in pending.node_indices() {
            resolved.push(Rc::new(self.resolve_node(NodeId::from(idx), &pending[idx])?));
        }
        Ok(pending.map(
            |idx: NodeIndex<u32>, _| Rc::clone(&resolved[idx.index()]),
            |_, _| (),
        ))
    }

    fn resolve_node(&self, id: NodeId, node: &PendingNode) -> Result<NodeData, AstError> {
        let data = match node {
            PendingNode::Standard {
                node_type,
                line,
                attributes,
            } => {
                let mut resolved = IndexMap::with_capacity(attributes.len());
                for (name, value) in attributes {
                    let site = Site {
                        node: id,
                        attribute: name,
                    };
                    resolved.insert(name.clone(), self.resolve_attribute(&site, value)?);
                }
                tracing::trace!(node = %id, node_type = %node_type, "resolved node attributes");
                NodeData::Standard(StandardNode {
                    node_type: *node_type,
                    line: *line,
                    attributes: resolved,
                })
            }
            PendingNode::Collection => NodeData::Collection,
            PendingNode::String(value) => NodeData::String(value.clone()),
        };
        Ok(data)
    }

    fn resolve_attribute(&self, site: &Site<'_>, value: &NativeValue) -> Result<AttributeValue, AstError> {
        match value {
            NativeValue::Node(node) => self.reference(site, node).map(AttributeValue::Ref),
            NativeValue::List(items) => self.resolve_list(site, items),
            NativeValue::Set(set) => resolve_set(site, set),
            NativeValue::Null => Ok(AttributeValue::Null),
            NativeValue::Bool(b) => Ok(AttributeValue::Bool(*b)),
            NativeValue::Int(i) => Ok(AttributeValue::Int(*i)),
            NativeValue::Str(s) => Ok(AttributeValue::Str(s.clone())),
        }
    }

    fn resolve_list(&self, site: &Site<'_>, items: &[NativeValue]) -> Result<AttributeValue, AstError> {
        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            let value = match item {
                NativeValue::Node(node) => AttributeValue::Ref(self.reference(site, node)?),
                NativeValue::List(nested) => self.resolve_list(site, nested)?,
                NativeValue::Null => AttributeValue::Null,
                NativeValue::Bool(b) => AttributeValue::Bool(*b),
                NativeValue::Int(i) => AttributeValue::Int(*i),
                NativeValue::Str(s) => AttributeValue::Str(s.clone()),
                NativeValue::Set(_) => return Err(unsupported(site, item)),
            };
            resolved.push(value);
        }
        Ok(AttributeValue::List(resolved))
    }

    fn reference(&self, site: &Site<'_>, node: &Rc<NativeNode>) -> Result<NodeRef, AstError> {
        self.identity
            .get(&Rc::as_ptr(node))
            .map(|&id| NodeRef(id))
            .ok_or_else(|| AstError::UnresolvedReference {
                node: site.node.0,
                attribute: site.attribute.to_string(),
                kind: node.kind.clone(),
            })
    }
}

/// A top-level native set: only strings survive, nulls are skipped.
fn resolve_set(site: &Site<'_>, set: &NativeSet) -> Result<AttributeValue, AstError> {
    let mut members = BTreeSet::new();
    for member in &set.set {
        match member {
            NativeValue::Str(s) => {
                members.insert(s.clone());
            }
            NativeValue::Null => {}
            other => return Err(unsupported(site, other)),
        }
    }
    Ok(AttributeValue::Set(members))
}

fn unsupported(site: &Site<'_>, value: &NativeValue) -> AstError {
    AstError::UnsupportedAttribute {
        node: site.node.0,
        attribute: site.attribute.to_string(),
        found: value.type_name(),
    }
}
