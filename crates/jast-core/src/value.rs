//! Resolved attribute values.
//!
//! After the resolver pass every attribute of every graph node is an
//! [`AttributeValue`]. The type has no variant able to hold a native parser
//! node: cross-node links are [`NodeRef`]s, plain ids resolved through the
//! owning graph at read time.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// Non-owning reference from an attribute to another node of the same graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef(pub NodeId);

impl NodeRef {
    pub fn id(self) -> NodeId {
        self.0
    }
}

/// An attribute value stored on a graph node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    /// A native string set (e.g. modifiers), kept sorted.
    Set(BTreeSet<String>),
    Ref(NodeRef),
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_node_ref(&self) -> Option<NodeRef> {
        match self {
            AttributeValue::Ref(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            AttributeValue::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Node references held directly by this value: the value itself if it
    /// is a reference, or the reference items of a list. Nested lists are
    /// not descended into.
    pub fn node_refs(&self) -> Vec<NodeRef> {
        match self {
            AttributeValue::Ref(r) => vec![*r],
            AttributeValue::List(items) => items.iter().filter_map(AttributeValue::as_node_ref).collect(),
            _ => Vec::new(),
        }
    }

    /// Walks the value depth first and collects every node reference.
    pub fn all_node_refs(&self) -> Vec<NodeRef> {
        let mut refs = Vec::new();
        self.collect_refs(&mut refs);
        refs
    }

    fn collect_refs(&self, out: &mut Vec<NodeRef>) {
        match self {
            AttributeValue::Ref(r) => out.push(*r),
            AttributeValue::List(items) => items.iter().for_each(|item| item.collect_refs(out)),
            _ => {}
        }
    }
}

impl From<NodeRef> for AttributeValue {
    fn from(value: NodeRef) -> Self {
        AttributeValue::Ref(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Str(value.to_string())
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(value: Vec<AttributeValue>) -> Self {
        AttributeValue::List(value)
    }
}
