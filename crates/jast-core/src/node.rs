//! Graph node payloads.
//!
//! Every graph node is one of three shapes, mirroring what the native parser
//! can yield in a child slot: a standard node (one native parse-tree node), a
//! collection node standing in for a native string set, or a string leaf.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::node_type::AstNodeType;
use crate::value::AttributeValue;

/// Payload of a graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeData {
    Standard(StandardNode),
    /// Unordered bag of string tokens; its members are String children.
    Collection,
    /// A single string value.
    String(String),
}

/// A graph node mirroring one native parse-tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardNode {
    pub node_type: AstNodeType,
    /// Source line, absent when the native node carries no position.
    pub line: Option<u32>,
    /// Catalog-declared attributes, in catalog order.
    pub attributes: IndexMap<String, AttributeValue>,
}

impl NodeData {
    pub fn node_type(&self) -> AstNodeType {
        match self {
            NodeData::Standard(node) => node.node_type,
            NodeData::Collection => AstNodeType::Collection,
            NodeData::String(_) => AstNodeType::String,
        }
    }

    pub fn line(&self) -> Option<u32> {
        match self {
            NodeData::Standard(node) => node.line,
            NodeData::Collection | NodeData::String(_) => None,
        }
    }

    /// Declared attribute by name. Collection and String nodes declare none.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        match self {
            NodeData::Standard(node) => node.attributes.get(name),
            NodeData::Collection | NodeData::String(_) => None,
        }
    }

    /// Names of the declared attributes, in catalog order.
    pub fn attribute_names(&self) -> Vec<&str> {
        match self {
            NodeData::Standard(node) => node.attributes.keys().map(String::as_str).collect(),
            NodeData::Collection | NodeData::String(_) => Vec::new(),
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            NodeData::String(value) => Some(value),
            _ => None,
        }
    }
}
