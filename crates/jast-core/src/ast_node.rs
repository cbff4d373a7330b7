//! Borrowed view of one node of an [`Ast`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

use crate::ast::Ast;
use crate::id::NodeId;
use crate::node::NodeData;
use crate::node_type::AstNodeType;
use crate::value::{AttributeValue, NodeRef};

/// A node together with the AST that owns it.
///
/// Two views are equal when they name the same id in the same `Ast`
/// instance; attribute contents play no part. Node references held in
/// attributes are resolved through the owning `Ast`, so a reference whose
/// target was dropped by subtree extraction resolves to `None`.
#[derive(Clone, Copy)]
pub struct AstNode<'a> {
    ast: &'a Ast,
    id: NodeId,
    data: &'a NodeData,
}

impl<'a> AstNode<'a> {
    pub(crate) fn new(ast: &'a Ast, id: NodeId, data: &'a NodeData) -> Self {
        AstNode { ast, id, data }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    pub fn data(&self) -> &'a NodeData {
        self.data
    }

    pub fn node_type(&self) -> AstNodeType {
        self.data.node_type()
    }

    pub fn line(&self) -> Option<u32> {
        self.data.line()
    }

    /// Value of a String node.
    pub fn string(&self) -> Option<&'a str> {
        self.data.as_string()
    }

    /// Declared attribute, without computed field fallback.
    pub fn attribute(&self, name: &str) -> Option<&'a AttributeValue> {
        self.data.attribute(name)
    }

    /// Looks up `name` among the declared attributes, then the `string`
    /// payload of String nodes, then the computed fields registered for this
    /// node's type.
    pub fn get(&self, name: &str) -> Option<AttributeValue> {
        if let Some(value) = self.data.attribute(name) {
            return Some(value.clone());
        }
        if name == "string" {
            if let Some(value) = self.data.as_string() {
                return Some(AttributeValue::Str(value.to_string()));
            }
        }
        self.computed(name)
    }

    /// Computed field `name`, evaluated once per AST and then cached.
    pub fn computed(&self, name: &str) -> Option<AttributeValue> {
        let key = (self.id, name.to_string());
        let cached = self.ast.computed.borrow().get(&key).cloned();
        if cached.is_some() {
            return cached;
        }
        let field = self.ast.fields.get_field(self.node_type(), name)?;
        // The cache must not stay borrowed here: the field may read other
        // computed fields.
        let value = field(*self);
        self.ast.computed.borrow_mut().insert(key, value.clone());
        Some(value)
    }

    pub fn resolve(&self, reference: NodeRef) -> Option<AstNode<'a>> {
        self.ast.node(reference.id())
    }

    /// The node a single-reference attribute points at.
    pub fn node_at(&self, name: &str) -> Option<AstNode<'a>> {
        let reference = self.get(name)?.as_node_ref()?;
        self.resolve(reference)
    }

    /// The nodes referenced by attribute `name`, either a single reference or
    /// a list of them. Targets missing from this AST are skipped.
    pub fn nodes_at(&self, name: &str) -> Vec<AstNode<'a>> {
        self.get(name)
            .map(|value| value.node_refs())
            .unwrap_or_default()
            .into_iter()
            .filter_map(|reference| self.resolve(reference))
            .collect()
    }

    pub fn children(&self) -> Vec<AstNode<'a>> {
        self.ast
            .child_ids(self.id)
            .into_iter()
            .filter_map(|id| self.ast.node(id))
            .collect()
    }

    pub fn parent(&self) -> Option<AstNode<'a>> {
        self.ast.parent_id(self.id).and_then(|id| self.ast.node(id))
    }
}

impl PartialEq for AstNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.ast, other.ast) && self.id == other.id
    }
}

impl Eq for AstNode<'_> {}

impl Hash for AstNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ptr::hash(self.ast, state);
        self.id.hash(state);
    }
}

impl fmt::Debug for AstNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstNode")
            .field("id", &self.id)
            .field("node_type", &self.node_type())
            .field("line", &self.line())
            .finish()
    }
}
