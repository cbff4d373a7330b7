//! Ast: a built, resolved graph together with its root and computed fields.
//!
//! [`Ast`] is the entry point for building and querying. The graph is
//! immutable once built; the only mutable state is the fake node counter and
//! the computed field cache. Traversal, search and subtree operations live in
//! their own modules as further `impl Ast` blocks.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use petgraph::Direction;
use smallvec::SmallVec;

use crate::ast_node::AstNode;
use crate::builder::{AstBuilder, AstGraph};
use crate::catalog::{JavaCatalog, NodeTypeCatalog};
use crate::computed_fields::ComputedFieldsRegistry;
use crate::error::AstError;
use crate::id::NodeId;
use crate::native::{JavaParser, NativeNode};
use crate::node::NodeData;
use crate::value::AttributeValue;

/// Child id list; most nodes have only a handful of children.
pub type ChildIds = SmallVec<[NodeId; 8]>;

/// A Java AST stored as a directed tree graph.
pub struct Ast {
    pub(crate) tree: AstGraph,
    pub(crate) root: NodeId,
    /// Number of fake nodes handed out so far.
    pub(crate) fake_nodes: i32,
    pub(crate) fields: Arc<ComputedFieldsRegistry>,
    /// Computed field values, filled on first access.
    pub(crate) computed: RefCell<HashMap<(NodeId, String), AttributeValue>>,
}

impl Ast {
    /// Wraps an already built graph. `root` must be a node of `tree`.
    pub(crate) fn from_parts(tree: AstGraph, root: NodeId, fields: Arc<ComputedFieldsRegistry>) -> Self {
        debug_assert!(
            root.index().is_some_and(|index| tree.contains_node(index)),
            "root id {root} is not a node of the tree"
        );
        Ast {
            tree,
            root,
            fake_nodes: 0,
            fields,
            computed: RefCell::new(HashMap::new()),
        }
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    /// Reads a Java source file, parses it with `parser` and builds its AST.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn build(path: impl AsRef<Path>, parser: &dyn JavaParser) -> Result<Self, AstError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AstError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let source = String::from_utf8_lossy(&bytes);
        let native = parser.parse(&source).map_err(|reason| AstError::Parse {
            path: path.to_path_buf(),
            reason,
        })?;
        Self::build_from_native(&native)
    }

    /// Builds from a native tree with the standard catalog and the
    /// process-wide computed fields registry.
    pub fn build_from_native(root: &Rc<NativeNode>) -> Result<Self, AstError> {
        Self::build_from_native_with(root, &JavaCatalog, ComputedFieldsRegistry::global())
    }

    pub fn build_from_native_with(
        root: &Rc<NativeNode>,
        catalog: &dyn NodeTypeCatalog,
        fields: Arc<ComputedFieldsRegistry>,
    ) -> Result<Self, AstError> {
        let (tree, root_id) = AstBuilder::new(catalog).build(root)?;
        Ok(Self::from_parts(tree, root_id, fields))
    }

    /// Builds from a JSON dump of a native tree.
    pub fn from_json(json: &str) -> Result<Self, AstError> {
        let native = NativeNode::from_json(json)?;
        Self::build_from_native(&native)
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    pub fn tree(&self) -> &AstGraph {
        &self.tree
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> AstNode<'_> {
        AstNode::new(self, self.root, &self.tree[self.root_index()])
    }

    /// Registry consulted for computed fields of this AST's nodes.
    pub fn fields(&self) -> &Arc<ComputedFieldsRegistry> {
        &self.fields
    }

    /// Returns `true` if `id` names a real node of this graph instance.
    pub fn contains(&self, id: NodeId) -> bool {
        id.index().is_some_and(|idx| self.tree.contains_node(idx))
    }

    pub fn node(&self, id: NodeId) -> Option<AstNode<'_>> {
        let idx = id.index()?;
        let data = self.tree.node_weight(idx)?;
        Some(AstNode::new(self, id, data))
    }

    /// Every node, in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = AstNode<'_>> + '_ {
        self.tree
            .node_indices()
            .map(move |idx| AstNode::new(self, NodeId::from(idx), &self.tree[idx]))
    }

    pub fn len(&self) -> usize {
        self.tree.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.node_count() == 0
    }

    pub(crate) fn data(&self, id: NodeId) -> Option<&NodeData> {
        id.index()
            .and_then(|idx| self.tree.node_weight(idx))
            .map(|data| data.as_ref())
    }

    /// Children of `id` in construction order. Empty for unknown ids.
    pub fn child_ids(&self, id: NodeId) -> ChildIds {
        let Some(idx) = id.index().filter(|&idx| self.tree.contains_node(idx)) else {
            return ChildIds::new();
        };
        let mut children: ChildIds = self
            .tree
            .neighbors_directed(idx, Direction::Outgoing)
            .map(NodeId::from)
            .collect();
        children.sort_unstable();
        children
    }

    /// Parent of `id`, or `None` for the root and for unknown ids.
    pub fn parent_id(&self, id: NodeId) -> Option<NodeId> {
        let idx = id.index().filter(|&idx| self.tree.contains_node(idx))?;
        self.tree
            .neighbors_directed(idx, Direction::Incoming)
            .next()
            .map(NodeId::from)
    }

    /// Nodes reachable from the root, in preorder.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            ast: self,
            stack: vec![self.root],
        }
    }

    // -----------------------------------------------------------------------
    // Fake nodes
    // -----------------------------------------------------------------------

    /// Allocates a placeholder id that no real node of this graph uses.
    ///
    /// Ids run -1, -2, ... per graph instance. The node is not inserted into
    /// the tree.
    pub fn create_fake_node(&mut self) -> NodeId {
        self.fake_nodes += 1;
        NodeId(-self.fake_nodes)
    }

    fn root_index(&self) -> petgraph::graph::NodeIndex<u32> {
        // The root id always comes from the builder or a subtree extraction.
        self.root
            .index()
            .unwrap_or_else(|| unreachable!("root id {} has no graph slot", self.root))
    }
}

impl fmt::Debug for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ast")
            .field("root", &self.root)
            .field("nodes", &self.tree.node_count())
            .field("fake_nodes", &self.fake_nodes)
            .finish_non_exhaustive()
    }
}

/// Renders the tree one node per line, indented by depth.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(data) = self.data(id) else { continue };
            write!(f, "{}{}: ", "|   ".repeat(depth), data.node_type())?;
            if let Some(value) = data.as_string() {
                write!(f, "{value}, ")?;
            }
            write!(f, "node index = {id}")?;
            if let Some(line) = data.line() {
                write!(f, ", line = {line}")?;
            }
            writeln!(f)?;
            stack.extend(self.child_ids(id).into_iter().rev().map(|child| (child, depth + 1)));
        }
        Ok(())
    }
}

/// Preorder iterator over the nodes of an [`Ast`].
pub struct Preorder<'a> {
    ast: &'a Ast,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = AstNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            if let Some(node) = self.ast.node(id) {
                self.stack.extend(self.ast.child_ids(id).into_iter().rev());
                return Some(node);
            }
        }
    }
}

impl<'a> IntoIterator for &'a Ast {
    type Item = AstNode<'a>;
    type IntoIter = Preorder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.preorder()
    }
}
