//! Subtree extraction and maximal subtree partitioning.
//!
//! A subtree is a new [`Ast`] over the induced subgraph of the kept nodes.
//! Node ids are preserved, payloads are shared with the source AST, and
//! references to nodes outside the subtree stop resolving.

use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

use petgraph::graph::NodeIndex;

use crate::ast::Ast;
use crate::id::NodeId;
use crate::node_type::AstNodeType;
use crate::traversal::{TraversalEvent, TraverseOptions};

impl Ast {
    /// The subtree rooted at `root`: that node and all its descendants.
    ///
    /// Returns `None` if `root` is not a node of this AST.
    pub fn get_subtree(&self, root: NodeId) -> Option<Ast> {
        if !self.contains(root) {
            return None;
        }
        let mut keep: HashSet<NodeIndex<u32>> = HashSet::new();
        self.walk(TraverseOptions::from_node(root), |event| {
            if let TraversalEvent::Enter(node) = event {
                keep.extend(node.id().index());
            }
        });
        Some(self.induced_subtree(&keep, root))
    }

    /// Partitions the tree into maximal subtrees rooted at nodes of
    /// `root_types`, in traversal order.
    ///
    /// A matching node inside an already open subtree belongs to that
    /// subtree and does not start one of its own, so no two results overlap.
    pub fn get_subtrees(&self, root_types: &[AstNodeType]) -> Vec<Ast> {
        let mut subtrees = Vec::new();
        let mut active: Option<NodeId> = None;
        let mut buffer: HashSet<NodeIndex<u32>> = HashSet::new();

        self.walk(TraverseOptions::default(), |event| match event {
            TraversalEvent::Enter(node) => {
                if active.is_none() && root_types.contains(&node.node_type()) {
                    active = Some(node.id());
                    buffer.clear();
                }
                if active.is_some() {
                    buffer.extend(node.id().index());
                }
            }
            TraversalEvent::Leave(node) => {
                if active == Some(node.id()) {
                    subtrees.push(self.induced_subtree(&buffer, node.id()));
                    active = None;
                }
            }
        });

        tracing::debug!(
            root_types = ?root_types,
            subtrees = subtrees.len(),
            "partitioned AST into subtrees"
        );
        subtrees
    }

    /// Copies the kept nodes and the edges between them. Dropped nodes leave
    /// vacant slots, so ids are unchanged. Only kept payloads are touched,
    /// but the scan still visits every slot of the source graph, which makes
    /// a partition into k subtrees O(n * k).
    fn induced_subtree(&self, keep: &HashSet<NodeIndex<u32>>, root: NodeId) -> Ast {
        let tree = self
            .tree
            .filter_map(|idx, data| keep.contains(&idx).then(|| Rc::clone(data)), |_, _| Some(()));
        Ast::from_parts(tree, root, Arc::clone(&self.fields))
    }
}
