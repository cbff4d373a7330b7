//! Node search by type, with nesting-aware filters.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::ast::Ast;
use crate::ast_node::AstNode;
use crate::error::AstError;
use crate::id::NodeId;
use crate::node_type::AstNodeType;
use crate::traversal::{TraversalEvent, TraverseOptions};

/// How nested matches of the requested types are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NodesSearchFilter {
    /// Every match, wherever it sits.
    #[default]
    All,
    /// Only matches with no matching ancestor.
    TopLevel,
    /// Only matches with no matching descendant.
    BottomLevel,
}

impl NodesSearchFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            NodesSearchFilter::All => "all",
            NodesSearchFilter::TopLevel => "top-level",
            NodesSearchFilter::BottomLevel => "bottom-level",
        }
    }
}

impl fmt::Display for NodesSearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodesSearchFilter {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "all" => Ok(NodesSearchFilter::All),
            "top-level" => Ok(NodesSearchFilter::TopLevel),
            "bottom-level" => Ok(NodesSearchFilter::BottomLevel),
            _ => Err(AstError::UnsupportedSearchFilter(s.to_string())),
        }
    }
}

/// An empty type set matches every node.
fn type_matches(node_types: &[AstNodeType], node: &AstNode<'_>) -> bool {
    node_types.is_empty() || node_types.contains(&node.node_type())
}

impl Ast {
    /// Nodes whose type is in `node_types` (any node if it is empty).
    ///
    /// `All` lists matches in ascending id order; the nesting-aware filters
    /// list them in the order the traversal settles them: top-level matches
    /// on entry, bottom-level matches on leave.
    pub fn find_nodes(&self, node_types: &[AstNodeType], filter: NodesSearchFilter) -> Vec<AstNode<'_>> {
        match filter {
            NodesSearchFilter::All => self.find_all(node_types),
            NodesSearchFilter::TopLevel => self.find_top_level(node_types),
            NodesSearchFilter::BottomLevel => self.find_bottom_level(node_types),
        }
    }

    fn find_all(&self, node_types: &[AstNodeType]) -> Vec<AstNode<'_>> {
        self.nodes().filter(|node| type_matches(node_types, node)).collect()
    }

    fn find_top_level(&self, node_types: &[AstNodeType]) -> Vec<AstNode<'_>> {
        // Everything matches, so the root covers the whole tree.
        if node_types.is_empty() {
            return vec![self.root()];
        }

        let mut found = Vec::new();
        let mut active: Option<NodeId> = None;
        self.walk(TraverseOptions::default(), |event| match event {
            TraversalEvent::Enter(node) => {
                if active.is_none() && type_matches(node_types, &node) {
                    active = Some(node.id());
                    found.push(node);
                }
            }
            TraversalEvent::Leave(node) => {
                if active == Some(node.id()) {
                    active = None;
                }
            }
        });
        found
    }

    fn find_bottom_level(&self, node_types: &[AstNodeType]) -> Vec<AstNode<'_>> {
        let mut found = Vec::new();
        let mut open: Vec<NodeId> = Vec::new();
        let mut not_bottom: HashSet<NodeId> = HashSet::new();
        self.walk(TraverseOptions::default(), |event| match event {
            TraversalEvent::Enter(node) => {
                if type_matches(node_types, &node) {
                    open.push(node.id());
                }
            }
            TraversalEvent::Leave(node) => {
                if type_matches(node_types, &node) {
                    if !not_bottom.contains(&node.id()) {
                        found.push(node);
                    }
                    open.pop();
                    // Every match still open encloses this one.
                    not_bottom.extend(open.iter().copied());
                }
            }
        });
        found
    }
}
