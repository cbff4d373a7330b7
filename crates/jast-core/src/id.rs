//! Stable node identifiers.
//!
//! Real nodes are numbered densely from 1 in construction order. Fake nodes
//! created by [`Ast::create_fake_node`](crate::ast::Ast::create_fake_node)
//! use negative ids (-1, -2, ...) so they can never collide with a real node.

use std::fmt;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Stable node identifier. Positive ids map to a petgraph `NodeIndex<u32>`
/// shifted by one; zero and negative ids have no graph slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub i32);

impl NodeId {
    /// Returns the graph slot backing this id, or `None` for fake ids.
    pub fn index(self) -> Option<NodeIndex<u32>> {
        if self.0 > 0 {
            Some(NodeIndex::new((self.0 - 1) as usize))
        } else {
            None
        }
    }

    /// Returns `true` for ids handed out by `create_fake_node`.
    pub fn is_fake(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Bridge between NodeId and petgraph's NodeIndex<u32>.

impl From<NodeIndex<u32>> for NodeId {
    fn from(idx: NodeIndex<u32>) -> Self {
        NodeId(idx.index() as i32 + 1)
    }
}
