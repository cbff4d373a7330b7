//! Depth-first traversal with paired enter/leave events.
//!
//! Every visited node produces exactly one [`TraversalEvent::Enter`] before
//! any event of its descendants and one [`TraversalEvent::Leave`] after all
//! of them. The walk is iterative, so deep trees cannot overflow the stack.

use std::collections::HashSet;

use crate::ast::{Ast, ChildIds};
use crate::ast_node::AstNode;
use crate::id::NodeId;

/// Where a traversal starts and which edges it may follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraverseOptions {
    /// Start node; the root when `None`.
    pub source: Option<NodeId>,
    /// Follow edges in both directions, so the walk can climb to ancestors.
    pub undirected: bool,
}

impl TraverseOptions {
    pub fn from_node(source: NodeId) -> Self {
        TraverseOptions {
            source: Some(source),
            undirected: false,
        }
    }

    pub fn undirected(mut self) -> Self {
        self.undirected = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalEvent<'a> {
    Enter(AstNode<'a>),
    Leave(AstNode<'a>),
}

impl<'a> TraversalEvent<'a> {
    pub fn node(&self) -> AstNode<'a> {
        match self {
            TraversalEvent::Enter(node) | TraversalEvent::Leave(node) => *node,
        }
    }
}

/// One open node of the walk and the neighbours still to try.
struct Frame {
    node: NodeId,
    neighbours: ChildIds,
    next: usize,
}

impl Ast {
    /// Walks the tree depth first, reporting every enter and leave event to
    /// `visit`. A start node that is not part of this AST yields no events.
    pub fn walk<'a, F>(&'a self, options: TraverseOptions, mut visit: F)
    where
        F: FnMut(TraversalEvent<'a>),
    {
        let source = options.source.unwrap_or(self.root);
        let Some(start) = self.node(source) else {
            return;
        };

        let mut visited: HashSet<NodeId> = HashSet::new();
        visited.insert(source);
        visit(TraversalEvent::Enter(start));
        let mut stack = vec![self.frame(source, options.undirected)];

        while let Some(frame) = stack.last_mut() {
            if let Some(&next) = frame.neighbours.get(frame.next) {
                frame.next += 1;
                if !visited.insert(next) {
                    continue;
                }
                if let Some(node) = self.node(next) {
                    visit(TraversalEvent::Enter(node));
                    stack.push(self.frame(next, options.undirected));
                }
            } else {
                let id = frame.node;
                stack.pop();
                if let Some(node) = self.node(id) {
                    visit(TraversalEvent::Leave(node));
                }
            }
        }
    }

    /// Two-callback form of [`walk`](Self::walk).
    pub fn traverse<'a, E, L>(&'a self, mut on_enter: E, mut on_leave: L, options: TraverseOptions)
    where
        E: FnMut(AstNode<'a>),
        L: FnMut(AstNode<'a>),
    {
        self.walk(options, |event| match event {
            TraversalEvent::Enter(node) => on_enter(node),
            TraversalEvent::Leave(node) => on_leave(node),
        });
    }

    fn frame(&self, node: NodeId, undirected: bool) -> Frame {
        let mut neighbours = self.child_ids(node);
        if undirected {
            neighbours.extend(self.parent_id(node));
        }
        Frame {
            node,
            neighbours,
            next: 0,
        }
    }
}
