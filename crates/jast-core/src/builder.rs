//! Graph builder: walks a native parse tree and materializes it as a graph.
//!
//! Every value found in a child slot is classified into one of three shapes:
//! a native node, a native string set or a string. Each becomes one graph
//! node. Anything else (absent markers, scalars) is dropped without leaving
//! an edge behind. Lists in child slots are flattened, one level at a time.
//!
//! Node ids are assigned in construction order starting at 1: a node gets
//! its id before its children are visited, so ids follow a preorder walk and
//! the children of a node are ordered by ascending id.
//!
//! Attribute values are first copied as native values. Once the whole tree
//! is in the graph, the [`resolver`](crate::resolver) swaps every native node
//! found in an attribute for a [`NodeRef`](crate::value::NodeRef).

use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use petgraph::stable_graph::StableGraph;
use petgraph::Directed;

use crate::catalog::NodeTypeCatalog;
use crate::error::AstError;
use crate::id::NodeId;
use crate::native::{NativeNode, NativeSet, NativeValue};
use crate::node::NodeData;
use crate::node_type::AstNodeType;
use crate::resolver::Resolver;

/// The finished graph type: node payloads are shared so that subtree views
/// reuse attribute data instead of copying it.
pub type AstGraph = StableGraph<Rc<NodeData>, (), Directed, u32>;

/// Graph under construction, attributes still holding native values.
pub(crate) type PendingGraph = StableGraph<PendingNode, (), Directed, u32>;

/// Native node identity (pointer of its shared handle) to graph id.
pub(crate) type IdentityMap = HashMap<*const NativeNode, NodeId>;

#[derive(Debug)]
pub(crate) enum PendingNode {
    Standard {
        node_type: AstNodeType,
        line: Option<u32>,
        attributes: IndexMap<String, NativeValue>,
    },
    Collection,
    String(String),
}

/// The three shapes a child value can take, plus the values that are dropped.
enum Classified<'n> {
    Standard(&'n Rc<NativeNode>),
    Collection(&'n NativeSet),
    String(&'n str),
    Dropped,
}

fn classify(value: &NativeValue) -> Classified<'_> {
    match value {
        NativeValue::Node(node) => Classified::Standard(node),
        NativeValue::Set(set) => Classified::Collection(set),
        NativeValue::Str(s) => Classified::String(s),
        NativeValue::Null | NativeValue::Bool(_) | NativeValue::Int(_) | NativeValue::List(_) => {
            Classified::Dropped
        }
    }
}

/// Builds an [`AstGraph`] from a native parse tree.
pub struct AstBuilder<'c> {
    catalog: &'c dyn NodeTypeCatalog,
    graph: PendingGraph,
    identity: IdentityMap,
}

impl<'c> AstBuilder<'c> {
    pub fn new(catalog: &'c dyn NodeTypeCatalog) -> Self {
        AstBuilder {
            catalog,
            graph: PendingGraph::default(),
            identity: HashMap::new(),
        }
    }

    /// Builds and resolves the graph for the tree rooted at `root`.
    ///
    /// Returns the graph together with the id of the root node.
    pub fn build(mut self, root: &Rc<NativeNode>) -> Result<(AstGraph, NodeId), AstError> {
        let root_id = self.add_standard_node(root)?;
        let graph = Resolver::new(&self.identity).resolve(self.graph)?;

        tracing::debug!(
            nodes = graph.node_count(),
            root = %root_id,
            "built AST graph"
        );
        Ok((graph, root_id))
    }

    fn add_subtree(&mut self, value: &NativeValue) -> Result<Option<NodeId>, AstError> {
        let id = match classify(value) {
            Classified::Standard(node) => self.add_standard_node(node)?,
            Classified::Collection(set) => self.add_collection_node(set)?,
            Classified::String(s) => self.add_string_node(s),
            Classified::Dropped => return Ok(None),
        };
        Ok(Some(id))
    }

    fn add_children(&mut self, children: &[&NativeValue], parent: NodeId) -> Result<(), AstError> {
        for &child in children {
            if let NativeValue::List(items) = child {
                let nested: Vec<&NativeValue> = items.iter().collect();
                self.add_children(&nested, parent)?;
            } else if let Some(child_id) = self.add_subtree(child)? {
                self.add_edge(parent, child_id);
            }
        }
        Ok(())
    }

    fn add_standard_node(&mut self, native: &Rc<NativeNode>) -> Result<NodeId, AstError> {
        let node_type = self
            .catalog
            .node_type(&native.kind)
            .ok_or_else(|| AstError::UnknownNodeKind {
                kind: native.kind.clone(),
            })?;

        let mut attributes = IndexMap::new();
        for &name in self.catalog.attributes(node_type) {
            let value = native
                .attribute(name)
                .cloned()
                .ok_or_else(|| AstError::MissingAttribute {
                    node_type,
                    attribute: name.to_string(),
                })?;
            attributes.insert(name.to_string(), value);
        }
        normalize_attributes(node_type, &mut attributes);

        let id = self.insert(PendingNode::Standard {
            node_type,
            line: native.position.map(|position| position.line),
            attributes,
        });
        self.identity.insert(Rc::as_ptr(native), id);

        self.add_children(&native.children(), id)?;
        Ok(id)
    }

    fn add_collection_node(&mut self, set: &NativeSet) -> Result<NodeId, AstError> {
        let id = self.insert(PendingNode::Collection);
        for member in &set.set {
            match member {
                NativeValue::Str(s) => {
                    let string_id = self.add_string_node(s);
                    self.add_edge(id, string_id);
                }
                NativeValue::Null => {}
                other => {
                    return Err(AstError::MalformedCollection {
                        found: other.type_name(),
                    })
                }
            }
        }
        Ok(id)
    }

    fn add_string_node(&mut self, value: &str) -> NodeId {
        self.insert(PendingNode::String(value.to_string()))
    }

    fn insert(&mut self, node: PendingNode) -> NodeId {
        NodeId::from(self.graph.add_node(node))
    }

    fn add_edge(&mut self, parent: NodeId, child: NodeId) {
        if let (Some(parent), Some(child)) = (parent.index(), child.index()) {
            self.graph.add_edge(parent, child, ());
        }
    }
}

/// Rewrites attribute encodings that would otherwise force consumers to
/// special-case equivalent shapes.
fn normalize_attributes(node_type: AstNodeType, attributes: &mut IndexMap<String, NativeValue>) {
    match node_type {
        // An abstract method has no body; expose it as an empty statement list.
        AstNodeType::MethodDeclaration => {
            if let Some(body) = attributes.get_mut("body") {
                if body.is_null() {
                    *body = NativeValue::List(Vec::new());
                }
            }
        }
        // `x -> x + 1`: the inlined expression becomes a one-element body.
        AstNodeType::LambdaExpression => {
            if let Some(body) = attributes.get_mut("body") {
                if matches!(body, NativeValue::Node(_)) {
                    let expression = std::mem::replace(body, NativeValue::Null);
                    *body = NativeValue::List(vec![expression]);
                }
            }
        }
        AstNodeType::MethodInvocation | AstNodeType::MemberReference => {
            if let Some(qualifier) = attributes.get_mut("qualifier") {
                if matches!(qualifier, NativeValue::Str(s) if s.is_empty()) {
                    *qualifier = NativeValue::Null;
                }
            }
        }
        _ => {}
    }
}
