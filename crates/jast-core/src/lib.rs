pub mod id;
pub mod error;
pub mod node_type;
pub mod native;
pub mod catalog;
pub mod value;
pub mod node;
pub mod builder;
mod resolver;
pub mod ast;
pub mod ast_node;
pub mod traversal;
pub mod search;
pub mod subtrees;
pub mod config;
pub mod computed_fields;
pub mod standard_fields;

// Re-export commonly used types
pub use ast::{Ast, ChildIds, Preorder};
pub use ast_node::AstNode;
pub use builder::{AstBuilder, AstGraph};
pub use catalog::{JavaCatalog, NodeTypeCatalog};
pub use computed_fields::{computed_field, ComputedField, ComputedFieldsRegistry};
pub use config::{DuplicateFieldPolicy, RegistryConfig};
pub use error::AstError;
pub use id::NodeId;
pub use native::{JavaParser, NativeNode, NativeSet, NativeValue, Position};
pub use node::{NodeData, StandardNode};
pub use node_type::{AstNodeType, UnknownNodeType};
pub use search::NodesSearchFilter;
pub use standard_fields::{chained_field_getter, nodes_filter, register_standard_computed_fields};
pub use traversal::{TraversalEvent, TraverseOptions};
pub use value::{AttributeValue, NodeRef};
