//! Core error types for jast-core.
//!
//! Uses `thiserror` for structured, matchable error variants. Every variant
//! signals a contract violation between this crate and either its input
//! (native parser, catalog) or its caller; none is recovered internally.

use std::path::PathBuf;

use thiserror::Error;

use crate::node_type::AstNodeType;

/// Errors produced by building, resolving and querying an AST.
#[derive(Debug, Error)]
pub enum AstError {
    /// A native set held something other than a string or null.
    #[error("unexpected native value of type '{found}' inside a collection node")]
    MalformedCollection { found: &'static str },

    /// The catalog has no node type for a native node kind.
    #[error("unknown native node kind: '{kind}'")]
    UnknownNodeKind { kind: String },

    /// A catalog-declared attribute is missing on the native node.
    #[error("native {node_type} node has no attribute '{attribute}'")]
    MissingAttribute {
        node_type: AstNodeType,
        attribute: String,
    },

    /// An attribute points at a native node that was never inserted into
    /// the graph.
    #[error("attribute '{attribute}' of node {node} references a native {kind} node absent from the graph")]
    UnresolvedReference {
        node: i32,
        attribute: String,
        kind: String,
    },

    /// An attribute holds a value shape the resolver does not model.
    #[error("cannot resolve attribute '{attribute}' of node {node}: unexpected value of type '{found}'")]
    UnsupportedAttribute {
        node: i32,
        attribute: String,
        found: &'static str,
    },

    /// A search filter name is not one of `all`, `top-level`, `bottom-level`.
    #[error("unsupported search filter: '{0}'")]
    UnsupportedSearchFilter(String),

    /// A computed field is already registered under this name and type.
    #[error("registry already has computed field named '{name}' for node type {node_type}")]
    DuplicateField { name: String, node_type: AstNodeType },

    /// Failed to read a source file.
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The native parser rejected the source.
    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// A native tree dump could not be decoded.
    #[error("invalid native tree dump: {0}")]
    Json(#[from] serde_json::Error),
}
