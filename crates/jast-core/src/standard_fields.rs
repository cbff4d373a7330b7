//! Standard computed fields and the computator shapes they are built from.

use crate::ast_node::AstNode;
use crate::computed_fields::{computed_field, ComputedField, ComputedFieldsRegistry};
use crate::error::AstError;
use crate::node_type::AstNodeType;
use crate::value::{AttributeValue, NodeRef};

/// Nodes found by following `path` from `node`: every segment but the last
/// must hold a single reference, the last one a reference or a list of them.
fn nodes_along<'a>(node: AstNode<'a>, path: &[&str]) -> Vec<AstNode<'a>> {
    let Some((last, hops)) = path.split_last() else {
        return Vec::new();
    };
    let mut current = node;
    for hop in hops {
        match current.node_at(hop) {
            Some(next) => current = next,
            None => return Vec::new(),
        }
    }
    current.nodes_at(last)
}

/// Keeps the nodes under `path` whose type is `node_type`, as a list of
/// references.
///
/// `path` is usually a single attribute such as `["body"]`; enum members sit
/// one node deeper, under `["body", "declarations"]`.
pub fn nodes_filter(path: &'static [&'static str], node_type: AstNodeType) -> ComputedField {
    computed_field(move |node| {
        let matches = nodes_along(node, path)
            .into_iter()
            .filter(|child| child.node_type() == node_type)
            .map(|child| AttributeValue::Ref(NodeRef(child.id())))
            .collect();
        AttributeValue::List(matches)
    })
}

/// For every node referenced by `attribute`, the value of its
/// `sub_attribute` (null where the node has none).
pub fn chained_field_getter(attribute: &'static str, sub_attribute: &'static str) -> ComputedField {
    computed_field(move |node| {
        let values = node
            .nodes_at(attribute)
            .into_iter()
            .map(|item| item.get(sub_attribute).unwrap_or(AttributeValue::Null))
            .collect();
        AttributeValue::List(values)
    })
}

const TYPE_DECLARATIONS: &[AstNodeType] = &[
    AstNodeType::ClassDeclaration,
    AstNodeType::InterfaceDeclaration,
    AstNodeType::AnnotationDeclaration,
];

const VARIABLE_DECLARATIONS: &[AstNodeType] = &[
    AstNodeType::ConstantDeclaration,
    AstNodeType::FieldDeclaration,
    AstNodeType::LocalVariableDeclaration,
    AstNodeType::VariableDeclaration,
];

const ENUM_MEMBERS: &[&str] = &["body", "declarations"];

/// Registers `constructors`, `methods`, `fields` and `names`.
pub fn register_standard_computed_fields(registry: &ComputedFieldsRegistry) -> Result<(), AstError> {
    registry.register_shared(
        nodes_filter(&["body"], AstNodeType::ConstructorDeclaration),
        "constructors",
        TYPE_DECLARATIONS,
    )?;
    registry.register_shared(
        nodes_filter(&["body"], AstNodeType::MethodDeclaration),
        "methods",
        TYPE_DECLARATIONS,
    )?;
    registry.register_shared(
        nodes_filter(&["body"], AstNodeType::FieldDeclaration),
        "fields",
        TYPE_DECLARATIONS,
    )?;

    registry.register_shared(
        nodes_filter(ENUM_MEMBERS, AstNodeType::MethodDeclaration),
        "methods",
        &[AstNodeType::EnumDeclaration],
    )?;
    registry.register_shared(
        nodes_filter(ENUM_MEMBERS, AstNodeType::FieldDeclaration),
        "fields",
        &[AstNodeType::EnumDeclaration],
    )?;

    registry.register_shared(
        chained_field_getter("declarators", "name"),
        "names",
        VARIABLE_DECLARATIONS,
    )?;
    Ok(())
}
