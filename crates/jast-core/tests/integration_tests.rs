//! End-to-end tests over fixture compilation units: build, resolve, search,
//! subtree extraction, computed fields and rendering.

mod common;

use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

use jast_core::{
    Ast, AstError, AstNodeType, AttributeValue, ComputedFieldsRegistry, DuplicateFieldPolicy,
    JavaCatalog, JavaParser, NativeNode, NodeId, NodeRef, NodesSearchFilter, RegistryConfig,
};

use common::*;

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

#[test]
fn simple_class_preorder_matches_catalog_modeling() {
    let ast = build(&simple_class());
    assert_eq!(preorder_types(&ast), SIMPLE_CLASS_PREORDER);
    assert_eq!(ast.len(), SIMPLE_CLASS_PREORDER.len());
}

#[test]
fn simple_class_ids_are_dense_preorder() {
    let ast = build(&simple_class());
    let preorder: Vec<i32> = ast.preorder().map(|node| node.id().0).collect();
    let expected: Vec<i32> = (1..=ast.len() as i32).collect();
    assert_eq!(preorder, expected);
    let ascending: Vec<i32> = ast.nodes().map(|node| node.id().0).collect();
    assert_eq!(ascending, expected);
}

#[test]
fn references_resolve_to_graph_nodes() {
    let ast = build(&simple_class());
    let class = ast.node(NodeId(2)).unwrap();
    assert_eq!(ids(&class.nodes_at("body")), [5, 14]);

    let method = ast.node(NodeId(14)).unwrap();
    assert_eq!(method.node_at("return_type").map(|n| n.id()), Some(NodeId(17)));
    assert_eq!(method.attribute("name"), Some(&AttributeValue::from("method")));

    let statement = ast.node(NodeId(28)).unwrap();
    let expression = statement.node_at("expression").unwrap();
    assert_eq!(expression.id(), NodeId(29));
    // The empty qualifier is normalized on the attribute only.
    assert_eq!(expression.attribute("qualifier"), Some(&AttributeValue::Null));
    assert_eq!(ast.node(NodeId(30)).unwrap().string(), Some(""));
}

#[test]
fn every_attribute_reference_targets_a_standard_node() {
    let ast = build(&anonymous_class());
    for node in &ast {
        for name in node.data().attribute_names() {
            let value = node.attribute(name).unwrap();
            for NodeRef(target) in value.all_node_refs() {
                let target = ast.node(target).unwrap();
                assert!(
                    !matches!(target.node_type(), AstNodeType::Collection | AstNodeType::String),
                    "attribute {name} of node {} points at a synthetic node",
                    node.id()
                );
            }
        }
    }
}

#[test]
fn static_initializer_keeps_nested_statement_list() {
    let ast = build(&static_initializer());
    let class = ast.node(NodeId(2)).unwrap();
    let body = class.attribute("body").and_then(AttributeValue::as_list).unwrap();
    assert_eq!(body.len(), 4);
    let block = body[2].as_list().unwrap();
    assert_eq!(block.len(), 2);
    assert!(block.iter().all(|item| item.as_node_ref().is_some()));

    // The statements are still plain children of the class.
    let statements = ast.find_nodes(&[AstNodeType::StatementExpression], NodesSearchFilter::All);
    assert_eq!(statements.len(), 2);
    assert!(statements.iter().all(|s| s.parent() == Some(class)));
}

#[test]
fn json_dump_builds_the_same_tree() {
    let json = serde_json::to_string(&*simple_class()).unwrap();
    let ast = Ast::from_json(&json).unwrap();
    assert_eq!(preorder_types(&ast), SIMPLE_CLASS_PREORDER);
}

#[test]
fn deep_expression_dump_builds_like_native_tree() {
    // "0" + "1" + ... + "79", left-deep as the parser nests it.
    let mut expression = literal("0");
    for i in 1..80 {
        expression = node(
            "BinaryOperation",
            vec![
                ("operator", "+".into()),
                ("operandl", expression),
                ("operandr", literal(&i.to_string())),
            ],
        )
        .into();
    }
    let root = node("ReturnStatement", vec![("expression", expression)]).at(1, 1).into_rc();

    let direct = build(&root);
    let json = serde_json::to_string(&*root).unwrap();
    let loaded = Ast::from_json(&json).unwrap();
    assert_eq!(loaded.len(), direct.len());
    assert_eq!(preorder_types(&loaded), preorder_types(&direct));
    assert_eq!(
        loaded.find_nodes(&[AstNodeType::BinaryOperation], NodesSearchFilter::All).len(),
        79
    );
}

struct FixtureParser;

impl JavaParser for FixtureParser {
    fn parse(&self, source: &str) -> Result<Rc<NativeNode>, String> {
        if source.contains("class SimpleClass") {
            Ok(simple_class())
        } else {
            Err(format!("cannot parse {} bytes", source.len()))
        }
    }
}

#[test]
fn build_reads_and_parses_source_file() {
    let dir = std::env::temp_dir();
    let good = dir.join(format!("jast-simple-{}.java", std::process::id()));
    let bad = dir.join(format!("jast-broken-{}.java", std::process::id()));
    std::fs::write(&good, "class SimpleClass { private int x = 0; }").unwrap();
    std::fs::write(&bad, "class {").unwrap();

    let ast = Ast::build(&good, &FixtureParser).unwrap();
    assert_eq!(ast.len(), SIMPLE_CLASS_PREORDER.len());

    let err = Ast::build(&bad, &FixtureParser).unwrap_err();
    assert!(matches!(err, AstError::Parse { ref reason, .. } if reason.contains("7 bytes")));

    std::fs::remove_file(good).unwrap();
    std::fs::remove_file(bad).unwrap();
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn anonymous_class_method_search() {
    let ast = build(&anonymous_class());
    let methods = [AstNodeType::MethodDeclaration];

    let all = ast.find_nodes(&methods, NodesSearchFilter::All);
    assert_eq!(names(&all), ["method", "overriddenMethod1", "overriddenMethod2"]);

    let top = ast.find_nodes(&methods, NodesSearchFilter::TopLevel);
    assert_eq!(names(&top), ["method"]);

    let bottom = ast.find_nodes(&methods, NodesSearchFilter::BottomLevel);
    assert_eq!(names(&bottom), ["overriddenMethod1", "overriddenMethod2"]);
}

#[test]
fn nested_generic_types_search() {
    let ast = build(&nested_generic_field());
    let types = [AstNodeType::ReferenceType];
    assert_eq!(ids(&ast.find_nodes(&types, NodesSearchFilter::All)), [8, 11, 14, 17]);
    assert_eq!(ids(&ast.find_nodes(&types, NodesSearchFilter::TopLevel)), [8]);
    assert_eq!(ids(&ast.find_nodes(&types, NodesSearchFilter::BottomLevel)), [11, 17]);
}

#[test]
fn empty_type_set_matches_everything() {
    let ast = build(&simple_class());
    assert_eq!(ast.find_nodes(&[], NodesSearchFilter::All).len(), ast.len());
    assert_eq!(ids(&ast.find_nodes(&[], NodesSearchFilter::TopLevel)), [1]);

    // Every leaf is a bottom-level match.
    let bottom = ast.find_nodes(&[], NodesSearchFilter::BottomLevel);
    assert!(!bottom.is_empty());
    assert!(bottom.iter().all(|node| node.children().is_empty()));
}

#[test]
fn search_filter_from_cli_spelling() {
    let ast = build(&anonymous_class());
    let filter: NodesSearchFilter = "bottom-level".parse().unwrap();
    assert_eq!(ast.find_nodes(&[AstNodeType::MethodDeclaration], filter).len(), 2);
    assert!("sideways".parse::<NodesSearchFilter>().is_err());
}

// ---------------------------------------------------------------------------
// Subtrees
// ---------------------------------------------------------------------------

#[test]
fn basic_type_subtrees_of_simple_class() {
    let ast = build(&simple_class());
    let subtrees = ast.get_subtrees(&[AstNodeType::BasicType]);
    let partition: Vec<Vec<i32>> = subtrees
        .iter()
        .map(|subtree| subtree.preorder().map(|node| node.id().0).collect())
        .collect();
    assert_eq!(partition, vec![vec![8, 9], vec![17, 18]]);
}

#[test]
fn nested_root_type_yields_one_maximal_subtree() {
    let ast = build(&nested_generic_field());
    let subtrees = ast.get_subtrees(&[AstNodeType::ReferenceType]);
    assert_eq!(subtrees.len(), 1);

    let outer: HashSet<NodeId> = subtrees[0].nodes().map(|node| node.id()).collect();
    assert_eq!(outer.len(), 11);
    assert_eq!(subtrees[0].root_id(), NodeId(8));

    // A per-match split would have started a separate subtree at List<Integer>.
    let inner: HashSet<NodeId> = ast
        .get_subtree(NodeId(14))
        .unwrap()
        .nodes()
        .map(|node| node.id())
        .collect();
    assert!(outer.is_superset(&inner));
    assert!(outer.len() > inner.len());
}

#[test]
fn subtree_is_an_independent_ast() {
    let ast = build(&simple_class());
    let mut method = ast.get_subtree(NodeId(14)).unwrap();
    assert_eq!(method.root().node_type(), AstNodeType::MethodDeclaration);
    assert_eq!(method.len(), 18);
    assert!(method.root().parent().is_none());
    assert_eq!(method.create_fake_node(), NodeId(-1));
    assert_eq!(ast.len(), SIMPLE_CLASS_PREORDER.len());

    // Ids are kept; nodes outside the method are gone.
    let statement = method.node(NodeId(20)).unwrap();
    assert_eq!(statement.node_type(), AstNodeType::StatementExpression);
    assert!(method.node(NodeId(2)).is_none());
    assert_eq!(ids(&method.root().nodes_at("body")), [20, 28]);
}

// ---------------------------------------------------------------------------
// Fake nodes
// ---------------------------------------------------------------------------

#[test]
fn fake_nodes_are_negative_and_per_graph() {
    let mut first = build(&simple_class());
    let mut second = build(&simple_class());
    let fakes: Vec<NodeId> = (0..3).map(|_| first.create_fake_node()).collect();
    assert_eq!(fakes, [NodeId(-1), NodeId(-2), NodeId(-3)]);
    assert_eq!(second.create_fake_node(), NodeId(-1));
    assert_eq!(first.len(), SIMPLE_CLASS_PREORDER.len());
    assert!(first.node(NodeId(-1)).is_none());
}

// ---------------------------------------------------------------------------
// Computed fields
// ---------------------------------------------------------------------------

#[test]
fn class_members_are_computed_from_body() {
    let ast = build(&simple_class());
    let class = ast.node(NodeId(2)).unwrap();
    assert_eq!(ids(&class.nodes_at("methods")), [14]);
    assert_eq!(ids(&class.nodes_at("fields")), [5]);
    assert_eq!(class.get("constructors"), Some(AttributeValue::List(vec![])));

    let field = ast.node(NodeId(5)).unwrap();
    assert_eq!(
        field.get("names"),
        Some(AttributeValue::List(vec![AttributeValue::from("x")]))
    );
    // Not registered for methods.
    assert_eq!(ast.node(NodeId(14)).unwrap().get("names"), None);
}

#[test]
fn enum_members_are_computed_from_declarations() {
    let ast = build(&enum_with_members());
    let color = ast.root().nodes_at("types")[0];
    assert_eq!(color.node_type(), AstNodeType::EnumDeclaration);
    let fields = color.nodes_at("fields");
    assert_eq!(fields.len(), 1);
    assert_eq!(
        fields[0].get("names"),
        Some(AttributeValue::List(vec![AttributeValue::from("code")]))
    );
    let methods = color.nodes_at("methods");
    assert_eq!(names(&methods), ["code"]);
    assert_eq!(methods[0].node_type(), AstNodeType::MethodDeclaration);
}

#[test]
fn static_initializer_statements_are_not_members() {
    let ast = build(&static_initializer());
    let class = ast.node(NodeId(2)).unwrap();
    assert_eq!(names(&class.nodes_at("methods")), ["run"]);
    assert_eq!(class.nodes_at("fields").len(), 2);
}

#[test]
fn custom_registry_is_consulted() {
    let registry = ComputedFieldsRegistry::new();
    registry
        .register(
            |node| AttributeValue::Int(node.children().len() as i64),
            "arity",
            &[AstNodeType::MethodDeclaration],
        )
        .unwrap();
    let err = registry
        .register(|_| AttributeValue::Null, "arity", &[AstNodeType::MethodDeclaration])
        .unwrap_err();
    assert!(matches!(err, AstError::DuplicateField { .. }));

    let ast = Ast::build_from_native_with(&simple_class(), &JavaCatalog, Arc::new(registry)).unwrap();
    // Collection, BasicType, String(method), StatementExpression, ReturnStatement
    assert_eq!(ast.node(NodeId(14)).unwrap().get("arity"), Some(AttributeValue::Int(5)));
    // Standard fields were not registered here.
    assert_eq!(ast.node(NodeId(2)).unwrap().get("methods"), None);
}

#[test]
fn interactive_registry_overwrites_and_clears() {
    let registry = ComputedFieldsRegistry::with_config(RegistryConfig::new(DuplicateFieldPolicy::Overwrite));
    registry
        .register(|_| AttributeValue::Int(1), "answer", &[AstNodeType::ClassDeclaration])
        .unwrap();
    registry
        .register(|_| AttributeValue::Int(42), "answer", &[AstNodeType::ClassDeclaration])
        .unwrap();
    let registry = Arc::new(registry);
    let ast = Ast::build_from_native_with(&simple_class(), &JavaCatalog, Arc::clone(&registry)).unwrap();
    assert_eq!(ast.node(NodeId(2)).unwrap().get("answer"), Some(AttributeValue::Int(42)));

    registry.clear();
    assert!(registry.is_empty());
    assert!(registry.get_fields(AstNodeType::ClassDeclaration).is_empty());
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn display_renders_indented_preorder() {
    let ast = build(&simple_class());
    let printed = ast.to_string();
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines.len(), SIMPLE_CLASS_PREORDER.len());
    assert_eq!(lines[0], "CompilationUnit: node index = 1");
    assert_eq!(lines[1], "|   ClassDeclaration: node index = 2, line = 1");
    assert_eq!(lines[2], "|   |   Collection: node index = 3");
    assert_eq!(lines[3], "|   |   String: SimpleClass, node index = 4");
    assert_eq!(lines[4], "|   |   FieldDeclaration: node index = 5, line = 2");
    assert_eq!(lines[22], format!("{}String: , node index = 23", "|   ".repeat(6)));
    assert!(printed.ends_with("String: x, node index = 31\n"));
}
