//! Native tree fixtures shaped like the reference Java parser's output.
//!
//! Every node carries all of its catalog attributes, in catalog order, with
//! unset ones as null, exactly as the parser would hand them over.

#![allow(dead_code)]

use std::rc::Rc;
use std::sync::Arc;

use jast_core::{
    register_standard_computed_fields, Ast, AstNode, AstNodeType, ComputedFieldsRegistry,
    JavaCatalog, NativeNode, NativeValue, NodeTypeCatalog,
};

// ---------------------------------------------------------------------------
// Node helpers
// ---------------------------------------------------------------------------

/// A native node of `kind` with every catalog attribute present.
pub fn node(kind: &str, attrs: Vec<(&str, NativeValue)>) -> NativeNode {
    let node_type = JavaCatalog
        .node_type(kind)
        .unwrap_or_else(|| panic!("no catalog entry for {kind}"));
    let mut native = NativeNode::new(kind);
    for &name in JavaCatalog.attributes(node_type) {
        let value = attrs
            .iter()
            .find(|(attr, _)| *attr == name)
            .map(|(_, value)| value.clone())
            .unwrap_or(NativeValue::Null);
        native = native.attr(name, value);
    }
    native
}

pub fn list(items: Vec<NativeValue>) -> NativeValue {
    NativeValue::List(items)
}

pub fn modifiers(names: &[&str]) -> NativeValue {
    NativeValue::set(names.iter().copied())
}

pub fn basic_type(name: &str) -> NativeValue {
    node("BasicType", vec![("name", name.into()), ("dimensions", list(vec![]))]).into()
}

pub fn reference_type(name: &str, arguments: Vec<NativeValue>) -> NativeValue {
    let arguments = if arguments.is_empty() {
        NativeValue::Null
    } else {
        list(arguments)
    };
    node(
        "ReferenceType",
        vec![
            ("name", name.into()),
            ("dimensions", list(vec![])),
            ("arguments", arguments),
        ],
    )
    .into()
}

pub fn type_argument(ty: NativeValue) -> NativeValue {
    node("TypeArgument", vec![("type", ty)]).into()
}

pub fn literal(value: &str) -> NativeValue {
    node("Literal", vec![("value", value.into())]).into()
}

pub fn member_reference(qualifier: &str, member: &str) -> NativeValue {
    node(
        "MemberReference",
        vec![("qualifier", qualifier.into()), ("member", member.into())],
    )
    .into()
}

/// `<member> = <value>;`
pub fn assignment_statement(line: u32, member: &str, value: &str) -> NativeValue {
    let assignment = node(
        "Assignment",
        vec![
            ("expressionl", member_reference("", member)),
            ("value", literal(value)),
            ("type", "=".into()),
        ],
    );
    node("StatementExpression", vec![("expression", assignment.into())])
        .at(line, 9)
        .into()
}

pub fn return_statement(line: u32, expression: NativeValue) -> NativeValue {
    node("ReturnStatement", vec![("expression", expression)])
        .at(line, 9)
        .into()
}

pub fn declarator(name: &str, initializer: NativeValue) -> NativeValue {
    node(
        "VariableDeclarator",
        vec![
            ("name", name.into()),
            ("dimensions", list(vec![])),
            ("initializer", initializer),
        ],
    )
    .into()
}

pub fn field(line: u32, mods: &[&str], ty: NativeValue, declarators: Vec<NativeValue>) -> NativeValue {
    node(
        "FieldDeclaration",
        vec![
            ("modifiers", modifiers(mods)),
            ("annotations", list(vec![])),
            ("type", ty),
            ("declarators", list(declarators)),
        ],
    )
    .at(line, 5)
    .into()
}

pub fn method(line: u32, mods: &[&str], return_type: NativeValue, name: &str, body: NativeValue) -> NativeValue {
    node(
        "MethodDeclaration",
        vec![
            ("modifiers", modifiers(mods)),
            ("annotations", list(vec![])),
            ("return_type", return_type),
            ("name", name.into()),
            ("parameters", list(vec![])),
            ("body", body),
        ],
    )
    .at(line, 5)
    .into()
}

pub fn class(line: u32, mods: &[&str], name: &str, body: NativeValue) -> NativeValue {
    node(
        "ClassDeclaration",
        vec![
            ("modifiers", modifiers(mods)),
            ("annotations", list(vec![])),
            ("name", name.into()),
            ("body", body),
        ],
    )
    .at(line, 1)
    .into()
}

pub fn compilation_unit(types: Vec<NativeValue>) -> Rc<NativeNode> {
    node(
        "CompilationUnit",
        vec![("imports", list(vec![])), ("types", list(types))],
    )
    .into_rc()
}

// ---------------------------------------------------------------------------
// Java sources
// ---------------------------------------------------------------------------

/// ```java
/// class SimpleClass {
///     private int x = 0;
///     public int method() {
///         x = 1;
///         return x;
///     }
/// }
/// ```
pub fn simple_class() -> Rc<NativeNode> {
    let x = field(2, &["private"], basic_type("int"), vec![declarator("x", literal("0"))]);
    let body = list(vec![
        assignment_statement(4, "x", "1"),
        return_statement(5, member_reference("", "x")),
    ]);
    let method = method(3, &["public"], basic_type("int"), "method", body);
    compilation_unit(vec![class(1, &[], "SimpleClass", list(vec![x, method]))])
}

/// Preorder node types of [`simple_class`].
pub const SIMPLE_CLASS_PREORDER: &[AstNodeType] = {
    use AstNodeType::*;
    &[
        CompilationUnit,
        ClassDeclaration,
        Collection,
        String,
        FieldDeclaration,
        Collection,
        String,
        BasicType,
        String,
        VariableDeclarator,
        String,
        Literal,
        String,
        MethodDeclaration,
        Collection,
        String,
        BasicType,
        String,
        String,
        StatementExpression,
        Assignment,
        MemberReference,
        String,
        String,
        Literal,
        String,
        String,
        ReturnStatement,
        MemberReference,
        String,
        String,
    ]
};

/// ```java
/// class AnonymousClass {
///     public void method() {
///         Runnable r = new Runnable() {
///             public void overriddenMethod1() {}
///             public void overriddenMethod2() {}
///         };
///     }
/// }
/// ```
pub fn anonymous_class() -> Rc<NativeNode> {
    let creator = node(
        "ClassCreator",
        vec![
            ("type", reference_type("Runnable", vec![])),
            ("arguments", list(vec![])),
            (
                "body",
                list(vec![
                    method(4, &["public"], NativeValue::Null, "overriddenMethod1", list(vec![])),
                    method(5, &["public"], NativeValue::Null, "overriddenMethod2", list(vec![])),
                ]),
            ),
        ],
    );
    let local = node(
        "LocalVariableDeclaration",
        vec![
            ("modifiers", modifiers(&[])),
            ("annotations", list(vec![])),
            ("type", reference_type("Runnable", vec![])),
            ("declarators", list(vec![declarator("r", creator.into())])),
        ],
    )
    .at(3, 9);
    let method = method(2, &["public"], NativeValue::Null, "method", list(vec![local.into()]));
    compilation_unit(vec![class(1, &[], "AnonymousClass", list(vec![method]))])
}

/// ```java
/// class StaticConstructor {
///     static int a;
///     static int b;
///     static {
///         a = 1;
///         b = 2;
///     }
///     void run() {}
/// }
/// ```
///
/// The parser reports the initializer block as a nested statement list
/// inside the class body.
pub fn static_initializer() -> Rc<NativeNode> {
    let body = list(vec![
        field(2, &["static"], basic_type("int"), vec![declarator("a", NativeValue::Null)]),
        field(3, &["static"], basic_type("int"), vec![declarator("b", NativeValue::Null)]),
        list(vec![assignment_statement(5, "a", "1"), assignment_statement(6, "b", "2")]),
        method(8, &[], NativeValue::Null, "run", list(vec![])),
    ]);
    compilation_unit(vec![class(1, &[], "StaticConstructor", body)])
}

/// ```java
/// class Generic {
///     private Map<String, List<Integer>> m;
/// }
/// ```
pub fn nested_generic_field() -> Rc<NativeNode> {
    let list_of_integers = reference_type(
        "List",
        vec![type_argument(reference_type("Integer", vec![]))],
    );
    let map = reference_type(
        "Map",
        vec![
            type_argument(reference_type("String", vec![])),
            type_argument(list_of_integers),
        ],
    );
    let m = field(2, &["private"], map, vec![declarator("m", NativeValue::Null)]);
    compilation_unit(vec![class(1, &[], "Generic", list(vec![m]))])
}

/// ```java
/// enum Color {
///     RED;
///     private int code;
///     int code() { return code; }
/// }
/// ```
pub fn enum_with_members() -> Rc<NativeNode> {
    let red = node(
        "EnumConstantDeclaration",
        vec![("modifiers", modifiers(&[])), ("name", "RED".into())],
    );
    let code = field(3, &["private"], basic_type("int"), vec![declarator("code", NativeValue::Null)]);
    let getter = method(
        4,
        &[],
        basic_type("int"),
        "code",
        list(vec![return_statement(4, member_reference("", "code"))]),
    );
    let enum_body = node(
        "EnumBody",
        vec![
            ("constants", list(vec![red.into()])),
            ("declarations", list(vec![code, getter])),
        ],
    );
    let color = node(
        "EnumDeclaration",
        vec![
            ("modifiers", modifiers(&[])),
            ("annotations", list(vec![])),
            ("name", "Color".into()),
            ("body", enum_body.into()),
        ],
    )
    .at(1, 1);
    compilation_unit(vec![color.into()])
}

// ---------------------------------------------------------------------------
// AST helpers
// ---------------------------------------------------------------------------

/// A registry private to one test, holding the standard fields.
pub fn standard_registry() -> Arc<ComputedFieldsRegistry> {
    let registry = ComputedFieldsRegistry::new();
    register_standard_computed_fields(&registry).expect("standard fields register once");
    Arc::new(registry)
}

pub fn build(root: &Rc<NativeNode>) -> Ast {
    Ast::build_from_native_with(root, &JavaCatalog, standard_registry()).expect("fixture builds")
}

pub fn preorder_types(ast: &Ast) -> Vec<AstNodeType> {
    ast.preorder().map(|node| node.node_type()).collect()
}

pub fn ids(nodes: &[AstNode<'_>]) -> Vec<i32> {
    nodes.iter().map(|node| node.id().0).collect()
}

/// The `name` attribute of each node.
pub fn names(nodes: &[AstNode<'_>]) -> Vec<String> {
    nodes
        .iter()
        .filter_map(|node| node.attribute("name").and_then(|v| v.as_str()).map(str::to_string))
        .collect()
}
