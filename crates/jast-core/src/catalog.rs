//! Node type catalog.
//!
//! The catalog is the data contract between the native parser and the
//! builder: it names the internal [`AstNodeType`] for every native node kind
//! and the ordered list of attributes worth copying onto the graph node.
//! [`JavaCatalog`] is the table for the reference Java parser, whose node
//! classes share their names with the tags. Attribute lists follow the native
//! declaration order, inherited attributes first.

use crate::node_type::AstNodeType;

/// Maps native node kinds to node types, and node types to attribute names.
pub trait NodeTypeCatalog {
    /// Returns the node type for a native kind, or `None` if the kind is not
    /// modeled.
    fn node_type(&self, native_kind: &str) -> Option<AstNodeType>;

    /// Returns the ordered attribute names declared for a node type.
    fn attributes(&self, node_type: AstNodeType) -> &[&str];
}

/// The standard catalog for the reference Java parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaCatalog;

const TYPE_DECLARATION: &[&str] = &["modifiers", "annotations", "documentation", "name", "body"];
const CLASS_DECLARATION: &[&str] = &[
    "modifiers",
    "annotations",
    "documentation",
    "name",
    "body",
    "type_parameters",
    "extends",
    "implements",
];
const ENUM_DECLARATION: &[&str] = &[
    "modifiers",
    "annotations",
    "documentation",
    "name",
    "body",
    "implements",
];
const INTERFACE_DECLARATION: &[&str] = &[
    "modifiers",
    "annotations",
    "documentation",
    "name",
    "body",
    "type_parameters",
    "extends",
];
const PACKAGE_DECLARATION: &[&str] = &["modifiers", "annotations", "documentation", "name"];
const TYPE: &[&str] = &["name", "dimensions"];
const REFERENCE_TYPE: &[&str] = &["name", "dimensions", "arguments", "sub_type"];
const METHOD_DECLARATION: &[&str] = &[
    "documentation",
    "modifiers",
    "annotations",
    "type_parameters",
    "return_type",
    "name",
    "parameters",
    "throws",
    "body",
];
const FIELD_DECLARATION: &[&str] = &["documentation", "modifiers", "annotations", "type", "declarators"];
const CONSTRUCTOR_DECLARATION: &[&str] = &[
    "modifiers",
    "annotations",
    "documentation",
    "type_parameters",
    "name",
    "parameters",
    "throws",
    "body",
];
const VARIABLE_DECLARATION: &[&str] = &["modifiers", "annotations", "type", "declarators"];
const PRIMARY: &[&str] = &["prefix_operators", "postfix_operators", "qualifier", "selectors"];
const LITERAL: &[&str] = &["prefix_operators", "postfix_operators", "qualifier", "selectors", "value"];
const MEMBER: &[&str] = &["prefix_operators", "postfix_operators", "qualifier", "selectors", "member"];
const INVOCATION: &[&str] = &[
    "prefix_operators",
    "postfix_operators",
    "qualifier",
    "selectors",
    "type_arguments",
    "arguments",
];
const METHOD_INVOCATION: &[&str] = &[
    "prefix_operators",
    "postfix_operators",
    "qualifier",
    "selectors",
    "type_arguments",
    "arguments",
    "member",
];
const CLASS_REFERENCE: &[&str] = &["prefix_operators", "postfix_operators", "qualifier", "selectors", "type"];
const ARRAY_CREATOR: &[&str] = &[
    "prefix_operators",
    "postfix_operators",
    "qualifier",
    "selectors",
    "type",
    "dimensions",
    "initializer",
];
const CLASS_CREATOR: &[&str] = &[
    "prefix_operators",
    "postfix_operators",
    "qualifier",
    "selectors",
    "type",
    "constructor_type_arguments",
    "arguments",
    "body",
];

impl NodeTypeCatalog for JavaCatalog {
    fn node_type(&self, native_kind: &str) -> Option<AstNodeType> {
        native_kind
            .parse::<AstNodeType>()
            .ok()
            .filter(|ty| !ty.is_synthetic())
    }

    fn attributes(&self, node_type: AstNodeType) -> &[&str] {
        use AstNodeType::*;

        match node_type {
            CompilationUnit => &["package", "imports", "types"],
            Import => &["path", "static", "wildcard"],
            PackageDeclaration => PACKAGE_DECLARATION,
            ClassDeclaration => CLASS_DECLARATION,
            EnumDeclaration => ENUM_DECLARATION,
            InterfaceDeclaration => INTERFACE_DECLARATION,
            AnnotationDeclaration => TYPE_DECLARATION,
            BasicType => TYPE,
            ReferenceType => REFERENCE_TYPE,
            TypeArgument => &["type", "pattern_type"],
            TypeParameter => &["name", "extends"],
            Annotation => &["name", "element"],
            ElementValuePair => &["name", "value"],
            ElementArrayValue => &["values"],
            MethodDeclaration => METHOD_DECLARATION,
            FieldDeclaration | ConstantDeclaration => FIELD_DECLARATION,
            ConstructorDeclaration => CONSTRUCTOR_DECLARATION,
            ArrayInitializer => &["initializers"],
            VariableDeclaration | LocalVariableDeclaration => VARIABLE_DECLARATION,
            VariableDeclarator => &["name", "dimensions", "initializer"],
            FormalParameter => &["modifiers", "annotations", "type", "name", "varargs"],
            InferredFormalParameter => &["name"],
            Statement => &["label"],
            IfStatement => &["label", "condition", "then_statement", "else_statement"],
            WhileStatement | DoStatement => &["label", "condition", "body"],
            ForStatement => &["label", "control", "body"],
            AssertStatement => &["label", "condition", "value"],
            BreakStatement | ContinueStatement => &["label", "goto"],
            ReturnStatement | ThrowStatement => &["label", "expression"],
            SynchronizedStatement => &["label", "lock", "block"],
            BlockStatement => &["label", "statements"],
            TryStatement => &["label", "resources", "block", "catches", "finally_block"],
            SwitchStatement => &["label", "expression", "cases"],
            StatementExpression => &["label", "expression"],
            TryResource => &["modifiers", "annotations", "type", "name", "value"],
            CatchClause => &["label", "parameter", "block"],
            CatchClauseParameter => &["modifiers", "annotations", "types", "name"],
            SwitchStatementCase => &["case", "statements"],
            ForControl => &["init", "condition", "update"],
            EnhancedForControl => &["var", "iterable"],
            Assignment => &["expressionl", "value", "type"],
            TernaryExpression => &["condition", "if_true", "if_false"],
            BinaryOperation => &["operator", "operandl", "operandr"],
            Cast => &["type", "expression"],
            MethodReference => &["expression", "method", "type_arguments"],
            LambdaExpression => &["parameters", "body"],
            Literal => LITERAL,
            This => PRIMARY,
            MemberReference | SuperMemberReference => MEMBER,
            MethodInvocation | SuperMethodInvocation => METHOD_INVOCATION,
            ExplicitConstructorInvocation | SuperConstructorInvocation => INVOCATION,
            ArraySelector => &["index"],
            ClassReference | VoidClassReference => CLASS_REFERENCE,
            ArrayCreator => ARRAY_CREATOR,
            ClassCreator | InnerClassCreator => CLASS_CREATOR,
            EnumBody => &["constants", "declarations"],
            EnumConstantDeclaration => &[
                "modifiers",
                "annotations",
                "documentation",
                "name",
                "arguments",
                "body",
            ],
            AnnotationMethod => &[
                "modifiers",
                "annotations",
                "name",
                "return_type",
                "dimensions",
                "default",
            ],
            Collection | String => &[],
        }
    }
}
