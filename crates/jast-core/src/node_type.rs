//! Node type tags.
//!
//! [`AstNodeType`] classifies every graph node. Standard nodes carry the tag
//! of the native parser class they mirror; the two synthetic tags
//! [`AstNodeType::Collection`] and [`AstNodeType::String`] mark the nodes the
//! builder creates for native string sets and plain strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! ast_node_types {
    ($($variant:ident),+ $(,)?) => {
        /// Internal node type tag.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum AstNodeType {
            $($variant,)+
        }

        impl AstNodeType {
            /// Every tag, in declaration order.
            pub const ALL: &'static [AstNodeType] = &[$(AstNodeType::$variant,)+];

            /// The CamelCase spelling of this tag.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(AstNodeType::$variant => stringify!($variant),)+
                }
            }
        }

        impl FromStr for AstNodeType {
            type Err = UnknownNodeType;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok(AstNodeType::$variant),)+
                    _ => Err(UnknownNodeType(s.to_string())),
                }
            }
        }
    };
}

ast_node_types! {
    CompilationUnit,
    Import,
    PackageDeclaration,
    ClassDeclaration,
    EnumDeclaration,
    InterfaceDeclaration,
    AnnotationDeclaration,
    BasicType,
    ReferenceType,
    TypeArgument,
    TypeParameter,
    Annotation,
    ElementValuePair,
    ElementArrayValue,
    MethodDeclaration,
    FieldDeclaration,
    ConstructorDeclaration,
    ConstantDeclaration,
    ArrayInitializer,
    VariableDeclaration,
    LocalVariableDeclaration,
    VariableDeclarator,
    FormalParameter,
    InferredFormalParameter,
    Statement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    AssertStatement,
    BreakStatement,
    ContinueStatement,
    ReturnStatement,
    SynchronizedStatement,
    ThrowStatement,
    BlockStatement,
    TryStatement,
    SwitchStatement,
    StatementExpression,
    TryResource,
    CatchClause,
    CatchClauseParameter,
    SwitchStatementCase,
    ForControl,
    EnhancedForControl,
    Assignment,
    TernaryExpression,
    BinaryOperation,
    Cast,
    MethodReference,
    LambdaExpression,
    Literal,
    This,
    MemberReference,
    MethodInvocation,
    ExplicitConstructorInvocation,
    SuperConstructorInvocation,
    SuperMethodInvocation,
    SuperMemberReference,
    ArraySelector,
    ClassReference,
    VoidClassReference,
    ArrayCreator,
    ClassCreator,
    InnerClassCreator,
    EnumBody,
    EnumConstantDeclaration,
    AnnotationMethod,
    Collection,
    String,
}

impl AstNodeType {
    /// Returns `true` for the two tags the builder synthesizes itself.
    pub fn is_synthetic(self) -> bool {
        matches!(self, AstNodeType::Collection | AstNodeType::String)
    }
}

impl fmt::Display for AstNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no [`AstNodeType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node type: '{0}'")]
pub struct UnknownNodeType(pub String);
