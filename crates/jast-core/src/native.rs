//! The native parse tree consumed by the builder.
//!
//! A native tree is what an external Java parser hands over: nodes with a
//! kind, an optional source position, and named attributes whose values are
//! other nodes, strings, string sets, scalars, absent markers, or lists of
//! those nested to any depth. Native node identity is the identity of the
//! shared [`Rc`] handle; two structurally equal nodes are still distinct.
//!
//! Trees can be assembled in code with the fluent API or loaded from a JSON
//! dump. In JSON a set is written `{"set": [...]}` and a node is an object
//! with a `kind` field.

use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Source position of a native node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// One node of the native parse tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeNode {
    /// Native class name, e.g. `MethodDeclaration`.
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Attributes in declaration order.
    #[serde(default)]
    pub attributes: IndexMap<String, NativeValue>,
    /// Explicit child enumeration. When absent the children are the
    /// attribute values in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NativeValue>>,
}

/// A value a native attribute or child slot can hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NativeValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<NativeValue>),
    Set(NativeSet),
    Node(Rc<NativeNode>),
}

/// A native unordered set. Expected to hold only strings or nulls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NativeSet {
    pub set: Vec<NativeValue>,
}

impl NativeNode {
    pub fn new(kind: impl Into<String>) -> Self {
        NativeNode {
            kind: kind.into(),
            position: None,
            attributes: IndexMap::new(),
            children: None,
        }
    }

    /// Sets the source position.
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.position = Some(Position { line, column });
        self
    }

    /// Appends an attribute, replacing any earlier value under that name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<NativeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Overrides the default child enumeration.
    pub fn with_children(mut self, children: Vec<NativeValue>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn into_rc(self) -> Rc<NativeNode> {
        Rc::new(self)
    }

    pub fn attribute(&self, name: &str) -> Option<&NativeValue> {
        self.attributes.get(name)
    }

    /// Returns the child slots of this node, in order.
    pub fn children(&self) -> Vec<&NativeValue> {
        match &self.children {
            Some(children) => children.iter().collect(),
            None => self.attributes.values().collect(),
        }
    }

    /// Loads a native tree from its JSON dump.
    ///
    /// Each native level nests about three JSON levels, so the dump is read
    /// without serde_json's recursion limit; the stack grows on demand.
    pub fn from_json(json: &str) -> Result<Rc<NativeNode>, serde_json::Error> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let node = Rc::<NativeNode>::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
        deserializer.end()?;
        Ok(node)
    }
}

impl NativeValue {
    /// Builds a set of strings.
    pub fn set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NativeValue::Set(NativeSet {
            set: items.into_iter().map(|s| NativeValue::Str(s.into())).collect(),
        })
    }

    /// Short name of the value's shape, used in error reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Bool(_) => "bool",
            NativeValue::Int(_) => "int",
            NativeValue::Str(_) => "str",
            NativeValue::List(_) => "list",
            NativeValue::Set(_) => "set",
            NativeValue::Node(_) => "node",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }
}

impl From<&str> for NativeValue {
    fn from(value: &str) -> Self {
        NativeValue::Str(value.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(value: String) -> Self {
        NativeValue::Str(value)
    }
}

impl From<i64> for NativeValue {
    fn from(value: i64) -> Self {
        NativeValue::Int(value)
    }
}

impl From<bool> for NativeValue {
    fn from(value: bool) -> Self {
        NativeValue::Bool(value)
    }
}

impl From<Rc<NativeNode>> for NativeValue {
    fn from(value: Rc<NativeNode>) -> Self {
        NativeValue::Node(value)
    }
}

impl From<NativeNode> for NativeValue {
    fn from(value: NativeNode) -> Self {
        NativeValue::Node(Rc::new(value))
    }
}

impl From<Vec<NativeValue>> for NativeValue {
    fn from(value: Vec<NativeValue>) -> Self {
        NativeValue::List(value)
    }
}

impl<T: Into<NativeValue>> From<Option<T>> for NativeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(NativeValue::Null, Into::into)
    }
}

/// An external Java parser producing native trees.
pub trait JavaParser {
    /// Parses one compilation unit. Errors are reported as text.
    fn parse(&self, source: &str) -> Result<Rc<NativeNode>, String>;
}
