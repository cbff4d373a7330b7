//! Computed fields registry.
//!
//! A computed field is a named attribute derived from a node by a function
//! instead of being stored on it. The registry maps node type to field name
//! to computator; [`AstNode::get`](crate::ast_node::AstNode::get) consults it
//! when a node declares no attribute of the requested name.
//!
//! Registries are explicit objects shared through `Arc`. Each [`Ast`] keeps
//! the registry it was built with; [`ComputedFieldsRegistry::global`] is the
//! process-wide instance used by the default build entry points.
//!
//! [`Ast`]: crate::ast::Ast

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use dashmap::DashMap;

use crate::ast_node::AstNode;
use crate::config::{DuplicateFieldPolicy, RegistryConfig};
use crate::error::AstError;
use crate::node_type::AstNodeType;
use crate::standard_fields::register_standard_computed_fields;
use crate::value::AttributeValue;

/// A computator: derives an attribute value from a node.
pub type ComputedField = Arc<dyn Fn(AstNode<'_>) -> AttributeValue + Send + Sync>;

/// Wraps a closure as a [`ComputedField`].
pub fn computed_field<F>(computator: F) -> ComputedField
where
    F: Fn(AstNode<'_>) -> AttributeValue + Send + Sync + 'static,
{
    Arc::new(computator)
}

static GLOBAL: OnceLock<Arc<ComputedFieldsRegistry>> = OnceLock::new();

/// Node type to field name to computator.
///
/// Backed by `DashMap` so lookups may happen from several threads.
/// Registration and clearing serialize on `write_lock`, which makes the
/// duplicate check and the install of a `register` call one step.
pub struct ComputedFieldsRegistry {
    fields: DashMap<AstNodeType, HashMap<String, ComputedField>>,
    write_lock: Mutex<()>,
    config: RegistryConfig,
}

impl ComputedFieldsRegistry {
    /// Creates an empty registry rejecting duplicate registrations.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        ComputedFieldsRegistry {
            fields: DashMap::new(),
            write_lock: Mutex::new(()),
            config,
        }
    }

    /// The process-wide registry, created on first use with the
    /// configuration from the environment and the standard fields.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL.get_or_init(|| {
            let registry = Self::with_config(RegistryConfig::from_env());
            // A fresh registry holds no field a standard one could collide with.
            let _ = register_standard_computed_fields(&registry);
            Arc::new(registry)
        }))
    }

    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    /// Installs `computator` as field `name` on every type in `node_types`.
    ///
    /// Under [`DuplicateFieldPolicy::Reject`] the call fails with
    /// [`AstError::DuplicateField`] if any of the types already has a field
    /// of that name, and nothing is installed.
    pub fn register<F>(&self, computator: F, name: &str, node_types: &[AstNodeType]) -> Result<(), AstError>
    where
        F: Fn(AstNode<'_>) -> AttributeValue + Send + Sync + 'static,
    {
        self.register_shared(computed_field(computator), name, node_types)
    }

    /// Same as [`register`](Self::register) for an already wrapped field.
    pub fn register_shared(
        &self,
        computator: ComputedField,
        name: &str,
        node_types: &[AstNodeType],
    ) -> Result<(), AstError> {
        let _write = self.write();
        if self.config.duplicate_policy == DuplicateFieldPolicy::Reject {
            if let Some(&node_type) = node_types.iter().find(|ty| self.has_field(**ty, name)) {
                return Err(AstError::DuplicateField {
                    name: name.to_string(),
                    node_type,
                });
            }
        }

        for &node_type in node_types {
            let mut entry = self.fields.entry(node_type).or_default();
            let previous = entry.insert(name.to_string(), Arc::clone(&computator));
            if previous.is_some() {
                tracing::warn!(field = name, node_type = %node_type, "overwriting computed field");
            } else {
                tracing::trace!(field = name, node_type = %node_type, "registered computed field");
            }
        }
        Ok(())
    }

    /// All fields registered for `node_type`; empty if there are none.
    pub fn get_fields(&self, node_type: AstNodeType) -> HashMap<String, ComputedField> {
        self.fields
            .get(&node_type)
            .map(|fields| fields.clone())
            .unwrap_or_default()
    }

    pub fn get_field(&self, node_type: AstNodeType, name: &str) -> Option<ComputedField> {
        self.fields
            .get(&node_type)
            .and_then(|fields| fields.get(name).cloned())
    }

    pub fn has_field(&self, node_type: AstNodeType, name: &str) -> bool {
        self.fields
            .get(&node_type)
            .is_some_and(|fields| fields.contains_key(name))
    }

    /// Removes every registered field.
    pub fn clear(&self) {
        let _write = self.write();
        self.fields.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.fields.iter().all(|entry| entry.value().is_empty())
    }

    fn write(&self) -> MutexGuard<'_, ()> {
        // The guarded unit holds no state a panicking writer could corrupt.
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ComputedFieldsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComputedFieldsRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<(AstNodeType, Vec<String>)> = self
            .fields
            .iter()
            .map(|entry| {
                let mut fields: Vec<String> = entry.value().keys().cloned().collect();
                fields.sort();
                (*entry.key(), fields)
            })
            .collect();
        names.sort();
        f.debug_struct("ComputedFieldsRegistry")
            .field("config", &self.config)
            .field("fields", &names)
            .finish()
    }
}
