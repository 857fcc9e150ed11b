//! Collaborator interfaces consumed by the core.
//!
//! The schema wrapper never inspects a language runtime. Everything it
//! knows about a type comes through three small traits:
//!
//! * [`TypeIntrospector`] – "describe this composite type",
//! * [`LeafClassifier`] – "is this a primitive, and which one?",
//! * [`DynamicMembers`] – an optional hook contributing synthetic accessors.
//!
//! `typeschema-registry` ships an in-memory implementation of the first two.
use crate::{
    descriptor::{AccessorDef, TypeDefinition, TypeName},
    error::BoxError,
    node::{SchemaKind, SchemaNode},
};

/// Provides the definition of composite types.
///
/// Implementations must be deterministic in *content*. The order of fields
/// and accessors is not relied upon for output ordering.
pub trait TypeIntrospector: Send + Sync {
    fn definition(&self, name: &TypeName) -> Option<&TypeDefinition>;

    /// The definition of `name` followed by its ancestors, most-derived
    /// first. Unknown ancestors end the chain; a repeated name ends it too
    /// so a malformed table cannot loop.
    fn ancestry<'a>(&'a self, name: &TypeName) -> Vec<&'a TypeDefinition> {
        let mut chain: Vec<&TypeDefinition> = Vec::new();
        let mut next = self.definition(name);
        while let Some(def) = next {
            if chain.iter().any(|seen| seen.name == def.name) {
                break;
            }
            chain.push(def);
            next = def.parent.as_ref().and_then(|parent| self.definition(parent));
        }
        chain
    }
}

/// Primitive classification of a leaf type.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafKind {
    /// `{"type": <kind>}`
    Primitive(SchemaKind),
    /// `{"type": "string", "enum": [...]}`
    Enum(Vec<String>),
    /// A ready-made schema, e.g. produced by `schemars`.
    Schema(SchemaNode),
    /// `{}` – accepts anything.
    Untyped,
}

pub trait LeafClassifier: Send + Sync {
    /// `None` means "not a leaf".
    fn classify(&self, name: &TypeName) -> Option<LeafKind>;
}

/// Optional hook that contributes accessors a type does not declare itself.
/// A failure aborts the generation of the whole root type.
pub trait DynamicMembers: Send + Sync {
    fn dynamic_accessors(&self, definition: &TypeDefinition)
    -> Result<Vec<AccessorDef>, BoxError>;
}
