//! Generate one document whose shared types live under `definitions`.
//!
//! ```text
//! ┌──────────┐  seed tracker   ┌───────────────────────────────┐
//! │ Address  │ ───────────────►│ Address @ #/definitions/Address│
//! ├──────────┤                 ├───────────────────────────────┤
//! │ Person   │ ───────────────►│ Person  @ #/definitions/Person │
//! └──────────┘                 └───────────────────────────────┘
//!        │                                   │
//!        ▼                                   ▼
//!   wrap each definition            every other occurrence
//!   under its own anchor            becomes {"$ref": anchor}
//! ```
//!
//! All batched types are placed on one shared
//! [`ReferenceTracker`](typeschema_core::tracker::ReferenceTracker) before
//! anything is generated. Wherever the root (or another definition) uses one
//! of them, the wrapper finds it already active and emits a reference to its
//! `#/definitions/<name>` anchor instead of inlining it. Anchors remember
//! whether their type is required by default, so batching never changes
//! the `required` lists of the document.
//!
//! ```rust
//! use std::sync::Arc;
//! use typeschema_core::SchemaGenerator;
//! use typeschema_registry::{
//!     batch::DefinitionsBatch, builder::DefinitionBuilder, registry::TypeRegistry,
//! };
//!
//! let registry = TypeRegistry::with_primitives()
//!     .with_definition(DefinitionBuilder::new("Address").property("city", "String").build())
//!     .with_definition(DefinitionBuilder::new("Person").property("home", "Address").build());
//! let generator = SchemaGenerator::builder(Arc::new(registry)).build().unwrap();
//!
//! let schema = DefinitionsBatch::new()
//!     .with("Address")
//!     .build(&generator, "Person")
//!     .unwrap();
//!
//! assert_eq!(
//!     schema.property("home").unwrap()["$ref"],
//!     "#/definitions/Address"
//! );
//! ```
use serde_json::{Map, Value};
use typeschema_core::{
    SchemaGenerator,
    descriptor::{TypeDescriptor, TypeName},
    error::Result,
    node::{SchemaNode, TAG_DEFINITIONS},
    tracker::{ManagedReference, ReferenceTracker},
    wrapper::escape_pointer_token,
};

/// Ordered set of types to emit under `definitions`.
#[derive(Debug, Clone, Default)]
pub struct DefinitionsBatch(Vec<TypeName>);

impl DefinitionsBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add `name` to the batch. Repeated names are ignored.
    pub fn with(mut self, name: impl Into<TypeName>) -> Self {
        let name = name.into();
        if !self.0.contains(&name) {
            self.0.push(name);
        }
        self
    }

    pub fn names(&self) -> &[TypeName] {
        &self.0
    }

    /// Generate `root` with every batched type under `definitions`.
    pub fn build(
        &self,
        generator: &SchemaGenerator,
        root: impl Into<TypeDescriptor>,
    ) -> Result<SchemaNode> {
        let mut tracker = ReferenceTracker::new();
        for name in &self.0 {
            let required = generator.type_flags(name)?.required;
            tracker.acquire(
                ManagedReference::new(name.clone(), format!("#/{}", token(name)))
                    .with_required(required),
            );
        }

        let mut definitions = Map::new();
        for name in &self.0 {
            let node = generator.wrap_anchored(name, &token(name), &mut tracker)?;
            definitions.insert(name.to_string(), node.into_value());
        }

        let mut document = generator.generate_with_tracker(root, &mut tracker)?;
        if !definitions.is_empty() {
            document.insert(TAG_DEFINITIONS, Value::Object(definitions));
        }
        tracing::debug!(definitions = self.0.len(), "generated batch document");
        Ok(document)
    }
}

/// Relative token of a definition: `definitions/<escaped name>`.
fn token(name: &TypeName) -> String {
    let escaped = escape_pointer_token(name.as_str());
    format!("{TAG_DEFINITIONS}/{escaped}")
}
