//! The composite wrapper: turns one object-like type into an object schema.
//!
//! ```text
//!  wrap(Node) ──► base node {"type":"object"} + type metadata
//!      │
//!      ├─ discovery ──► [(getChildren, children), (getId, id)]   (sorted)
//!      │
//!      └─ for each candidate
//!           leaf       ──► SchemaNodeBuilder
//!           array      ──► {"type":"array","items": <element>}
//!           composite  ──► tracker.enter(T)
//!                            Ok(guard)   ─► wrap(T) recursively, guard drops
//!                            Err(active) ─► {"$ref": <anchor of active T>}
//! ```
//!
//! The tracker only ever holds the types on the *current* path. Siblings of
//! the same type are therefore expanded independently, while a type that
//! reaches itself (directly, through an array, or through other composites)
//! is cut off with a reference marker.
mod discovery;
mod property;

use crate::{
    context::SchemaContext,
    descriptor::{TypeDefinition, TypeDescriptor, TypeName},
    error::Result,
    metadata::TypeFlags,
    node::{SchemaNode, TAG_ADDITIONAL_PROPERTIES},
    node_builder::SchemaNodeBuilder,
    tracker::ReferenceTracker,
};

pub use discovery::property_name;
pub(crate) use property::expand_root;
pub use property::escape_pointer_token;

/// Identifier of the document root.
pub const ROOT_ID: &str = "#";

/// One attached property of a composite node.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
    pub required: bool,
    /// Position in discovery order.
    pub ordinal: usize,
    pub schema: SchemaNode,
}

#[derive(Debug, Clone)]
pub struct CompositeSchemaWrapper {
    ty: TypeName,
    node: SchemaNode,
    properties: Vec<PropertyDescriptor>,
    required: bool,
    relative_id: String,
    identity_keyword: Option<String>,
}

impl CompositeSchemaWrapper {
    /// Build the object schema of `definition`.
    ///
    /// * `path_token` – appended to the root identifier `#`; a token that
    ///   itself starts with `#` replaces the identifier instead.
    /// * `skip_properties` – stop after the shell node.
    ///
    /// The caller is responsible for holding `definition` on `tracker` while
    /// this runs if self references should resolve to this node.
    pub fn wrap(
        ctx: SchemaContext<'_>,
        definition: &TypeDefinition,
        tracker: &mut ReferenceTracker,
        path_token: Option<&str>,
        skip_properties: bool,
    ) -> Result<Self> {
        let (node, flags) = SchemaNodeBuilder::new(ctx).build_composite(definition)?;
        Self::wrap_base(ctx, definition, (node, flags), tracker, path_token, skip_properties)
    }

    /// [`wrap`](Self::wrap) on a base node already produced by
    /// [`SchemaNodeBuilder::build_composite`].
    pub(crate) fn wrap_base(
        ctx: SchemaContext<'_>,
        definition: &TypeDefinition,
        (mut node, flags): (SchemaNode, TypeFlags),
        tracker: &mut ReferenceTracker,
        path_token: Option<&str>,
        skip_properties: bool,
    ) -> Result<Self> {
        if flags.closed {
            node.insert(TAG_ADDITIONAL_PROPERTIES, false);
        }

        let mut wrapper = Self {
            ty: definition.name.clone(),
            node,
            properties: Vec::new(),
            required: flags.required,
            relative_id: ROOT_ID.to_owned(),
            identity_keyword: ctx.identity_keyword.map(str::to_owned),
        };
        if let Some(token) = path_token {
            wrapper.add_token_to_relative_id(token);
        }

        if skip_properties {
            return Ok(wrapper);
        }

        wrapper.process_properties(ctx, definition, tracker)?;
        Ok(wrapper)
    }

    fn add_token_to_relative_id(&mut self, token: &str) {
        if token.starts_with('#') {
            token.clone_into(&mut self.relative_id);
        } else {
            self.relative_id.push('/');
            self.relative_id.push_str(token);
        }
    }

    fn process_properties<'a>(
        &mut self,
        ctx: SchemaContext<'a>,
        definition: &'a TypeDefinition,
        tracker: &mut ReferenceTracker,
    ) -> Result<()> {
        let candidates = discovery::find_properties(&ctx, definition)?;
        for (ordinal, candidate) in candidates.into_iter().enumerate() {
            let name = candidate.name.clone();
            match self.expand_property(ctx, tracker, candidate, ordinal)? {
                Some(property) => self.add_property(property),
                None => tracing::debug!(ty = %self.ty, property = %name, "eliding empty property"),
            }
        }
        Ok(())
    }

    /// Attach `property`: the last property of a given name wins the
    /// `properties` slot, `required` is append-only.
    pub fn add_property(&mut self, property: PropertyDescriptor) {
        self.node
            .set_property(property.name.clone(), property.schema.clone());
        if property.required {
            self.add_required(property.name.clone());
        }
        self.properties.push(property);
    }

    pub fn add_required(&mut self, name: impl Into<String>) {
        self.node.add_required(name);
    }

    pub fn ty(&self) -> &TypeName {
        &self.ty
    }

    pub fn relative_id(&self) -> &str {
        &self.relative_id
    }

    /// Type-level "required by default" flag.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// No attached properties and nothing but `type` (and the identity
    /// keyword) on the node.
    pub fn is_empty_wrapper(&self) -> bool {
        self.properties.is_empty() && self.node.is_degenerate(self.identity_keyword.as_deref())
    }

    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertyDescriptor> {
        self.properties.iter()
    }

    pub fn node(&self) -> &SchemaNode {
        &self.node
    }

    pub fn into_node(self) -> SchemaNode {
        self.node
    }
}

impl<'w> IntoIterator for &'w CompositeSchemaWrapper {
    type Item = &'w PropertyDescriptor;
    type IntoIter = std::slice::Iter<'w, PropertyDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
