//! Builder-style helper for constructing [`TypeDefinition`]s.
//!
//! Spelling out fields and their matching accessors by hand is tedious:
//! every property needs a `FieldDef` *and* a `get…`/`is…` accessor whose
//! name lines up with it. `DefinitionBuilder` offers a fluent API that keeps
//! the two in sync. Every method returns `self`, enabling call-chaining:
//!
//! ```rust
//! use typeschema_core::descriptor::TypeDescriptor;
//! use typeschema_registry::builder::DefinitionBuilder;
//!
//! let node = DefinitionBuilder::new("Node")
//!     .property("id", "String")
//!     .property("children", TypeDescriptor::array_of("Node"))
//!     .flag("leaf")
//!     .build();
//!
//! let accessors: Vec<_> = node.accessors.iter().map(|a| a.name.as_str()).collect();
//! assert_eq!(accessors, ["getId", "getChildren", "isLeaf"]);
//! ```
//!
//! The builder performs **no validation**. Declaring an accessor that has
//! no field, or a field without accessor, is allowed; discovery simply
//! ignores the unmatched half.

use typeschema_core::{
    descriptor::{AccessorDef, FieldDef, TypeDefinition, TypeDescriptor, TypeName},
    metadata::Attributes,
};

/// Fluent helper to produce a [`TypeDefinition`].
pub struct DefinitionBuilder {
    definition: TypeDefinition,
}

impl DefinitionBuilder {
    /// Start a definition for `name` with no members.
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            definition: TypeDefinition::new(name),
        }
    }

    /// Declare the ancestor this type extends.
    pub fn extends(mut self, parent: impl Into<TypeName>) -> Self {
        self.definition.parent = Some(parent.into());
        self
    }

    /// Add a field without any accessor.
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<TypeDescriptor>) -> Self {
        self.definition.fields.push(FieldDef::new(name, ty));
        self
    }

    /// Add an arbitrary accessor.
    pub fn accessor(mut self, accessor: AccessorDef) -> Self {
        self.definition.accessors.push(accessor);
        self
    }

    /// Add a parameterless `getter` with the given literal name.
    pub fn getter(self, name: impl Into<String>) -> Self {
        self.accessor(AccessorDef::getter(name))
    }

    /// Add a field and its `get<Name>` accessor.
    pub fn property(self, name: &str, ty: impl Into<TypeDescriptor>) -> Self {
        self.property_with(name, ty, Attributes::default())
    }

    /// Add a field carrying `attributes` and its `get<Name>` accessor.
    pub fn property_with(
        self,
        name: &str,
        ty: impl Into<TypeDescriptor>,
        attributes: Attributes,
    ) -> Self {
        let getter = accessor_name("get", name);
        self.push_field(FieldDef::new(name, ty).with_attributes(attributes))
            .getter(getter)
    }

    /// Shorthand for a required property.
    pub fn required_property(self, name: &str, ty: impl Into<TypeDescriptor>) -> Self {
        self.property_with(name, ty, Attributes::new().required())
    }

    /// Add a `bool` field and its `is<Name>` accessor.
    pub fn flag(self, name: &str) -> Self {
        let getter = accessor_name("is", name);
        self.push_field(FieldDef::new(name, "bool")).getter(getter)
    }

    /// Replace the type-level attributes.
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.definition.attributes = attributes;
        self
    }

    /// Close the type to additional properties.
    pub fn closed(mut self) -> Self {
        self.definition.attributes.additional_properties = Some(false);
        self
    }

    /// Retrieve the accumulated definition and consume the builder.
    pub fn build(self) -> TypeDefinition {
        self.definition
    }

    fn push_field(mut self, field: FieldDef) -> Self {
        self.definition.fields.push(field);
        self
    }
}

/// `("get", "firstName")` → `getFirstName`.
pub fn accessor_name(prefix: &str, property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => format!("{prefix}{}{}", first.to_uppercase(), chars.as_str()),
        None => prefix.to_owned(),
    }
}
