//! Type-graph vocabulary shared by every crate in the workspace.
//!
//! A type graph is described as plain data: each composite type is a
//! [`TypeDefinition`] listing its declared [`FieldDef`]s, its accessor-like
//! members ([`AccessorDef`]) and, optionally, the ancestor it extends.
//! Member types are referenced through [`TypeDescriptor`]s, which carry the
//! *name* of the target type rather than a pointer to it, so cyclic graphs
//! need no special representation.
//!
//! All types derive `Serialize`/`Deserialize`, which allows a whole type
//! table to be shipped as JSON:
//!
//! ```rust
//! use typeschema_core::descriptor::TypeDefinition;
//!
//! let def: TypeDefinition = serde_json::from_str(r#"{
//!     "name": "Node",
//!     "fields": [
//!         { "name": "id", "ty": "String" },
//!         { "name": "children", "ty": { "array": "Node" } }
//!     ],
//!     "accessors": [ { "name": "getId" }, { "name": "getChildren" } ]
//! }"#).unwrap();
//!
//! assert_eq!(def.fields.len(), 2);
//! ```
use std::{borrow::Borrow, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::metadata::Attributes;

/// Structural identity of a type. Two names are the same type iff their
/// strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Declared type of a member.
///
/// * `Named` – a leaf or composite type looked up by name.
/// * `Array` – an ordered collection of the element type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeDescriptor {
    Named(TypeName),
    Array { array: Box<TypeDescriptor> },
}

impl TypeDescriptor {
    pub fn named(name: impl Into<TypeName>) -> Self {
        Self::Named(name.into())
    }

    pub fn array_of(element: impl Into<TypeDescriptor>) -> Self {
        Self::Array {
            array: Box::new(element.into()),
        }
    }

    /// Innermost named type, looking through any number of array layers.
    pub fn element_name(&self) -> &TypeName {
        match self {
            Self::Named(name) => name,
            Self::Array { array } => array.element_name(),
        }
    }
}

impl From<&str> for TypeDescriptor {
    fn from(value: &str) -> Self {
        Self::Named(value.into())
    }
}

impl From<TypeName> for TypeDescriptor {
    fn from(value: TypeName) -> Self {
        Self::Named(value)
    }
}

/// A declared data member of a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeDescriptor,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            attributes: Attributes::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Where an accessor comes from. Only `Declared` accessors are eligible to
/// become properties; the others are built-in protocol members that every
/// type of that family exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorOrigin {
    #[default]
    Declared,
    /// Inherited from the implicit root of every type hierarchy.
    RootAncestor,
    /// Contributed by a collection protocol (size, iteration, …).
    CollectionProtocol,
}

/// An accessor-like callable member (`getName`, `isActive`, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessorDef {
    pub name: String,
    #[serde(default)]
    pub params: usize,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub origin: AccessorOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl AccessorDef {
    /// A declared, parameterless instance accessor.
    pub fn getter(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: 0,
            is_static: false,
            origin: AccessorOrigin::Declared,
            attributes: None,
        }
    }

    pub fn with_params(mut self, params: usize) -> Self {
        self.params = params;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_origin(mut self, origin: AccessorOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// Everything the introspection provider knows about one composite type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: TypeName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TypeName>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub accessors: Vec<AccessorDef>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl TypeDefinition {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
            accessors: Vec::new(),
            attributes: Attributes::default(),
        }
    }
}
