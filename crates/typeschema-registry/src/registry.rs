//! In-memory type table implementing both collaborator traits the core
//! needs: [`TypeIntrospector`] for composites and [`LeafClassifier`] for
//! primitives.
//!
//! ```rust
//! use typeschema_registry::{builder::DefinitionBuilder, registry::TypeRegistry};
//!
//! let registry = TypeRegistry::with_primitives()
//!     .with_definition(DefinitionBuilder::new("Point").property("x", "f64").build());
//!
//! assert!(registry.contains("Point"));
//! assert!(registry.contains("f64"));
//! ```
//!
//! A registry can also be loaded from JSON with [`TypeRegistry::from_json`]:
//!
//! ```json
//! {
//!   "enums": { "Color": ["red", "green"] },
//!   "types": [
//!     { "name": "Pixel",
//!       "fields": [ { "name": "color", "ty": "Color" } ],
//!       "accessors": [ { "name": "getColor" } ] }
//!   ]
//! }
//! ```
use std::collections::{BTreeMap, HashMap};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use typeschema_core::{
    descriptor::{TypeDefinition, TypeName},
    error::Result,
    introspect::{LeafClassifier, LeafKind, TypeIntrospector},
    node::SchemaKind,
    schema_util::leaf_schema_for,
};

const STRING_TYPES: &[&str] = &["String", "str", "char"];
const INTEGER_TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];
const NUMBER_TYPES: &[&str] = &["f32", "f64"];
const BOOLEAN_TYPES: &[&str] = &["bool"];
const NULL_TYPES: &[&str] = &["()"];

#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    definitions: HashMap<TypeName, TypeDefinition>,
    leaves: HashMap<TypeName, LeafKind>,
}

/// Serialisable form of a registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeTable {
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
    #[serde(default)]
    pub enums: BTreeMap<String, Vec<String>>,
}

impl TypeRegistry {
    /// An empty registry: no leaves, no composites.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the Rust primitive types.
    pub fn with_primitives() -> Self {
        let mut registry = Self::new();
        let groups = [
            (STRING_TYPES, SchemaKind::String),
            (INTEGER_TYPES, SchemaKind::Integer),
            (NUMBER_TYPES, SchemaKind::Number),
            (BOOLEAN_TYPES, SchemaKind::Boolean),
            (NULL_TYPES, SchemaKind::Null),
        ];
        for (names, kind) in groups {
            for name in names {
                registry.register_leaf(*name, LeafKind::Primitive(kind));
            }
        }
        registry
    }

    /// Primitives plus every type and enum of a JSON [`TypeTable`].
    pub fn from_json(json: &str) -> Result<Self> {
        let table: TypeTable = serde_json::from_str(json)?;
        let mut registry = Self::with_primitives();
        registry.extend_from_table(table);
        Ok(registry)
    }

    pub fn extend_from_table(&mut self, table: TypeTable) {
        for (name, values) in table.enums {
            self.register_enum(name, values);
        }
        for definition in table.types {
            self.register(definition);
        }
    }

    /// Snapshot of the composite definitions, sorted by name.
    pub fn to_table(&self) -> TypeTable {
        let mut types: Vec<TypeDefinition> = self.definitions.values().cloned().collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        let enums = self
            .leaves
            .iter()
            .filter_map(|(name, kind)| match kind {
                LeafKind::Enum(values) => Some((name.to_string(), values.clone())),
                _ => None,
            })
            .collect();
        TypeTable { types, enums }
    }

    /// Add or replace a composite definition.
    pub fn register(&mut self, definition: TypeDefinition) -> &mut Self {
        tracing::trace!(ty = %definition.name, "register type");
        self.definitions.insert(definition.name.clone(), definition);
        self
    }

    pub fn register_leaf(&mut self, name: impl Into<TypeName>, kind: LeafKind) -> &mut Self {
        self.leaves.insert(name.into(), kind);
        self
    }

    pub fn register_enum<I, S>(&mut self, name: impl Into<TypeName>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.register_leaf(name, LeafKind::Enum(values))
    }

    /// Register `name` as a leaf whose schema is derived from `T` by
    /// `schemars`.
    pub fn register_json_schema<T>(&mut self, name: impl Into<TypeName>) -> Result<&mut Self>
    where
        T: JsonSchema + ?Sized,
    {
        let node = leaf_schema_for::<T>()?;
        Ok(self.register_leaf(name, LeafKind::Schema(node)))
    }

    /// By-value variant of [`register`](Self::register) for chaining.
    pub fn with_definition(mut self, definition: TypeDefinition) -> Self {
        self.register(definition);
        self
    }

    pub fn with_definitions(
        mut self,
        definitions: impl IntoIterator<Item = TypeDefinition>,
    ) -> Self {
        for definition in definitions {
            self.register(definition);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name) || self.leaves.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len() + self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.leaves.is_empty()
    }
}

impl TypeIntrospector for TypeRegistry {
    fn definition(&self, name: &TypeName) -> Option<&TypeDefinition> {
        self.definitions.get(name)
    }
}

impl LeafClassifier for TypeRegistry {
    fn classify(&self, name: &TypeName) -> Option<LeafKind> {
        self.leaves.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DefinitionBuilder;

    #[test]
    fn primitives_are_classified() {
        let registry = TypeRegistry::with_primitives();
        assert_eq!(
            registry.classify(&"u64".into()),
            Some(LeafKind::Primitive(SchemaKind::Integer))
        );
        assert_eq!(
            registry.classify(&"String".into()),
            Some(LeafKind::Primitive(SchemaKind::String))
        );
        assert_eq!(registry.classify(&"Unknown".into()), None);
    }

    #[test]
    fn ancestry_walks_parents_most_derived_first() {
        let registry = TypeRegistry::new()
            .with_definition(DefinitionBuilder::new("C").extends("B").build())
            .with_definition(DefinitionBuilder::new("B").extends("A").build())
            .with_definition(DefinitionBuilder::new("A").build());

        let chain: Vec<_> = registry
            .ancestry(&"C".into())
            .iter()
            .map(|def| def.name.to_string())
            .collect();
        assert_eq!(chain, ["C", "B", "A"]);
    }

    #[test]
    fn ancestry_stops_on_self_extension() {
        let registry = TypeRegistry::new()
            .with_definition(DefinitionBuilder::new("Loop").extends("Loop").build());
        assert_eq!(registry.ancestry(&"Loop".into()).len(), 1);
    }

    #[test]
    fn table_round_trips_through_json() {
        let json = r#"{
            "enums": { "Color": ["red", "green"] },
            "types": [
                { "name": "Pixel",
                  "fields": [ { "name": "color", "ty": "Color" } ],
                  "accessors": [ { "name": "getColor" } ] }
            ]
        }"#;
        let registry = TypeRegistry::from_json(json).unwrap();
        assert!(registry.contains("Pixel"));
        assert_eq!(
            registry.classify(&"Color".into()),
            Some(LeafKind::Enum(vec!["red".into(), "green".into()]))
        );

        let table = registry.to_table();
        assert_eq!(table.types.len(), 1);
        assert_eq!(table.enums["Color"], ["red", "green"]);
    }
}
