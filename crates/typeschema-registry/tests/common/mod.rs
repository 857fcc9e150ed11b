#![allow(dead_code)]

use std::sync::Arc;

use typeschema_core::{SchemaGenerator, descriptor::TypeDescriptor};
use typeschema_registry::{DefinitionBuilder, TypeRegistry};

pub fn generator(registry: TypeRegistry) -> SchemaGenerator {
    SchemaGenerator::builder(Arc::new(registry))
        .build()
        .expect("default configuration is valid")
}

/// `Node { id: String, children: Node[] }`
pub fn tree_registry() -> TypeRegistry {
    TypeRegistry::with_primitives().with_definition(
        DefinitionBuilder::new("Node")
            .property("id", "String")
            .property("children", TypeDescriptor::array_of("Node"))
            .build(),
    )
}

/// `Pair { a: Leaf, b: Leaf }`, `Leaf { v: f64 }`
pub fn pair_registry() -> TypeRegistry {
    TypeRegistry::with_primitives()
        .with_definition(DefinitionBuilder::new("Leaf").property("v", "f64").build())
        .with_definition(
            DefinitionBuilder::new("Pair")
                .property("a", "Leaf")
                .property("b", "Leaf")
                .build(),
        )
}
