//! # Recursive types – cycle-safe schema generation
//!
//! A `Node` owns a list of `Node`s. Expanding it naively would never
//! terminate; the generator instead emits a `$ref` back to the occurrence
//! that is still being expanded (here: the document root).
//!
//! ```text
//! Node ─┬─ id: String
//!       └─ children: [Node] ──► {"$ref": "#"}
//! ```
//!
//! ## Running the example
//!
//! ```bash
//! RUST_LOG=typeschema_core=debug cargo run -p typeschema --example tree_node
//! ```
//!
//! Set `TYPESCHEMA_SCHEMA_URI` to stamp a `$schema` keyword on the output.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use typeschema::{
    SchemaGenerator, SchemaGeneratorBuilder,
    descriptor::TypeDescriptor,
    metadata::Attributes,
    registry::{DefinitionBuilder, TypeRegistry},
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. Describe the type graph.
    let registry = TypeRegistry::with_primitives().with_definition(
        DefinitionBuilder::new("Node")
            .required_property("id", "String")
            .property_with(
                "children",
                TypeDescriptor::array_of("Node"),
                Attributes::new().with_description("Direct descendants"),
            )
            .flag("leaf")
            .attributes(Attributes::new().with_title("Tree node"))
            .closed()
            .build(),
    );

    // 2. Build the generator, optionally picking up `$schema` from the env.
    let generator: SchemaGenerator =
        SchemaGeneratorBuilder::new_from_env(Arc::new(registry)).build()?;

    // 3. Generate and print.
    let schema = generator.generate("Node")?;
    println!("{}", generator.to_json_pretty(&schema)?);

    Ok(())
}
