//! # Type tables – loading a type graph from JSON
//!
//! The registry can be populated from a serialised [`TypeTable`]. This is the
//! shape an external introspection step (a compiler plugin, a reflection
//! dump, …) would hand over. Shared types are emitted once under
//! `definitions` by a [`DefinitionsBatch`].
//!
//! ```bash
//! cargo run -p typeschema --example type_table
//! ```
//!
//! [`TypeTable`]: typeschema::registry::TypeTable
//! [`DefinitionsBatch`]: typeschema::registry::DefinitionsBatch

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use typeschema::{
    SchemaGenerator,
    generator::DRAFT_07_URI,
    registry::{DefinitionsBatch, TypeRegistry},
};

const TABLE: &str = r#"{
  "enums": { "Country": ["DE", "FR", "NL"] },
  "types": [
    {
      "name": "Address",
      "fields": [
        { "name": "street", "ty": "String" },
        { "name": "country", "ty": "Country", "attributes": { "required": true } }
      ],
      "accessors": [ { "name": "getStreet" }, { "name": "getCountry" } ]
    },
    {
      "name": "Customer",
      "fields": [
        { "name": "name", "ty": "String", "attributes": { "minLength": 1 } },
        { "name": "billing", "ty": "Address" },
        { "name": "shipping", "ty": { "array": "Address" } },
        { "name": "referrer", "ty": "Customer" }
      ],
      "accessors": [
        { "name": "getName" },
        { "name": "getBilling" },
        { "name": "getShipping" },
        { "name": "getReferrer" },
        { "name": "getClass", "origin": "root_ancestor" }
      ],
      "attributes": { "additionalProperties": false }
    }
  ]
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = TypeRegistry::from_json(TABLE)?;
    let generator = SchemaGenerator::builder(Arc::new(registry))
        .with_schema_uri(DRAFT_07_URI)
        .build()?;

    // Inline: `Address` is expanded at every occurrence.
    let inline = generator.generate("Customer")?;
    println!("── inline ──\n{}", generator.to_json_pretty(&inline)?);

    // Batched: `Address` lives under `definitions` and is referenced.
    let batched = DefinitionsBatch::new()
        .with("Address")
        .build(&generator, "Customer")?;
    println!("── batched ──\n{}", generator.to_json_pretty(&batched)?);

    Ok(())
}
