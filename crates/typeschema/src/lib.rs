//! # `typeschema` – The umbrella crate
//!
//! One-stop import for the two building-block crates in the workspace
//!
//! | Crate                     | What it provides                                        |
//! |---------------------------|---------------------------------------------------------|
//! | **`typeschema-core`**     | Collaborator traits, reference tracker, wrapper, errors |
//! | **`typeschema-registry`** | Type table, definition builder, `definitions` batches   |
//!
//! The core never looks at real Rust types: it works on a described type
//! graph supplied through [`introspect::TypeIntrospector`]. The registry is
//! the stock implementation of that trait, so a single dependency line is
//! enough for most users:
//!
//! ```toml
//! [dependencies]
//! typeschema = "0.1"
//! ```
//!
//! ## Quick example
//!
//! ```rust
//! use std::sync::Arc;
//! use typeschema::{
//!     SchemaGenerator,
//!     descriptor::TypeDescriptor,
//!     registry::{DefinitionBuilder, TypeRegistry},
//! };
//!
//! let registry = TypeRegistry::with_primitives().with_definition(
//!     DefinitionBuilder::new("Node")
//!         .property("id", "String")
//!         .property("children", TypeDescriptor::array_of("Node"))
//!         .build(),
//! );
//!
//! let generator = SchemaGenerator::builder(Arc::new(registry)).build()?;
//! let schema = generator.generate("Node")?;
//!
//! // the recursive element points back at the document root
//! assert_eq!(
//!     schema.to_value()["properties"]["children"]["items"]["$ref"],
//!     "#"
//! );
//! # Ok::<(), typeschema::SchemaError>(())
//! ```
//!
//! ## Crate contents
//!
//! The `pub use` statements below forward the public API of the individual
//! crates so users can write `typeschema::SchemaGenerator` and
//! `typeschema::registry::TypeRegistry`.
#![doc(html_root_url = "https://docs.rs/typeschema/latest")]

pub use typeschema_core::*;
pub use typeschema_registry as registry;
