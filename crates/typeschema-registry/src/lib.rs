//! In-memory type tables for `typeschema-core`.
//!
//! * [`registry`] – [`TypeRegistry`], an introspector and leaf classifier
//!   backed by hash maps, loadable from JSON.
//! * [`builder`] – [`DefinitionBuilder`], fluent construction of type
//!   definitions with matching accessors.
//! * [`batch`] – [`DefinitionsBatch`], one document with shared types under
//!   `definitions`.
pub mod batch;
pub mod builder;
pub mod registry;

pub use batch::DefinitionsBatch;
pub use builder::DefinitionBuilder;
pub use registry::{TypeRegistry, TypeTable};
