//! # `typeschema-core`
//!
//! Turns a described type graph into JSON Schema.
//!
//! | Module           | Responsibility                                                       |
//! |------------------|----------------------------------------------------------------------|
//! | [`descriptor`]   | Type names, member descriptors, type definitions                     |
//! | [`introspect`]   | Collaborator traits: introspection, leaf classification, hooks       |
//! | [`metadata`]     | `Attributes` and the processor that turns them into keywords         |
//! | [`node`]         | The output tree                                                      |
//! | [`node_builder`] | Base nodes for single types                                          |
//! | [`tracker`]      | Types currently being expanded, with a drop guard                    |
//! | [`wrapper`]      | Property discovery, recursive expansion, cycle breaking               |
//! | [`generator`]    | Owns collaborators and configuration, runs root generations          |
//! | [`schema_util`]  | Leaf schemas for Rust types via `schemars`                           |
pub mod context;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod introspect;
pub mod metadata;
pub mod node;
pub mod node_builder;
pub mod schema_util;
pub mod tracker;
pub mod wrapper;

pub use error::{Result, SchemaError};
pub use generator::{SchemaGenerator, SchemaGeneratorBuilder};
pub use node::SchemaNode;
