//! Leaf schemas for Rust types, produced with [`schemars`].
//!
//! Composite types of the introspected graph are expanded by the wrapper,
//! but a leaf can be any Rust type that already knows its own JSON Schema
//! (`chrono::DateTime`, `uuid::Uuid`, a `#[derive(JsonSchema)]` struct, …).
//! [`leaf_schema_for`] renders such a type as a self-contained node that can
//! be registered as [`LeafKind::Schema`](crate::introspect::LeafKind::Schema).
//!
//! The schema is fully inlined. Document-level keywords (`$schema`, `title`)
//! are stripped, since the node ends up nested inside another document.

use schemars::{
    JsonSchema,
    r#gen::{SchemaGenerator, SchemaSettings},
};
use serde_json::Value;

use crate::{
    error::Result,
    node::{SchemaNode, TAG_SCHEMA},
};

/// Generate an inline JSON Schema node for `T`.
///
/// # Example
///
/// ```
/// use typeschema_core::schema_util::leaf_schema_for;
///
/// let node = leaf_schema_for::<bool>().unwrap();
/// assert_eq!(node.kind(), Some("boolean"));
/// ```
pub fn leaf_schema_for<T>() -> Result<SchemaNode>
where
    T: JsonSchema + ?Sized,
{
    // Leaves are embedded as-is, so no `$ref`s into a missing `definitions`.
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;

    let generator = SchemaGenerator::new(settings);
    let root = generator.into_root_schema_for::<T>();

    let value = serde_json::to_value(root)?;
    let mut node = match value {
        Value::Object(map) => SchemaNode::from(map),
        // `true`/`false` schemas carry no keywords.
        _ => SchemaNode::new(),
    };
    node.remove(TAG_SCHEMA);
    node.remove("title");
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct Point {
        x: f64,
        y: f64,
    }

    #[test]
    fn strips_document_keywords() {
        let node = leaf_schema_for::<Point>().unwrap();
        assert_eq!(node.kind(), Some("object"));
        assert!(node.get("$schema").is_none());
        assert!(node.get("title").is_none());
        assert!(node.property("x").is_some());
    }

    #[test]
    fn primitives_map_to_their_kind() {
        assert_eq!(leaf_schema_for::<String>().unwrap().kind(), Some("string"));
        assert_eq!(leaf_schema_for::<u32>().unwrap().kind(), Some("integer"));
    }
}
