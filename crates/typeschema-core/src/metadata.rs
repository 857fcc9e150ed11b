//! Descriptive metadata and the collaborator that applies it to nodes.
//!
//! The core never interprets titles, formats or numeric ranges itself. It
//! hands every composite type and every discovered property to a
//! [`MetadataProcessor`], which may decorate the node and reports back the
//! two flags the core *does* care about: whether the member is required and
//! whether the type is closed to additional properties.
//!
//! [`AttributesProcessor`] is the default implementation. It reads the
//! [`Attributes`] attached to type definitions, fields and accessors and
//! writes the matching JSON-Schema keywords.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    descriptor::{AccessorDef, FieldDef, TypeDefinition, TypeName},
    error::{Result, SchemaError},
    node::SchemaNode,
};

/// Declarative per-type / per-member annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Attributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unique_items: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// On a member: the property is listed in `required`. On a type: every
    /// property declared *with* this type is required by default.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// `null` is accepted in addition to the declared type.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    /// `Some(false)` closes the type (`"additionalProperties": false`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<bool>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_range(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    pub fn with_length(mut self, min_length: Option<u64>, max_length: Option<u64>) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn closed(mut self) -> Self {
        self.additional_properties = Some(false);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// Flags a processor reports for a composite type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeFlags {
    /// Properties declared with this type are required.
    pub required: bool,
    /// Emit `"additionalProperties": false`.
    pub closed: bool,
    /// Widen `type` to accept `null`.
    pub nullable: bool,
}

/// Flags a processor reports for a single property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropertyFlags {
    pub required: bool,
    /// Widen the property's `type` to accept `null`. Ignored for `$ref`
    /// markers.
    pub nullable: bool,
}

/// The member pair a property was discovered from.
#[derive(Debug, Clone, Copy)]
pub struct PropertySource<'a> {
    pub owner: &'a TypeName,
    pub name: &'a str,
    pub field: &'a FieldDef,
    pub accessor: &'a AccessorDef,
}

impl PropertySource<'_> {
    /// Accessor annotations win over field annotations.
    pub fn attributes(&self) -> &Attributes {
        self.accessor
            .attributes
            .as_ref()
            .unwrap_or(&self.field.attributes)
    }
}

/// Metadata collaborator. Invoked once per composite type and once per
/// property; an `Err` aborts the whole generation.
pub trait MetadataProcessor: Send + Sync {
    fn apply_type(&self, definition: &TypeDefinition, node: &mut SchemaNode) -> Result<TypeFlags>;

    fn apply_property(
        &self,
        property: &PropertySource<'_>,
        node: &mut SchemaNode,
    ) -> Result<PropertyFlags>;
}

/// Default [`MetadataProcessor`] driven by [`Attributes`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributesProcessor;

impl AttributesProcessor {
    fn write_common(target: &str, attributes: &Attributes, node: &mut SchemaNode) -> Result<()> {
        check_bounds(target, "minimum", attributes.minimum, attributes.maximum)?;
        check_bounds(
            target,
            "minLength",
            attributes.min_length.map(|v| v as f64),
            attributes.max_length.map(|v| v as f64),
        )?;
        check_bounds(
            target,
            "minItems",
            attributes.min_items.map(|v| v as f64),
            attributes.max_items.map(|v| v as f64),
        )?;

        if let Some(title) = &attributes.title {
            node.insert("title", title.clone());
        }
        if let Some(description) = &attributes.description {
            node.insert("description", description.clone());
        }
        if let Some(format) = &attributes.format {
            node.insert("format", format.clone());
        }
        if let Some(pattern) = &attributes.pattern {
            node.insert("pattern", pattern.clone());
        }
        if let Some(minimum) = attributes.minimum {
            node.insert("minimum", minimum);
        }
        if let Some(maximum) = attributes.maximum {
            node.insert("maximum", maximum);
        }
        if let Some(minimum) = attributes.exclusive_minimum {
            node.insert("exclusiveMinimum", minimum);
        }
        if let Some(maximum) = attributes.exclusive_maximum {
            node.insert("exclusiveMaximum", maximum);
        }
        if let Some(min_length) = attributes.min_length {
            node.insert("minLength", min_length);
        }
        if let Some(max_length) = attributes.max_length {
            node.insert("maxLength", max_length);
        }
        if let Some(min_items) = attributes.min_items {
            node.insert("minItems", min_items);
        }
        if let Some(max_items) = attributes.max_items {
            node.insert("maxItems", max_items);
        }
        if attributes.unique_items {
            node.insert("uniqueItems", true);
        }
        if attributes.read_only {
            node.insert("readOnly", true);
        }
        if let Some(default) = &attributes.default {
            node.insert("default", default.clone());
        }
        Ok(())
    }
}

impl MetadataProcessor for AttributesProcessor {
    fn apply_type(&self, definition: &TypeDefinition, node: &mut SchemaNode) -> Result<TypeFlags> {
        let attributes = &definition.attributes;
        Self::write_common(definition.name.as_str(), attributes, node)?;
        Ok(TypeFlags {
            required: attributes.required,
            closed: attributes.additional_properties == Some(false),
            nullable: attributes.nullable,
        })
    }

    fn apply_property(
        &self,
        property: &PropertySource<'_>,
        node: &mut SchemaNode,
    ) -> Result<PropertyFlags> {
        let attributes = property.attributes();
        let target = format!("{}.{}", property.owner, property.name);
        Self::write_common(&target, attributes, node)?;
        Ok(PropertyFlags {
            required: attributes.required,
            nullable: attributes.nullable,
        })
    }
}

fn check_bounds(target: &str, keyword: &str, low: Option<f64>, high: Option<f64>) -> Result<()> {
    match (low, high) {
        (Some(low), Some(high)) if low > high => Err(SchemaError::metadata(
            target,
            format!("{keyword} bound {low} exceeds its upper bound {high}"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writes_keywords_for_present_attributes() {
        let def = TypeDefinition {
            attributes: Attributes::new()
                .with_title("Person")
                .with_description("A human")
                .closed(),
            ..TypeDefinition::new("Person")
        };
        let mut node = SchemaNode::new();
        let flags = AttributesProcessor.apply_type(&def, &mut node).unwrap();

        assert!(flags.closed);
        assert!(!flags.required);
        assert_eq!(
            node.to_value(),
            json!({ "title": "Person", "description": "A human" })
        );
    }

    #[test]
    fn accessor_attributes_take_precedence() {
        let owner = TypeName::from("Person");
        let field = FieldDef::new("age", "u32")
            .with_attributes(Attributes::new().with_description("from field"));
        let accessor =
            AccessorDef::getter("getAge").with_attributes(Attributes::new().required());
        let source = PropertySource {
            owner: &owner,
            name: "age",
            field: &field,
            accessor: &accessor,
        };

        let mut node = SchemaNode::new();
        let flags = AttributesProcessor.apply_property(&source, &mut node).unwrap();

        assert!(flags.required);
        assert!(node.get("description").is_none());
    }

    #[test]
    fn nullable_is_reported_not_written() {
        let def = TypeDefinition {
            attributes: Attributes::new().nullable(),
            ..TypeDefinition::new("Maybe")
        };
        let mut node = SchemaNode::new();
        let flags = AttributesProcessor.apply_type(&def, &mut node).unwrap();

        assert!(flags.nullable);
        assert!(node.is_empty());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let def = TypeDefinition {
            attributes: Attributes::new().with_range(Some(10.0), Some(1.0)),
            ..TypeDefinition::new("Broken")
        };
        let err = AttributesProcessor
            .apply_type(&def, &mut SchemaNode::new())
            .unwrap_err();
        assert!(matches!(err, SchemaError::Metadata { ref target, .. } if target == "Broken"));
    }
}
