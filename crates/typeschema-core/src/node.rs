//! The output tree.
//!
//! A [`SchemaNode`] is a JSON object under construction. It owns its
//! children outright: attaching a property or an `items` schema moves the
//! child node into the parent, so the finished document is a strict tree.
//!
//! Keys are kept in the map's natural (sorted) order. Together with the
//! sorted property discovery this makes the serialised output a pure
//! function of the type graph.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const TAG_TYPE: &str = "type";
pub const TAG_PROPERTIES: &str = "properties";
pub const TAG_REQUIRED: &str = "required";
pub const TAG_ITEMS: &str = "items";
pub const TAG_REF: &str = "$ref";
pub const TAG_ADDITIONAL_PROPERTIES: &str = "additionalProperties";
pub const TAG_SCHEMA: &str = "$schema";
pub const TAG_DEFINITIONS: &str = "definitions";

/// JSON-Schema primitive classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
}

impl SchemaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::String => "string",
            SchemaKind::Integer => "integer",
            SchemaKind::Number => "number",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Null => "null",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaNode(Map<String, Value>);

impl SchemaNode {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn of_kind(kind: SchemaKind) -> Self {
        let mut node = Self::new();
        node.set_kind(kind);
        node
    }

    /// A reference marker: `{"$ref": target}` and nothing else.
    pub fn reference(target: impl Into<String>) -> Self {
        let mut node = Self::new();
        node.insert(TAG_REF, target.into());
        node
    }

    pub fn set_kind(&mut self, kind: SchemaKind) {
        self.insert(TAG_TYPE, kind.as_str());
    }

    pub fn kind(&self) -> Option<&str> {
        self.0.get(TAG_TYPE).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_reference(&self) -> bool {
        self.0.contains_key(TAG_REF)
    }

    /// Insert `schema` under `properties.<name>`, replacing any previous
    /// entry of the same name.
    pub fn set_property(&mut self, name: impl Into<String>, schema: SchemaNode) {
        let properties = self
            .0
            .entry(TAG_PROPERTIES)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = properties {
            map.insert(name.into(), schema.into_value());
        }
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.0
            .get(TAG_PROPERTIES)
            .and_then(Value::as_object)
            .and_then(|properties| properties.get(name))
    }

    pub fn property_count(&self) -> usize {
        self.0
            .get(TAG_PROPERTIES)
            .and_then(Value::as_object)
            .map_or(0, Map::len)
    }

    /// Append `name` to the `required` array. Duplicates are kept.
    pub fn add_required(&mut self, name: impl Into<String>) {
        let required = self
            .0
            .entry(TAG_REQUIRED)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(names) = required {
            names.push(Value::String(name.into()));
        }
    }

    pub fn set_items(&mut self, items: SchemaNode) {
        self.insert(TAG_ITEMS, items.into_value());
    }

    /// Widen `type` so that `null` is accepted as well. Untyped nodes
    /// already accept `null` and are left alone.
    pub fn make_nullable(&mut self) {
        let Some(value) = self.0.get_mut(TAG_TYPE) else {
            return;
        };
        match value {
            Value::String(kind) if kind.as_str() != SchemaKind::Null.as_str() => {
                let kind = std::mem::take(kind);
                *value = Value::Array(vec![
                    Value::String(kind),
                    Value::from(SchemaKind::Null.as_str()),
                ]);
            }
            Value::Array(kinds)
                if !kinds
                    .iter()
                    .any(|kind| kind.as_str() == Some(SchemaKind::Null.as_str())) =>
            {
                kinds.push(Value::from(SchemaKind::Null.as_str()));
            }
            _ => {}
        }
    }

    /// A node that says nothing beyond a single `type`: no properties, no
    /// metadata, no restrictions. `informational` names one extra keyword
    /// that does not constrain instances and is ignored by the check.
    pub fn is_degenerate(&self, informational: Option<&str>) -> bool {
        self.0.get(TAG_TYPE).is_none_or(Value::is_string)
            && self
                .0
                .keys()
                .all(|key| key == TAG_TYPE || Some(key.as_str()) == informational)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<SchemaNode> for Value {
    fn from(node: SchemaNode) -> Self {
        node.into_value()
    }
}

impl From<Map<String, Value>> for SchemaNode {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
