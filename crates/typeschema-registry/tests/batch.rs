mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use typeschema_core::{descriptor::TypeDescriptor, metadata::Attributes};
use typeschema_registry::{DefinitionBuilder, DefinitionsBatch, TypeRegistry};

use common::{generator, tree_registry};

fn people() -> TypeRegistry {
    TypeRegistry::with_primitives()
        .with_definition(DefinitionBuilder::new("Address").property("city", "String").build())
        .with_definition(
            DefinitionBuilder::new("Person")
                .property("home", "Address")
                .property("work", "Address")
                .property("name", "String")
                .build(),
        )
}

#[test]
fn shared_types_are_referenced_from_definitions() -> anyhow::Result<()> {
    let schema = DefinitionsBatch::new()
        .with("Address")
        .build(&generator(people()), "Person")?;

    assert_eq!(
        schema.to_value(),
        json!({
            "type": "object",
            "properties": {
                "home": { "$ref": "#/definitions/Address" },
                "name": { "type": "string" },
                "work": { "$ref": "#/definitions/Address" }
            },
            "definitions": {
                "Address": {
                    "type": "object",
                    "properties": { "city": { "type": "string" } }
                }
            }
        })
    );
    Ok(())
}

/// `Address` is required wherever it is declared and links to itself.
fn linked_addresses() -> TypeRegistry {
    TypeRegistry::with_primitives()
        .with_definition(
            DefinitionBuilder::new("Address")
                .property("city", "String")
                .property("next", "Address")
                .attributes(Attributes::new().required())
                .build(),
        )
        .with_definition(
            DefinitionBuilder::new("Person")
                .property("home", "Address")
                .property("name", "String")
                .build(),
        )
}

#[test]
fn batching_keeps_required_lists_of_references() -> anyhow::Result<()> {
    let generator = generator(linked_addresses());
    let inline = generator.generate("Person")?;
    let batched = DefinitionsBatch::new()
        .with("Address")
        .build(&generator, "Person")?;

    assert_eq!(
        batched.to_value(),
        json!({
            "type": "object",
            "properties": {
                "home": { "$ref": "#/definitions/Address" },
                "name": { "type": "string" }
            },
            "required": ["home"],
            "definitions": {
                "Address": {
                    "type": "object",
                    "properties": {
                        "city": { "type": "string" },
                        "next": { "$ref": "#/definitions/Address" }
                    },
                    "required": ["next"]
                }
            }
        })
    );
    assert_eq!(batched.get("required"), inline.get("required"));
    Ok(())
}

#[test]
fn definition_anchors_are_pointer_escaped() -> anyhow::Result<()> {
    let registry = TypeRegistry::with_primitives()
        .with_definition(DefinitionBuilder::new("geo/Point").property("x", "f64").build())
        .with_definition(DefinitionBuilder::new("Shape").property("origin", "geo/Point").build());

    let schema = DefinitionsBatch::new()
        .with("geo/Point")
        .build(&generator(registry), "Shape")?;

    let value = schema.to_value();
    assert_eq!(
        value["properties"]["origin"],
        json!({ "$ref": "#/definitions/geo~1Point" })
    );
    assert_eq!(value["definitions"]["geo/Point"]["properties"]["x"], json!({ "type": "number" }));
    Ok(())
}

#[test]
fn batched_root_becomes_a_reference() -> anyhow::Result<()> {
    let schema = DefinitionsBatch::new()
        .with("Node")
        .build(&generator(tree_registry()), "Node")?;

    assert_eq!(
        schema.to_value(),
        json!({
            "$ref": "#/definitions/Node",
            "definitions": {
                "Node": {
                    "type": "object",
                    "properties": {
                        "children": {
                            "type": "array",
                            "items": { "$ref": "#/definitions/Node" }
                        },
                        "id": { "type": "string" }
                    }
                }
            }
        })
    );
    Ok(())
}

#[test]
fn definitions_reference_each_other() -> anyhow::Result<()> {
    let schema = DefinitionsBatch::new()
        .with("Person")
        .with("Address")
        .with("Person")
        .build(&generator(people()), TypeDescriptor::array_of("Person"))?;

    let value = schema.to_value();
    assert_eq!(value["items"], json!({ "$ref": "#/definitions/Person" }));
    assert_eq!(
        value["definitions"]["Person"]["properties"]["home"],
        json!({ "$ref": "#/definitions/Address" })
    );
    assert_eq!(
        value["definitions"].as_object().map(|d| d.len()),
        Some(2)
    );
    Ok(())
}

#[test]
fn empty_batch_adds_no_definitions() -> anyhow::Result<()> {
    let generator = generator(people());
    let batched = DefinitionsBatch::new().build(&generator, "Person")?;
    assert_eq!(batched, generator.generate("Person")?);
    assert!(batched.get("definitions").is_none());
    Ok(())
}

#[test]
fn type_table_drives_generation() -> anyhow::Result<()> {
    let registry = TypeRegistry::from_json(
        r#"{
            "enums": { "Color": ["red", "green"] },
            "types": [
                { "name": "Pixel",
                  "fields": [
                    { "name": "color", "ty": "Color" },
                    { "name": "neighbours", "ty": { "array": "Pixel" } }
                  ],
                  "accessors": [ { "name": "getColor" }, { "name": "getNeighbours" } ],
                  "attributes": { "additionalProperties": false } }
            ]
        }"#,
    )?;

    let schema = generator(registry).generate("Pixel")?;
    assert_eq!(
        schema.to_value(),
        json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "color": { "type": "string", "enum": ["red", "green"] },
                "neighbours": { "type": "array", "items": { "$ref": "#" } }
            }
        })
    );
    Ok(())
}
