mod common;

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::json;
use typeschema_core::{
    SchemaGenerator,
    descriptor::{AccessorDef, AccessorOrigin, TypeDefinition},
    error::BoxError,
    introspect::{DynamicMembers, TypeIntrospector},
    metadata::Attributes,
    tracker::ReferenceTracker,
    wrapper::CompositeSchemaWrapper,
};
use typeschema_registry::{DefinitionBuilder, TypeRegistry};

use common::generator;

#[test]
fn only_declared_parameterless_instance_getters_become_properties() -> anyhow::Result<()> {
    let registry = TypeRegistry::with_primitives().with_definition(
        DefinitionBuilder::new("Widget")
            .field("class", "String")
            .field("size", "u32")
            .field("value", "String")
            .field("shared", "String")
            .field("secret", "String")
            .accessor(AccessorDef::getter("getClass").with_origin(AccessorOrigin::RootAncestor))
            .accessor(
                AccessorDef::getter("getSize").with_origin(AccessorOrigin::CollectionProtocol),
            )
            .accessor(AccessorDef::getter("getValue").with_params(1))
            .accessor(AccessorDef::getter("getShared").with_static(true))
            .getter("fetchSecret")
            .getter("getComputed")
            .flag("active")
            .build(),
    );

    let schema = generator(registry).generate("Widget")?;
    assert_eq!(
        schema.to_value(),
        json!({
            "type": "object",
            "properties": { "active": { "type": "boolean" } }
        })
    );
    Ok(())
}

#[test]
fn bare_prefixes_are_not_getters() -> anyhow::Result<()> {
    let registry = TypeRegistry::with_primitives().with_definition(
        DefinitionBuilder::new("Odd")
            .field("", "String")
            .getter("get")
            .getter("is")
            .build(),
    );

    let schema = generator(registry).generate("Odd")?;
    assert_eq!(schema.property_count(), 0);
    Ok(())
}

#[test]
fn field_matching_ignores_case() -> anyhow::Result<()> {
    let registry = TypeRegistry::with_primitives().with_definition(
        DefinitionBuilder::new("Link")
            .field("URL", "String")
            .getter("getURL")
            .build(),
    );

    let schema = generator(registry).generate("Link")?;
    assert_eq!(schema.property("uRL"), Some(&json!({ "type": "string" })));
    Ok(())
}

#[test]
fn inherited_members_are_discovered() -> anyhow::Result<()> {
    let registry = TypeRegistry::with_primitives()
        .with_definition(DefinitionBuilder::new("Base").property("id", "u64").build())
        .with_definition(
            DefinitionBuilder::new("Child")
                .extends("Base")
                .property("name", "String")
                .build(),
        );

    let schema = generator(registry).generate("Child")?;
    assert_eq!(
        schema.to_value(),
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "name": { "type": "string" }
            }
        })
    );
    Ok(())
}

#[test]
fn overriding_accessor_wins_over_inherited_one() -> anyhow::Result<()> {
    let registry = TypeRegistry::with_primitives()
        .with_definition(DefinitionBuilder::new("Base").property("id", "u64").build())
        .with_definition(
            DefinitionBuilder::new("Child")
                .extends("Base")
                .accessor(
                    AccessorDef::getter("getId")
                        .with_attributes(Attributes::new().with_description("Child id")),
                )
                .build(),
        );

    let schema = generator(registry).generate("Child")?;
    assert_eq!(
        schema.property("id"),
        Some(&json!({ "type": "integer", "description": "Child id" }))
    );
    Ok(())
}

struct ExtraGetter;

impl DynamicMembers for ExtraGetter {
    fn dynamic_accessors(
        &self,
        definition: &TypeDefinition,
    ) -> Result<Vec<AccessorDef>, BoxError> {
        if definition.name.as_str() == "Record" {
            Ok(vec![AccessorDef::getter("getExtra")])
        } else {
            Ok(Vec::new())
        }
    }
}

#[test]
fn dynamic_accessors_are_matched_like_declared_ones() -> anyhow::Result<()> {
    let registry = TypeRegistry::with_primitives().with_definition(
        DefinitionBuilder::new("Record")
            .field("extra", "String")
            .property("id", "u64")
            .build(),
    );
    let generator = SchemaGenerator::builder(Arc::new(registry))
        .with_dynamic_members(ExtraGetter)
        .build()?;

    let schema = generator.generate("Record")?;
    assert_eq!(schema.property("extra"), Some(&json!({ "type": "string" })));
    assert_eq!(schema.property_count(), 2);
    Ok(())
}

#[test]
fn wrapper_reports_properties_in_accessor_order() -> anyhow::Result<()> {
    let registry = TypeRegistry::with_primitives().with_definition(
        DefinitionBuilder::new("Sample")
            .property("zeta", "String")
            .flag("beta")
            .property("alpha", "u8")
            .build(),
    );
    let definition = registry
        .definition(&"Sample".into())
        .cloned()
        .expect("registered above");
    let generator = generator(registry);

    let mut tracker = ReferenceTracker::new();
    let wrapper =
        CompositeSchemaWrapper::wrap(generator.context(), &definition, &mut tracker, None, false)?;

    // getAlpha < getZeta < isBeta
    let order: Vec<(&str, usize)> = wrapper
        .iter()
        .map(|property| (property.name.as_str(), property.ordinal))
        .collect();
    assert_eq!(order, [("alpha", 0), ("zeta", 1), ("beta", 2)]);
    assert_eq!(wrapper.relative_id(), "#");
    assert!(!wrapper.is_empty_wrapper());
    Ok(())
}

#[test]
fn path_tokens_extend_or_replace_the_identifier() -> anyhow::Result<()> {
    let registry = TypeRegistry::with_primitives()
        .with_definition(DefinitionBuilder::new("Empty").build());
    let definition = registry
        .definition(&"Empty".into())
        .cloned()
        .expect("registered above");
    let generator = generator(registry);
    let mut tracker = ReferenceTracker::new();

    let appended = CompositeSchemaWrapper::wrap(
        generator.context(),
        &definition,
        &mut tracker,
        Some("definitions/Empty"),
        false,
    )?;
    assert_eq!(appended.relative_id(), "#/definitions/Empty");

    let replaced = CompositeSchemaWrapper::wrap(
        generator.context(),
        &definition,
        &mut tracker,
        Some("#/properties/x"),
        false,
    )?;
    assert_eq!(replaced.relative_id(), "#/properties/x");
    assert!(replaced.is_empty_wrapper());
    Ok(())
}
