//! Property discovery: pair getter-style accessors with declared fields.
//!
//! Accessors are sorted by name before matching. That sort is the only
//! source of property ordering; introspection order is never trusted.
use std::collections::HashSet;

use crate::{
    context::SchemaContext,
    descriptor::{AccessorDef, AccessorOrigin, FieldDef, TypeDefinition},
    error::{Result, SchemaError},
};

const GETTER_PREFIXES: [&str; 2] = ["get", "is"];

/// An accessor and the field it was matched to.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub name: String,
    pub accessor: AccessorDef,
    pub field: &'a FieldDef,
}

pub fn find_properties<'a>(
    ctx: &SchemaContext<'a>,
    definition: &'a TypeDefinition,
) -> Result<Vec<Candidate<'a>>> {
    let mut chain = ctx.introspector.ancestry(&definition.name);
    if chain.is_empty() {
        chain.push(definition);
    }

    let fields: Vec<&'a FieldDef> = chain
        .iter()
        .copied()
        .flat_map(|def| def.fields.iter())
        .collect();

    // Most-derived declaration wins for overridden accessors.
    let mut seen = HashSet::new();
    let mut accessors: Vec<AccessorDef> = chain
        .iter()
        .flat_map(|def| def.accessors.iter())
        .filter(|accessor| seen.insert(accessor.name.clone()))
        .cloned()
        .collect();

    if let Some(hook) = ctx.dynamic_members {
        let dynamic = hook
            .dynamic_accessors(definition)
            .map_err(|source| SchemaError::DynamicMembers {
                type_name: definition.name.to_string(),
                source,
            })?;
        tracing::trace!(ty = %definition.name, count = dynamic.len(), "dynamic accessors");
        accessors.extend(dynamic);
    }

    accessors.sort_by(|a, b| a.name.cmp(&b.name));

    let mut candidates = Vec::new();
    for accessor in accessors {
        if !is_eligible(&accessor) {
            continue;
        }
        let Some(name) = property_name(&accessor.name) else {
            continue;
        };
        let wanted = name.to_lowercase();
        let field = fields
            .iter()
            .copied()
            .find(|field| field.name.to_lowercase() == wanted);
        match field {
            Some(field) => candidates.push(Candidate {
                name,
                accessor,
                field,
            }),
            None => {
                tracing::trace!(
                    ty = %definition.name,
                    accessor = %accessor.name,
                    "no matching field"
                );
            }
        }
    }
    Ok(candidates)
}

fn is_eligible(accessor: &AccessorDef) -> bool {
    accessor.origin == AccessorOrigin::Declared && accessor.params == 0 && !accessor.is_static
}

/// `getFirstName` → `firstName`, `isActive` → `active`. Returns `None` for
/// names that are not getters or consist of the prefix alone.
pub fn property_name(accessor: &str) -> Option<String> {
    GETTER_PREFIXES.iter().find_map(|prefix| {
        let rest = accessor.strip_prefix(prefix)?;
        let mut chars = rest.chars();
        let first = chars.next()?;
        Some(first.to_lowercase().chain(chars).collect())
    })
}
