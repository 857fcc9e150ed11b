use crate::{
    context::{Classified, SchemaContext},
    descriptor::TypeDescriptor,
    error::Result,
    metadata::PropertySource,
    node::{SchemaKind, SchemaNode, TAG_ITEMS, TAG_PROPERTIES},
    node_builder::{SchemaNodeBuilder, leaf_node},
    tracker::{ManagedReference, ReferenceTracker},
};

use super::{CompositeSchemaWrapper, PropertyDescriptor, ROOT_ID, discovery::Candidate};

/// Result of expanding one declared type.
struct Expanded {
    node: SchemaNode,
    /// The expanded composite carries a type-level required flag.
    required_by_type: bool,
    /// The expanded composite contributed nothing (see `is_empty_wrapper`).
    empty: bool,
}

impl Expanded {
    fn plain(node: SchemaNode) -> Self {
        Self {
            node,
            required_by_type: false,
            empty: false,
        }
    }
}

impl CompositeSchemaWrapper {
    /// Expand one discovered property. `None` when the property is elided
    /// under the empty-wrapper policy.
    pub(super) fn expand_property(
        &self,
        ctx: SchemaContext<'_>,
        tracker: &mut ReferenceTracker,
        candidate: Candidate<'_>,
        ordinal: usize,
    ) -> Result<Option<PropertyDescriptor>> {
        let property_id = format!(
            "{}/{}/{}",
            self.relative_id,
            TAG_PROPERTIES,
            escape_pointer_token(&candidate.name)
        );

        let expanded = expand_type(ctx, tracker, &candidate.field.ty, &property_id)?;
        if expanded.empty {
            return Ok(None);
        }

        let Expanded {
            mut node,
            required_by_type,
            ..
        } = expanded;

        let source = PropertySource {
            owner: &self.ty,
            name: &candidate.name,
            field: candidate.field,
            accessor: &candidate.accessor,
        };
        // Reference markers stay bare; their required flag still counts.
        let flags = if node.is_reference() {
            ctx.metadata.apply_property(&source, &mut SchemaNode::new())?
        } else {
            let flags = ctx.metadata.apply_property(&source, &mut node)?;
            if flags.nullable {
                node.make_nullable();
            }
            flags
        };

        Ok(Some(PropertyDescriptor {
            name: candidate.name,
            ty: candidate.field.ty.clone(),
            required: flags.required || required_by_type,
            ordinal,
            schema: node,
        }))
    }
}

/// Expand `descriptor` as the document root (`#`).
pub(crate) fn expand_root(
    ctx: SchemaContext<'_>,
    tracker: &mut ReferenceTracker,
    descriptor: &TypeDescriptor,
) -> Result<SchemaNode> {
    expand_type(ctx, tracker, descriptor, ROOT_ID).map(|expanded| expanded.node)
}

fn expand_type(
    ctx: SchemaContext<'_>,
    tracker: &mut ReferenceTracker,
    descriptor: &TypeDescriptor,
    id: &str,
) -> Result<Expanded> {
    match ctx.classify(descriptor) {
        Classified::Leaf(kind) => Ok(Expanded::plain(leaf_node(kind))),
        Classified::Unknown => SchemaNodeBuilder::new(ctx)
            .build_base(descriptor)
            .map(Expanded::plain),
        Classified::Array(element) => {
            let items_id = format!("{id}/{TAG_ITEMS}");
            let items = expand_type(ctx, tracker, element, &items_id)?;
            let mut node = SchemaNode::of_kind(SchemaKind::Array);
            node.set_items(items.node);
            Ok(Expanded {
                node,
                required_by_type: items.required_by_type,
                empty: false,
            })
        }
        Classified::Composite(definition) => {
            let (base, flags) = SchemaNodeBuilder::new(ctx).build_composite(definition)?;
            let reference =
                ManagedReference::new(definition.name.clone(), id).with_required(flags.required);

            match tracker.enter(reference) {
                Ok(mut guard) => {
                    let child = CompositeSchemaWrapper::wrap_base(
                        ctx,
                        definition,
                        (base, flags),
                        &mut guard,
                        Some(id),
                        false,
                    )?;
                    Ok(Expanded {
                        required_by_type: child.is_required(),
                        empty: child.is_empty_wrapper(),
                        node: child.into_node(),
                    })
                }
                Err(active) => {
                    tracing::debug!(
                        ty = %definition.name,
                        anchor = %active.anchor(),
                        at = %id,
                        "cycle detected, emitting reference"
                    );
                    Ok(Expanded {
                        node: SchemaNode::reference(active.anchor()),
                        required_by_type: active.is_required(),
                        empty: false,
                    })
                }
            }
        }
    }
}

/// JSON-Pointer escaping of a single reference token: `~` → `~0`,
/// `/` → `~1`.
pub fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}
