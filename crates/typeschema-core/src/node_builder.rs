//! Base nodes for single types. No recursion and no property logic happen
//! here; composites come out as bare `{"type":"object"}` shells decorated
//! with their identity keyword (when configured), their type-level metadata
//! and, for nullable types, `"type": ["object", "null"]`.
use crate::{
    context::{Classified, SchemaContext},
    descriptor::{TypeDefinition, TypeDescriptor},
    error::Result,
    introspect::LeafKind,
    metadata::TypeFlags,
    node::{SchemaKind, SchemaNode},
};

#[derive(Clone, Copy)]
pub struct SchemaNodeBuilder<'a> {
    ctx: SchemaContext<'a>,
}

impl<'a> SchemaNodeBuilder<'a> {
    pub fn new(ctx: SchemaContext<'a>) -> Self {
        Self { ctx }
    }

    /// Minimal node for `descriptor`. Types that cannot be classified
    /// produce an untyped `{}` node rather than an error.
    pub fn build_base(&self, descriptor: &TypeDescriptor) -> Result<SchemaNode> {
        match self.ctx.classify(descriptor) {
            Classified::Leaf(kind) => Ok(leaf_node(kind)),
            Classified::Array(_) => Ok(SchemaNode::of_kind(SchemaKind::Array)),
            Classified::Composite(def) => self.build_composite(def).map(|(node, _)| node),
            Classified::Unknown => {
                tracing::debug!(
                    ty = %descriptor.element_name(),
                    "unclassified type, emitting untyped node"
                );
                Ok(SchemaNode::new())
            }
        }
    }

    /// Object node for a composite plus the flags its metadata reported.
    pub fn build_composite(&self, definition: &TypeDefinition) -> Result<(SchemaNode, TypeFlags)> {
        let mut node = SchemaNode::of_kind(SchemaKind::Object);
        if let Some(keyword) = self.ctx.identity_keyword {
            node.insert(keyword, definition.name.as_str());
        }
        let flags = self.ctx.metadata.apply_type(definition, &mut node)?;
        if flags.nullable {
            node.make_nullable();
        }
        Ok((node, flags))
    }
}

pub fn leaf_node(kind: LeafKind) -> SchemaNode {
    match kind {
        LeafKind::Primitive(kind) => SchemaNode::of_kind(kind),
        LeafKind::Enum(values) => {
            let mut node = SchemaNode::of_kind(SchemaKind::String);
            node.insert("enum", values);
            node
        }
        LeafKind::Schema(node) => node,
        LeafKind::Untyped => SchemaNode::new(),
    }
}
