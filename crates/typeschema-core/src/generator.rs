//! Entry point that owns the collaborators and runs root generations.
//!
//! ```rust
//! use std::sync::Arc;
//! use typeschema_core::{
//!     generator::SchemaGeneratorBuilder,
//!     introspect::{LeafClassifier, LeafKind, TypeIntrospector},
//!     descriptor::{TypeDefinition, TypeName},
//! };
//!
//! struct Empty;
//!
//! impl TypeIntrospector for Empty {
//!     fn definition(&self, _: &TypeName) -> Option<&TypeDefinition> { None }
//! }
//! impl LeafClassifier for Empty {
//!     fn classify(&self, _: &TypeName) -> Option<LeafKind> { None }
//! }
//!
//! let generator = SchemaGeneratorBuilder::new(Arc::new(Empty)).build().unwrap();
//! let schema = generator.generate("Anything").unwrap();
//! assert!(schema.is_empty());
//! ```
//!
//! Every call to [`SchemaGenerator::generate`] starts from an empty
//! [`ReferenceTracker`], so independent generations never influence each
//! other. Use [`SchemaGenerator::generate_with_tracker`] to share cycle
//! suppression across several roots on purpose.
use std::{env, sync::Arc};

use crate::{
    context::{Classified, SchemaContext},
    descriptor::{TypeDescriptor, TypeName},
    error::{Result, SchemaError},
    introspect::{DynamicMembers, LeafClassifier, TypeIntrospector},
    metadata::{AttributesProcessor, MetadataProcessor, TypeFlags},
    node::{
        SchemaNode, TAG_ADDITIONAL_PROPERTIES, TAG_DEFINITIONS, TAG_ITEMS, TAG_PROPERTIES, TAG_REF,
        TAG_REQUIRED, TAG_SCHEMA, TAG_TYPE,
    },
    node_builder::SchemaNodeBuilder,
    tracker::ReferenceTracker,
    wrapper::{CompositeSchemaWrapper, expand_root},
};

/// Environment variable read by [`SchemaGeneratorBuilder::new_from_env`].
pub const SCHEMA_URI_ENV: &str = "TYPESCHEMA_SCHEMA_URI";

/// Environment variable naming the type identity keyword, see
/// [`SchemaGeneratorBuilder::with_type_identity`].
pub const TYPE_IDENTITY_ENV: &str = "TYPESCHEMA_TYPE_IDENTITY";

/// Conventional keyword for the type identity of composite nodes.
pub const DEFAULT_IDENTITY_KEYWORD: &str = "x-type-name";

/// Keywords the generator writes itself; an identity keyword may not clash.
const RESERVED_KEYWORDS: &[&str] = &[
    TAG_TYPE,
    TAG_PROPERTIES,
    TAG_REQUIRED,
    TAG_ITEMS,
    TAG_REF,
    TAG_ADDITIONAL_PROPERTIES,
    TAG_SCHEMA,
    TAG_DEFINITIONS,
];

pub const DRAFT_07_URI: &str = "http://json-schema.org/draft-07/schema#";

/// Produces schemas for the types known to its introspector.
///
/// Cloning is cheap; collaborators sit behind `Arc`s.
#[derive(Clone)]
pub struct SchemaGenerator {
    introspector: Arc<dyn TypeIntrospector>,
    leaves: Arc<dyn LeafClassifier>,
    metadata: Arc<dyn MetadataProcessor>,
    dynamic_members: Option<Arc<dyn DynamicMembers>>,
    schema_uri: Option<String>,
    identity_keyword: Option<String>,
}

impl std::fmt::Debug for SchemaGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaGenerator")
            .field("dynamic_members", &self.dynamic_members.is_some())
            .field("schema_uri", &self.schema_uri)
            .field("identity_keyword", &self.identity_keyword)
            .finish_non_exhaustive()
    }
}

impl SchemaGenerator {
    pub fn builder<R>(types: Arc<R>) -> SchemaGeneratorBuilder
    where
        R: TypeIntrospector + LeafClassifier + 'static,
    {
        SchemaGeneratorBuilder::new(types)
    }

    /// Borrow the collaborators for one traversal.
    pub fn context(&self) -> SchemaContext<'_> {
        SchemaContext {
            introspector: self.introspector.as_ref(),
            leaves: self.leaves.as_ref(),
            metadata: self.metadata.as_ref(),
            dynamic_members: self.dynamic_members.as_deref(),
            identity_keyword: self.identity_keyword.as_deref(),
        }
    }

    pub fn schema_uri(&self) -> Option<&str> {
        self.schema_uri.as_deref()
    }

    pub fn identity_keyword(&self) -> Option<&str> {
        self.identity_keyword.as_deref()
    }

    /// Type-level flags the metadata processor reports for `name`. Leaves
    /// and unknown names report the defaults.
    pub fn type_flags(&self, name: &TypeName) -> Result<TypeFlags> {
        let descriptor = TypeDescriptor::Named(name.clone());
        let ctx = self.context();
        match ctx.classify(&descriptor) {
            Classified::Composite(definition) => SchemaNodeBuilder::new(ctx)
                .build_composite(definition)
                .map(|(_, flags)| flags),
            _ => Ok(TypeFlags::default()),
        }
    }

    /// Schema document for `root`, generated with a fresh tracker.
    pub fn generate(&self, root: impl Into<TypeDescriptor>) -> Result<SchemaNode> {
        let mut tracker = ReferenceTracker::new();
        self.generate_with_tracker(root, &mut tracker)
    }

    /// Like [`generate`](Self::generate) but with a caller-owned tracker.
    /// Types already held on `tracker` are emitted as references to their
    /// recorded anchors. The tracker is returned to its prior contents even
    /// when generation fails.
    pub fn generate_with_tracker(
        &self,
        root: impl Into<TypeDescriptor>,
        tracker: &mut ReferenceTracker,
    ) -> Result<SchemaNode> {
        let root = root.into();
        tracing::debug!(root = %root.element_name(), "generating schema");

        let mut node = expand_root(self.context(), tracker, &root)?;
        if let Some(uri) = &self.schema_uri {
            node.insert(TAG_SCHEMA, uri.clone());
        }
        Ok(node)
    }

    /// Wrap `name` under `token` without acquiring it on `tracker`. Used for
    /// types the caller has already placed on the tracker itself, e.g. shared
    /// definitions whose anchors point outside the root document.
    pub fn wrap_anchored(
        &self,
        name: &TypeName,
        token: &str,
        tracker: &mut ReferenceTracker,
    ) -> Result<SchemaNode> {
        let descriptor = TypeDescriptor::Named(name.clone());
        let ctx = self.context();
        match ctx.classify(&descriptor) {
            Classified::Composite(definition) => {
                CompositeSchemaWrapper::wrap(ctx, definition, tracker, Some(token), false)
                    .map(CompositeSchemaWrapper::into_node)
            }
            _ => SchemaNodeBuilder::new(ctx).build_base(&descriptor),
        }
    }

    /// The object shell of `name`: type-level metadata only, no properties.
    pub fn shell(&self, name: impl Into<TypeName>) -> Result<SchemaNode> {
        let descriptor = TypeDescriptor::Named(name.into());
        let ctx = self.context();
        match ctx.classify(&descriptor) {
            Classified::Composite(definition) => {
                let mut tracker = ReferenceTracker::new();
                CompositeSchemaWrapper::wrap(ctx, definition, &mut tracker, None, true)
                    .map(CompositeSchemaWrapper::into_node)
            }
            _ => SchemaNodeBuilder::new(ctx).build_base(&descriptor),
        }
    }

    pub fn to_json_pretty(&self, node: &SchemaNode) -> Result<String> {
        Ok(serde_json::to_string_pretty(node)?)
    }
}

/// Builder for [`SchemaGenerator`].
///
/// # Typical usage
///
/// ```rust,ignore
/// let generator = SchemaGeneratorBuilder::new_from_env(Arc::new(registry))
///     .with_metadata(AttributesProcessor)
///     .build()?;
/// ```
///
/// Without an explicit processor the builder installs
/// [`AttributesProcessor`]; no dynamic-member hook is installed by default.
pub struct SchemaGeneratorBuilder {
    introspector: Arc<dyn TypeIntrospector>,
    leaves: Arc<dyn LeafClassifier>,
    metadata: Option<Arc<dyn MetadataProcessor>>,
    dynamic_members: Option<Arc<dyn DynamicMembers>>,
    schema_uri: Option<String>,
    identity_keyword: Option<String>,
}

impl SchemaGeneratorBuilder {
    /// Use `types` both as introspector and as leaf classifier.
    pub fn new<R>(types: Arc<R>) -> Self
    where
        R: TypeIntrospector + LeafClassifier + 'static,
    {
        let introspector: Arc<dyn TypeIntrospector> = types.clone();
        let leaves: Arc<dyn LeafClassifier> = types;
        Self::from_parts(introspector, leaves)
    }

    pub fn from_parts(
        introspector: Arc<dyn TypeIntrospector>,
        leaves: Arc<dyn LeafClassifier>,
    ) -> Self {
        Self {
            introspector,
            leaves,
            metadata: None,
            dynamic_members: None,
            schema_uri: None,
            identity_keyword: None,
        }
    }

    /// Like [`Self::new`], additionally reading the `$schema` URI from
    /// `TYPESCHEMA_SCHEMA_URI` and the type identity keyword from
    /// `TYPESCHEMA_TYPE_IDENTITY`. Unset or blank variables leave the
    /// respective feature off.
    pub fn new_from_env<R>(types: Arc<R>) -> Self
    where
        R: TypeIntrospector + LeafClassifier + 'static,
    {
        let mut builder = Self::new(types);
        builder.schema_uri = non_blank_var(SCHEMA_URI_ENV);
        builder.identity_keyword = non_blank_var(TYPE_IDENTITY_ENV);
        builder
    }

    pub fn with_metadata(mut self, metadata: impl MetadataProcessor + 'static) -> Self {
        self.metadata = Some(Arc::new(metadata));
        self
    }

    pub fn with_dynamic_members(mut self, hook: impl DynamicMembers + 'static) -> Self {
        self.dynamic_members = Some(Arc::new(hook));
        self
    }

    pub fn with_leaf_classifier(mut self, leaves: Arc<dyn LeafClassifier>) -> Self {
        self.leaves = leaves;
        self
    }

    /// Stamp `$schema` on every generated root document.
    pub fn with_schema_uri(mut self, uri: impl Into<String>) -> Self {
        self.schema_uri = Some(uri.into());
        self
    }

    /// Record the type name of every composite node under `keyword`, e.g.
    /// [`DEFAULT_IDENTITY_KEYWORD`]. The keyword is informational: it does
    /// not keep an otherwise empty composite from being elided.
    pub fn with_type_identity(mut self, keyword: impl Into<String>) -> Self {
        self.identity_keyword = Some(keyword.into());
        self
    }

    /// Finalise the builder.
    ///
    /// # Errors
    ///
    /// * [`SchemaError::InvalidConfig`] – if the `$schema` URI has no scheme,
    ///   or the identity keyword is blank or one the generator writes itself.
    pub fn build(self) -> Result<SchemaGenerator> {
        if let Some(uri) = &self.schema_uri {
            if !uri.contains("://") {
                return Err(SchemaError::InvalidConfig(format!(
                    "`$schema` must be an absolute URI, got `{uri}`"
                )));
            }
        }
        if let Some(keyword) = &self.identity_keyword {
            if keyword.trim().is_empty() || RESERVED_KEYWORDS.contains(&keyword.as_str()) {
                return Err(SchemaError::InvalidConfig(format!(
                    "`{keyword}` cannot be used as the type identity keyword"
                )));
            }
        }

        Ok(SchemaGenerator {
            introspector: self.introspector,
            leaves: self.leaves,
            metadata: self
                .metadata
                .unwrap_or_else(|| Arc::new(AttributesProcessor)),
            dynamic_members: self.dynamic_members,
            schema_uri: self.schema_uri,
            identity_keyword: self.identity_keyword,
        })
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
