use crate::{
    descriptor::{TypeDefinition, TypeDescriptor},
    introspect::{DynamicMembers, LeafClassifier, LeafKind, TypeIntrospector},
    metadata::MetadataProcessor,
};

/// Borrowed bundle of collaborators threaded through one generation.
#[derive(Clone, Copy)]
pub struct SchemaContext<'a> {
    pub introspector: &'a dyn TypeIntrospector,
    pub leaves: &'a dyn LeafClassifier,
    pub metadata: &'a dyn MetadataProcessor,
    pub dynamic_members: Option<&'a dyn DynamicMembers>,
    /// Keyword under which composite nodes record their type name.
    pub identity_keyword: Option<&'a str>,
}

/// How a [`TypeDescriptor`] is going to be rendered.
#[derive(Debug)]
pub enum Classified<'a> {
    Leaf(LeafKind),
    Array(&'a TypeDescriptor),
    Composite(&'a TypeDefinition),
    /// Neither a known leaf nor a registered composite.
    Unknown,
}

impl<'a> SchemaContext<'a> {
    pub fn new(
        introspector: &'a dyn TypeIntrospector,
        leaves: &'a dyn LeafClassifier,
        metadata: &'a dyn MetadataProcessor,
    ) -> Self {
        Self {
            introspector,
            leaves,
            metadata,
            dynamic_members: None,
            identity_keyword: None,
        }
    }

    pub fn with_dynamic_members(mut self, hook: &'a dyn DynamicMembers) -> Self {
        self.dynamic_members = Some(hook);
        self
    }

    pub fn with_identity_keyword(mut self, keyword: &'a str) -> Self {
        self.identity_keyword = Some(keyword);
        self
    }

    /// Leaf classification wins over a composite definition of the same name.
    pub fn classify<'d>(&self, descriptor: &'d TypeDescriptor) -> Classified<'d>
    where
        'a: 'd,
    {
        match descriptor {
            TypeDescriptor::Array { array } => Classified::Array(array),
            TypeDescriptor::Named(name) => {
                if let Some(kind) = self.leaves.classify(name) {
                    Classified::Leaf(kind)
                } else if let Some(def) = self.introspector.definition(name) {
                    Classified::Composite(def)
                } else {
                    Classified::Unknown
                }
            }
        }
    }
}
