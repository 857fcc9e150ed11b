//! Unified error type exposed by **`typeschema-core`**.
//!
//! Collaborators (metadata processors, dynamic-member hooks) convert their
//! internal failures into one of these variants before they reach the
//! [`SchemaGenerator`](crate::generator::SchemaGenerator). Every variant is
//! fatal for the root type being generated: no partial schema is returned.

use thiserror::Error;

/// Boxed error returned by injected collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// The dynamic-member hook failed while contributing synthetic accessors
    /// for `type_name`.
    #[error("dynamic member discovery failed for `{type_name}`: {source}")]
    DynamicMembers {
        type_name: String,
        #[source]
        source: BoxError,
    },

    /// The metadata collaborator rejected a type or a property.
    #[error("metadata for `{target}` could not be applied: {message}")]
    Metadata { target: String, message: String },

    /// Failure while serialising a schema or loading a type table.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SchemaError {
    pub fn metadata(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Metadata {
            target: target.into(),
            message: message.into(),
        }
    }
}
