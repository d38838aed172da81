//! Error types for record lookup and top-level resolution.

/// Failure of a [`RecordLookup`](crate::RecordLookup) call.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// No definition with this qualified name exists in the registry.
    #[error("interface type '{name}' not found")]
    NotFound { name: String },

    /// A definition exists but could not be loaded or is malformed.
    #[error("failed to load interface type '{name}': {source}")]
    Unavailable {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl LookupError {
    pub fn not_found(name: impl Into<String>) -> Self {
        LookupError::NotFound { name: name.into() }
    }

    pub fn unavailable(
        name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        LookupError::Unavailable {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Qualified name the failed lookup was made for.
    pub fn name(&self) -> &str {
        match self {
            LookupError::NotFound { name } | LookupError::Unavailable { name, .. } => name,
        }
    }
}

/// Failure of [`SchemaComposer::resolve`](crate::SchemaComposer::resolve).
///
/// Only the requested type itself can fail; problems with nested fields are
/// absorbed into best-effort schema nodes.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// The requested record, service or action (or one of its direct
    /// sub-records) could not be loaded.
    #[error("Failed to get schema for '{name}': {source}")]
    TypeNotFound {
        name: String,
        #[source]
        source: LookupError,
    },

    /// The name carries none of the `/msg/`, `/srv/`, `/action/` markers.
    #[error(
        "Unknown type category for '{name}'. Expected /msg/, /srv/, or /action/ in type name."
    )]
    UnrecognizedCategory { name: String },
}

impl ResolutionError {
    /// The type name the caller asked for.
    pub fn type_name(&self) -> &str {
        match self {
            ResolutionError::TypeNotFound { name, .. }
            | ResolutionError::UnrecognizedCategory { name } => name,
        }
    }
}

/// Error raised while reading an interface definition file.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct DefinitionError(pub String);

impl From<String> for DefinitionError {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DefinitionError {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
