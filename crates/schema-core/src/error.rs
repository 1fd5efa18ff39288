//! Error types for schema construction, generation and evaluation.

use std::path::PathBuf;

/// Error raised by a generator while producing a single value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// A lazy generator read a path that does not exist in the eager context
    #[error("Lookup failed: no value at '{path}' in the eager context")]
    Lookup { path: String },

    /// The generator could not produce a value for its arguments
    #[error("Generator '{generator}' failed: {reason}")]
    Failed { generator: String, reason: String },

    /// The holder has no generator registered under this name
    #[error("Unknown generator: {0}")]
    UnknownGenerator(String),

    /// A required argument was not supplied
    #[error("Generator '{generator}' requires argument '{argument}'")]
    MissingArgument { generator: String, argument: String },

    /// An argument was supplied with the wrong shape
    #[error("Generator '{generator}' expects argument '{argument}' to be {expected}")]
    InvalidArgument {
        generator: String,
        argument: String,
        expected: &'static str,
    },

    /// An eager invocation asked for the eager context
    #[error("Generator '{0}' needs the eager context but was invoked eagerly")]
    MissingEagerContext(String),
}

impl GenerationError {
    /// Shorthand for [`GenerationError::Failed`].
    pub fn failed(generator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            generator: generator.into(),
            reason: reason.into(),
        }
    }
}

/// Error returned by [`EvaluatedSchema::create`](crate::EvaluatedSchema::create).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    /// A leaf's generator failed; `path` is the dotted path of the leaf
    #[error("Field '{path}': {source}")]
    Field {
        path: String,
        #[source]
        source: GenerationError,
    },

    /// Eager and lazy results both defined a non-group value at `path`
    #[error("Eager and lazy results collide at '{path}'")]
    MergeConflict { path: String },
}

impl EvaluationError {
    /// True when the failure is a missing eager-context lookup.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::Field {
                source: GenerationError::Lookup { .. },
                ..
            }
        )
    }

    /// The underlying generation error, if any.
    pub fn generation_error(&self) -> Option<&GenerationError> {
        match self {
            Self::Field { source, .. } => Some(source),
            Self::MergeConflict { .. } => None,
        }
    }
}

/// Error type for schema construction and loading.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A node that is neither a group nor a leaf
    #[error("Malformed schema node at '{path}': {reason}")]
    Malformed { path: String, reason: String },

    /// A static argument uses the name reserved for the eager context
    #[error("Argument name '{argument}' is reserved (leaf '{generator}')")]
    ReservedArgument { generator: String, argument: String },

    /// A leaf names a provider the loader does not know
    #[error("Unknown field provider '{provider}' at '{path}'")]
    UnknownProvider { path: String, provider: String },
}
