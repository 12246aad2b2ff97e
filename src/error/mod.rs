//! Error types for toolcall.

use thiserror::Error;

/// Primary error type for tool construction and invocation.
///
/// `Tool::invoke` / `Tool::ainvoke` return these unchanged; the dispatcher is
/// the only place that folds them into a failed [`ToolMessage`].
///
/// [`ToolMessage`]: crate::types::ToolMessage
#[derive(Error, Debug)]
pub enum ToolError {
    /// Plain failure raised by a wrapped function.
    #[error("{0}")]
    Message(String),

    /// Arbitrary error raised by a wrapped function.
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),

    #[error("missing required argument '{0}'")]
    MissingArgument(String),

    #[error("got an unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// Arguments rejected by schema validation before the function ran.
    #[error("{0}")]
    Validation(String),

    #[error("duplicate tool name: {0}")]
    DuplicateTool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Broad error category, mirroring the dispatcher's failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The wrapped function failed, including failed argument binding.
    Invocation,
    /// Arguments did not match the tool schema.
    Validation,
    /// The toolset itself is malformed.
    Configuration,
    /// Serialization or runtime plumbing failed.
    Internal,
}

impl ToolError {
    /// Create a plain failure from a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Wrap any error raised by a function body.
    pub fn other(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Other(err.into())
    }

    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Message(_)
            | Self::Other(_)
            | Self::MissingArgument(_)
            | Self::UnexpectedArgument(_)
            | Self::InvalidArgument { .. } => ErrorCategory::Invocation,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::DuplicateTool(_) => ErrorCategory::Configuration,
            Self::Serialization(_) | Self::Runtime(_) => ErrorCategory::Internal,
        }
    }
}

impl From<String> for ToolError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for ToolError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ToolError>;
