//! Agent and repository errors.

use thiserror::Error;

/// Result type for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// A failure reported by a repository while running a named query.
#[derive(Debug, Clone, Error)]
#[error("query `{query}` failed: {message}")]
pub struct RepoError {
    /// The query that failed
    pub query: String,
    /// Repository-supplied failure message
    pub message: String,
}

impl RepoError {
    pub fn new(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by the agent.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The repository does not know the requested query
    #[error("No query found for {0}.")]
    UnknownQuery(String),

    /// Serializer and validator were built from different models
    #[error("serializer and validator must share a model; got `{serializer}` and `{validator}`")]
    ModelMismatch {
        serializer: String,
        validator: String,
    },

    /// The repository failed to run the query
    #[error(transparent)]
    Repo(#[from] RepoError),
}
