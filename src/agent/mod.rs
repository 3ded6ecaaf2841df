//! Agent: the read/write orchestrator over a repository.
//!
//! An agent owns a serializer, a validator, and a repository of named
//! queries, and runs the two request flows end to end:
//!
//! ```text
//! inbound:  normalize(raw) -> validate(data) -> deserialize(data) -> repo
//! outbound: repo -> serialize(rows) -> envelope
//! ```
//!
//! The repository is a seam: persistence stays outside this crate, and the
//! agent only needs named-query dispatch over row-shaped values.

mod errors;

pub use errors::{AgentError, AgentResult, RepoError};

use serde_json::{Map, Value};
use tracing::debug;

use crate::serializer::Serializer;
use crate::validator::{Payload, ValidationError, Validator};

/// A repository of named queries returning row-shaped values.
pub trait Repo {
    /// Whether the repository knows `name`.
    fn has_query(&self, name: &str) -> bool;

    /// Runs the named query with the given data, returning a row object or a
    /// sequence of row objects.
    fn run(&self, name: &str, data: &Map<String, Value>) -> Result<Value, RepoError>;
}

/// Communicates with the persistence layer on behalf of the request layer,
/// serializing results for client consumption.
pub struct Agent<R: Repo> {
    serializer: Serializer,
    validator: Validator,
    repo: R,
}

impl<R: Repo> Agent<R> {
    /// Creates an agent from a serializer/validator pair and a repository.
    ///
    /// The pair must be built from the same model; mismatched wiring is a
    /// construction error, not a request-time condition.
    pub fn new(serializer: Serializer, validator: Validator, repo: R) -> AgentResult<Self> {
        if serializer.model().name() != validator.model().name() {
            return Err(AgentError::ModelMismatch {
                serializer: serializer.model().name().to_string(),
                validator: validator.model().name().to_string(),
            });
        }

        Ok(Self {
            serializer,
            validator,
            repo,
        })
    }

    /// Runs a named query and serializes the result into a client envelope.
    pub fn query(&self, name: &str, data: &Map<String, Value>) -> AgentResult<Value> {
        let rows = self.raw(name, data)?;
        Ok(self.serializer.serialize(&rows))
    }

    /// Runs a named query and returns the raw, unserialized rows.
    pub fn raw(&self, name: &str, data: &Map<String, Value>) -> AgentResult<Value> {
        if !self.repo.has_query(name) {
            return Err(AgentError::UnknownQuery(name.to_string()));
        }

        debug!(query = name, "running repository query");
        Ok(self.repo.run(name, data)?)
    }

    /// Wraps row data in a client envelope.
    pub fn serialize(&self, data: &Value) -> Value {
        self.serializer.serialize(data)
    }

    /// Unwraps a client envelope back to its raw payload.
    pub fn normalize(&self, raw: &Value) -> Option<Payload> {
        self.validator.normalize(raw)
    }

    /// Coerces a validated payload into a storage-shaped value bag.
    pub fn deserialize(&self, payload: &Map<String, Value>) -> Map<String, Value> {
        self.serializer.deserialize(payload)
    }

    /// Validates a raw value bag against the model's rules.
    pub fn validate(&self, values: &Map<String, Value>) -> Vec<ValidationError> {
        self.validator.validate(values)
    }
}
