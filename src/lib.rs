//! rowcast - schema-driven serialization and validation between a persistent
//! store and an external client
//!
//! A declarative [`Model`] drives both directions of the boundary:
//!
//! ```text
//! inbound:  client envelope -> Validator::normalize -> Validator::validate
//!           -> Model::create_record -> (persist)
//! outbound: (persisted rows) -> Serializer::serialize -> client envelope
//! ```

pub mod agent;
pub mod model;
pub mod naming;
pub mod serializer;
pub mod transform;
pub mod validator;

pub use agent::{Agent, AgentError, AgentResult, Repo, RepoError};
pub use model::{
    DataType, DefaultValue, FieldSpec, Model, ModelError, ModelResult, PrimaryKey, Record,
    ScalarType,
};
pub use naming::{camelize, pluralize, underscore, NameCache};
pub use serializer::Serializer;
pub use validator::{FieldValidator, Payload, Validation, ValidationError, Validator};
