use thiserror::Error;

use crate::types::Value;
use crate::JObject;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Both value and reason were provided to Promise; they are mutually exclusive.")]
    ValueAndReason,

    #[error("Promise({id}) cannot be resolved with itself")]
    CyclicResolution { id: u64 },

    #[error("thenable adoption exceeded the maximum depth of {depth}")]
    AdoptionDepthExceeded { depth: usize },

    #[error("invalid value {value:?} for option {key}")]
    InvalidOption { key: &'static str, value: String },

    #[error("{0} is not a function")]
    NotCallable(String),
}

impl Error {
    /// the `name` property of the error object delivered as a rejection reason
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValueAndReason => "TypeError",
            Self::CyclicResolution { .. } => "TypeError",
            Self::AdoptionDepthExceeded { .. } => "RangeError",
            Self::InvalidOption { .. } => "ConfigError",
            Self::NotCallable(_) => "TypeError",
        }
    }
}

impl From<Error> for Value {
    fn from(e: Error) -> Self {
        let obj = JObject::new();
        obj.insert_property("name", e.name());
        obj.insert_property("message", e.to_string());
        Value::Object(obj)
    }
}
