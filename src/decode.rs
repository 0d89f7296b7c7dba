//! JSON decoding of API payloads into typed resources.
//!
//! Decoding is done in two steps so the two failure classes stay distinct:
//! the bytes are first parsed as JSON ([`Error::Deserialization`] on
//! failure), then the JSON value is mapped onto the resource schema
//! ([`Error::Decoding`] on failure, carrying the field path).

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::error::{Error, Result};

/// A resource returned by the GitHub API.
///
/// Implemented explicitly by each model type. Single resources and list
/// elements both decode through serde, via [`decode_one`] and
/// [`decode_many`]; there is no per-type hook.
pub trait Resource: DeserializeOwned + PartialEq {}

/// JSON that parsed but did not match the expected schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {message}")]
pub struct DecodeError {
    /// Where in the document decoding failed, e.g. `tree[2].type`
    /// (`.` for the document root).
    pub path: String,
    /// What went wrong at that location.
    pub message: String,
}

impl DecodeError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for DecodeError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        Self {
            path,
            message: err.into_inner().to_string(),
        }
    }
}

/// Decode a single resource.
pub fn decode_one<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let value = parse(bytes)?;
    from_value(value)
}

/// Decode a list of resources. The payload must be a JSON array.
pub fn decode_many<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    let value = parse(bytes)?;
    if !value.is_array() {
        return Err(DecodeError::new(
            ".",
            format!("expected an array, found {}", JsonKind(&value)),
        )
        .into());
    }
    from_value(value)
}

fn parse(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(Error::Deserialization)
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|err| Error::Decoding(err.into()))
}

struct JsonKind<'a>(&'a Value);

impl fmt::Display for JsonKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0 {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        })
    }
}

/// Serde adapter for GitHub timestamps (`2016-03-03T19:20:49Z`).
///
/// Only this exact shape is accepted; anything else fails to decode.
pub mod iso8601 {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    /// Parse a timestamp in the GitHub format.
    pub fn parse(s: &str) -> Result<DateTime<Utc>, String> {
        NaiveDateTime::parse_from_str(s, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|err| format!("invalid date `{s}`, expected YYYY-MM-DDTHH:MM:SSZ: {err}"))
    }

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(de::Error::custom)
    }

    /// Same format for optional (nullable) timestamps.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            date: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| super::parse(&s).map_err(de::Error::custom))
                .transpose()
        }
    }
}
