//! Declarative request validation.
//!
//! A request type implements [`RequestRules`]: it runs a [`Validator`] over the
//! raw path parameters and JSON body, and only converts them into typed values
//! once every rule has passed. Failures are reported together, in the order the
//! rules were declared, as a list of [`FieldError`]s.
//!
//! ```ignore
//! let id = params.get("id").cloned().map(Value::String);
//! let mut v = Validator::new();
//! v.field(Location::Params, "id", id.as_ref())
//!     .check(rules::is_int, "Incorrect value")
//!     .check(rules::gt_zero, "Id must be greater than 0");
//! v.finish()?;
//! ```

mod chain;
pub mod rules;

pub use chain::{FieldChain, Rule, Validator};

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Where a validated value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
    Query,
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    /// Always `"field"`
    #[serde(rename = "type")]
    pub kind: String,
    /// The offending value as received; absent when the field was missing
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

impl FieldError {
    pub fn new(location: Location, path: &str, value: Option<&Value>, msg: &str) -> Self {
        Self {
            kind: "field".to_string(),
            value: value.cloned(),
            msg: msg.to_string(),
            path: path.to_string(),
            location,
        }
    }
}

/// Rule set of a request type, evaluated by
/// [`ValidatedRequest`](crate::extractors::ValidatedRequest) before the handler runs.
pub trait RequestRules: Sized {
    /// Validate the raw inputs and build `Self`, or return every violation.
    fn from_parts(params: &HashMap<String, String>, body: &Value) -> Result<Self, Vec<FieldError>>;
}

/// Text form of a value, as string rules see it.
///
/// Missing and `null` become `""`; numbers and booleans use their JSON text.
pub fn as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Numeric coercion with loose semantics: numbers as-is, strings parsed after
/// trimming (blank is 0), booleans 1/0, `null` 0. Anything else has no number.
pub fn as_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { Some(0.0) } else { s.parse().ok() }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Truthiness of a value that already passed [`rules::is_boolean`].
pub fn as_bool(value: Option<&Value>) -> bool {
    matches!(as_text(value).as_str(), "true" | "1")
}
