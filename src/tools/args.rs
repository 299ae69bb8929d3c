use std::fmt;

use serde_json::{Map, Value};

use crate::error::ToolError;
use crate::models::ImageUrl;

/// Typed view over a tool's loosely-typed argument object.
///
/// Recognized keys are checked for their JSON type; a present key with the
/// wrong type is a conversion error rather than a silently dropped value.
/// Unrecognized keys are ignored.
pub(crate) struct Arguments<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Arguments<'a> {
    pub(crate) fn from_input(input: &'a Value) -> Result<Self, ToolError> {
        input
            .as_object()
            .map(|map| Self { map })
            .ok_or(ToolError::InvalidArguments)
    }

    pub(crate) fn required_str(&self, key: &str) -> Result<&'a str, ToolError> {
        self.optional_str(key)?
            .ok_or_else(|| ToolError::Conversion(format!("missing required argument `{key}`")))
    }

    pub(crate) fn optional_str(&self, key: &str) -> Result<Option<&'a str>, ToolError> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(type_mismatch(key, "a string", other)),
        }
    }

    /// A list-valued argument, rendered the way the upstream expects it:
    /// comma-separated. A plain string is passed through untouched.
    pub(crate) fn optional_list(&self, key: &str) -> Result<Option<String>, ToolError> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| type_mismatch(key, "an array of strings", item))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(|items| Some(items.join(","))),
            Some(other) => Err(type_mismatch(key, "an array of strings", other)),
        }
    }

    /// Integral floats such as `3.0` are accepted and rendered as `3`.
    pub(crate) fn optional_u64(&self, key: &str) -> Result<Option<u64>, ToolError> {
        match self.map.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .or_else(|| {
                    value
                        .as_f64()
                        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                        .map(|f| f as u64)
                })
                .map(Some)
                .ok_or_else(|| type_mismatch(key, "a non-negative integer", value)),
        }
    }

    pub(crate) fn optional_bool(&self, key: &str) -> Result<Option<bool>, ToolError> {
        match self.map.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(type_mismatch(key, "a boolean", other)),
        }
    }

    /// The request body shared by every POST endpoint.
    pub(crate) fn image_url(&self) -> Result<ImageUrl, ToolError> {
        Ok(ImageUrl {
            url: self.required_str("url")?.to_string(),
        })
    }
}

fn type_mismatch(key: &str, expected: &str, got: &Value) -> ToolError {
    let kind = match got {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    ToolError::Conversion(format!("argument `{key}` must be {expected}, got {kind}"))
}

/// Query string in insertion order. Values are written as-is.
#[derive(Debug, Default)]
pub(crate) struct Query {
    pairs: Vec<String>,
}

impl Query {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: &str, value: Option<impl fmt::Display>) -> &mut Self {
        if let Some(value) = value {
            self.pairs.push(format!("{key}={value}"));
        }
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `a=1&b=2` without the leading `?`, or `None` when empty.
    pub(crate) fn pairs(&self) -> Option<String> {
        (!self.pairs.is_empty()).then(|| self.pairs.join("&"))
    }
}

/// Renders as `?a=1&b=2`, or nothing at all when empty.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pairs() {
            Some(pairs) => write!(f, "?{pairs}"),
            None => Ok(()),
        }
    }
}
