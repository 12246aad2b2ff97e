//! Keyword arguments bound for a single tool invocation.

use serde::de::DeserializeOwned;

use super::schema::Signature;
use crate::error::{Result, ToolError};

/// Arguments handed to a wrapped function, keyed by parameter name.
///
/// Produced by [`ToolArguments::bind`], so declared defaults are already
/// filled in and every key names a declared parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: serde_json::Map<String, serde_json::Value>,
}

impl ToolArguments {
    pub fn new(values: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { values }
    }

    /// Bind raw call arguments to a signature the way a normal call would.
    ///
    /// Absent parameters take their declared default; absent required
    /// parameters and arguments naming no parameter are errors.
    pub fn bind(
        signature: &Signature,
        args: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self> {
        if let Some(unknown) = args.keys().find(|name| signature.get(name).is_none()) {
            return Err(ToolError::UnexpectedArgument(unknown.clone()));
        }

        let mut values = serde_json::Map::with_capacity(args.len());
        for param in signature.arguments() {
            let value = match (args.get(&param.name), param.default()) {
                (Some(value), _) => value.clone(),
                (None, Some(default)) => default.clone(),
                (None, None) => return Err(ToolError::MissingArgument(param.name.clone())),
            };
            values.insert(param.name.clone(), value);
        }
        Ok(Self { values })
    }

    /// Get the raw argument map.
    pub fn raw(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.values
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Deserialize one argument into any owned type.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ToolError::MissingArgument(key.to_string()))?;
        serde_json::from_value(value.clone())
            .map_err(|e| ToolError::invalid_argument(key, e.to_string()))
    }

    /// Deserialize an argument, treating absence and `null` as `None`.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.values.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(_) => self.get(key).map(Some),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<&str> {
        self.typed(key, "string", |v| v.as_str())
    }

    pub fn get_i64(&self, key: &str) -> Result<i64> {
        self.typed(key, "integer", |v| v.as_i64())
    }

    pub fn get_f64(&self, key: &str) -> Result<f64> {
        self.typed(key, "number", |v| v.as_f64())
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.typed(key, "boolean", |v| v.as_bool())
    }

    /// Deserialize the entire argument map into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(serde_json::Value::Object(
            self.values.clone(),
        ))?)
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &str,
        extract: impl FnOnce(&'a serde_json::Value) -> Option<T>,
    ) -> Result<T> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ToolError::MissingArgument(key.to_string()))?;
        extract(value).ok_or_else(|| ToolError::invalid_argument(key, format!("expected {expected}")))
    }
}
