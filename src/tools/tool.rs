//! The `Tool` value: a named, described, schema-bearing function.

use serde::{Deserialize, Serialize};

use super::arguments::ToolArguments;
use super::function::Function;
use super::schema::{synthesize, ArgsSchema};
use crate::error::Result;

/// Tool definition as sent to a model provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A function exposed to an agent under a name.
///
/// Immutable once built; cloning shares the underlying handler.
#[derive(Debug, Clone)]
pub struct Tool {
    name: String,
    description: String,
    args_schema: ArgsSchema,
    function: Function,
}

impl Tool {
    /// Wrap a function with no overrides.
    ///
    /// The name is the function identifier; the description is the trimmed
    /// documentation string, or the identifier when there is none.
    pub fn from_function(function: Function) -> Self {
        Self::with_overrides(function, None, None)
    }

    pub(crate) fn with_overrides(
        function: Function,
        name: Option<String>,
        description: Option<String>,
    ) -> Self {
        let name = name.unwrap_or_else(|| function.ident().to_string());
        let description = description
            .or_else(|| {
                function
                    .documentation()
                    .map(str::trim)
                    .filter(|doc| !doc.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| function.ident().to_string());
        let args_schema = synthesize(function.parameters());
        Self {
            name,
            description,
            args_schema,
            function,
        }
    }

    /// Tool name (must match what the model calls).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn args_schema(&self) -> &ArgsSchema {
        &self.args_schema
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    /// Provider-facing definition.
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.args_schema.schema(),
        }
    }

    /// Call the function and return its raw result, blocking until an async
    /// function resolves. Errors from the function are returned unchanged.
    pub fn invoke(
        &self,
        args: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let bound = self.bind(args)?;
        self.function.callable().call(bound)
    }

    /// Call the function from async code. A sync function runs inline.
    pub async fn ainvoke(
        &self,
        args: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let bound = self.bind(args)?;
        self.function.callable().call_async(bound).await
    }

    fn bind(&self, args: &serde_json::Map<String, serde_json::Value>) -> Result<ToolArguments> {
        ToolArguments::bind(self.function.parameters(), args)
    }
}
