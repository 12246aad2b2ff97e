//! Entry points that turn a [`Function`] into a [`Tool`].
//!
//! ```
//! use toolcall::tools::{tool, tool_with, Function, Parameter, ToolArguments, ToolOptions};
//! use toolcall::error::ToolError;
//!
//! let add = Function::new("add", |args: ToolArguments| {
//!     Ok::<_, ToolError>(args.get_i64("a")? + args.get_i64("b")?)
//! })
//! .param(Parameter::typed::<i64>("a"))
//! .param(Parameter::typed::<i64>("b"));
//!
//! // Bare form.
//! let plain = tool(add.clone());
//! assert_eq!(plain.name(), "add");
//!
//! // Parameterized form.
//! let rename = tool_with(ToolOptions::builder().name("sum").build());
//! assert_eq!(rename(add).name(), "sum");
//! ```

use bon::Builder;

use super::function::Function;
use super::tool::Tool;

/// Optional overrides applied when wrapping a function.
#[derive(Debug, Clone, Default, Builder)]
pub struct ToolOptions {
    #[builder(into)]
    pub name: Option<String>,
    #[builder(into)]
    pub description: Option<String>,
}

impl ToolOptions {
    /// Wrap a function, applying these overrides.
    pub fn wrap(&self, function: Function) -> Tool {
        Tool::with_overrides(function, self.name.clone(), self.description.clone())
    }

    /// Turn these overrides into a function-to-tool transformer.
    pub fn decorator(self) -> impl Fn(Function) -> Tool + Send + Sync + 'static {
        move |function| self.wrap(function)
    }
}

/// Wrap a function with no overrides.
pub fn tool(function: Function) -> Tool {
    ToolOptions::default().wrap(function)
}

/// Build a transformer that wraps functions with the given overrides.
pub fn tool_with(options: ToolOptions) -> impl Fn(Function) -> Tool + Send + Sync + 'static {
    options.decorator()
}
