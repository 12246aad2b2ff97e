//! Convenience re-exports for common use.

pub use crate::config::DispatchConfig;
pub use crate::dispatch::{
    handle_invalid_tool_call, handle_tool_call, handle_tool_call_async, Dispatcher,
};
pub use crate::error::{Result, ToolError};
pub use crate::tools::{
    tool, tool_with, Annotation, FieldSpec, Function, Parameter, Signature, Tool,
    ToolArguments, ToolOptions, Toolset, TypeHint,
};
pub use crate::types::{Agent, ToolCall, ToolMessage};
