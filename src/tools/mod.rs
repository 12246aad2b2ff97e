//! Tool system: wrapping functions and describing their arguments.

pub mod arguments;
pub mod factory;
pub mod function;
pub mod schema;
pub mod tool;
pub mod toolset;
pub mod validation;

pub use arguments::ToolArguments;
pub use factory::{tool, tool_with, ToolOptions};
pub use function::{Callable, Function};
pub use schema::{
    synthesize, Annotation, ArgsSchema, FieldSpec, ParamDefault, Parameter, SchemaEntry,
    SchemaType, Signature, TypeHint,
};
pub use tool::{Tool, ToolDefinition};
pub use toolset::Toolset;
pub use validation::validate_arguments;
