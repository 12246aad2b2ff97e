//! toolcall — expose plain functions as agent-callable tools.
//!
//! Wrap a [`Function`](tools::Function) into a [`Tool`](tools::Tool) with a
//! name, description and argument schema derived from its signature, then
//! resolve incoming [`ToolCall`](types::ToolCall)s against a set of tools.
//! Every dispatch produces a [`ToolMessage`](types::ToolMessage); failures are
//! flagged in its metadata instead of being returned as errors.
//!
//! # Quick Start
//!
//! ```
//! use toolcall::prelude::*;
//!
//! let add = tool(
//!     Function::new("add", |args: ToolArguments| {
//!         Ok::<_, ToolError>(args.get_i64("a")? + args.get_i64("b")?)
//!     })
//!     .doc("Add two integers.")
//!     .param(Parameter::typed::<i64>("a"))
//!     .param(Parameter::typed::<i64>("b")),
//! );
//!
//! let call = ToolCall::new("add").arg("a", 2).arg("b", 3).with_id("call_1");
//! let message = handle_tool_call(&call, &[add], None);
//! assert_eq!(message.content, "5");
//! assert!(!message.is_failed());
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod prelude;
pub mod tools;
pub mod types;
