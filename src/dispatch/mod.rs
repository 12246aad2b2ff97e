//! Call dispatcher: resolve a [`ToolCall`] against a toolset and package the
//! outcome as a [`ToolMessage`].
//!
//! Dispatch never fails. Unknown tools, argument problems and errors raised
//! by the function all come back as messages with `is_failed` set in
//! `tool_metadata`. Each call gets exactly one invocation attempt.

use tracing::{debug, info, warn};

use crate::config::DispatchConfig;
use crate::error::{Result, ToolError};
use crate::tools::{validate_arguments, Tool};
use crate::types::{Agent, ToolCall, ToolMessage};

/// Dispatches tool calls with a fixed configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    /// Dispatcher using the global (environment-derived) config.
    pub fn from_env() -> Self {
        Self::new(*DispatchConfig::global())
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Dispatch on the calling thread, blocking on async tools.
    pub fn handle(&self, call: &ToolCall, tools: &[Tool], agent: Option<&Agent>) -> ToolMessage {
        let Some(tool) = find_tool(tools, &call.name) else {
            return handle_invalid_tool_call(call, agent);
        };
        self.log_start(call, tool.function().is_async());

        let outcome = self.validate(tool, call).and_then(|_| tool.invoke(&call.args));
        self.finish(tool, call, outcome, agent)
    }

    /// Dispatch from async code. Sync tools run inline.
    pub async fn handle_async(
        &self,
        call: &ToolCall,
        tools: &[Tool],
        agent: Option<&Agent>,
    ) -> ToolMessage {
        let Some(tool) = find_tool(tools, &call.name) else {
            return handle_invalid_tool_call(call, agent);
        };
        self.log_start(call, tool.function().is_async());

        let outcome = match self.validate(tool, call) {
            Ok(()) => tool.ainvoke(&call.args).await,
            Err(err) => Err(err),
        };
        self.finish(tool, call, outcome, agent)
    }

    fn validate(&self, tool: &Tool, call: &ToolCall) -> Result<()> {
        if !self.config.validate_arguments {
            return Ok(());
        }
        validate_arguments(&call.args, &tool.args_schema().schema())
    }

    fn log_start(&self, call: &ToolCall, is_async: bool) {
        if self.config.verbose {
            info!(
                tool = %call.name,
                tool_call_id = ?call.id,
                args = ?call.args,
                is_async,
                "calling tool"
            );
        } else {
            debug!(tool = %call.name, tool_call_id = ?call.id, is_async, "calling tool");
        }
    }

    fn finish(
        &self,
        tool: &Tool,
        call: &ToolCall,
        outcome: Result<serde_json::Value>,
        agent: Option<&Agent>,
    ) -> ToolMessage {
        match outcome {
            Ok(value) => {
                if self.config.verbose {
                    info!(tool = %tool.name(), result = %value, "tool call succeeded");
                } else {
                    debug!(tool = %tool.name(), "tool call succeeded");
                }
                ToolMessage::success(call, value, agent)
            }
            Err(err) => {
                warn!(
                    tool = %tool.name(),
                    tool_call_id = ?call.id,
                    agent = ?agent.map(|a| a.name.as_str()),
                    error = %err,
                    "tool call failed"
                );
                ToolMessage::failure(call, error_content(tool.name(), &err), agent)
            }
        }
    }
}

/// Dispatch a call using the global config.
pub fn handle_tool_call(call: &ToolCall, tools: &[Tool], agent: Option<&Agent>) -> ToolMessage {
    Dispatcher::from_env().handle(call, tools, agent)
}

/// Async counterpart of [`handle_tool_call`].
pub async fn handle_tool_call_async(
    call: &ToolCall,
    tools: &[Tool],
    agent: Option<&Agent>,
) -> ToolMessage {
    Dispatcher::from_env().handle_async(call, tools, agent).await
}

/// Build the failure message for a call that names no known tool.
pub fn handle_invalid_tool_call(call: &ToolCall, agent: Option<&Agent>) -> ToolMessage {
    warn!(
        tool = %call.name,
        tool_call_id = ?call.id,
        agent = ?agent.map(|a| a.name.as_str()),
        "tool not found"
    );
    ToolMessage::failure(call, format!("Function \"{}\" not found.", call.name), agent)
}

fn find_tool<'a>(tools: &'a [Tool], name: &str) -> Option<&'a Tool> {
    tools.iter().find(|t| t.name() == name)
}

fn error_content(name: &str, err: &ToolError) -> String {
    format!("Error calling function \"{name}\": {err}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{tool, Function, Parameter, ToolArguments};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for LogBuffer {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Dispatch `call` and return what was logged at `info` and above.
    fn info_logs(config: DispatchConfig, call: &ToolCall) -> String {
        let buffer = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            Dispatcher::new(config).handle(call, &[add()], None);
        });

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn add() -> Tool {
        tool(
            Function::new("add", |args: ToolArguments| {
                Ok::<_, ToolError>(args.get_i64("a")? + args.get_i64("b")?)
            })
            .param(Parameter::typed::<i64>("a"))
            .param(Parameter::typed::<i64>("b")),
        )
    }

    #[test]
    fn error_content_appends_period() {
        assert_eq!(
            error_content("foo", &ToolError::message("boom")),
            "Error calling function \"foo\": boom."
        );
    }

    #[test]
    fn missing_argument_is_an_invocation_error() {
        let call = ToolCall::new("add").arg("a", 1);
        let message = Dispatcher::default().handle(&call, &[add()], None);

        assert!(message.is_failed());
        assert_eq!(
            message.content,
            "Error calling function \"add\": missing required argument 'b'."
        );
    }

    #[test]
    fn strict_validation_rejects_before_invoking() {
        let call = ToolCall::new("add").arg("a", "two").arg("b", 3);
        let strict = Dispatcher::new(DispatchConfig::new().with_validate_arguments(true));

        let message = strict.handle(&call, &[add()], None);

        assert!(message.is_failed());
        assert_eq!(
            message.content,
            "Error calling function \"add\": field 'a' expected type 'integer', got string."
        );
    }

    #[test]
    fn lenient_dispatch_reports_function_level_type_error() {
        let call = ToolCall::new("add").arg("a", "two").arg("b", 3);
        let message = Dispatcher::default().handle(&call, &[add()], None);

        assert_eq!(
            message.content,
            "Error calling function \"add\": invalid argument 'a': expected integer."
        );
    }

    #[tokio::test]
    async fn strict_validation_applies_on_async_path() {
        let call = ToolCall::new("add").arg("b", 3);
        let strict = Dispatcher::new(DispatchConfig::new().with_validate_arguments(true));

        let message = strict.handle_async(&call, &[add()], None).await;

        assert_eq!(
            message.content,
            "Error calling function \"add\": missing required field 'a'."
        );
        assert_eq!(message.tool_metadata["is_failed"], json!(true));
    }

    #[test]
    fn verbose_logs_calls_at_info() {
        let call = ToolCall::new("add").arg("a", 2).arg("b", 3);
        let logs = info_logs(DispatchConfig::new().with_verbose(true), &call);

        assert!(logs.contains("calling tool"), "{logs}");
        assert!(logs.contains("tool call succeeded"), "{logs}");
        assert!(logs.contains("result=5"), "{logs}");
    }

    #[test]
    fn quiet_dispatch_keeps_successes_below_info() {
        let call = ToolCall::new("add").arg("a", 2).arg("b", 3);
        let logs = info_logs(DispatchConfig::new(), &call);

        assert!(!logs.contains("calling tool"), "{logs}");
        assert!(!logs.contains("tool call succeeded"), "{logs}");
    }

    #[test]
    fn failures_log_at_warn_regardless_of_verbosity() {
        let call = ToolCall::new("add").arg("a", 2);
        let logs = info_logs(DispatchConfig::new(), &call);

        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("tool call failed"), "{logs}");
    }

    #[test]
    fn first_matching_name_wins() {
        let shadow = tool(Function::new("add", |_| Ok::<_, ToolError>("shadow")));
        let message =
            Dispatcher::default().handle(&ToolCall::new("add"), &[shadow, add()], None);
        assert_eq!(message.content, "shadow");
    }
}
