//! Shared test fixtures: sample functions and both ways of wrapping them.

#![allow(dead_code)]

use std::time::Duration;

use toolcall::error::ToolError;
use toolcall::tools::{tool, Function, Parameter, Tool, ToolArguments};

/// The two construction surfaces that must agree.
#[derive(Debug, Clone, Copy)]
pub enum Style {
    Decorator,
    Class,
}

pub const STYLES: [Style; 2] = [Style::Decorator, Style::Class];

pub fn wrap(style: Style, function: Function) -> Tool {
    match style {
        Style::Decorator => tool(function),
        Style::Class => Tool::from_function(function),
    }
}

pub fn roll_die() -> Function {
    Function::new("roll_die", |_| Ok::<_, ToolError>(2))
}

pub fn roll_die_async() -> Function {
    Function::new_async("roll_die", |_| async {
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok::<_, ToolError>(2)
    })
}

pub fn add() -> Function {
    Function::new("add", |args: ToolArguments| {
        Ok::<_, ToolError>(args.get_i64("a")? + args.get_i64("b")?)
    })
    .param(Parameter::typed::<i64>("a"))
    .param(Parameter::typed::<i64>("b"))
}

pub fn failing(message: &'static str) -> Function {
    Function::new("foo", move |_| Err::<(), _>(ToolError::message(message)))
}

pub fn failing_async(message: &'static str) -> Function {
    Function::new_async("foo", move |_| async move {
        Err::<(), _>(ToolError::message(message))
    })
}

pub fn panicking_async(message: &'static str) -> Function {
    Function::new_async("foo", move |_| async move {
        if !message.is_empty() {
            panic!("{message}");
        }
        Ok::<_, ToolError>(())
    })
}
