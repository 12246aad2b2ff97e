//! Wrapped callables: a static signature plus a sync or async handler.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;

use super::arguments::ToolArguments;
use super::schema::{Parameter, Signature};
use crate::error::{Result, ToolError};

type SyncHandler = dyn Fn(ToolArguments) -> Result<serde_json::Value> + Send + Sync;

type AsyncHandler =
    dyn Fn(ToolArguments) -> BoxFuture<'static, Result<serde_json::Value>> + Send + Sync;

/// Handler of a wrapped function, tagged by calling convention.
#[derive(Clone)]
pub enum Callable {
    Sync(Arc<SyncHandler>),
    Async(Arc<AsyncHandler>),
}

impl Callable {
    pub fn is_async(&self) -> bool {
        matches!(self, Self::Async(_))
    }

    /// Run to completion on the calling thread.
    pub fn call(&self, args: ToolArguments) -> Result<serde_json::Value> {
        match self {
            Self::Sync(handler) => handler(args),
            Self::Async(handler) => block_on(handler(args)),
        }
    }

    /// Run inside the caller's async context.
    ///
    /// A sync handler runs inline without yielding.
    pub async fn call_async(&self, args: ToolArguments) -> Result<serde_json::Value> {
        match self {
            Self::Sync(handler) => handler(args),
            Self::Async(handler) => handler(args).await,
        }
    }
}

impl std::fmt::Debug for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("Callable::Sync"),
            Self::Async(_) => f.write_str("Callable::Async"),
        }
    }
}

/// Drive a future to completion from synchronous code.
///
/// Inside a multi-thread tokio runtime the current worker is handed over with
/// `block_in_place`. A current-thread runtime cannot be blocked, so the future
/// runs on a scoped helper thread with its own runtime. Outside any runtime a
/// fresh current-thread runtime is used. A panic in the future unwinds to the
/// caller on every path.
fn block_on<T: Send>(future: BoxFuture<'static, Result<T>>) -> Result<T> {
    use tokio::runtime::{Builder, Handle, RuntimeFlavor};

    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| handle.block_on(future))
        }
        Ok(_) => std::thread::scope(|scope| {
            scope
                .spawn(|| Builder::new_current_thread().enable_all().build()?.block_on(future))
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
        }),
        Err(_) => Builder::new_current_thread()
            .enable_all()
            .build()?
            .block_on(future),
    }
}

fn to_value<R: Serialize>(value: R) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

/// A function ready to be wrapped as a tool.
///
/// Carries everything the tool factory needs without executing anything: the
/// identifier, an optional documentation string, the parameter list and the
/// handler.
#[derive(Debug, Clone)]
pub struct Function {
    ident: String,
    doc: Option<String>,
    signature: Signature,
    callable: Callable,
}

impl Function {
    /// Wrap a synchronous handler.
    pub fn new<F, R, E>(ident: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ToolArguments) -> std::result::Result<R, E> + Send + Sync + 'static,
        R: Serialize + 'static,
        E: Into<ToolError> + 'static,
    {
        Self::from_callable(
            ident,
            Callable::Sync(Arc::new(move |args| {
                handler(args).map_err(Into::into).and_then(to_value)
            })),
        )
    }

    /// Wrap an asynchronous handler.
    pub fn new_async<F, Fut, R, E>(ident: impl Into<String>, handler: F) -> Self
    where
        F: Fn(ToolArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<R, E>> + Send + 'static,
        R: Serialize + 'static,
        E: Into<ToolError> + 'static,
    {
        Self::from_callable(
            ident,
            Callable::Async(Arc::new(
                move |args| -> BoxFuture<'static, Result<serde_json::Value>> {
                    let fut = handler(args);
                    Box::pin(async move { fut.await.map_err(Into::into).and_then(to_value) })
                },
            )),
        )
    }

    pub fn from_callable(ident: impl Into<String>, callable: Callable) -> Self {
        Self {
            ident: ident.into(),
            doc: None,
            signature: Signature::new(),
            callable,
        }
    }

    /// Builder: set the documentation string.
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Builder: append a parameter.
    pub fn param(mut self, param: Parameter) -> Self {
        self.signature = self.signature.param(param);
        self
    }

    /// Builder: replace the whole signature.
    pub fn signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn documentation(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn parameters(&self) -> &Signature {
        &self.signature
    }

    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    pub fn is_async(&self) -> bool {
        self.callable.is_async()
    }
}
