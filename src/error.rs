//! Unified error type.
//!
//! Every way an invocation can go wrong is an [`Error`] variant, and every
//! variant maps to exactly one HTTP status via [`Error::status`]. The
//! dispatcher turns errors into responses; nothing escapes [`App::call`](crate::App::call).

use std::any::Any;
use std::fmt;

use crate::method::Method;
use crate::status::Status;

/// The error type of lamina's fallible operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The inbound event could not be turned into a request.
    #[error("malformed event: {0}")]
    BadEvent(String),

    /// No registered template matches the path.
    #[error("no route matches `{path}`")]
    NotFound { path: String },

    /// A template matches the path, but none of those routes accept the method.
    #[error("`{method}` is not allowed on `{path}`")]
    MethodNotAllowed { method: Method, path: String, allowed: Vec<Method> },

    /// The handler returned an error or panicked.
    #[error("handler failed: {0}")]
    Handler(FailureInfo),

    /// The handler's return value could not be serialized to JSON.
    #[error("response is not serializable: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Path parameters could not be projected onto the handler's declared shape.
    #[error("path parameters do not fit: {0}")]
    Params(#[source] serde_json::Error),

    /// The request body is not valid JSON for the requested type.
    #[error("request body does not fit: {0}")]
    Body(#[source] serde_json::Error),

    /// A call-scoped accessor was used outside of an invocation.
    #[error("no invocation in progress")]
    NoActiveCall,
}

impl Error {
    /// The HTTP status this error is reported with.
    pub fn status(&self) -> Status {
        match self {
            Self::BadEvent(_)              => Status::BadRequest,
            Self::NotFound { .. }          => Status::NotFound,
            Self::MethodNotAllowed { .. }  => Status::MethodNotAllowed,
            Self::Handler(_)
            | Self::Serialization(_)
            | Self::Params(_)
            | Self::Body(_)
            | Self::NoActiveCall           => Status::InternalServerError,
        }
    }

    /// Diagnostic detail for a 500-class error.
    pub(crate) fn failure_info(&self) -> FailureInfo {
        match self {
            Self::Handler(info) => info.clone(),
            other => FailureInfo {
                type_name: std::any::type_name::<Self>().to_owned(),
                message: other.to_string(),
                trace: format!("{other:?}"),
            },
        }
    }
}

/// What is known about a failed handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureInfo {
    /// Rust type name of the error value, or `"panic"`.
    pub type_name: String,
    /// The error's display message.
    pub message: String,
    /// Formatted cause chain (and backtrace, when one was captured).
    pub trace: String,
}

impl FailureInfo {
    /// Captures an error returned by a handler. `E` is recorded by name
    /// before it is erased into [`anyhow::Error`].
    pub fn from_error<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let type_name = std::any::type_name::<E>().to_owned();
        let err: anyhow::Error = err.into();
        // `{:#}` joins the cause chain on one line; `{:?}` adds the
        // "Caused by" list and any backtrace anyhow captured.
        Self {
            type_name: type_name.clone(),
            message: format!("{err:#}"),
            trace: format!("{type_name}: {err:?}"),
        }
    }

    /// Captures the payload of a panic caught while running a handler.
    pub fn from_panic(payload: Box<dyn Any + Send>, location: &str) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_owned()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "<non-string panic payload>".to_owned()
        };
        Self {
            type_name: "panic".to_owned(),
            trace: format!("panic: handler for {location} panicked: {message}"),
            message,
        }
    }
}

impl fmt::Display for FailureInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}
