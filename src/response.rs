//! Response descriptor and the [`IntoResponse`] conversion trait.
//!
//! A [`Response`] is what the invocation hands back to the platform:
//! `{"statusCode": 200, "headers": {...}, "body": "..."}`. The body is always
//! a pre-serialized string.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, FailureInfo};
use crate::method::Method;
use crate::status::Status;

const JSON: &str = "application/json";

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing response descriptor.
///
/// ```rust
/// use lamina::{Response, Status};
///
/// let ok = Response::from_success(&serde_json::json!({"id": 1})).unwrap();
/// assert_eq!(ok.status_code(), 200);
/// assert_eq!(ok.body(), r#"{"id":1}"#);
///
/// let gone = Response::status(Status::Gone);
/// assert_eq!(gone.status_code(), 410);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub(crate) status_code: u16,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) body: String,
}

impl Response {
    /// `200 OK` with `value` serialized as JSON.
    pub fn from_success<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        let body = serde_json::to_string(value)?;
        Ok(Self::json(Status::Ok, body))
    }

    /// `500 Internal Server Error` for a failed invocation.
    ///
    /// With `debug` the body carries `error_message` and `trace`. Without it,
    /// only the generic reason phrase is sent; the failure itself stays in
    /// the logs.
    pub fn from_failure(info: &FailureInfo, debug: bool) -> Self {
        let status = Status::InternalServerError;
        let body = if debug {
            serde_json::json!({
                "error_message": info.message,
                "trace": info.trace,
            })
        } else {
            serde_json::json!({ "error_message": status.reason() })
        };
        Self::json(status, body.to_string())
    }

    /// Maps any [`Error`] to its response. 500-class errors go through
    /// [`from_failure`](Self::from_failure); the others answer with their
    /// reason phrase.
    pub fn from_error(err: &Error, debug: bool) -> Self {
        let status = err.status();
        if status == Status::InternalServerError {
            return Self::from_failure(&err.failure_info(), debug);
        }

        let mut res = Self::json(
            status,
            serde_json::json!({ "error_message": status.reason() }).to_string(),
        );
        let allowed = match err {
            Error::MethodNotAllowed { allowed, .. } => allowed.as_slice(),
            _ => &[],
        };
        if !allowed.is_empty() {
            let allow = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
            res.headers.insert("allow".to_owned(), allow);
        }
        res
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self { status_code: code.into(), headers: BTreeMap::new(), body: String::new() }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: BTreeMap::new(), status: Status::Ok.into() }
    }

    pub fn status_code(&self) -> u16 { self.status_code }
    pub fn headers(&self) -> &BTreeMap<String, String> { &self.headers }
    pub fn body(&self) -> &str { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Applies what the handler recorded in its [`ResponseContext`].
    pub(crate) fn apply(mut self, ctx: ResponseContext) -> Self {
        if let Some(code) = ctx.status {
            self.status_code = code;
        }
        self.headers.extend(ctx.headers);
        self
    }

    fn json(status: Status, body: String) -> Self {
        Self {
            status_code: status.into(),
            headers: BTreeMap::from([("content-type".to_owned(), JSON.to_owned())]),
            body,
        }
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
pub struct ResponseBuilder {
    headers: BTreeMap<String, String>,
    status: u16,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.to_owned());
        self
    }

    /// Terminate with `value` serialized as JSON.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Response, Error> {
        let body = serde_json::to_string(value)?;
        Ok(self.finish(JSON, body))
    }

    /// Terminate with a plain-text body.
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish("text/plain; charset=utf-8", body.into())
    }

    /// Terminate with no body.
    pub fn no_body(self) -> Response {
        Response { status_code: self.status, headers: self.headers, body: String::new() }
    }

    fn finish(self, content_type: &str, body: String) -> Response {
        let mut headers = BTreeMap::from([("content-type".to_owned(), content_type.to_owned())]);
        headers.extend(self.headers);
        Response { status_code: self.status, headers, body }
    }
}

// ── ResponseContext ───────────────────────────────────────────────────────────

/// Adjustments a handler makes to its own success response while it runs.
///
/// Reached through [`context::response`](crate::context::response).
#[derive(Debug, Default)]
pub struct ResponseContext {
    status: Option<u16>,
    headers: BTreeMap<String, String>,
}

impl ResponseContext {
    /// Overrides the status of the success response.
    pub fn set_status(&mut self, code: Status) -> &mut Self {
        self.status = Some(code.into());
        self
    }

    /// Adds or replaces a response header. Names are stored lowercase.
    pub fn set_header(&mut self, name: &str, value: &str) -> &mut Self {
        self.headers.insert(name.to_ascii_lowercase(), value.to_owned());
        self
    }

    /// A header set earlier in this invocation.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion of a handler's output into a [`Response`].
///
/// Implemented for `Result<T, E>` where `T` is serializable, which covers
/// the common "return a value or fail" handler, and for a ready-made
/// [`Response`].
pub trait IntoResponse {
    fn into_response(self) -> Result<Response, Error>;
}

impl IntoResponse for Response {
    fn into_response(self) -> Result<Response, Error> { Ok(self) }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: Serialize,
    E: Into<anyhow::Error>,
{
    fn into_response(self) -> Result<Response, Error> {
        match self {
            Ok(value) => Response::from_success(&value),
            Err(err) => Err(Error::Handler(FailureInfo::from_error(err))),
        }
    }
}
