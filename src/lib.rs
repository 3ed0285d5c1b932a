//! # lamina
//!
//! A minimal request router for function-as-a-service handlers.
//!
//! One invocation in, one response descriptor out. lamina picks the handler
//! for the event's path and method, runs it, and turns whatever happens into
//! `{"statusCode", "headers", "body"}`.
//!
//! What lamina does not do: sockets, connection handling, streaming bodies,
//! middleware stacks, content negotiation, authentication. The platform in
//! front of the function owns those.
//!
//! ## Routing rules
//!
//! - Templates are `/literal/{name}` segments. Placeholders capture a whole
//!   segment, verbatim.
//! - Routes are tried in registration order; the first one whose template
//!   matches and whose method set accepts the method wins.
//! - Template matches but no method fits → `405`. Nothing matches → `404`.
//! - Handler returns `Err` or panics → `500`. In debug mode the body carries
//!   `error_message` and `trace`; otherwise only a generic message.
//!
//! ## Quick start
//!
//! ```rust
//! use lamina::{App, Method, Request};
//! use serde_json::{Value, json};
//!
//! async fn get_activity(req: Request) -> Result<Value, lamina::Error> {
//!     let id = req.param("activity_id").unwrap_or_default();
//!     Ok(json!({ "id": id, "type": "cycling" }))
//! }
//!
//! async fn upsert_activity(req: Request) -> anyhow::Result<Value> {
//!     let body: Value = req.json()?;
//!     Ok(json!({ "method": req.method().as_str(), "saved": body }))
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let app = App::new()
//!     .get("/activity/{activity_id}", get_activity)
//!     .route("/activity", [Method::Post, Method::Put], upsert_activity);
//!
//! let res = app.call(json!({
//!     "path": "/activity/152342",
//!     "httpMethod": "GET",
//! })).await;
//!
//! assert_eq!(res.status_code(), 200);
//! assert_eq!(res.body(), r#"{"id":"152342","type":"cycling"}"#);
//! # }
//! ```

mod app;
mod config;
mod dispatch;
mod error;
mod event;
mod handler;
mod method;
mod pattern;
mod request;
mod response;
mod router;
mod status;

pub mod context;

pub use app::App;
pub use config::{Config, DEBUG_ENV};
pub use error::{Error, FailureInfo};
pub use event::{Event, HttpContext, RequestContext};
pub use handler::Handler;
pub use method::{InvalidMethod, Method};
pub use pattern::{PathPattern, PatternError};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder, ResponseContext};
pub use router::{MatchOutcome, Route, Router};
pub use status::Status;
