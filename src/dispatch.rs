//! Per-invocation dispatch.
//!
//! ```text
//! raw event ──parse──▶ Request ──lookup──▶ Matched ──bind──▶ handler ──▶ 200 + JSON
//!     │                    │                                   │
//!     ▼                    ├─ PathUnmatched ─────▶ 404         ├─ Err   ─▶ 500
//!    400                   └─ MethodUnmatched ───▶ 405         └─ panic ─▶ 500
//! ```
//!
//! Every branch ends in a [`Response`]; nothing is retried and nothing is
//! propagated to the caller.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::Value;
use tracing::{Instrument, debug, error, info_span, warn};

use crate::config::Config;
use crate::context;
use crate::error::{Error, FailureInfo};
use crate::event::Event;
use crate::request::Request;
use crate::response::Response;
use crate::router::{MatchOutcome, Router};

pub(crate) struct Dispatcher<'a> {
    router: &'a Router,
    config: Config,
}

impl<'a> Dispatcher<'a> {
    pub(crate) fn new(router: &'a Router, config: Config) -> Self {
        Self { router, config }
    }

    pub(crate) async fn handle(&self, raw: Value) -> Response {
        match Event::from_value(raw) {
            Ok(event) => self.handle_event(event).await,
            Err(err) => self.reject(err),
        }
    }

    pub(crate) async fn handle_event(&self, event: Event) -> Response {
        let req = match event.into_request() {
            Ok(req) => req,
            Err(err) => return self.reject(err),
        };
        let span = info_span!("invocation", method = %req.method, path = %req.path);
        self.dispatch(req).instrument(span).await
    }

    /// Malformed input never reaches the router.
    pub(crate) fn reject(&self, err: Error) -> Response {
        warn!(error = %err, "rejecting malformed event");
        Response::from_error(&err, self.config.debug)
    }

    async fn dispatch(&self, mut req: Request) -> Response {
        let (route, params) = match self.router.lookup(&req.path, &req.method) {
            MatchOutcome::Matched { route, params } => (route, params),
            MatchOutcome::PathUnmatched => {
                debug!("no route matches path");
                return Response::from_error(&Error::NotFound { path: req.path }, self.config.debug);
            }
            MatchOutcome::PathMatchedMethodUnmatched { allowed } => {
                debug!(allowed = ?allowed, "path matched, method not allowed");
                let err = Error::MethodNotAllowed { method: req.method, path: req.path, allowed };
                return Response::from_error(&err, self.config.debug);
            }
        };

        // Values captured by the route template override platform-supplied ones.
        req.params.extend(params);

        let handler = Arc::clone(&route.handler);
        let location = format!("{} {}", req.method, route.pattern().template());
        let published = req.clone();

        // The handler is called inside the async block so a panic while
        // building its future is caught too.
        let invocation = AssertUnwindSafe(async move { handler.call(req).await }).catch_unwind();
        let (outcome, overrides) = context::scope(published, invocation).await;

        let result = outcome.unwrap_or_else(|payload| {
            Err(Error::Handler(FailureInfo::from_panic(payload, &location)))
        });

        match result {
            Ok(res) => {
                let res = res.apply(overrides);
                debug!(status = res.status_code(), route = %location, "handled");
                res
            }
            Err(err) => {
                let info = err.failure_info();
                error!(
                    route = %location,
                    error_type = %info.type_name,
                    error = %info.message,
                    "handler failed"
                );
                Response::from_error(&err, self.config.debug)
            }
        }
    }
}
