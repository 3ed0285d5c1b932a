//! Call-scoped context.
//!
//! While [`App::call`](crate::App::call) runs a handler, the current
//! [`Request`] and the handler's [`ResponseContext`] are reachable from any
//! code on that task without threading them through arguments:
//!
//! ```rust,no_run
//! use lamina::{context, Request, Status};
//!
//! async fn create(_req: Request) -> Result<serde_json::Value, lamina::Error> {
//!     let method = context::request()?.method().clone();
//!     context::response(|r| {
//!         r.set_status(Status::Created).set_header("location", "/activity/3");
//!     })?;
//!     Ok(serde_json::json!({ "method": method.as_str() }))
//! }
//! ```
//!
//! The slot is task-local, so concurrent invocations on one `App` never see
//! each other's request. Outside an invocation every accessor returns
//! [`Error::NoActiveCall`].

use std::cell::RefCell;
use std::future::Future;

use crate::error::Error;
use crate::request::Request;
use crate::response::ResponseContext;

struct CallContext {
    request: Request,
    response: RefCell<ResponseContext>,
}

tokio::task_local! {
    static CURRENT: CallContext;
}

/// Runs `fut` with `request` published as the current request. The slot is
/// released when `fut` completes, whether it succeeded, failed or panicked
/// (a panic unwinds through the scope).
///
/// Returns the future's output together with the response adjustments the
/// handler recorded.
pub(crate) async fn scope<F>(request: Request, fut: F) -> (F::Output, ResponseContext)
where
    F: Future,
{
    let call = CallContext { request, response: RefCell::new(ResponseContext::default()) };
    CURRENT
        .scope(call, async move {
            let output = fut.await;
            let response = CURRENT.with(|c| c.response.take());
            (output, response)
        })
        .await
}

/// The request being handled by the current invocation.
pub fn request() -> Result<Request, Error> {
    CURRENT.try_with(|c| c.request.clone()).map_err(|_| Error::NoActiveCall)
}

/// Gives `f` mutable access to the current invocation's [`ResponseContext`].
pub fn response<R>(f: impl FnOnce(&mut ResponseContext) -> R) -> Result<R, Error> {
    CURRENT
        .try_with(|c| f(&mut c.response.borrow_mut()))
        .map_err(|_| Error::NoActiveCall)
}

/// True while an invocation is in progress on this task.
pub fn is_active() -> bool {
    CURRENT.try_with(|_| ()).is_ok()
}
