//! The application façade.

use serde_json::Value;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::event::Event;
use crate::handler::Handler;
use crate::method::Method;
use crate::response::Response;
use crate::router::Router;

/// Route registration plus the invocation entry point.
///
/// Build it once at start-up; each registration returns `self` so calls
/// chain. Handlers are moved in, but `async fn` items are `Copy`, so the
/// function itself stays callable on its own (e.g. from unit tests).
///
/// ```rust
/// use lamina::{App, Method, Request};
///
/// async fn ping(_req: Request) -> Result<&'static str, lamina::Error> {
///     Ok("pong")
/// }
///
/// let app = App::new()
///     .any("/ping", ping)
///     .route("/thing", [Method::Post, Method::Put], ping)
///     .get("/activity/{activity_id}", ping);
/// assert_eq!(app.router().len(), 3);
/// ```
#[derive(Clone, Default)]
pub struct App {
    router: Router,
    config: Config,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self { router: Router::new(), config }
    }

    /// Turns debug mode on or off. See [`Config::debug`].
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    pub fn config(&self) -> Config { self.config }

    pub fn router(&self) -> &Router { &self.router }

    /// Registers `handler` for `template` and a set of methods. An empty set
    /// answers every method.
    ///
    /// # Panics
    ///
    /// Panics if `template` is malformed.
    pub fn route(
        mut self,
        template: &str,
        methods: impl IntoIterator<Item = Method>,
        handler: impl Handler,
    ) -> Self {
        self.router = self.router.route(template, methods, handler);
        self
    }

    /// Registers `handler` for every method.
    pub fn any(self, template: &str, handler: impl Handler) -> Self {
        self.route(template, [], handler)
    }

    /// Registers `handler` for exactly one method.
    pub fn on(self, method: Method, template: &str, handler: impl Handler) -> Self {
        self.route(template, [method], handler)
    }

    pub fn get(self, template: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, template, handler)
    }

    pub fn post(self, template: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, template, handler)
    }

    pub fn put(self, template: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, template, handler)
    }

    pub fn delete(self, template: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, template, handler)
    }

    pub fn patch(self, template: &str, handler: impl Handler) -> Self {
        self.on(Method::Patch, template, handler)
    }

    /// Handles one invocation event. Always returns a response; malformed
    /// events, unknown routes and failing handlers all become status codes.
    pub async fn call(&self, event: Value) -> Response {
        Dispatcher::new(&self.router, self.config).handle(event).await
    }

    /// Like [`call`](Self::call), for an event still in its raw JSON form.
    pub async fn call_slice(&self, raw: &[u8]) -> Response {
        let dispatcher = Dispatcher::new(&self.router, self.config);
        match Event::from_slice(raw) {
            Ok(event) => dispatcher.handle_event(event).await,
            Err(err) => dispatcher.reject(err),
        }
    }

    /// Like [`call`](Self::call), for an already parsed event.
    pub async fn call_event(&self, event: Event) -> Response {
        Dispatcher::new(&self.router, self.config).handle_event(event).await
    }
}
