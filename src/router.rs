//! Ordered route table.
//!
//! Routes are scanned in registration order. The first route whose template
//! matches the path *and* accepts the method wins. Overlapping templates are
//! allowed on purpose; registration order is the tie-breaker.
//!
//! A route whose template matches but whose method set does not accept the
//! method does not stop the scan: several routes may share one template with
//! different methods. Only when the scan ends without a winner does the
//! table report "path known, method not allowed" rather than "no such path".

use std::collections::HashMap;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::pattern::{PathPattern, PatternError};

/// A registered (template, methods, handler) binding.
#[derive(Clone)]
pub struct Route {
    pattern: PathPattern,
    methods: Vec<Method>,
    pub(crate) handler: BoxedHandler,
}

impl Route {
    pub fn pattern(&self) -> &PathPattern { &self.pattern }

    /// Accepted methods. Empty means every method.
    pub fn methods(&self) -> &[Method] { &self.methods }

    pub fn accepts(&self, method: &Method) -> bool {
        self.methods.is_empty() || self.methods.contains(method)
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("template", &self.pattern.template())
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

/// Result of [`Router::lookup`].
#[derive(Debug)]
pub enum MatchOutcome<'a> {
    Matched { route: &'a Route, params: HashMap<String, String> },
    PathUnmatched,
    /// At least one template matched; `allowed` collects those routes' methods.
    PathMatchedMethodUnmatched { allowed: Vec<Method> },
}

/// The route table.
///
/// Append-only: build it once at start-up, then only look things up.
#[derive(Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registers `handler` for `template` and `methods`. Returns `self` for
    /// chaining. An empty `methods` answers every method.
    ///
    /// # Panics
    ///
    /// Panics if `template` is malformed. Routes are set up at start-up, so a
    /// broken template should stop the process, not surface per request.
    pub fn route(
        self,
        template: &str,
        methods: impl IntoIterator<Item = Method>,
        handler: impl Handler,
    ) -> Self {
        self.try_route(template, methods, handler)
            .unwrap_or_else(|e| panic!("invalid route `{template}`: {e}"))
    }

    /// Non-panicking form of [`route`](Self::route).
    pub fn try_route(
        mut self,
        template: &str,
        methods: impl IntoIterator<Item = Method>,
        handler: impl Handler,
    ) -> Result<Self, PatternError> {
        let pattern = PathPattern::compile(template)?;
        let mut accepted: Vec<Method> = Vec::new();
        for m in methods {
            if !accepted.contains(&m) {
                accepted.push(m);
            }
        }
        tracing::debug!(template, methods = ?accepted, "route registered");
        self.routes.push(Route {
            pattern,
            methods: accepted,
            handler: handler.into_boxed_handler(),
        });
        Ok(self)
    }

    /// Resolves `path` and `method` to a route.
    pub fn lookup(&self, path: &str, method: &Method) -> MatchOutcome<'_> {
        let mut allowed: Option<Vec<Method>> = None;

        for route in &self.routes {
            let Some(params) = route.pattern.matches(path) else {
                continue;
            };
            if route.accepts(method) {
                return MatchOutcome::Matched { route, params };
            }
            let allowed = allowed.get_or_insert_with(Vec::new);
            for m in &route.methods {
                if !allowed.contains(m) {
                    allowed.push(m.clone());
                }
            }
        }

        match allowed {
            Some(allowed) => MatchOutcome::PathMatchedMethodUnmatched { allowed },
            None => MatchOutcome::PathUnmatched,
        }
    }

    pub fn routes(&self) -> &[Route] { &self.routes }

    pub fn len(&self) -> usize { self.routes.len() }

    pub fn is_empty(&self) -> bool { self.routes.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use crate::response::Response;

    async fn noop(_req: Request) -> Response {
        Response::status(crate::Status::NoContent)
    }

    fn template_of<'a>(outcome: &'a MatchOutcome<'a>) -> Option<&'a str> {
        match outcome {
            MatchOutcome::Matched { route, .. } => Some(route.pattern().template()),
            _ => None,
        }
    }

    #[test]
    fn empty_method_set_accepts_everything() {
        let router = Router::new().route("/ping", [], noop);
        for m in [Method::Get, Method::Post, Method::Put, Method::Patch, Method::Delete] {
            assert!(matches!(router.lookup("/ping", &m), MatchOutcome::Matched { .. }));
        }
    }

    #[test]
    fn extension_methods_route_like_any_other() {
        let purge = Method::Extension("PURGE".to_owned());
        let router = Router::new()
            .route("/cache", [], noop)
            .route("/items", [purge.clone()], noop)
            .route("/thing", [Method::Post], noop);

        assert!(matches!(router.lookup("/cache", &purge), MatchOutcome::Matched { .. }));
        assert!(matches!(router.lookup("/items", &purge), MatchOutcome::Matched { .. }));
        assert!(matches!(router.lookup("/nowhere", &purge), MatchOutcome::PathUnmatched));
        match router.lookup("/items", &Method::Get) {
            MatchOutcome::PathMatchedMethodUnmatched { allowed } => assert_eq!(allowed, vec![purge.clone()]),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(matches!(
            router.lookup("/thing", &purge),
            MatchOutcome::PathMatchedMethodUnmatched { .. }
        ));
    }

    #[test]
    fn wrong_method_vs_unknown_path() {
        let router = Router::new().route("/thing", [Method::Post, Method::Put], noop);

        match router.lookup("/thing", &Method::Get) {
            MatchOutcome::PathMatchedMethodUnmatched { allowed } => {
                assert_eq!(allowed, vec![Method::Post, Method::Put]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(matches!(router.lookup("/other", &Method::Get), MatchOutcome::PathUnmatched));
    }

    #[test]
    fn scan_continues_past_method_mismatch() {
        let router = Router::new()
            .route("/res", [Method::Post], noop)
            .route("/res", [Method::Get], noop)
            .route("/{any}", [Method::Delete], noop);

        assert!(matches!(router.lookup("/res", &Method::Get), MatchOutcome::Matched { .. }));
        assert_eq!(template_of(&router.lookup("/res", &Method::Delete)), Some("/{any}"));

        match router.lookup("/res", &Method::Put) {
            MatchOutcome::PathMatchedMethodUnmatched { allowed } => {
                assert_eq!(allowed, vec![Method::Post, Method::Get, Method::Delete]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn first_registered_compatible_route_wins() {
        let router = Router::new()
            .route("/users/{id}", [Method::Get], noop)
            .route("/users/me", [Method::Get], noop);
        assert_eq!(template_of(&router.lookup("/users/me", &Method::Get)), Some("/users/{id}"));

        let router = Router::new()
            .route("/users/me", [Method::Get], noop)
            .route("/users/{id}", [Method::Get], noop);
        assert_eq!(template_of(&router.lookup("/users/me", &Method::Get)), Some("/users/me"));
    }

    #[test]
    fn matched_carries_extracted_params() {
        let router = Router::new().route("/activity/{activity_id}", [Method::Get], noop);
        match router.lookup("/activity/152342", &Method::Get) {
            MatchOutcome::Matched { params, .. } => assert_eq!(params["activity_id"], "152342"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn duplicate_methods_are_collapsed() {
        let router = Router::new().route("/x", [Method::Get, Method::Get], noop);
        assert_eq!(router.routes()[0].methods(), [Method::Get]);
    }

    #[test]
    fn try_route_reports_bad_templates() {
        assert!(Router::new().try_route("/a/{id", [], noop).is_err());
    }

    #[test]
    #[should_panic(expected = "invalid route `/a/{id}/{id}`")]
    fn route_panics_on_bad_template() {
        let _ = Router::new().route("/a/{id}/{id}", [], noop);
    }
}
