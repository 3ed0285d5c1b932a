//! Incoming request type.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::method::Method;

/// A request, built from one invocation event.
///
/// Cloning is cheap: the body is reference-counted.
#[derive(Clone, Debug)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) params: HashMap<String, String>,
    pub(crate) query: HashMap<String, String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) is_base64_encoded: bool,
}

impl Request {
    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// True when the trigger delivered the body base64-encoded. lamina does
    /// not decode it; the handler decides what to do with the bytes.
    pub fn is_base64_encoded(&self) -> bool { self.is_base64_encoded }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/activity/{activity_id}`, `req.param("activity_id")` on
    /// `/activity/152342` returns `Some("152342")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// All path parameters.
    pub fn param_map(&self) -> &HashMap<String, String> { &self.params }

    /// Projects the path parameters onto `T`.
    ///
    /// `T` declares the parameters the handler wants; parameters it does not
    /// declare are ignored, and a declared one that is missing is an error.
    ///
    /// ```rust
    /// #[derive(serde::Deserialize)]
    /// struct ActivityPath {
    ///     activity_id: String,
    /// }
    ///
    /// async fn get_activity(req: lamina::Request) -> Result<String, lamina::Error> {
    ///     let path: ActivityPath = req.params()?;
    ///     Ok(path.activity_id)
    /// }
    /// ```
    pub fn params<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let map = self.params.iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect::<serde_json::Map<_, _>>();
        serde_json::from_value(serde_json::Value::Object(map)).map_err(Error::Params)
    }

    /// Returns a query-string parameter.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// All query-string parameters.
    pub fn query_map(&self) -> &HashMap<String, String> { &self.query }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(Error::Body)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    fn request() -> Request {
        Request {
            method: Method::Get,
            path: "/users/7/posts/9".to_owned(),
            params: HashMap::from([
                ("user".to_owned(), "7".to_owned()),
                ("post".to_owned(), "9".to_owned()),
            ]),
            query: HashMap::from([("page".to_owned(), "2".to_owned())]),
            headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body: Bytes::from_static(br#"{"distance":15}"#),
            is_base64_encoded: false,
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct PostOnly {
        post: String,
    }

    #[derive(Debug, Deserialize)]
    struct NeedsSlug {
        #[allow(dead_code)]
        slug: String,
    }

    #[test]
    fn params_projects_declared_fields_only() {
        let p: PostOnly = request().params().unwrap();
        assert_eq!(p, PostOnly { post: "9".to_owned() });
    }

    #[test]
    fn params_reports_missing_declared_field() {
        let err = request().params::<NeedsSlug>().unwrap_err();
        assert!(matches!(err, Error::Params(_)));
    }

    #[test]
    fn header_lookup_ignores_case() {
        assert_eq!(request().header("content-type"), Some("application/json"));
        assert_eq!(request().header("x-missing"), None);
    }

    #[test]
    fn json_body_and_query() {
        #[derive(Deserialize)]
        struct Ride {
            distance: u32,
        }
        let req = request();
        assert_eq!(req.json::<Ride>().unwrap().distance, 15);
        assert_eq!(req.query("page"), Some("2"));
        assert!(matches!(req.json::<Vec<u8>>(), Err(Error::Body(_))));
    }
}
