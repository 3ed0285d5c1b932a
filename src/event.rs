//! Inbound event adapter.
//!
//! Turns an API Gateway style proxy event into a [`Request`]. REST API (v1)
//! fields are read first; HTTP API (v2) fields fill the gaps:
//!
//! | Request field | v1 key | v2 fallback |
//! |---|---|---|
//! | path | `path` | `rawPath`, `requestContext.http.path` |
//! | method | `httpMethod` | `requestContext.http.method` |
//! | path parameters | `pathParameters` | same |
//! | query | `queryStringParameters` | same |
//! | headers | `headers` | same |
//! | body | `body`, `isBase64Encoded` | same |
//!
//! `null` maps count as empty. Scalar parameter values (numbers, booleans)
//! are stringified. A body that is not a JSON string is re-serialized.

use std::collections::HashMap;

use bytes::Bytes;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Error;
use crate::method::Method;
use crate::request::Request;

/// A platform invocation event, as far as routing is concerned.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub path: Option<String>,
    pub raw_path: Option<String>,
    pub http_method: Option<String>,
    pub request_context: Option<RequestContext>,
    #[serde(default, deserialize_with = "scalar_map")]
    pub path_parameters: HashMap<String, String>,
    #[serde(default, deserialize_with = "scalar_map")]
    pub query_string_parameters: HashMap<String, String>,
    #[serde(default, deserialize_with = "scalar_map")]
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RequestContext {
    pub http: Option<HttpContext>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct HttpContext {
    pub method: Option<String>,
    pub path: Option<String>,
}

impl Event {
    /// A minimal v1 event, handy in tests and local runs.
    ///
    /// ```rust
    /// use lamina::{Event, Method};
    ///
    /// let event = Event::new(Method::Get, "/activity/152342")
    ///     .query_parameter("units", "km")
    ///     .header("accept", "application/json");
    /// assert_eq!(event.http_method.as_deref(), Some("GET"));
    /// ```
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            path: Some(path.to_owned()),
            http_method: Some(method.as_str().to_owned()),
            ..Self::default()
        }
    }

    pub fn path_parameter(mut self, name: &str, value: &str) -> Self {
        self.path_parameters.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn query_parameter(mut self, name: &str, value: &str) -> Self {
        self.query_string_parameters.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(Value::String(body.into()));
        self
    }

    /// Parses a raw JSON event.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(|e| Error::BadEvent(e.to_string()))
    }

    /// Parses raw JSON bytes.
    pub fn from_slice(raw: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(raw).map_err(|e| Error::BadEvent(e.to_string()))
    }

    /// Builds the [`Request`]. Path parameters are the ones the platform
    /// supplied; the dispatcher later overlays the ones the route extracted.
    pub fn into_request(self) -> Result<Request, Error> {
        let http = self.request_context.and_then(|c| c.http).unwrap_or_default();

        let path = self.path
            .or(self.raw_path)
            .or(http.path)
            .ok_or_else(|| Error::BadEvent("event has no path".to_owned()))?;

        let method = self.http_method
            .or(http.method)
            .ok_or_else(|| Error::BadEvent("event has no HTTP method".to_owned()))?
            .parse::<Method>()
            .map_err(|e| Error::BadEvent(e.to_string()))?;

        let body = match self.body {
            None | Some(Value::Null) => Bytes::new(),
            Some(Value::String(s)) => Bytes::from(s),
            Some(other) => Bytes::from(other.to_string()),
        };

        let mut headers: Vec<(String, String)> = self.headers.into_iter().collect();
        headers.sort();

        Ok(Request {
            method,
            path,
            params: self.path_parameters,
            query: self.query_string_parameters,
            headers,
            body,
            is_base64_encoded: self.is_base64_encoded,
        })
    }
}

fn scalar_map<'de, D>(de: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, Value>>::deserialize(de)?.unwrap_or_default();
    let mut out = HashMap::with_capacity(raw.len());
    for (key, value) in raw {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(serde::de::Error::custom(format!(
                    "value of `{key}` must be a scalar"
                )));
            }
        };
        out.insert(key, value);
    }
    Ok(out)
}
