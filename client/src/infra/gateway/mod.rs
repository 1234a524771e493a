//! [`Gateway`]-related implementations.

pub mod http;
#[cfg(test)]
pub(crate) mod mock;

use ::http::{header::InvalidHeaderValue, Method, StatusCode};
use derive_more::{Display, Error as StdError, From};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::user::Token;

pub use self::http::Http;

/// Request to the backend API.
pub use common::Handler as Gateway;

/// Request to the backend API, relative to its base URL.
#[derive(Clone, Debug)]
pub struct Request {
    /// HTTP method of this [`Request`].
    pub method: Method,

    /// Path of this [`Request`], relative to the API base URL.
    pub path: String,

    /// Query parameters of this [`Request`].
    pub query: Vec<(&'static str, String)>,

    /// JSON body of this [`Request`].
    pub body: Option<Value>,

    /// [`Token`] authorizing this [`Request`].
    pub token: Option<Token>,
}

impl Request {
    /// Creates a new [`Request`] with the provided [`Method`] and `path`.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            token: None,
        }
    }

    /// Creates a new `GET` [`Request`].
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a new `POST` [`Request`].
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Adds a query parameter to this [`Request`].
    #[must_use]
    pub fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    /// Sets the JSON body of this [`Request`].
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Authorizes this [`Request`] with the provided [`Token`], if any.
    #[must_use]
    pub fn authorized(mut self, token: Option<Token>) -> Self {
        self.token = token;
        self
    }
}

/// Response of the backend API.
#[derive(Clone, Debug)]
pub struct Response {
    /// [`StatusCode`] of this [`Response`].
    pub status: StatusCode,

    /// Raw body of this [`Response`].
    pub body: Vec<u8>,
}

impl Response {
    /// Decodes the body of this [`Response`] as JSON.
    ///
    /// # Errors
    ///
    /// If the body is not a valid JSON representation of `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Extracts a human-readable error message from the body of this
    /// [`Response`].
    ///
    /// An `error` field is preferred, then a `detail` one. Otherwise, field
    /// errors are joined as `field: message` pairs.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let body = self.json::<Value>().ok()?;
        let fields = match body {
            Value::Object(fields) => fields,
            Value::Null => return None,
            Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Array(_) => return Some(render(&body)),
        };
        if let Some(m) = fields.get("error").or_else(|| fields.get("detail")) {
            return Some(render(m));
        }
        let joined = fields
            .iter()
            .map(|(field, m)| format!("{field}: {}", render(m)))
            .collect::<Vec<_>>()
            .join("; ");
        (!joined.is_empty()).then_some(joined)
    }
}

/// Renders the provided JSON [`Value`] as a human-readable message.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            items.iter().map(render).collect::<Vec<_>>().join(", ")
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Object(_) => {
            value.to_string()
        }
    }
}

/// [`Gateway`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request cannot be sent or its response cannot be received.
    #[display("HTTP exchange failed: {_0}")]
    Transport(reqwest::Error),

    /// Request URL cannot be composed.
    #[display("Invalid request URL: {_0}")]
    Url(url::ParseError),

    /// Request header cannot be composed.
    #[display("Invalid request header: {_0}")]
    Header(InvalidHeaderValue),

    /// API responded with a non-success status.
    #[display("API responded with `{}` status", _0.status)]
    #[from(ignore)]
    Status(#[error(not(source))] Response),
}
