//! Responses produced by intercept rules and the builders resolvers compose them with.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Mocked HTTP response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MockedResponse {
    /// HTTP status code (100-599)
    pub status: u16,
    /// Response headers
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    /// Response body (JSON), `None` for an empty body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl Default for MockedResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
            body: None,
        }
    }
}

impl MockedResponse {
    /// Decode the body into a typed value. An empty body decodes from `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match &self.body {
            Some(body) => T::deserialize(body),
            None => T::deserialize(&Value::Null),
        }
    }

    /// Body rendered the way an HTTP client receives it; empty when there is no body.
    pub fn text(&self) -> String {
        self.body
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_default()
    }
}

/// Outcome of resolving one intercepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Respond with a mocked response.
    Respond(MockedResponse),
    /// Fail the request at connection level, as if no server were reachable.
    NetworkError(String),
}

impl Resolution {
    pub fn is_network_error(&self) -> bool {
        matches!(self, Resolution::NetworkError(_))
    }

    pub fn response(&self) -> Option<&MockedResponse> {
        match self {
            Resolution::Respond(response) => Some(response),
            Resolution::NetworkError(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Transform {
    Status(u16),
    Header(String, String),
    Json(Value),
    Invalid(String),
}

/// One step applied to a response under composition.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTransformer(Transform);

impl ResponseTransformer {
    fn apply(self, response: &mut MockedResponse) -> Result<(), String> {
        match self.0 {
            Transform::Status(status) => response.status = status,
            Transform::Header(name, value) => {
                response.headers.insert(name, value);
            }
            Transform::Json(Value::Null) => response.body = None,
            Transform::Json(body) => {
                response
                    .headers
                    .entry("content-type".to_string())
                    .or_insert_with(|| "application/json".to_string());
                response.body = Some(body);
            }
            Transform::Invalid(reason) => return Err(reason),
        }
        Ok(())
    }
}

/// Builds transformers for [`ResponseComposer::compose`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RestContext;

impl RestContext {
    pub fn status(&self, status: u16) -> ResponseTransformer {
        ResponseTransformer(Transform::Status(status))
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) -> ResponseTransformer {
        ResponseTransformer(Transform::Header(name.into().to_lowercase(), value.into()))
    }

    /// JSON body. `null` means an empty body.
    pub fn json<T: Serialize>(&self, body: &T) -> ResponseTransformer {
        match serde_json::to_value(body) {
            Ok(value) => ResponseTransformer(Transform::Json(value)),
            Err(e) => ResponseTransformer(Transform::Invalid(format!(
                "Response body serialization failed: {}",
                e
            ))),
        }
    }
}

/// Turns transformers into a [`Resolution`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    /// Apply transformers in order on top of an empty `200` response.
    ///
    /// A transformer that failed to build turns the whole resolution into a network error.
    pub fn compose<I>(&self, transformers: I) -> Resolution
    where
        I: IntoIterator<Item = ResponseTransformer>,
    {
        let mut response = MockedResponse::default();
        for transformer in transformers {
            if let Err(reason) = transformer.apply(&mut response) {
                tracing::warn!("{}", reason);
                return Resolution::NetworkError(reason);
            }
        }
        Resolution::Respond(response)
    }

    pub fn network_error(&self, reason: impl Into<String>) -> Resolution {
        Resolution::NetworkError(reason.into())
    }
}
