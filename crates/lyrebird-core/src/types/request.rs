//! Intercepted request as seen by a rule's resolver.

use crate::matching::{parse_query_string, request_path};
use crate::types::method::HttpMethod;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Parsed query parameters, kept in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in request order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// HTTP request handed to an intercept rule.
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptedRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Request URL as issued by the client (path or absolute, with query string)
    pub url: String,
    /// Parsed query parameters
    pub query: QueryParams,
    /// Path parameters captured by the rule's URL pattern
    pub path_params: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Parsed request body, `Null` when the request carried none
    pub body: Value,
}

impl InterceptedRequest {
    /// Create a request without body; the query is parsed from `url`.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        let url = url.into();
        let query = url
            .split_once('?')
            .map(|(_, q)| q.split('#').next().unwrap_or(q))
            .map(parse_query_string)
            .unwrap_or_default();

        Self {
            method,
            url,
            query,
            path_params: HashMap::new(),
            headers: HashMap::new(),
            body: Value::Null,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Attach an already parsed body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Serialize `body` as the request's JSON payload.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = serde_json::to_value(body)?;
        Ok(self)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Path portion of the URL.
    pub fn path(&self) -> &str {
        request_path(&self.url)
    }

    /// Header lookup, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    /// Decode the body into a typed value.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.body)
    }
}
