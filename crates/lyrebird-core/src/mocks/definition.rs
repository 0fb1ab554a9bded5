//! Fluent mock definition builder.
//!
//! A [`MockDefinition`] accumulates what to intercept (method and URL), which requests it
//! applies to (query parameters and payload) and how to answer (status, body, headers or a
//! custom resolver). [`MockDefinition::run`] turns it into an [`InterceptRule`].
//!
//! # Example
//! ```
//! # use lyrebird_core::MockDefinition;
//! # use serde_json::json;
//! let rule = MockDefinition::new()
//!     .on_get("/users")
//!     .with_params([("admin", "true")])
//!     .reply_json(200, json!({"success": true}))
//!     .run()?;
//! assert_eq!(rule.url(), "/users");
//! # Ok::<(), lyrebird_core::MockError>(())
//! ```

use crate::error::MockError;
use crate::interceptor::{InterceptRule, Resolver};
use crate::matching::{params_match, payload_matches};
use crate::types::method::{HttpMethod, IntoMethod};
use crate::types::request::InterceptedRequest;
use crate::types::response::{Resolution, ResponseComposer, RestContext};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub const PARAMS_MISMATCH: &str = "Params mismatch.";
pub const PAYLOAD_MISMATCH: &str = "Payload mismatch.";

/// Declarative mock: which requests to intercept and what to respond with.
///
/// `B` and `P` track the declared response body and request payload types. They narrow as
/// [`reply_json`](Self::reply_json) and [`with_payload`](Self::with_payload) are called and only
/// drive the typed accessors; matching always works on JSON values.
pub struct MockDefinition<B = Value, P = Value> {
    method: HttpMethod,
    url: Option<String>,
    params: Option<HashMap<String, String>>,
    payload: Option<Value>,
    status: u16,
    body: Option<Value>,
    headers: HashMap<String, String>,
    resolver: Option<Resolver>,
    name: Option<String>,
    invalid_payload: Option<MockError>,
    invalid_body: Option<MockError>,
    shape: PhantomData<fn() -> (B, P)>,
}

impl MockDefinition {
    pub fn new() -> Self {
        Self {
            method: HttpMethod::Get,
            url: None,
            params: None,
            payload: None,
            status: 200,
            body: None,
            headers: HashMap::new(),
            resolver: None,
            name: None,
            invalid_payload: None,
            invalid_body: None,
            shape: PhantomData,
        }
    }
}

impl Default for MockDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, P> MockDefinition<B, P> {
    /// Intercept `method` on `url`. The method may be given by name; unknown names fail here.
    pub fn on<M: IntoMethod>(self, method: M, url: impl Into<String>) -> Result<Self, MockError> {
        let method = method.into_method()?;
        Ok(self.route(method, url))
    }

    pub fn on_get(self, url: impl Into<String>) -> Self {
        self.route(HttpMethod::Get, url)
    }

    pub fn on_post(self, url: impl Into<String>) -> Self {
        self.route(HttpMethod::Post, url)
    }

    pub fn on_put(self, url: impl Into<String>) -> Self {
        self.route(HttpMethod::Put, url)
    }

    pub fn on_patch(self, url: impl Into<String>) -> Self {
        self.route(HttpMethod::Patch, url)
    }

    pub fn on_head(self, url: impl Into<String>) -> Self {
        self.route(HttpMethod::Head, url)
    }

    pub fn on_options(self, url: impl Into<String>) -> Self {
        self.route(HttpMethod::Options, url)
    }

    pub fn on_delete(self, url: impl Into<String>) -> Self {
        self.route(HttpMethod::Delete, url)
    }

    fn route(mut self, method: HttpMethod, url: impl Into<String>) -> Self {
        self.method = method;
        self.url = Some(url.into());
        self
    }

    /// Replace the expected query parameters.
    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params = Some(
            params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Replace the expected request payload.
    ///
    /// The request body must equal it exactly. `Value::Null` is a constraint too: only requests
    /// without a body match.
    pub fn with_payload<Q: Serialize>(self, payload: Q) -> MockDefinition<B, Q> {
        let mut next = self.narrow::<B, Q>();
        (next.payload, next.invalid_payload) = split_serialized(&payload);
        next
    }

    /// Respond with `status` and an empty body.
    pub fn reply(mut self, status: u16) -> Self {
        self.status = status;
        self.body = None;
        self.invalid_body = None;
        self
    }

    /// Respond with `status` and a JSON `body`.
    pub fn reply_json<C: Serialize>(self, status: u16, body: C) -> MockDefinition<C, P> {
        let mut next = self.narrow::<C, P>();
        next.status = status;
        (next.body, next.invalid_body) = split_serialized(&body);
        next
    }

    /// Add a response header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Install a custom resolver.
    ///
    /// The resolver takes over completely: query and payload constraints are not checked and the
    /// configured reply is ignored.
    pub fn resolve<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&InterceptedRequest, &ResponseComposer, &RestContext) -> Resolution
            + Send
            + Sync
            + 'static,
    {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Name the definition for registry lookup.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the runnable rule. Does not modify the definition and can be called repeatedly.
    pub fn run(&self) -> Result<InterceptRule, MockError> {
        let url = self.url.as_deref().ok_or(MockError::MissingUrl)?;
        if let Some(invalid) = self.invalid_payload.as_ref().or(self.invalid_body.as_ref()) {
            return Err(invalid.clone());
        }

        let resolver = match &self.resolver {
            Some(custom) => Arc::clone(custom),
            None => {
                let expectation = Expectation {
                    params: self.params.clone(),
                    payload: self.payload.clone(),
                    status: self.status,
                    body: self.body.clone(),
                    headers: self.headers.clone(),
                };
                let resolver: Resolver = Arc::new(
                    move |request: &InterceptedRequest, res: &ResponseComposer, ctx: &RestContext| {
                        expectation.resolve(request, res, ctx)
                    },
                );
                resolver
            }
        };

        Ok(InterceptRule::with_resolver(self.method, url, resolver))
    }

    /// Drop the static shape, e.g. to store the definition in a registry.
    pub fn untyped(self) -> MockDefinition {
        self.narrow()
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn expected_params(&self) -> Option<&HashMap<String, String>> {
        self.params.as_ref()
    }

    pub fn expected_payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    fn narrow<C, Q>(self) -> MockDefinition<C, Q> {
        MockDefinition {
            method: self.method,
            url: self.url,
            params: self.params,
            payload: self.payload,
            status: self.status,
            body: self.body,
            headers: self.headers,
            resolver: self.resolver,
            name: self.name,
            invalid_payload: self.invalid_payload,
            invalid_body: self.invalid_body,
            shape: PhantomData,
        }
    }
}

impl<B: DeserializeOwned, P> MockDefinition<B, P> {
    /// Configured response body decoded as the declared body type.
    pub fn decoded_body(&self) -> Option<Result<B, serde_json::Error>> {
        self.body.as_ref().map(|body| B::deserialize(body))
    }
}

impl<B, P: DeserializeOwned> MockDefinition<B, P> {
    /// Expected payload decoded as the declared payload type.
    pub fn decoded_payload(&self) -> Option<Result<P, serde_json::Error>> {
        self.payload.as_ref().map(|payload| P::deserialize(payload))
    }
}

impl<B, P> Clone for MockDefinition<B, P> {
    fn clone(&self) -> Self {
        Self {
            method: self.method,
            url: self.url.clone(),
            params: self.params.clone(),
            payload: self.payload.clone(),
            status: self.status,
            body: self.body.clone(),
            headers: self.headers.clone(),
            resolver: self.resolver.clone(),
            name: self.name.clone(),
            invalid_payload: self.invalid_payload.clone(),
            invalid_body: self.invalid_body.clone(),
            shape: PhantomData,
        }
    }
}

impl<B, P> PartialEq for MockDefinition<B, P> {
    fn eq(&self, other: &Self) -> bool {
        let same_resolver = match (&self.resolver, &other.resolver) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };

        same_resolver
            && self.method == other.method
            && self.url == other.url
            && self.params == other.params
            && self.payload == other.payload
            && self.status == other.status
            && self.body == other.body
            && self.headers == other.headers
            && self.name == other.name
            && self.invalid_payload == other.invalid_payload
            && self.invalid_body == other.invalid_body
    }
}

impl<B, P> fmt::Debug for MockDefinition<B, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockDefinition")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("url", &self.url)
            .field("params", &self.params)
            .field("payload", &self.payload)
            .field("status", &self.status)
            .field("body", &self.body)
            .field("headers", &self.headers)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

fn split_serialized<T: Serialize>(value: &T) -> (Option<Value>, Option<MockError>) {
    match serde_json::to_value(value) {
        Ok(value) => (Some(value), None),
        Err(e) => (None, Some(e.into())),
    }
}

/// Constraints and reply captured by a rule built without a custom resolver.
struct Expectation {
    params: Option<HashMap<String, String>>,
    payload: Option<Value>,
    status: u16,
    body: Option<Value>,
    headers: HashMap<String, String>,
}

impl Expectation {
    fn resolve(
        &self,
        request: &InterceptedRequest,
        res: &ResponseComposer,
        ctx: &RestContext,
    ) -> Resolution {
        if let Some(expected) = &self.params {
            if !params_match(expected, &request.query) {
                tracing::trace!("{} {}: {}", request.method, request.url, PARAMS_MISMATCH);
                return res.network_error(PARAMS_MISMATCH);
            }
        }

        if let Some(expected) = &self.payload {
            if !payload_matches(expected, &request.body) {
                tracing::trace!("{} {}: {}", request.method, request.url, PAYLOAD_MISMATCH);
                return res.network_error(PAYLOAD_MISMATCH);
            }
        }

        let mut parts = vec![ctx.status(self.status)];
        parts.extend(self.headers.iter().map(|(k, v)| ctx.set(k.as_str(), v.as_str())));
        if let Some(body) = &self.body {
            parts.push(ctx.json(body));
        }
        res.compose(parts)
    }
}
