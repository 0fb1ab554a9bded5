//! Interception seam: runnable rules and the capability that accepts them.
//!
//! The physical interception mechanism lives outside this crate and only has to implement
//! [`Interceptor`]. [`InMemoryInterceptor`] is an in-process implementation that dispatches
//! requests straight to registered rules, meant for driving mocks from tests.

use crate::matching::url_matches;
use crate::types::method::HttpMethod;
use crate::types::request::InterceptedRequest;
use crate::types::response::{MockedResponse, Resolution, ResponseComposer, RestContext};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Resolver callback shared by a definition and every rule produced from it.
pub type Resolver =
    Arc<dyn Fn(&InterceptedRequest, &ResponseComposer, &RestContext) -> Resolution + Send + Sync>;

/// A runnable interception rule: method, URL pattern and resolver.
#[derive(Clone)]
pub struct InterceptRule {
    method: HttpMethod,
    url: String,
    resolver: Resolver,
}

impl InterceptRule {
    pub fn new<F>(method: HttpMethod, url: impl Into<String>, resolver: F) -> Self
    where
        F: Fn(&InterceptedRequest, &ResponseComposer, &RestContext) -> Resolution
            + Send
            + Sync
            + 'static,
    {
        Self::with_resolver(method, url, Arc::new(resolver))
    }

    /// Create a rule around an already shared resolver.
    pub fn with_resolver(method: HttpMethod, url: impl Into<String>, resolver: Resolver) -> Self {
        Self {
            method,
            url: url.into(),
            resolver,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether this rule intercepts the request's method and path.
    pub fn applies_to(&self, request: &InterceptedRequest) -> bool {
        self.method == request.method && url_matches(&self.url, &request.url).matched
    }

    /// Resolve a request with this rule.
    ///
    /// Path parameters captured by the URL pattern are exposed on the request handed to the
    /// resolver.
    pub fn resolve(&self, request: &InterceptedRequest) -> Resolution {
        let captured = url_matches(&self.url, &request.url);
        if captured.params.is_empty() {
            return (self.resolver)(request, &ResponseComposer, &RestContext);
        }

        let mut request = request.clone();
        request.path_params.extend(captured.params);
        (self.resolver)(&request, &ResponseComposer, &RestContext)
    }
}

impl fmt::Debug for InterceptRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptRule")
            .field("method", &self.method)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// Capability of registering interception rules.
pub trait Interceptor {
    fn register(&self, rule: InterceptRule);
}

impl<T: Interceptor + ?Sized> Interceptor for &T {
    fn register(&self, rule: InterceptRule) {
        (**self).register(rule)
    }
}

impl<T: Interceptor + ?Sized> Interceptor for Arc<T> {
    fn register(&self, rule: InterceptRule) {
        (**self).register(rule)
    }
}

/// Failure observed by the client issuing an intercepted request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The matching rule signalled a connection-level failure.
    #[error("Network error: {reason}")]
    Network { reason: String },
    /// No registered rule intercepts the request.
    #[error("No handler intercepts {method} {url}")]
    Unhandled { method: HttpMethod, url: String },
}

/// In-process interceptor that dispatches requests to registered rules.
///
/// Rules registered later take precedence over earlier ones; the first rule whose method and
/// URL pattern apply handles the request, whatever its resolution.
#[derive(Debug, Default)]
pub struct InMemoryInterceptor {
    rules: Mutex<Vec<InterceptRule>>,
}

impl InMemoryInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<InterceptRule>> {
        self.rules.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Resolve the request with the newest applicable rule. `None` when unhandled.
    pub fn dispatch(&self, request: &InterceptedRequest) -> Option<Resolution> {
        let rule = self
            .lock()
            .iter()
            .rev()
            .find(|rule| rule.applies_to(request))
            .cloned();

        let Some(rule) = rule else {
            tracing::trace!("No rule intercepts {} {}", request.method, request.url);
            return None;
        };

        tracing::trace!(
            "Dispatching {} {} to rule {} {}",
            request.method,
            request.url,
            rule.method(),
            rule.url()
        );
        Some(rule.resolve(request))
    }

    /// Issue a request the way an HTTP client observes it.
    pub fn fetch(&self, request: &InterceptedRequest) -> Result<MockedResponse, FetchError> {
        match self.dispatch(request) {
            Some(Resolution::Respond(response)) => Ok(response),
            Some(Resolution::NetworkError(reason)) => Err(FetchError::Network { reason }),
            None => Err(FetchError::Unhandled {
                method: request.method,
                url: request.url.clone(),
            }),
        }
    }

    /// Drop every registered rule.
    pub fn reset(&self) {
        self.lock().clear();
    }

    /// Snapshot of registered rules in registration order.
    pub fn rules(&self) -> Vec<InterceptRule> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Interceptor for InMemoryInterceptor {
    fn register(&self, rule: InterceptRule) {
        tracing::debug!("Registering rule {} {}", rule.method(), rule.url());
        self.lock().push(rule);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn rule(method: HttpMethod, url: &str, status: u16) -> InterceptRule {
        InterceptRule::new(
            method,
            url,
            move |_, res, ctx| res.compose([ctx.status(status)]),
        )
    }

    #[rstest]
    #[case(HttpMethod::Get, "/users", true)]
    #[case(HttpMethod::Get, "/users?admin=true", true)]
    #[case(HttpMethod::Post, "/users", false)]
    #[case(HttpMethod::Get, "/posts", false)]
    fn test_rule_applies_to(#[case] method: HttpMethod, #[case] url: &str, #[case] expected: bool) {
        let rule = rule(HttpMethod::Get, "/users", 200);
        assert_eq!(
            rule.applies_to(&InterceptedRequest::new(method, url)),
            expected
        );
    }

    #[rstest]
    #[case("https://api.example.com/users", true)]
    #[case("/users", true)]
    #[case("http://other.host/users", false)]
    fn test_absolute_rule_checks_origin(#[case] url: &str, #[case] expected: bool) {
        let rule = rule(HttpMethod::Get, "https://api.example.com/users", 200);
        assert_eq!(rule.applies_to(&InterceptedRequest::get(url)), expected);
    }

    #[rstest]
    fn test_rule_exposes_path_params() {
        let rule = InterceptRule::new(
            HttpMethod::Get,
            "/users/{id}",
            |req, res, ctx| {
                let id = req.path_params.get("id").cloned().unwrap_or_default();
                res.compose([ctx.json(&json!({ "id": id }))])
            },
        );

        let resolution = rule.resolve(&InterceptedRequest::get("/users/42"));
        assert_eq!(
            resolution.response().and_then(|r| r.body.clone()),
            Some(json!({"id": "42"}))
        );
    }

    #[rstest]
    fn test_dispatch_prefers_latest_rule() {
        let interceptor = InMemoryInterceptor::new();
        interceptor.register(rule(HttpMethod::Get, "/users", 200));
        interceptor.register(rule(HttpMethod::Get, "/users", 204));

        let response = interceptor
            .fetch(&InterceptedRequest::get("/users"))
            .expect("Should respond");
        assert_eq!(response.status, 204);
    }

    #[rstest]
    fn test_fetch_unhandled() {
        let interceptor = InMemoryInterceptor::new();
        interceptor.register(rule(HttpMethod::Get, "/users", 200));

        let result = interceptor.fetch(&InterceptedRequest::post("/users"));
        assert_eq!(
            result,
            Err(FetchError::Unhandled {
                method: HttpMethod::Post,
                url: "/users".to_string(),
            })
        );
    }

    #[rstest]
    fn test_fetch_network_error() {
        let interceptor = InMemoryInterceptor::new();
        interceptor.register(InterceptRule::new(
            HttpMethod::Get,
            "/down",
            |_, res, _| res.network_error("Connection refused"),
        ));

        let result = interceptor.fetch(&InterceptedRequest::get("/down"));
        assert_eq!(
            result,
            Err(FetchError::Network {
                reason: "Connection refused".to_string()
            })
        );
    }

    #[rstest]
    fn test_reset_clears_rules() {
        let interceptor = InMemoryInterceptor::new();
        interceptor.register(rule(HttpMethod::Get, "/a", 200));
        interceptor.register(rule(HttpMethod::Get, "/b", 200));
        assert_eq!(interceptor.len(), 2);

        interceptor.reset();
        assert!(interceptor.is_empty());
        assert!(interceptor.dispatch(&InterceptedRequest::get("/a")).is_none());
    }

    #[rstest]
    fn test_register_through_shared_handle() {
        let interceptor = Arc::new(InMemoryInterceptor::new());
        let handle = Arc::clone(&interceptor);
        handle.register(rule(HttpMethod::Get, "/a", 200));

        let rules = interceptor.rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].url(), "/a");
    }
}
