//! Fluent HTTP mock definitions for tests.
//!
//! Declare what a request looks like and how to answer it with [`MockDefinition`], keep
//! reusable definitions by name in a [`DefinitionRegistry`] and activate them through a
//! [`MockServer`] bound to an [`Interceptor`].
//!
//! ```
//! # use lyrebird_core::{InMemoryInterceptor, InterceptedRequest, MockDefinition, MockServer};
//! # use serde_json::json;
//! let interceptor = InMemoryInterceptor::new();
//! let server = MockServer::new(&interceptor);
//!
//! server.use_mocks([MockDefinition::new()
//!     .on_get("/users")
//!     .with_params([("admin", "true")])
//!     .reply_json(200, json!({"success": true}))])?;
//!
//! let response = interceptor.fetch(&InterceptedRequest::get("/users?admin=true"))?;
//! assert_eq!(response.status, 200);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! A request that reaches a definition but misses its query or payload constraints fails at
//! connection level ([`Resolution::NetworkError`]) instead of receiving an HTTP error status.

pub mod config;
pub mod error;
pub mod interceptor;
pub mod matching;
pub mod mocks;
pub mod types;

pub use error::{MockError, Result};
pub use interceptor::{FetchError, InMemoryInterceptor, InterceptRule, Interceptor, Resolver};
pub use mocks::{Activation, DefinitionRegistry, MockDefinition, MockServer};
pub use types::method::{HttpMethod, IntoMethod};
pub use types::request::{InterceptedRequest, QueryParams};
pub use types::response::{
    MockedResponse, Resolution, ResponseComposer, ResponseTransformer, RestContext,
};
