//! Core domain types for methods, intercepted requests and mocked responses.

pub mod method;
pub mod request;
pub mod response;
