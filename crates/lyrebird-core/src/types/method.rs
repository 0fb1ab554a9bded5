//! HTTP verbs a definition can intercept.

use crate::error::MockError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP method for request interception.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// All supported methods.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = MockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MockError::UnknownMethod(s.to_string()))
    }
}

/// Anything that names an HTTP method: the enum itself or its string name.
pub trait IntoMethod {
    fn into_method(self) -> Result<HttpMethod, MockError>;
}

impl IntoMethod for HttpMethod {
    fn into_method(self) -> Result<HttpMethod, MockError> {
        Ok(self)
    }
}

impl IntoMethod for &str {
    fn into_method(self) -> Result<HttpMethod, MockError> {
        self.parse()
    }
}

impl IntoMethod for String {
    fn into_method(self) -> Result<HttpMethod, MockError> {
        self.parse()
    }
}

impl IntoMethod for &String {
    fn into_method(self) -> Result<HttpMethod, MockError> {
        self.parse()
    }
}
