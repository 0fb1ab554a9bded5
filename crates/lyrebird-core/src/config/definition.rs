//! Declarative mock definition as written in definition files.

use crate::error::MockError;
use crate::mocks::definition::MockDefinition;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One mock definition entry of a definition file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionConfig {
    /// Registry name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// HTTP method name, GET when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// URL pattern (supports {param} placeholders)
    pub url: String,
    /// Query parameters the request must carry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, String>>,
    /// Request body the request must carry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// HTTP status code for the response, 200 when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Response headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// Response body (JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl DefinitionConfig {
    /// Build the mock definition this entry declares.
    pub fn into_definition(self) -> Result<MockDefinition, MockError> {
        let method = self.method.as_deref().unwrap_or("GET");
        let mut definition = MockDefinition::new().on(method, self.url)?;

        if let Some(name) = self.name {
            definition = definition.named(name);
        }
        if let Some(params) = self.params {
            definition = definition.with_params(params);
        }
        if let Some(payload) = self.payload {
            definition = definition.with_payload(payload);
        }
        definition = match self.body {
            Some(body) => definition.reply_json(self.status.unwrap_or(200), body),
            None => definition.reply(self.status.unwrap_or(200)),
        };
        for (name, value) in self.headers.into_iter().flatten() {
            definition = definition.with_header(name, value);
        }

        Ok(definition)
    }
}
