//! Errors raised while building, collecting and activating mock definitions.

use thiserror::Error;

/// Result type alias for mock operations.
pub type Result<T> = std::result::Result<T, MockError>;

/// Setup-time failures.
///
/// A request that does not satisfy a definition's constraints is never reported here; it
/// resolves to [`Resolution::NetworkError`](crate::types::response::Resolution::NetworkError).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
    /// `run()` was called before a URL was set.
    #[error("No url provided")]
    MissingUrl,

    /// A method name outside of the supported verbs.
    #[error("Unknown HTTP method `{0}`, expected one of GET, POST, PUT, PATCH, HEAD, OPTIONS, DELETE")]
    UnknownMethod(String),

    /// A definition without a name was passed to the registry.
    #[error(
        "Each handler should contain a name to be stored in the collection. \
         For future reference, name your handler using the `named(\"...\")` method"
    )]
    UnnamedDefinition,

    /// No definition is stored under the requested name.
    #[error("No handler found with the given name `{name}` in the collection.")]
    DefinitionNotFound { name: String },

    /// A name was activated on a server constructed without a registry.
    #[error(
        "Unable to find handler `{name}` because there isn't a registry associated with the \
         current MockServer instance. Please consider creating a registry or using an inline \
         handler instead."
    )]
    NoRegistryConfigured { name: String },

    /// A payload or body could not be converted to JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MockError {
    fn from(err: serde_json::Error) -> Self {
        MockError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_missing_url_message() {
        assert_eq!(MockError::MissingUrl.to_string(), "No url provided");
    }

    #[rstest]
    fn test_unnamed_definition_points_to_naming_method() {
        let display = MockError::UnnamedDefinition.to_string();
        assert!(display.contains("should contain a name"));
        assert!(display.contains("named(\"...\")"));
    }

    #[rstest]
    #[case("getUsers")]
    #[case("register")]
    #[case("")]
    fn test_not_found_mentions_name(#[case] name: &str) {
        let error = MockError::DefinitionNotFound {
            name: name.to_string(),
        };
        assert!(error.to_string().contains(&format!("`{}`", name)));
    }

    #[rstest]
    fn test_no_registry_mentions_name() {
        let error = MockError::NoRegistryConfigured {
            name: "getAllUsers".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("`getAllUsers`"));
        assert!(display.contains("registry"));
    }

    #[rstest]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let error: MockError = json_err.into();
        assert!(matches!(error, MockError::Serialization(_)));
    }
}
