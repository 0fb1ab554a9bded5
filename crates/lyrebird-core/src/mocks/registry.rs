//! Name-keyed store of reusable mock definitions.
//!
//! Definitions are collected once during test setup and looked up by name when a
//! [`MockServer`](crate::mocks::server::MockServer) activates them.

use crate::error::MockError;
use crate::mocks::definition::MockDefinition;
use std::collections::HashMap;

/// Registry of named mock definitions.
///
/// Entries are never removed; collecting a definition under an existing name replaces the
/// previous one.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
    /// Map of definition name to definition
    definitions: HashMap<String, MockDefinition>,
}

impl DefinitionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store definitions under their names.
    ///
    /// Every definition must be named; if any is not, nothing is stored.
    pub fn collect<I>(&mut self, definitions: I) -> Result<(), MockError>
    where
        I: IntoIterator<Item = MockDefinition>,
    {
        let mut named = Vec::new();
        for definition in definitions {
            let name = match definition.name() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => return Err(MockError::UnnamedDefinition),
            };
            named.push((name, definition));
        }

        for (name, definition) in named {
            tracing::debug!("Collecting definition `{}`", name);
            self.definitions.insert(name, definition);
        }
        Ok(())
    }

    /// Look up a definition by name.
    pub fn find(&self, name: &str) -> Result<&MockDefinition, MockError> {
        self.definitions
            .get(name)
            .ok_or_else(|| MockError::DefinitionNotFound {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Stored names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.definitions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn get_users() -> MockDefinition {
        MockDefinition::new()
            .on_get("/user")
            .reply(200)
            .named("getUsers")
    }

    fn register() -> MockDefinition {
        MockDefinition::new()
            .on_post("/register")
            .reply_json(
                200,
                json!({"success": true, "message": "users registered successfully."}),
            )
            .named("register")
    }

    #[rstest]
    fn test_collect_single_definition() {
        let mut registry = DefinitionRegistry::new();
        registry.collect([get_users()]).unwrap();

        assert_eq!(registry.find("getUsers").unwrap(), &get_users());
        assert_eq!(registry.len(), 1);
    }

    #[rstest]
    fn test_collect_multiple_definitions() {
        let mut registry = DefinitionRegistry::new();
        registry.collect([get_users(), register()]).unwrap();

        assert_eq!(registry.find("getUsers").unwrap(), &get_users());
        assert_eq!(registry.find("register").unwrap(), &register());
        assert_eq!(registry.names(), vec!["getUsers", "register"]);
    }

    #[rstest]
    fn test_collect_keeps_resolver_identity() {
        let definition = MockDefinition::new()
            .on_post("/login")
            .resolve(|_, res, ctx| res.compose([ctx.status(204)]))
            .named("login");

        let mut registry = DefinitionRegistry::new();
        registry.collect([definition.clone()]).unwrap();

        assert_eq!(registry.find("login").unwrap(), &definition);
    }

    #[rstest]
    fn test_collect_overwrites_same_name() {
        let mut registry = DefinitionRegistry::new();
        registry.collect([get_users()]).unwrap();

        let replacement = MockDefinition::new()
            .on_get("/users")
            .reply(204)
            .named("getUsers");
        registry.collect([replacement.clone()]).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("getUsers").unwrap(), &replacement);
    }

    #[rstest]
    #[case(MockDefinition::new().on_get("/user").reply(200))]
    #[case(MockDefinition::new().on_get("/user").named(""))]
    fn test_collect_unnamed_fails(#[case] unnamed: MockDefinition) {
        let mut registry = DefinitionRegistry::new();
        let result = registry.collect([get_users(), unnamed]);

        assert_eq!(result, Err(MockError::UnnamedDefinition));
        assert!(registry.is_empty());
    }

    #[rstest]
    fn test_find_unknown_name() {
        let registry = DefinitionRegistry::new();
        let error = registry.find("invalidHandler").unwrap_err();

        assert_eq!(
            error,
            MockError::DefinitionNotFound {
                name: "invalidHandler".to_string()
            }
        );
        assert!(error.to_string().contains("`invalidHandler`"));
    }
}
