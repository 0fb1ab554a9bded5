//! Activation of mock definitions against an interceptor.
//!
//! This module provides `MockServer`, which registers rules for inline definitions or for
//! definitions looked up by name in a [`DefinitionRegistry`].

use crate::error::MockError;
use crate::interceptor::{InterceptRule, Interceptor};
use crate::mocks::definition::MockDefinition;
use crate::mocks::registry::DefinitionRegistry;
use std::sync::Arc;

/// One item passed to [`MockServer::use_mocks`].
#[derive(Debug, Clone)]
pub enum Activation {
    /// Inline definition
    Definition(MockDefinition),
    /// Name resolved through the server's registry
    Name(String),
}

impl From<MockDefinition> for Activation {
    fn from(definition: MockDefinition) -> Self {
        Activation::Definition(definition)
    }
}

impl From<&MockDefinition> for Activation {
    fn from(definition: &MockDefinition) -> Self {
        Activation::Definition(definition.clone())
    }
}

impl From<&str> for Activation {
    fn from(name: &str) -> Self {
        Activation::Name(name.to_string())
    }
}

impl From<String> for Activation {
    fn from(name: String) -> Self {
        Activation::Name(name)
    }
}

/// Activates mock definitions by registering their rules with an interceptor.
///
/// The interceptor owns the rule lifecycle: nothing registered here is ever removed by the
/// server, reset the interceptor between tests instead.
#[derive(Debug)]
pub struct MockServer<I> {
    interceptor: I,
    registry: Option<Arc<DefinitionRegistry>>,
}

impl<I: Interceptor> MockServer<I> {
    /// Server that only accepts inline definitions.
    pub fn new(interceptor: I) -> Self {
        Self {
            interceptor,
            registry: None,
        }
    }

    /// Server that can also activate definitions by name.
    pub fn with_registry(interceptor: I, registry: impl Into<Arc<DefinitionRegistry>>) -> Self {
        Self {
            interceptor,
            registry: Some(registry.into()),
        }
    }

    pub fn interceptor(&self) -> &I {
        &self.interceptor
    }

    pub fn registry(&self) -> Option<&DefinitionRegistry> {
        self.registry.as_deref()
    }

    /// Activate definitions and registry names, one rule per item in order.
    ///
    /// Every item is resolved before anything is registered, so a failing item leaves the
    /// interceptor untouched. Returns the number of registered rules.
    pub fn use_mocks<T, A>(&self, items: T) -> Result<usize, MockError>
    where
        T: IntoIterator<Item = A>,
        A: Into<Activation>,
    {
        let rules = items
            .into_iter()
            .map(|item| self.rule_for(item.into()))
            .collect::<Result<Vec<_>, _>>()?;

        let count = rules.len();
        for rule in rules {
            self.register(rule);
        }
        Ok(count)
    }

    /// Activate registry definitions by name.
    pub fn enable<T, S>(&self, names: T) -> Result<usize, MockError>
    where
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.use_mocks(names.into_iter().map(|name| Activation::Name(name.as_ref().to_string())))
    }

    /// Activate a single inline definition of any declared shape.
    pub fn use_definition<B, P>(&self, definition: &MockDefinition<B, P>) -> Result<(), MockError> {
        let rule = definition.run()?;
        self.register(rule);
        Ok(())
    }

    /// Declare and activate an inline definition in one step.
    ///
    /// ```
    /// # use lyrebird_core::{InMemoryInterceptor, MockServer};
    /// let interceptor = InMemoryInterceptor::new();
    /// let server = MockServer::new(&interceptor);
    /// server.mock(|d| d.on_get("/test").reply(200))?;
    /// assert_eq!(interceptor.len(), 1);
    /// # Ok::<(), lyrebird_core::MockError>(())
    /// ```
    pub fn mock<F, B, P>(&self, declare: F) -> Result<(), MockError>
    where
        F: FnOnce(MockDefinition) -> MockDefinition<B, P>,
    {
        self.use_definition(&declare(MockDefinition::new()))
    }

    fn rule_for(&self, item: Activation) -> Result<InterceptRule, MockError> {
        match item {
            Activation::Definition(definition) => definition.run(),
            Activation::Name(name) => {
                let registry = self
                    .registry
                    .as_ref()
                    .ok_or_else(|| MockError::NoRegistryConfigured { name: name.clone() })?;
                registry.find(&name)?.run()
            }
        }
    }

    fn register(&self, rule: InterceptRule) {
        tracing::debug!("Activating {} {}", rule.method(), rule.url());
        self.interceptor.register(rule);
    }
}
