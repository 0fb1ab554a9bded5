//! Definition files: declaring mocks in YAML, JSON or JSONC.
//!
//! A definition file holds a list of entries:
//!
//! ```yaml
//! - name: getAllUsers
//!   method: GET
//!   url: /users
//!   params: { admin: "true" }
//!   body: { success: true, users: {} }
//! ```

pub mod definition;
pub mod error;
pub mod loader;
pub mod parser;

pub use definition::DefinitionConfig;
pub use error::ConfigError;
pub use loader::{load_definitions, load_registry};
