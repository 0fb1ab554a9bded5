//! Mock definitions and their activation.
//!
//! - [`MockDefinition`]: fluent builder producing interception rules
//! - [`DefinitionRegistry`]: named store of reusable definitions
//! - [`MockServer`]: registers definitions (inline or by name) with an interceptor

pub mod definition;
pub mod registry;
pub mod server;

pub use definition::{MockDefinition, PARAMS_MISMATCH, PAYLOAD_MISMATCH};
pub use registry::DefinitionRegistry;
pub use server::{Activation, MockServer};
