//! Stream schema module
//!
//! Typed JSON Schema documents for the records each stream emits.
//!
//! Every leaf is nullable: the API omits or nulls attributes freely, and a
//! downstream loader must accept whatever the server sends for a known key.

mod builders;
mod types;

pub use builders::{attributes, relationships_schema};
pub use types::{JsonSchema, JsonType, NullableType, SchemaProperty};
