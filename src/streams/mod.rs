//! Stream definitions
//!
//! Each Teamtailor resource is described by a static [`StreamDefinition`]:
//! its endpoint, keys, includes, filters and record schema. The shared
//! request and record behavior lives on the definition itself, so adding a
//! resource means adding a table entry and nothing else.

mod definition;
mod definitions;

pub use definition::StreamDefinition;
pub use definitions::{all, find, names, select};

#[cfg(test)]
mod tests;
