//! Response decoder module
//!
//! Turns JSON:API response bodies into record sequences.
//!
//! # Overview
//!
//! A decoder parses the body once per page and hands back a lazy iterator
//! over the resource objects found at its record path (`$.data[*]` by
//! default). The iterator is fresh for every page and is not restartable.

mod decoders;
mod types;

pub use decoders::{extract_path, extract_string, JsonApiDecoder, DEFAULT_RECORD_PATH};
pub use types::{RecordDecoder, Records};

#[cfg(test)]
mod tests;
