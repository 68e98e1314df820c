//! Decoder types and traits

use crate::error::Result;
use serde_json::Value;

/// Lazy sequence of records for a single page
pub type Records = std::vec::IntoIter<Value>;

/// Trait for decoding response bodies into records
pub trait RecordDecoder: Send + Sync {
    /// Parse the raw response body into a JSON document
    fn parse(&self, body: &str) -> Result<Value>;

    /// Yield the records contained in a parsed page, in server order
    fn records(&self, page: &Value) -> Result<Records>;

    /// Parse a body and yield its records
    fn decode(&self, body: &str) -> Result<Records> {
        let page = self.parse(body)?;
        self.records(&page)
    }
}
