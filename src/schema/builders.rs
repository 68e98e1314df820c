//! Helpers shared by the stream schemas

use super::types::SchemaProperty;

/// The `attributes` object of a JSON:API resource
pub fn attributes<I>(properties: I, description: &str) -> SchemaProperty
where
    I: IntoIterator<Item = (&'static str, SchemaProperty)>,
{
    SchemaProperty::object(properties).with_description(description)
}

/// The `relationships` object for a list of includes.
///
/// Each include becomes `{data: {id, type}}`: relationships carry foreign
/// keys only, never the related resource itself.
pub fn relationships_schema(includes: &[&str]) -> SchemaProperty {
    SchemaProperty::object(includes.iter().map(|include| {
        let data = SchemaProperty::object([
            ("id", SchemaProperty::string()),
            ("type", SchemaProperty::string()),
        ]);
        (*include, SchemaProperty::object([("data", data)]))
    }))
}
