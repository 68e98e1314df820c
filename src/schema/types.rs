//! Schema document types

use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A JSON Schema primitive type name
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

/// The type of a record property. Written as `["<type>", "null"]`, since any
/// attribute may come back as null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullableType(pub JsonType);

impl NullableType {
    /// The non-null member of the type list
    pub fn inner(self) -> JsonType {
        self.0
    }
}

impl Serialize for NullableType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 == JsonType::Null {
            return JsonType::Null.serialize(serializer);
        }
        [self.0, JsonType::Null].serialize(serializer)
    }
}

/// One property of a record schema, possibly with nested properties
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SchemaProperty {
    #[serde(rename = "type")]
    pub json_type: NullableType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// "date-time", "date" or "email"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaProperty>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaProperty>>,
}

impl SchemaProperty {
    pub fn of(json_type: JsonType) -> Self {
        Self {
            json_type: NullableType(json_type),
            description: None,
            format: None,
            properties: None,
            items: None,
        }
    }

    pub fn string() -> Self {
        Self::of(JsonType::String)
    }

    /// RFC 3339 timestamp
    pub fn date_time() -> Self {
        Self::string().with_format("date-time")
    }

    /// `YYYY-MM-DD`
    pub fn date() -> Self {
        Self::string().with_format("date")
    }

    pub fn email() -> Self {
        Self::string().with_format("email")
    }

    pub fn boolean() -> Self {
        Self::of(JsonType::Boolean)
    }

    pub fn integer() -> Self {
        Self::of(JsonType::Integer)
    }

    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaProperty)>,
        K: Into<String>,
    {
        let properties = properties
            .into_iter()
            .map(|(name, prop)| (name.into(), prop))
            .collect();
        Self {
            properties: Some(properties),
            ..Self::of(JsonType::Object)
        }
    }

    pub fn array(items: SchemaProperty) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(JsonType::Array)
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn get_property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.as_ref()?.get(name)
    }
}

/// Schema of the records one stream emits
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonSchema {
    pub properties: BTreeMap<String, SchemaProperty>,
}

impl JsonSchema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn property(mut self, name: &str, property: SchemaProperty) -> Self {
        self.properties.insert(name.to_string(), property);
        self
    }

    pub fn get_property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.get(name)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

// The top level is always a non-null object.
impl Serialize for JsonSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", &JsonType::Object)?;
        map.serialize_entry("properties", &self.properties)?;
        map.end()
    }
}
