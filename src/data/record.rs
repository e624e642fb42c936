use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Canonical unique identity of a record
///
/// Selection is keyed by this, never by the display name: two opportunities
/// may share a name, they never share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One row of the table
///
/// `id` and `name` are the only fields the engine interprets. Everything
/// else (`nameUrl`, `accountName`, `stageName`, `amount`, ...) is carried
/// through to the rendering layer untouched. The id keeps the service's
/// `oppId` key when serialized; `id` is accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "oppId", alias = "id")]
    pub id: RecordId,

    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Ordered sequence of records with unique identities
pub type RecordSet = Vec<Record>;

impl Record {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Look up a field by name, including the two core fields
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" | "oppId" => Some(Value::String(self.id.to_string())),
            "name" => Some(Value::String(self.name.clone())),
            _ => self.attributes.get(name).cloned(),
        }
    }

    /// Serialized textual form of the whole record, keys included
    ///
    /// This is what free-text search runs against.
    pub fn search_text(&self) -> String {
        match serde_json::to_string(self) {
            Ok(text) => text,
            Err(e) => {
                warn!(target: "record", "Could not serialize record {}: {}", self.id, e);
                format!("{} {}", self.id, self.name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_opp_id_alias() {
        let json = r#"{"oppId":"006A","name":"Acme Renewal","stageName":"Prospecting","amount":1200}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, RecordId::from("006A"));
        assert_eq!(record.name, "Acme Renewal");
        assert_eq!(record.field("stageName"), Some(Value::from("Prospecting")));
        assert_eq!(record.field("amount"), Some(Value::from(1200)));
        assert_eq!(record.field("missing"), None);
    }

    #[test]
    fn test_search_text_covers_all_fields() {
        let record = Record::new("1", "Widget deal").with_attribute("accountName", "Acme Corp");
        let text = record.search_text();

        assert!(text.contains("Acme Corp"));
        assert!(text.contains("Widget deal"));
        assert!(text.contains("accountName"));
    }

    #[test]
    fn test_search_text_uses_wire_id_key() {
        let record: Record = serde_json::from_str(r#"{"id":"006B","name":"Globex"}"#).unwrap();
        let text = record.search_text();

        assert!(text.contains(r#""oppId":"006B""#));
        assert!(!text.contains(r#""id""#));
        assert_eq!(record.field("oppId"), record.field("id"));
    }
}
