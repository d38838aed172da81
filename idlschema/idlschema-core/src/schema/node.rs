use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::descriptor::SequenceKind;

/// Resolved schema of one field type.
///
/// Serializes to a JSON object whose `type` key is always present; the other
/// keys appear only for the shapes that carry them:
///
/// | Shape             | Keys                                  |
/// |-------------------|---------------------------------------|
/// | basic / unknown   | `type`                                |
/// | string            | `type` (+ `max_length` when bounded)  |
/// | array / sequence  | `type`, `items` (+ `size` / `max_size`) |
/// | nested record     | `type` (+ `fields` when resolvable)   |
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaNode {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<RecordSchema>,
}

impl SchemaNode {
    /// A node carrying only a type name.
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            max_length: None,
            items: None,
            size: None,
            max_size: None,
            fields: None,
        }
    }

    pub fn string(max_length: Option<usize>) -> Self {
        Self {
            max_length,
            ..Self::named("string")
        }
    }

    pub fn array(items: SchemaNode, kind: SequenceKind) -> Self {
        Self {
            items: Some(Box::new(items)),
            size: kind.size(),
            max_size: kind.max_size(),
            ..Self::named("array")
        }
    }

    /// A fully expanded nested record.
    pub fn record(qualified_name: impl Into<String>, fields: RecordSchema) -> Self {
        Self {
            fields: Some(fields),
            ..Self::named(qualified_name)
        }
    }
}

/// Field name → [`SchemaNode`] mapping of one record.
///
/// Entries keep the declaration order of the record so that serialized output
/// is stable from run to run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordSchema(Vec<(String, SchemaNode)>);

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` under `name`, replacing an earlier entry of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, node: SchemaNode) {
        let name = name.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = node,
            None => self.0.push((name, node)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, SchemaNode)> for RecordSchema {
    fn from_iter<T: IntoIterator<Item = (String, SchemaNode)>>(iter: T) -> Self {
        let mut schema = RecordSchema::new();
        for (name, node) in iter {
            schema.insert(name, node);
        }
        schema
    }
}

impl Serialize for RecordSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, node) in &self.0 {
            map.serialize_entry(name, node)?;
        }
        map.end()
    }
}
