//! Nested key/value record built from one CSV data line.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A value inside a [`Record`]: a string leaf or a nested record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Leaf(String),
    Nested(Record),
}

impl Field {
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(s) => Some(s),
            Self::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Record> {
        match self {
            Self::Leaf(_) => None,
            Self::Nested(r) => Some(r),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Leaf(s) => serde_json::Value::String(s.clone()),
            Self::Nested(r) => r.to_json(),
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(s) => serializer.serialize_str(s),
            Self::Nested(r) => r.serialize(serializer),
        }
    }
}

/// Ordered mapping from key to [`Field`]. Keys are unique; order is first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Field)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Walk `path` through nested records and return the field at its end.
    pub fn get_path(&self, path: &[&str]) -> Option<&Field> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for key in parents {
            current = current.get(key)?.as_nested()?;
        }
        current.get(last)
    }

    /// Same as [`Record::get_path`] with a dotted header such as `address.city`.
    pub fn get_dotted(&self, dotted: &str) -> Option<&Field> {
        let path: Vec<&str> = dotted.split('.').collect();
        self.get_path(&path)
    }

    /// Assign `value` as a leaf at `path`, creating nested records on the way.
    /// An existing leaf at the same key is overwritten (last write wins).
    ///
    /// Returns `false` when an intermediate key already holds a leaf; header
    /// validation rejects that layout before any record is built.
    pub fn set_path(&mut self, path: &[&str], value: String) -> bool {
        let Some((head, rest)) = path.split_first() else {
            return false;
        };
        if rest.is_empty() {
            self.put(head, Field::Leaf(value));
            return true;
        }
        if self.get(head).is_none() {
            self.put(head, Field::Nested(Record::new()));
        }
        match self.get_mut(head) {
            Some(Field::Nested(child)) => child.set_path(rest, value),
            _ => false,
        }
    }

    /// Flatten into `(dotted_path, leaf)` pairs in record order.
    pub fn leaf_paths(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.collect_leaves("", &mut out);
        out
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }

    pub(crate) fn put(&mut self, key: &str, field: Field) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = field,
            None => self.fields.push((key.to_string(), field)),
        }
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    fn collect_leaves(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for (key, field) in &self.fields {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            match field {
                Field::Leaf(v) => out.push((path, v.clone())),
                Field::Nested(child) => child.collect_leaves(&path, out),
            }
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
