//! Attribute schemas and property records.
//!
//! Both are ordered: the field order of a schema is the order a sink writes
//! its columns in, and a [`PropertiesRecord`] built for a schema lists its
//! values in the same order.

use std::fmt;

use crate::GeometryKind;

/// Attribute column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldType {
    /// Signed integer.
    Int,
    /// Double precision float.
    Float,
    /// UTF-8 text.
    Str,
    /// Boolean.
    Bool,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Bool => "bool",
        })
    }
}

/// One named, typed attribute column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDefinition {
    /// Column name.
    pub name: String,
    /// Column type.
    pub field_type: FieldType,
}

impl FieldDefinition {
    /// Build a column definition.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Geometry kind plus ordered attribute columns of a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeSchema {
    /// Geometry type stored in the layer.
    pub geometry: GeometryKind,
    /// Attribute columns in declaration order.
    pub fields: Vec<FieldDefinition>,
}

impl AttributeSchema {
    /// Build a schema from a geometry kind and its columns.
    pub const fn new(geometry: GeometryKind, fields: Vec<FieldDefinition>) -> Self {
        Self { geometry, fields }
    }

    /// Look up a column by name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Column names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|field| field.name.as_str())
    }
}

/// A single attribute value; `Null` marks an absent value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    /// Absent value.
    Null,
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Str(String),
    /// Boolean value.
    Bool(bool),
}

impl FieldValue {
    /// Whether the value is absent.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Ordered attribute values of one output feature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertiesRecord {
    entries: Vec<(String, FieldValue)>,
}

impl PropertiesRecord {
    /// Create an empty record.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a value, replacing an existing entry of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find_map(|(key, value)| (key == name).then_some(value))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Entry names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PropertiesRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
