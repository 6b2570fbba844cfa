//! Attribute schema inference over decoded features.

use boundary_core::{AttributeSchema, FieldDefinition, FieldType, GeometryKind};
use serde_json::Value;

use crate::document::Feature;

/// Geometry kind reported when no feature carries a geometry.
const UNKNOWN_GEOMETRY: &str = "Unknown";

/// Infer the layer schema from `features`.
///
/// Columns appear in order of first appearance. Each column takes the type of
/// its first non-null value and falls back to `str` when every value is null.
pub(crate) fn infer_schema(features: &[Feature]) -> AttributeSchema {
    let geometry = features
        .iter()
        .find_map(|feature| feature.geometry.as_ref())
        .map_or_else(
            || GeometryKind::Other(UNKNOWN_GEOMETRY.to_owned()),
            |geometry| geometry.geometry_kind(),
        );

    let mut columns: Vec<(String, Option<FieldType>)> = Vec::new();
    for (name, value) in features
        .iter()
        .filter_map(|feature| feature.properties.as_ref())
        .flatten()
    {
        let observed = field_type(value);
        match columns.iter_mut().find(|(existing, _)| existing.as_str() == name.as_str()) {
            Some((_, slot @ None)) => *slot = observed,
            Some(_) => {}
            None => columns.push((name.clone(), observed)),
        }
    }

    let fields = columns
        .into_iter()
        .map(|(name, field_type)| FieldDefinition::new(name, field_type.unwrap_or(FieldType::Str)))
        .collect();
    AttributeSchema::new(geometry, fields)
}

fn field_type(value: &Value) -> Option<FieldType> {
    match value {
        Value::Null => None,
        Value::Bool(_) => Some(FieldType::Bool),
        Value::Number(number) if number.is_i64() => Some(FieldType::Int),
        Value::Number(_) => Some(FieldType::Float),
        Value::String(_) | Value::Array(_) | Value::Object(_) => Some(FieldType::Str),
    }
}
