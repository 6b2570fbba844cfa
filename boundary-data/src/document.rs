//! Serde models of the GeoJSON members the reader and sink touch.

use std::str::FromStr;

use boundary_core::{Crs, GeometryKind, InputPoint, PropertiesRecord, SourceGeometry, SourceRecord};
use geo::{LineString, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level GeoJSON document.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub(crate) enum Document {
    FeatureCollection(Collection),
    Feature(Feature),
}

impl Document {
    pub(crate) fn into_parts(self) -> (Option<String>, Option<Crs>, Vec<Feature>) {
        match self {
            Self::FeatureCollection(collection) => (
                collection.name,
                collection.crs.and_then(CrsMember::into_crs),
                collection.features,
            ),
            Self::Feature(feature) => (None, None, vec![feature]),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Collection {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    crs: Option<CrsMember>,
    #[serde(default)]
    features: Vec<Feature>,
}

/// Legacy named CRS member, e.g. `{"type": "name", "properties": {"name": "EPSG:4326"}}`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CrsMember {
    #[serde(rename = "type")]
    kind: String,
    properties: CrsProperties,
}

#[derive(Debug, Serialize, Deserialize)]
struct CrsProperties {
    #[serde(default)]
    name: Option<String>,
}

impl CrsMember {
    pub(crate) fn named(crs: &Crs) -> Self {
        Self {
            kind: "name".to_owned(),
            properties: CrsProperties {
                name: Some(crs.as_str().to_owned()),
            },
        }
    }

    fn into_crs(self) -> Option<Crs> {
        (self.kind == "name")
            .then_some(self.properties.name)
            .flatten()
            .filter(|name| !name.trim().is_empty())
            .map(Crs::new)
    }
}

/// One input feature.
#[derive(Debug, Deserialize)]
pub(crate) struct Feature {
    #[serde(default)]
    pub(crate) geometry: Option<Geometry>,
    #[serde(default)]
    pub(crate) properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    #[serde(default)]
    coordinates: Value,
}

impl Geometry {
    pub(crate) fn geometry_kind(&self) -> GeometryKind {
        match GeometryKind::from_str(&self.kind) {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }

    fn into_source(self) -> Result<SourceGeometry, String> {
        match self.geometry_kind() {
            GeometryKind::Point => position(&self.coordinates).map(SourceGeometry::Point),
            GeometryKind::MultiPoint => self
                .coordinates
                .as_array()
                .ok_or_else(|| "MultiPoint coordinates must be an array".to_owned())?
                .iter()
                .map(position)
                .collect::<Result<Vec<_>, _>>()
                .map(SourceGeometry::MultiPoint),
            other => Ok(SourceGeometry::Other(other)),
        }
    }
}

impl Feature {
    /// Convert into a record, failing on malformed point coordinates.
    pub(crate) fn into_record(self) -> Result<SourceRecord, String> {
        match self.geometry {
            Some(geometry) => geometry.into_source().map(SourceRecord::new),
            None => Ok(SourceRecord::empty()),
        }
    }
}

fn position(value: &Value) -> Result<InputPoint, String> {
    let ordinates = value
        .as_array()
        .ok_or_else(|| format!("position must be an array, found {value}"))?;
    let ordinate = |index: usize| ordinates.get(index).and_then(Value::as_f64);
    match (ordinate(0), ordinate(1)) {
        (Some(x), Some(y)) => Ok(InputPoint::new(x, y, ordinate(2))),
        _ => Err(format!("position needs numeric x and y, found {value}")),
    }
}

/// Output feature as written by the sink.
#[derive(Debug, Serialize)]
pub(crate) struct FeatureOut<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: &'a PropertiesRecord,
    geometry: PolygonOut,
}

#[derive(Debug, Serialize)]
struct PolygonOut {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: Vec<Vec<[f64; 2]>>,
}

impl<'a> FeatureOut<'a> {
    pub(crate) fn new(polygon: &Polygon<f64>, properties: &'a PropertiesRecord) -> Self {
        let ring = |line: &LineString<f64>| line.coords().map(|coord| [coord.x, coord.y]).collect();
        let coordinates = std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(ring)
            .collect();
        Self {
            kind: "Feature",
            properties,
            geometry: PolygonOut {
                kind: "Polygon",
                coordinates,
            },
        }
    }
}

/// Collection header members written before the feature array.
#[derive(Debug, Serialize)]
pub(crate) struct CollectionHeader<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    crs: Option<CrsMember>,
}

impl<'a> CollectionHeader<'a> {
    pub(crate) fn new(name: &'a str, crs: Option<&Crs>) -> Self {
        Self {
            kind: "FeatureCollection",
            name,
            crs: crs.map(CrsMember::named),
        }
    }
}
