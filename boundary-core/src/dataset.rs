//! Identifiers shared by source and sink datasets.

use std::fmt;
use std::str::FromStr;

/// Name of a vector format codec, such as `GPKG` or `ESRI Shapefile`.
///
/// Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Driver(String);

impl Driver {
    /// Wrap a driver identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The identifier as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Driver {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Coordinate reference system, kept opaque (authority code, WKT or URN).
///
/// No validation happens here; sinks decide what they accept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Crs(String);

impl Crs {
    /// Wrap a CRS definition.
    pub fn new(definition: impl Into<String>) -> Self {
        Self(definition.into())
    }

    /// The definition as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Crs {
    fn from(definition: &str) -> Self {
        Self::new(definition)
    }
}

/// Geometry type tag of a record or of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeometryKind {
    /// Single position.
    Point,
    /// Collection of positions.
    MultiPoint,
    /// Polyline.
    LineString,
    /// Collection of polylines.
    MultiLineString,
    /// Polygon with optional holes.
    Polygon,
    /// Collection of polygons.
    MultiPolygon,
    /// Heterogeneous collection.
    GeometryCollection,
    /// Any tag not listed above, kept verbatim.
    Other(String),
}

impl GeometryKind {
    /// Canonical tag name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Point => "Point",
            Self::MultiPoint => "MultiPoint",
            Self::LineString => "LineString",
            Self::MultiLineString => "MultiLineString",
            Self::Polygon => "Polygon",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Point" => Self::Point,
            "MultiPoint" => Self::MultiPoint,
            "LineString" => Self::LineString,
            "MultiLineString" => Self::MultiLineString,
            "Polygon" => Self::Polygon,
            "MultiPolygon" => Self::MultiPolygon,
            "GeometryCollection" => Self::GeometryCollection,
            other => Self::Other(other.to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Point", GeometryKind::Point)]
    #[case("MultiPolygon", GeometryKind::MultiPolygon)]
    #[case("3D Point", GeometryKind::Other("3D Point".to_owned()))]
    fn geometry_kind_parses_tags(#[case] tag: &str, #[case] expected: GeometryKind) {
        let parsed: GeometryKind = tag.parse().expect("parsing is infallible");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), tag);
    }

    #[rstest]
    fn driver_comparison_is_case_sensitive() {
        assert_ne!(Driver::from("GPKG"), Driver::from("gpkg"));
    }
}
