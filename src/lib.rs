//! Facade crate for the boundary concave hull engine.
//!
//! This crate re-exports the core adapter and domain types and exposes the
//! Delaunay hull engine and GeoJSON file access behind feature flags.

#![forbid(unsafe_code)]

pub use boundary_core::{
    AttributeSchema, BoundaryAdapter, Crs, DEFAULT_OUTPUT_NAME, Driver, DriverCapabilities,
    ExportError, ExportReport, ExportRequest, FieldDefinition, FieldType, FieldValue,
    GIS_DRIVERS, GeometryKind, HullCache, HullDecision, HullEngine, HullError, HullPolygon,
    HullProvenance, HullRequest, InputPoint, IngestSummary, NegotiatedSchema, OutputFeature,
    PointSet, PropertiesRecord, SchemaStrategy, Sink, SinkHandle, SinkTarget, SinkWriteError,
    SourceAccessError, SourceDescriptor, SourceGeometry, SourceReader, SourceRecord,
    TolerancePolicy, compute_or_reuse,
};

#[cfg(feature = "hull-delaunay")]
pub use boundary_hull::{DelaunayHullConfig, DelaunayHullEngine};

#[cfg(feature = "data-geojson")]
pub use boundary_data::{GeoJsonReader, GeoJsonSink};

/// Adapter reading and writing GeoJSON with the Delaunay hull engine.
#[cfg(all(feature = "hull-delaunay", feature = "data-geojson"))]
pub type GeoJsonBoundaryAdapter = BoundaryAdapter<GeoJsonReader, DelaunayHullEngine, GeoJsonSink>;

/// Build a [`GeoJsonBoundaryAdapter`] with default engine settings.
///
/// # Examples
///
/// ```no_run
/// use boundary_engine::{ExportRequest, geojson_adapter};
/// use camino::Utf8Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut adapter = geojson_adapter();
/// adapter.ingest(Utf8Path::new("wells.geojson"), None)?;
/// let report = adapter.export(&ExportRequest::default().with_percentile(90.0))?;
/// println!("wrote {}", report.path);
/// # Ok(())
/// # }
/// ```
#[cfg(all(feature = "hull-delaunay", feature = "data-geojson"))]
#[must_use]
pub fn geojson_adapter() -> GeoJsonBoundaryAdapter {
    BoundaryAdapter::new(GeoJsonReader, DelaunayHullEngine::new(), GeoJsonSink)
}
