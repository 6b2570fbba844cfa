//! Core domain types for the boundary engine.
//!
//! The crate turns point-like geometries read from vector datasets into one
//! point set, decides on every export whether the cached hull can be reused,
//! and negotiates the schema the hull is written with. File access and hull
//! construction sit behind the [`SourceReader`], [`Sink`] and [`HullEngine`]
//! traits.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod adapter;
mod cache;
mod dataset;
mod export;
mod hull;
mod ingest;
mod negotiate;
mod point;
mod schema;
mod sink;
mod source;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use adapter::BoundaryAdapter;
pub use cache::{
    HullCache, HullDecision, HullProvenance, HullRequest, HullResolution, TolerancePolicy,
    compute_or_reuse,
};
pub use dataset::{Crs, Driver, GeometryKind};
pub use export::{DEFAULT_OUTPUT_NAME, ExportError, ExportReport, ExportRequest, derive_output_path};
pub use hull::{HullEngine, HullError, HullPolygon};
pub use ingest::{IngestSummary, ingest_records};
pub use negotiate::{
    DriverCapabilities, GIS_DRIVERS, NegotiatedSchema, PropertiesBuilder, SchemaStrategy,
    summary_fields,
};
pub use point::{InputPoint, PointSet};
pub use schema::{AttributeSchema, FieldDefinition, FieldType, FieldValue, PropertiesRecord};
pub use sink::{OutputFeature, Sink, SinkHandle, SinkTarget, SinkWriteError};
pub use source::{
    SourceAccessError, SourceDataset, SourceDescriptor, SourceGeometry, SourceReader,
    SourceRecord, SourceRecords,
};
