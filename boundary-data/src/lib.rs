//! GeoJSON file access for the boundary engine.
//!
//! Responsibilities:
//! - Read `GeoJSON` and `GeoJSONSeq` files as [`SourceReader`] datasets.
//! - Write hull features to the same formats through [`Sink`].
//! - Infer an attribute schema from feature properties.
//!
//! Boundaries:
//! - Hull and schema rules live in `boundary-core`.
//! - Only the two GeoJSON drivers are supported; other drivers are rejected.
//!
//! [`SourceReader`]: boundary_core::SourceReader
//! [`Sink`]: boundary_core::Sink

#![forbid(unsafe_code)]

mod document;
mod format;
mod inference;
mod reader;
mod sink;

pub use format::{GEOJSON_DRIVER, GEOJSONSEQ_DRIVER, GeoJsonFormat};
pub use reader::{DEFAULT_CRS, GeoJsonReader};
pub use sink::{GeoJsonHandle, GeoJsonSink};
