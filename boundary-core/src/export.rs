//! Export requests, reports and output naming.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::{Crs, Driver, HullDecision, HullError, PropertiesRecord, SinkWriteError};

/// Base name used for derived output paths and default layers.
pub const DEFAULT_OUTPUT_NAME: &str = "concave_hull";

/// Caller options for one export.
///
/// Every field is optional. `percentile` and `tolerance` are alternative ways
/// to force a rebuild; when both are set the percentile wins.
///
/// # Examples
///
/// ```
/// use boundary_core::ExportRequest;
///
/// let request = ExportRequest::default().with_driver("GPKG").with_tolerance(25.0);
/// assert_eq!(request.tolerance, Some(25.0));
/// assert!(request.output_path.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRequest {
    /// Output dataset path; derived from the last source when absent.
    pub output_path: Option<Utf8PathBuf>,
    /// Output layer; [`DEFAULT_OUTPUT_NAME`] when absent.
    pub output_layer: Option<String>,
    /// Driver override.
    pub driver: Option<Driver>,
    /// CRS override.
    pub crs: Option<Crs>,
    /// Rebuild with a tolerance estimated from this percentile.
    pub percentile: Option<f64>,
    /// Rebuild with this tolerance.
    pub tolerance: Option<f64>,
}

impl ExportRequest {
    /// Set the output path.
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Set the output layer.
    #[must_use]
    pub fn with_output_layer(mut self, layer: impl Into<String>) -> Self {
        self.output_layer = Some(layer.into());
        self
    }

    /// Override the driver.
    #[must_use]
    pub fn with_driver(mut self, driver: impl Into<Driver>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    /// Override the CRS.
    #[must_use]
    pub fn with_crs(mut self, crs: impl Into<Crs>) -> Self {
        self.crs = Some(crs.into());
        self
    }

    /// Force a rebuild from a percentile.
    #[must_use]
    pub const fn with_percentile(mut self, percentile: f64) -> Self {
        self.percentile = Some(percentile);
        self
    }

    /// Force a rebuild with a tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
}

/// What an export wrote.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExportReport {
    /// Output dataset path.
    pub path: Utf8PathBuf,
    /// Output layer.
    pub layer: String,
    /// Driver used.
    pub driver: Driver,
    /// CRS declared, if any.
    pub crs: Option<Crs>,
    /// Whether the hull was rebuilt or reused.
    pub hull: HullDecision,
    /// Properties of the written feature.
    pub properties: PropertiesRecord,
}

/// Errors returned by an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Computing the hull failed.
    #[error("failed to compute hull: {0}")]
    Hull(#[from] HullError),
    /// No driver was recorded by ingestion and none was supplied.
    #[error("no output driver: ingest a source or pass a driver")]
    MissingDriver,
    /// An output path is required but was not supplied.
    #[error("an output path is required when exporting with driver {driver} ({reason})")]
    MissingOutputPath {
        /// Driver of the export.
        driver: Driver,
        /// Why the path could not be derived.
        reason: &'static str,
    },
    /// The last source path could not be made absolute.
    #[error("failed to resolve an output path next to {source_path:?}")]
    ResolveOutputPath {
        /// Source path the output was derived from.
        source_path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The sink failed to create or write the output.
    #[error("failed to write hull: {0}")]
    Sink(#[from] SinkWriteError),
}

/// Derive `<dir>/concave_hull<.ext>` from the absolute form of `source`.
///
/// The extension of `source` is kept; a source without one yields a path
/// without one.
///
/// # Errors
///
/// Returns [`ExportError::ResolveOutputPath`] when the current directory is
/// needed and unavailable, or the absolute path is not UTF-8.
///
/// # Examples
///
/// ```
/// use camino::{Utf8Path, Utf8PathBuf};
/// use boundary_core::derive_output_path;
///
/// let derived = derive_output_path(Utf8Path::new("/data/towns.shp"))?;
/// assert_eq!(derived, Utf8PathBuf::from("/data/concave_hull.shp"));
/// # Ok::<(), boundary_core::ExportError>(())
/// ```
pub fn derive_output_path(source: &Utf8Path) -> Result<Utf8PathBuf, ExportError> {
    let resolve_error = |err: std::io::Error| ExportError::ResolveOutputPath {
        source_path: source.to_path_buf(),
        source: err,
    };
    let absolute = std::path::absolute(source.as_std_path()).map_err(resolve_error)?;
    let absolute = Utf8PathBuf::from_path_buf(absolute)
        .map_err(|_| resolve_error(std::io::Error::other("absolute path is not UTF-8")))?;

    let file_name = match absolute.extension() {
        Some(extension) => format!("{DEFAULT_OUTPUT_NAME}.{extension}"),
        None => DEFAULT_OUTPUT_NAME.to_owned(),
    };
    Ok(match absolute.parent() {
        Some(parent) => parent.join(file_name),
        None => Utf8PathBuf::from(file_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/data/towns.shp", "/data/concave_hull.shp")]
    #[case("/data/towns.geojson", "/data/concave_hull.geojson")]
    #[case("/data/archive.tar.gz", "/data/concave_hull.gz")]
    #[case("/data/towns", "/data/concave_hull")]
    fn derives_sibling_path_keeping_extension(#[case] source: &str, #[case] expected: &str) {
        let derived = derive_output_path(Utf8Path::new(source)).expect("derive");
        assert_eq!(derived, Utf8PathBuf::from(expected));
    }

    #[rstest]
    fn relative_sources_are_made_absolute() {
        let derived = derive_output_path(Utf8Path::new("towns.shp")).expect("derive");
        assert!(derived.is_absolute());
        assert_eq!(derived.file_name(), Some("concave_hull.shp"));
    }
}
