//! Write access to vector datasets.

use camino::Utf8PathBuf;
use geo::Polygon;
use thiserror::Error;

use crate::{AttributeSchema, Crs, Driver, PropertiesRecord};

/// One geometry with its properties, the unit written to a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFeature {
    /// Feature geometry.
    pub geometry: Polygon<f64>,
    /// Feature attributes, ordered as the target schema.
    pub properties: PropertiesRecord,
}

/// Everything a sink needs to create an output layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkTarget {
    /// Output dataset path.
    pub path: Utf8PathBuf,
    /// Layer name inside the dataset.
    pub layer: String,
    /// Layer schema.
    pub schema: AttributeSchema,
    /// Driver to encode with.
    pub driver: Driver,
    /// Coordinate reference system to declare, if any.
    pub crs: Option<Crs>,
}

/// Errors raised while creating or writing an output dataset.
#[derive(Debug, Error)]
pub enum SinkWriteError {
    /// The sink cannot encode the requested driver.
    #[error("driver {driver} cannot be written to {path:?}")]
    UnsupportedDriver {
        /// Requested driver.
        driver: Driver,
        /// Output path.
        path: Utf8PathBuf,
    },
    /// The CRS definition was rejected.
    #[error("invalid coordinate reference system {crs:?}")]
    InvalidCrs {
        /// Offending definition.
        crs: String,
    },
    /// The output file could not be created.
    #[error("failed to create output dataset at {path:?}")]
    Create {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// A feature could not be encoded.
    #[error("failed to encode feature for {path:?}: {message}")]
    Encode {
        /// Output path.
        path: Utf8PathBuf,
        /// Description of the encoding failure.
        message: String,
    },
    /// Writing to the output file failed.
    #[error("failed to write output dataset at {path:?}")]
    Write {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}

/// An open output layer.
///
/// Dropping a handle without calling [`SinkHandle::finish`] releases it; what
/// was written so far may then be incomplete.
pub trait SinkHandle {
    /// Write one feature.
    ///
    /// # Errors
    ///
    /// Returns [`SinkWriteError`] when the feature cannot be encoded or
    /// written.
    fn write(&mut self, feature: &OutputFeature) -> Result<(), SinkWriteError>;

    /// Flush everything written and release the handle.
    ///
    /// # Errors
    ///
    /// Returns [`SinkWriteError`] when flushing fails.
    fn finish(self) -> Result<(), SinkWriteError>;
}

/// Creates output layers.
pub trait Sink {
    /// Handle type returned by [`Sink::create`].
    type Handle: SinkHandle;

    /// Create (or overwrite) the layer described by `target`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkWriteError`] for unsupported drivers, invalid CRS
    /// definitions or unwritable paths.
    fn create(&self, target: &SinkTarget) -> Result<Self::Handle, SinkWriteError>;
}

impl<S: Sink + ?Sized> Sink for &S {
    type Handle = S::Handle;

    fn create(&self, target: &SinkTarget) -> Result<Self::Handle, SinkWriteError> {
        (**self).create(target)
    }
}
