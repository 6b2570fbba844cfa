//! Read access to vector datasets.
//!
//! A [`SourceReader`] opens a dataset and hands back its
//! [`SourceDescriptor`] together with a record iterator. The dataset handle
//! lives inside the iterator and is released when the iterator is dropped.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::{AttributeSchema, Crs, Driver, GeometryKind, InputPoint};

/// Geometry carried by a source record, reduced to what ingestion needs.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceGeometry {
    /// A single point.
    Point(InputPoint),
    /// Several points, each with its own dimensionality.
    MultiPoint(Vec<InputPoint>),
    /// Any other geometry type; its coordinates are not decoded.
    Other(GeometryKind),
}

impl SourceGeometry {
    /// Type tag of the geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point(_) => GeometryKind::Point,
            Self::MultiPoint(_) => GeometryKind::MultiPoint,
            Self::Other(kind) => kind.clone(),
        }
    }
}

/// One feature read from a dataset.
///
/// Attribute values are not carried: ingestion only consumes geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    /// Feature geometry; `None` for features without one.
    pub geometry: Option<SourceGeometry>,
}

impl SourceRecord {
    /// A record with the given geometry.
    pub const fn new(geometry: SourceGeometry) -> Self {
        Self {
            geometry: Some(geometry),
        }
    }

    /// A record with no geometry.
    pub const fn empty() -> Self {
        Self { geometry: None }
    }
}

/// Dataset-level metadata observed when a source is opened.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceDescriptor {
    /// Coordinate reference system, when the dataset declares one.
    pub crs: Option<Crs>,
    /// Driver that decoded the dataset.
    pub driver: Driver,
    /// Attribute schema of the opened layer.
    pub schema: AttributeSchema,
}

/// Records yielded by an opened dataset.
pub type SourceRecords<'a> = Box<dyn Iterator<Item = Result<SourceRecord, SourceAccessError>> + 'a>;

/// An opened dataset: its metadata and a record stream.
pub struct SourceDataset<'a> {
    /// Metadata captured at open time.
    pub descriptor: SourceDescriptor,
    /// Records in dataset order.
    pub records: SourceRecords<'a>,
}

impl std::fmt::Debug for SourceDataset<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceDataset")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Errors raised while opening or reading a source dataset.
#[derive(Debug, Error)]
pub enum SourceAccessError {
    /// The dataset could not be opened.
    #[error("failed to open source dataset at {path:?}")]
    Open {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// No reader understands the dataset format.
    #[error("no driver can read {path:?}")]
    UnsupportedFormat {
        /// Dataset path.
        path: Utf8PathBuf,
    },
    /// The requested layer does not exist in the dataset.
    #[error("layer {layer:?} does not exist in {path:?}")]
    MissingLayer {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Requested layer.
        layer: String,
    },
    /// The dataset, or one of its records, could not be decoded.
    #[error("failed to decode {path:?}: {message}")]
    Decode {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Description of the decoding failure.
        message: String,
    },
}

/// Opens vector datasets for ingestion.
///
/// # Examples
///
/// ```rust
/// use camino::Utf8Path;
/// use boundary_core::{
///     AttributeSchema, Driver, GeometryKind, InputPoint, SourceAccessError, SourceDataset,
///     SourceDescriptor, SourceGeometry, SourceReader, SourceRecord,
/// };
///
/// struct SinglePoint;
///
/// impl SourceReader for SinglePoint {
///     fn open(
///         &self,
///         _path: &Utf8Path,
///         _layer: Option<&str>,
///     ) -> Result<SourceDataset<'_>, SourceAccessError> {
///         let record = SourceRecord::new(SourceGeometry::Point(InputPoint::new(1.0, 2.0, None)));
///         Ok(SourceDataset {
///             descriptor: SourceDescriptor {
///                 crs: None,
///                 driver: Driver::from("Memory"),
///                 schema: AttributeSchema::new(GeometryKind::Point, Vec::new()),
///             },
///             records: Box::new(std::iter::once(Ok(record))),
///         })
///     }
/// }
///
/// let dataset = SinglePoint.open(Utf8Path::new("points"), None)?;
/// assert_eq!(dataset.records.count(), 1);
/// # Ok::<(), SourceAccessError>(())
/// ```
pub trait SourceReader {
    /// Open `path`, selecting `layer` in multi-layer datasets.
    ///
    /// # Errors
    ///
    /// Returns [`SourceAccessError`] when the dataset cannot be opened or the
    /// layer does not exist.
    fn open(
        &self,
        path: &Utf8Path,
        layer: Option<&str>,
    ) -> Result<SourceDataset<'_>, SourceAccessError>;
}

impl<R: SourceReader + ?Sized> SourceReader for &R {
    fn open(
        &self,
        path: &Utf8Path,
        layer: Option<&str>,
    ) -> Result<SourceDataset<'_>, SourceAccessError> {
        (**self).open(path, layer)
    }
}
