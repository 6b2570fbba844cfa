//! Test-only, in-memory collaborators used by unit and behaviour tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};
use geo::{ConvexHull, Coord, MapCoords, MultiPoint, Point};

use crate::{
    AttributeSchema, Crs, Driver, GeometryKind, HullEngine, HullError, HullPolygon, InputPoint,
    OutputFeature, PointSet, Sink, SinkHandle, SinkTarget, SinkWriteError, SourceAccessError,
    SourceDataset, SourceDescriptor, SourceGeometry, SourceReader, SourceRecord,
};

/// A dataset held in memory by [`MemoryReader`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySource {
    descriptor: SourceDescriptor,
    layer: Option<String>,
    geometries: Vec<Option<SourceGeometry>>,
}

impl MemorySource {
    /// An empty source decoded by `driver`, without CRS or fields.
    pub fn new(driver: &str) -> Self {
        Self {
            descriptor: SourceDescriptor {
                crs: None,
                driver: Driver::from(driver),
                schema: AttributeSchema::new(GeometryKind::Point, Vec::new()),
            },
            layer: None,
            geometries: Vec::new(),
        }
    }

    /// Set the declared CRS.
    #[must_use]
    pub fn with_crs(mut self, crs: &str) -> Self {
        self.descriptor.crs = Some(Crs::from(crs));
        self
    }

    /// Set the attribute schema.
    #[must_use]
    pub fn with_schema(mut self, schema: AttributeSchema) -> Self {
        self.descriptor.schema = schema;
        self
    }

    /// Name the single layer; opening any other layer fails.
    #[must_use]
    pub fn with_layer(mut self, layer: &str) -> Self {
        self.layer = Some(layer.to_owned());
        self
    }

    /// Append a record with a geometry.
    #[must_use]
    pub fn with_geometry(mut self, geometry: SourceGeometry) -> Self {
        self.geometries.push(Some(geometry));
        self
    }

    /// Append a record without a geometry.
    #[must_use]
    pub fn with_empty_record(mut self) -> Self {
        self.geometries.push(None);
        self
    }
}

/// `SourceReader` serving [`MemorySource`] values keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    sources: HashMap<Utf8PathBuf, MemorySource>,
}

impl MemoryReader {
    /// Register `source` under `path`.
    #[must_use]
    pub fn with_source(mut self, path: &str, source: MemorySource) -> Self {
        self.sources.insert(Utf8PathBuf::from(path), source);
        self
    }
}

impl SourceReader for MemoryReader {
    fn open(
        &self,
        path: &Utf8Path,
        layer: Option<&str>,
    ) -> Result<SourceDataset<'_>, SourceAccessError> {
        let source = self.sources.get(path).ok_or_else(|| SourceAccessError::Open {
            path: path.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })?;
        if let Some(requested) = layer
            && source.layer.as_deref() != Some(requested)
        {
            return Err(SourceAccessError::MissingLayer {
                path: path.to_path_buf(),
                layer: requested.to_owned(),
            });
        }
        Ok(SourceDataset {
            descriptor: source.descriptor.clone(),
            records: Box::new(source.geometries.iter().cloned().map(|geometry| {
                Ok(SourceRecord { geometry })
            })),
        })
    }
}

/// Corners of a 4x4 square plus its centre.
pub fn square_points() -> PointSet {
    [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (2.0, 2.0)]
        .into_iter()
        .map(|(x, y)| InputPoint::new(x, y, None))
        .collect()
}

/// [`square_points`] as point records of a source in `EPSG:4326`.
pub fn square_source(driver: &str) -> MemorySource {
    square_points()
        .iter()
        .fold(MemorySource::new(driver).with_crs("EPSG:4326"), |source, point| {
            source.with_geometry(SourceGeometry::Point(*point))
        })
}

/// Deterministic `HullEngine` recording every call.
///
/// `estimate_tolerance` returns the configured default, or `percentile / 100`.
/// `build` returns the convex hull scaled by the tolerance, so different
/// tolerances give different polygons.
#[derive(Debug, Default)]
pub struct ScriptedHullEngine {
    default_tolerance: f64,
    estimates: RefCell<Vec<Option<f64>>>,
    builds: RefCell<Vec<f64>>,
}

impl ScriptedHullEngine {
    /// Engine whose default estimate is `default_tolerance`.
    pub fn new(default_tolerance: f64) -> Self {
        Self {
            default_tolerance,
            ..Self::default()
        }
    }

    /// Percentiles passed to `estimate_tolerance`, in call order.
    pub fn estimates(&self) -> Vec<Option<f64>> {
        self.estimates.borrow().clone()
    }

    /// Tolerances passed to `build`, in call order.
    pub fn builds(&self) -> Vec<f64> {
        self.builds.borrow().clone()
    }
}

impl HullEngine for ScriptedHullEngine {
    fn estimate_tolerance(
        &self,
        _points: &PointSet,
        percentile: Option<f64>,
    ) -> Result<f64, HullError> {
        self.estimates.borrow_mut().push(percentile);
        Ok(percentile.map_or(self.default_tolerance, |p| p / 100.0))
    }

    fn build(&self, points: &PointSet, tolerance: f64) -> Result<HullPolygon, HullError> {
        self.builds.borrow_mut().push(tolerance);
        if points.len() < 3 {
            return Err(HullError::InsufficientGeometry {
                points: points.len(),
            });
        }
        let cloud: MultiPoint<f64> = points.planar_coords().map(Point::from).collect();
        let scaled = cloud.convex_hull().map_coords(|coord| Coord {
            x: coord.x * tolerance,
            y: coord.y * tolerance,
        });
        Ok(HullPolygon::new(scaled))
    }
}

/// Targets and features written through a [`RecordingSink`].
pub type SinkLog = Vec<(SinkTarget, Vec<OutputFeature>)>;

/// `Sink` keeping finished layers in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Rc<RefCell<SinkLog>>,
    rejected: Option<Driver>,
}

impl RecordingSink {
    /// A sink that fails to create layers for `driver`.
    pub fn rejecting(driver: &str) -> Self {
        Self {
            rejected: Some(Driver::from(driver)),
            ..Self::default()
        }
    }

    /// Finished layers in completion order.
    pub fn writes(&self) -> SinkLog {
        self.log.borrow().clone()
    }
}

/// Handle returned by [`RecordingSink`].
#[derive(Debug)]
pub struct RecordingHandle {
    target: SinkTarget,
    features: Vec<OutputFeature>,
    log: Rc<RefCell<SinkLog>>,
}

impl SinkHandle for RecordingHandle {
    fn write(&mut self, feature: &OutputFeature) -> Result<(), SinkWriteError> {
        self.features.push(feature.clone());
        Ok(())
    }

    fn finish(self) -> Result<(), SinkWriteError> {
        self.log.borrow_mut().push((self.target, self.features));
        Ok(())
    }
}

impl Sink for RecordingSink {
    type Handle = RecordingHandle;

    fn create(&self, target: &SinkTarget) -> Result<Self::Handle, SinkWriteError> {
        if self.rejected.as_ref() == Some(&target.driver) {
            return Err(SinkWriteError::UnsupportedDriver {
                driver: target.driver.clone(),
                path: target.path.clone(),
            });
        }
        Ok(RecordingHandle {
            target: target.clone(),
            features: Vec::new(),
            log: Rc::clone(&self.log),
        })
    }
}
