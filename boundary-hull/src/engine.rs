//! `DelaunayHullEngine` implementation of the hull engine boundary.

use boundary_core::{HullEngine, HullError, HullPolygon, PointSet};
use log::debug;

use crate::erosion::concave_polygon;
use crate::mesh::Mesh;
use crate::percentile::interpolated;

/// Percentile of triangulation edge lengths used as the default tolerance.
pub const DEFAULT_PERCENTILE: f64 = 92.5;

/// Configuration for [`DelaunayHullEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct DelaunayHullConfig {
    /// Edge-length percentile used when no percentile is requested.
    pub default_percentile: f64,
}

impl Default for DelaunayHullConfig {
    fn default() -> Self {
        Self {
            default_percentile: DEFAULT_PERCENTILE,
        }
    }
}

/// Concave hull engine eroding a Delaunay triangulation.
///
/// # Examples
///
/// ```
/// use boundary_core::{HullEngine, InputPoint, PointSet};
/// use boundary_hull::DelaunayHullEngine;
///
/// let points: PointSet = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (2.0, 2.0)]
///     .into_iter()
///     .map(|(x, y)| InputPoint::new(x, y, None))
///     .collect();
/// let engine = DelaunayHullEngine::new();
/// let hull = engine.build(&points, f64::INFINITY)?;
/// assert_eq!(hull.boundary_vertex_count(), 4);
/// assert_eq!(hull.area(), 16.0);
/// # Ok::<(), boundary_core::HullError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DelaunayHullEngine {
    config: DelaunayHullConfig,
}

impl DelaunayHullEngine {
    /// Construct an engine using default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(DelaunayHullConfig {
            default_percentile: DEFAULT_PERCENTILE,
        })
    }

    /// Construct an engine with explicit configuration.
    #[must_use]
    pub const fn with_config(config: DelaunayHullConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &DelaunayHullConfig {
        &self.config
    }

    fn triangulate(points: &PointSet) -> Result<Mesh, HullError> {
        let mesh = Mesh::triangulate(points);
        if mesh.triangles.is_empty() {
            return Err(HullError::InsufficientGeometry {
                points: points.len(),
            });
        }
        Ok(mesh)
    }
}

impl HullEngine for DelaunayHullEngine {
    fn estimate_tolerance(
        &self,
        points: &PointSet,
        percentile: Option<f64>,
    ) -> Result<f64, HullError> {
        let percentile = percentile.unwrap_or(self.config.default_percentile);
        if !(0.0..=100.0).contains(&percentile) {
            return Err(HullError::InvalidPercentile { percentile });
        }
        let mesh = Self::triangulate(points)?;
        let lengths = mesh.sorted_edge_lengths();
        let tolerance =
            interpolated(&lengths, percentile).ok_or(HullError::InsufficientGeometry {
                points: points.len(),
            })?;
        debug!(
            "estimated tolerance {tolerance} at percentile {percentile} over {} edges",
            lengths.len()
        );
        Ok(tolerance)
    }

    fn build(&self, points: &PointSet, tolerance: f64) -> Result<HullPolygon, HullError> {
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(HullError::InvalidTolerance { tolerance });
        }
        let mesh = Self::triangulate(points)?;
        let polygon = concave_polygon(&mesh, tolerance).ok_or(HullError::InsufficientGeometry {
            points: points.len(),
        })?;
        debug!(
            "built hull with {} boundary vertices from {} triangles",
            polygon.exterior().0.len().saturating_sub(1),
            mesh.triangles.len()
        );
        Ok(HullPolygon::new(polygon))
    }
}
