//! Hull engine boundary and the polygon it produces.

use geo::{Area, Polygon};
use thiserror::Error;

use crate::PointSet;

/// Boundary polygon computed from a [`PointSet`].
///
/// Wraps a planar [`geo::Polygon`]; elevation never reaches the hull.
///
/// # Examples
///
/// ```
/// use geo::polygon;
/// use boundary_core::HullPolygon;
///
/// let hull = HullPolygon::new(polygon![
///     (x: 0.0, y: 0.0),
///     (x: 2.0, y: 0.0),
///     (x: 2.0, y: 1.0),
///     (x: 0.0, y: 1.0),
/// ]);
/// assert_eq!(hull.area(), 2.0);
/// assert_eq!(hull.perimeter(), 6.0);
/// assert_eq!(hull.boundary_vertex_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HullPolygon {
    polygon: Polygon<f64>,
}

impl HullPolygon {
    /// Wrap a polygon produced by a hull engine.
    pub const fn new(polygon: Polygon<f64>) -> Self {
        Self { polygon }
    }

    /// The underlying polygon.
    pub const fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Consume the wrapper, returning the polygon.
    pub fn into_polygon(self) -> Polygon<f64> {
        self.polygon
    }

    /// Enclosed area, always non-negative.
    pub fn area(&self) -> f64 {
        self.polygon.unsigned_area()
    }

    /// Total boundary length, exterior ring plus any interior rings.
    pub fn perimeter(&self) -> f64 {
        std::iter::once(self.polygon.exterior())
            .chain(self.polygon.interiors())
            .flat_map(|ring| ring.lines())
            .map(|line| line.dx().hypot(line.dy()))
            .sum()
    }

    /// Number of distinct vertices on the exterior ring.
    ///
    /// The closing coordinate of the ring is not counted twice.
    pub fn boundary_vertex_count(&self) -> usize {
        let ring = self.polygon.exterior();
        let count = ring.0.len();
        if ring.is_closed() && count > 1 {
            count - 1
        } else {
            count
        }
    }
}

/// Errors returned by [`HullEngine`] implementations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HullError {
    /// Too few distinct, non-collinear points to enclose an area.
    #[error("at least three non-collinear points are required to build a hull (got {points})")]
    InsufficientGeometry {
        /// Number of points supplied.
        points: usize,
    },
    /// Tolerance was negative or NaN.
    #[error("hull tolerance must be a non-negative length (got {tolerance})")]
    InvalidTolerance {
        /// Offending tolerance.
        tolerance: f64,
    },
    /// Percentile lay outside `[0, 100]`.
    #[error("percentile must lie within 0..=100 (got {percentile})")]
    InvalidPercentile {
        /// Offending percentile.
        percentile: f64,
    },
}

/// Builds boundary polygons from point sets.
///
/// Implementations must report an empty or degenerate `points` as
/// [`HullError::InsufficientGeometry`] rather than panicking.
///
/// # Examples
///
/// ```rust
/// use geo::{ConvexHull, MultiPoint, Point};
/// use boundary_core::{HullEngine, HullError, HullPolygon, InputPoint, PointSet};
///
/// struct Convex;
///
/// impl HullEngine for Convex {
///     fn estimate_tolerance(
///         &self,
///         _points: &PointSet,
///         _percentile: Option<f64>,
///     ) -> Result<f64, HullError> {
///         Ok(f64::INFINITY)
///     }
///
///     fn build(&self, points: &PointSet, _tolerance: f64) -> Result<HullPolygon, HullError> {
///         if points.len() < 3 {
///             return Err(HullError::InsufficientGeometry { points: points.len() });
///         }
///         let cloud: MultiPoint<f64> = points.planar_coords().map(Point::from).collect();
///         Ok(HullPolygon::new(cloud.convex_hull()))
///     }
/// }
///
/// let points: PointSet = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]
///     .into_iter()
///     .map(|(x, y)| InputPoint::new(x, y, None))
///     .collect();
/// let hull = Convex.build(&points, 1.0)?;
/// assert_eq!(hull.boundary_vertex_count(), 3);
/// # Ok::<(), HullError>(())
/// ```
pub trait HullEngine {
    /// Derive a tolerance from `percentile`, or from the engine's default
    /// when `None`.
    fn estimate_tolerance(
        &self,
        points: &PointSet,
        percentile: Option<f64>,
    ) -> Result<f64, HullError>;

    /// Compute the hull of `points` under `tolerance`.
    fn build(&self, points: &PointSet, tolerance: f64) -> Result<HullPolygon, HullError>;
}

impl<E: HullEngine + ?Sized> HullEngine for &E {
    fn estimate_tolerance(
        &self,
        points: &PointSet,
        percentile: Option<f64>,
    ) -> Result<f64, HullError> {
        (**self).estimate_tolerance(points, percentile)
    }

    fn build(&self, points: &PointSet, tolerance: f64) -> Result<HullPolygon, HullError> {
        (**self).build(points, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{LineString, polygon};
    use rstest::rstest;

    #[rstest]
    fn metrics_cover_triangle() {
        let hull = HullPolygon::new(polygon![
            (x: 0.0, y: 0.0),
            (x: 3.0, y: 0.0),
            (x: 0.0, y: 4.0),
        ]);
        assert!((hull.area() - 6.0).abs() < 1e-12);
        assert!((hull.perimeter() - 12.0).abs() < 1e-12);
        assert_eq!(hull.boundary_vertex_count(), 3);
    }

    #[rstest]
    fn perimeter_includes_holes() {
        let exterior = LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let hole = LineString::from(vec![(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]);
        let hull = HullPolygon::new(Polygon::new(exterior, vec![hole]));
        assert!((hull.perimeter() - 20.0).abs() < 1e-12);
        assert!((hull.area() - 15.0).abs() < 1e-12);
        assert_eq!(hull.boundary_vertex_count(), 4);
    }
}
