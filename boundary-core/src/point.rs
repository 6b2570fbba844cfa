//! Normalised input points and the append-only point set.

use geo::Coord;

/// A single ingested point, planar or with elevation.
///
/// Dimensionality is tracked per point. A [`PointSet`] may freely mix both
/// variants; nothing promotes or truncates coordinates on ingestion.
///
/// # Examples
///
/// ```
/// use boundary_core::InputPoint;
///
/// let planar = InputPoint::Point2 { x: 1.0, y: 2.0 };
/// let elevated = InputPoint::Point3 { x: 1.0, y: 2.0, z: 30.0 };
/// assert_eq!(planar.planar(), elevated.planar());
/// assert_eq!(elevated.z(), Some(30.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputPoint {
    /// Point without elevation.
    Point2 {
        /// Easting or longitude.
        x: f64,
        /// Northing or latitude.
        y: f64,
    },
    /// Point carrying an elevation.
    Point3 {
        /// Easting or longitude.
        x: f64,
        /// Northing or latitude.
        y: f64,
        /// Elevation.
        z: f64,
    },
}

impl InputPoint {
    /// Build a point from its coordinates, choosing the variant from `z`.
    pub const fn new(x: f64, y: f64, z: Option<f64>) -> Self {
        match z {
            Some(z) => Self::Point3 { x, y, z },
            None => Self::Point2 { x, y },
        }
    }

    /// Horizontal position, ignoring any elevation.
    pub const fn planar(&self) -> Coord<f64> {
        match *self {
            Self::Point2 { x, y } | Self::Point3 { x, y, .. } => Coord { x, y },
        }
    }

    /// Elevation, when present.
    pub const fn z(&self) -> Option<f64> {
        match *self {
            Self::Point2 { .. } => None,
            Self::Point3 { z, .. } => Some(z),
        }
    }

    /// Number of coordinate components, 2 or 3.
    pub const fn dimension(&self) -> usize {
        match self {
            Self::Point2 { .. } => 2,
            Self::Point3 { .. } => 3,
        }
    }
}

impl From<Coord<f64>> for InputPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self::Point2 {
            x: coord.x,
            y: coord.y,
        }
    }
}

/// Insertion-ordered collection of ingested points.
///
/// The set only grows: points are appended and never edited or removed, and
/// duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<InputPoint>,
}

impl PointSet {
    /// Create an empty set.
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Append a single point.
    pub fn push(&mut self, point: InputPoint) {
        self.points.push(point);
    }

    /// Number of points held.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no point has been ingested yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, InputPoint> {
        self.points.iter()
    }

    /// Borrow the points as a slice.
    pub fn as_slice(&self) -> &[InputPoint] {
        &self.points
    }

    /// Horizontal positions in insertion order, as consumed by hull engines.
    pub fn planar_coords(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.points.iter().map(InputPoint::planar)
    }
}

impl Extend<InputPoint> for PointSet {
    fn extend<I: IntoIterator<Item = InputPoint>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl FromIterator<InputPoint> for PointSet {
    fn from_iter<I: IntoIterator<Item = InputPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a InputPoint;
    type IntoIter = std::slice::Iter<'a, InputPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, 2)]
    #[case(Some(4.5), 3)]
    fn new_picks_variant_from_elevation(#[case] z: Option<f64>, #[case] dimension: usize) {
        let point = InputPoint::new(1.0, 2.0, z);
        assert_eq!(point.dimension(), dimension);
        assert_eq!(point.z(), z);
        assert_eq!(point.planar(), Coord { x: 1.0, y: 2.0 });
    }

    #[rstest]
    fn point_set_keeps_mixed_dimensions_in_order() {
        let mut set = PointSet::new();
        set.push(InputPoint::new(0.0, 0.0, None));
        set.push(InputPoint::new(1.0, 1.0, Some(9.0)));
        set.push(InputPoint::new(0.0, 0.0, None));

        let dimensions: Vec<_> = set.iter().map(InputPoint::dimension).collect();
        assert_eq!(dimensions, vec![2, 3, 2]);
        assert_eq!(set.len(), 3, "duplicates are kept");
    }

    #[rstest]
    fn planar_coords_drop_elevation() {
        let set: PointSet = [InputPoint::new(3.0, 4.0, Some(5.0))].into_iter().collect();
        let coords: Vec<_> = set.planar_coords().collect();
        assert_eq!(coords, vec![Coord { x: 3.0, y: 4.0 }]);
    }
}
