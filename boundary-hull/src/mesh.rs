//! Delaunay triangulation of a point set, flattened into index form.

use std::collections::HashMap;

use boundary_core::PointSet;
use geo::Coord;
use log::warn;
use spade::{DelaunayTriangulation, Point2, Triangulation};

/// Undirected edge between two vertex indices, smaller index first.
pub(crate) type EdgeKey = (usize, usize);

/// Vertices and counter-clockwise triangles of a triangulation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Mesh {
    pub(crate) vertices: Vec<Coord<f64>>,
    pub(crate) triangles: Vec<[usize; 3]>,
}

pub(crate) const fn edge_key(a: usize, b: usize) -> EdgeKey {
    if a < b { (a, b) } else { (b, a) }
}

impl Mesh {
    /// Triangulate the planar projection of `points`.
    ///
    /// Coincident points collapse into one vertex. Points spade refuses
    /// (non-finite or out of range) are skipped with a warning.
    pub(crate) fn triangulate(points: &PointSet) -> Self {
        let mut triangulation = DelaunayTriangulation::<Point2<f64>>::new();
        let mut rejected = 0_usize;
        for coord in points.planar_coords() {
            if triangulation.insert(Point2::new(coord.x, coord.y)).is_err() {
                rejected += 1;
            }
        }
        if rejected > 0 {
            warn!("skipped {rejected} points that cannot be triangulated");
        }

        let mut index = HashMap::new();
        let mut vertices = Vec::with_capacity(triangulation.num_vertices());
        for vertex in triangulation.vertices() {
            let position = vertex.position();
            index.insert(vertex.fix(), vertices.len());
            vertices.push(Coord {
                x: position.x,
                y: position.y,
            });
        }

        let triangles = triangulation
            .inner_faces()
            .filter_map(|face| {
                let [a, b, c] = face.vertices();
                let corners = [
                    *index.get(&a.fix())?,
                    *index.get(&b.fix())?,
                    *index.get(&c.fix())?,
                ];
                Some(counter_clockwise(&vertices, corners))
            })
            .collect();

        Self {
            vertices,
            triangles,
        }
    }

    /// Triangles sharing each undirected edge.
    pub(crate) fn edge_triangles(&self) -> HashMap<EdgeKey, Vec<usize>> {
        let mut edges: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
        for (triangle, corners) in self.triangles.iter().enumerate() {
            for (a, b) in triangle_edges(*corners) {
                edges.entry(edge_key(a, b)).or_default().push(triangle);
            }
        }
        edges
    }

    /// Length of every undirected edge, ascending.
    pub(crate) fn sorted_edge_lengths(&self) -> Vec<f64> {
        let mut lengths: Vec<f64> = self
            .edge_triangles()
            .keys()
            .map(|&(a, b)| self.length(a, b))
            .collect();
        lengths.sort_by(f64::total_cmp);
        lengths
    }

    /// Euclidean distance between two vertices.
    #[expect(clippy::float_arithmetic, reason = "edge lengths are computed from coordinates")]
    pub(crate) fn length(&self, a: usize, b: usize) -> f64 {
        match (self.vertices.get(a), self.vertices.get(b)) {
            (Some(start), Some(end)) => (end.x - start.x).hypot(end.y - start.y),
            _ => f64::NAN,
        }
    }
}

/// Directed edges of a triangle in corner order.
pub(crate) const fn triangle_edges([a, b, c]: [usize; 3]) -> [(usize, usize); 3] {
    [(a, b), (b, c), (c, a)]
}

#[expect(clippy::float_arithmetic, reason = "orientation uses the signed area")]
fn counter_clockwise(vertices: &[Coord<f64>], [a, b, c]: [usize; 3]) -> [usize; 3] {
    let signed_area = match (vertices.get(a), vertices.get(b), vertices.get(c)) {
        (Some(pa), Some(pb), Some(pc)) => {
            (pb.x - pa.x) * (pc.y - pa.y) - (pb.y - pa.y) * (pc.x - pa.x)
        }
        _ => 0.0,
    };
    if signed_area < 0.0 { [a, c, b] } else { [a, b, c] }
}
