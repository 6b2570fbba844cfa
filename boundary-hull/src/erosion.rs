//! Boundary erosion of a triangulation down to a concave ring.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use geo::{Coord, LineString, Polygon};

use crate::mesh::{EdgeKey, Mesh, edge_key, triangle_edges};

/// Boundary edge queued for erosion, longest first.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    length: f64,
    edge: EdgeKey,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length
            .total_cmp(&other.length)
            .then_with(|| other.edge.cmp(&self.edge))
    }
}

/// Mutable erosion state over a [`Mesh`].
struct Erosion<'a> {
    mesh: &'a Mesh,
    edges: HashMap<EdgeKey, Vec<usize>>,
    alive: Vec<bool>,
    alive_count: usize,
    on_boundary: Vec<bool>,
    queue: BinaryHeap<Candidate>,
}

impl<'a> Erosion<'a> {
    fn new(mesh: &'a Mesh) -> Self {
        let edges = mesh.edge_triangles();
        let mut erosion = Self {
            mesh,
            alive: vec![true; mesh.triangles.len()],
            alive_count: mesh.triangles.len(),
            on_boundary: vec![false; mesh.vertices.len()],
            queue: BinaryHeap::new(),
            edges,
        };
        let hull_edges: Vec<EdgeKey> = erosion
            .edges
            .iter()
            .filter(|(_, triangles)| triangles.len() == 1)
            .map(|(edge, _)| *edge)
            .collect();
        for edge in hull_edges {
            erosion.expose(edge);
        }
        erosion
    }

    fn expose(&mut self, (a, b): EdgeKey) {
        for vertex in [a, b] {
            if let Some(flag) = self.on_boundary.get_mut(vertex) {
                *flag = true;
            }
        }
        self.queue.push(Candidate {
            length: self.mesh.length(a, b),
            edge: (a, b),
        });
    }

    /// The single live triangle on `edge`, when the edge is on the boundary.
    fn exposed_triangle(&self, edge: EdgeKey) -> Option<usize> {
        let mut live = self
            .edges
            .get(&edge)?
            .iter()
            .copied()
            .filter(|&triangle| self.alive.get(triangle).copied().unwrap_or(false));
        let triangle = live.next()?;
        live.next().is_none().then_some(triangle)
    }

    fn run(&mut self, tolerance: f64) {
        while let Some(candidate) = self.queue.pop() {
            if candidate.length <= tolerance || self.alive_count <= 1 {
                break;
            }
            let Some(triangle) = self.exposed_triangle(candidate.edge) else {
                continue;
            };
            let Some(&corners) = self.mesh.triangles.get(triangle) else {
                continue;
            };
            let (a, b) = candidate.edge;
            let Some(&apex) = corners.iter().find(|&&corner| corner != a && corner != b) else {
                continue;
            };
            // Removing a triangle whose apex is already on the boundary would
            // split the polygon in two.
            if self.on_boundary.get(apex).copied().unwrap_or(true) {
                continue;
            }
            if let Some(flag) = self.alive.get_mut(triangle) {
                *flag = false;
            }
            self.alive_count -= 1;
            self.expose(edge_key(a, apex));
            self.expose(edge_key(apex, b));
        }
    }

    /// Walk the boundary of the live triangles into a closed ring.
    fn ring(&self) -> Vec<Coord<f64>> {
        let directed: HashSet<(usize, usize)> = self
            .mesh
            .triangles
            .iter()
            .zip(&self.alive)
            .filter(|(_, alive)| **alive)
            .flat_map(|(corners, _)| triangle_edges(*corners))
            .collect();
        let next: HashMap<usize, usize> = directed
            .iter()
            .filter(|(from, to)| !directed.contains(&(*to, *from)))
            .map(|&(from, to)| (from, to))
            .collect();

        let Some(&start) = next.keys().min() else {
            return Vec::new();
        };
        let mut ring = Vec::with_capacity(next.len() + 1);
        let mut current = start;
        loop {
            let Some(&coord) = self.mesh.vertices.get(current) else {
                return Vec::new();
            };
            ring.push(coord);
            match next.get(&current) {
                Some(&following) if following == start => break,
                Some(&following) if ring.len() <= next.len() => current = following,
                _ => return Vec::new(),
            }
        }
        ring
    }
}

/// Erode `mesh` from the outside while exposed edges exceed `tolerance`.
///
/// Returns `None` when the mesh has no triangles.
pub(crate) fn concave_polygon(mesh: &Mesh, tolerance: f64) -> Option<Polygon<f64>> {
    if mesh.triangles.is_empty() {
        return None;
    }
    let mut erosion = Erosion::new(mesh);
    erosion.run(tolerance);
    let ring = erosion.ring();
    (ring.len() >= 3).then(|| Polygon::new(LineString::from(ring), Vec::new()))
}
