//! Delaunay-based concave hull engine.
//!
//! This crate provides [`DelaunayHullEngine`], the default implementation of
//! the [`HullEngine`](boundary_core::HullEngine) trait. The planar projection
//! of the point set is triangulated, and triangles are eroded from the outside
//! in while their exposed edge is longer than the tolerance. Erosion stops at
//! any triangle whose removal would pinch the boundary, so the result is
//! always a single simple polygon. An infinite tolerance yields the convex
//! hull.
//!
//! Tolerances are lengths in the units of the input coordinates. When the
//! caller has no length in mind, [`DelaunayHullEngine`] estimates one as a
//! percentile of all triangulation edge lengths.

#![forbid(unsafe_code)]

mod engine;
mod erosion;
mod mesh;
mod percentile;

pub use engine::{DEFAULT_PERCENTILE, DelaunayHullConfig, DelaunayHullEngine};
