//! Compute-or-reuse policy for the cached hull.
//!
//! The cache holds at most one hull, the one computed under the last
//! parameters used. Parameters are intent signals rather than cache keys: any
//! explicit percentile or tolerance forces a fresh build, and only a request
//! without parameters may reuse what is cached. Whether the point set changed
//! since the cached build is not tracked.

use log::debug;

use crate::{HullEngine, HullError, HullPolygon, PointSet};

/// What the caller asked for when exporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HullRequest {
    /// No parameters: reuse the cached hull, building a default one if empty.
    Reuse,
    /// Rebuild with a tolerance estimated from this percentile.
    Percentile(f64),
    /// Rebuild with this tolerance.
    Tolerance(f64),
}

impl HullRequest {
    /// Map optional caller parameters to a request.
    ///
    /// A percentile takes priority when both are supplied.
    ///
    /// ```
    /// use boundary_core::HullRequest;
    ///
    /// assert_eq!(
    ///     HullRequest::from_parameters(Some(90.0), Some(2.5)),
    ///     HullRequest::Percentile(90.0),
    /// );
    /// assert_eq!(HullRequest::from_parameters(None, None), HullRequest::Reuse);
    /// ```
    pub fn from_parameters(percentile: Option<f64>, tolerance: Option<f64>) -> Self {
        match (percentile, tolerance) {
            (Some(percentile), _) => Self::Percentile(percentile),
            (None, Some(tolerance)) => Self::Tolerance(tolerance),
            (None, None) => Self::Reuse,
        }
    }
}

/// How the tolerance of a cached hull was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "source", rename_all = "snake_case"))]
pub enum TolerancePolicy {
    /// Engine default estimate.
    Default,
    /// Estimated from a caller percentile.
    Percentile {
        /// Percentile supplied by the caller.
        percentile: f64,
    },
    /// Supplied directly by the caller.
    Explicit,
}

/// Provenance of a cached hull, kept for reporting only.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HullProvenance {
    /// Tolerance the hull was built with.
    pub tolerance: f64,
    /// Where that tolerance came from.
    pub policy: TolerancePolicy,
}

/// Whether a request rebuilt the hull or reused the cached one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "decision", rename_all = "snake_case"))]
pub enum HullDecision {
    /// The engine built a new hull.
    Computed(HullProvenance),
    /// The cached hull was returned unchanged.
    Reused(HullProvenance),
}

impl HullDecision {
    /// Provenance of the hull the request resolved to.
    pub const fn provenance(&self) -> HullProvenance {
        match *self {
            Self::Computed(provenance) | Self::Reused(provenance) => provenance,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CachedHull {
    polygon: HullPolygon,
    provenance: HullProvenance,
}

/// Single-slot hull cache owned by an adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HullCache {
    slot: Option<CachedHull>,
}

impl HullCache {
    /// An empty cache.
    pub const fn empty() -> Self {
        Self { slot: None }
    }

    /// The cached hull, if any.
    pub fn hull(&self) -> Option<&HullPolygon> {
        self.slot.as_ref().map(|cached| &cached.polygon)
    }

    /// Provenance of the cached hull, if any.
    pub fn provenance(&self) -> Option<HullProvenance> {
        self.slot.as_ref().map(|cached| cached.provenance)
    }

    /// Whether nothing has been computed yet.
    pub const fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    fn holding(polygon: HullPolygon, provenance: HullProvenance) -> Self {
        Self {
            slot: Some(CachedHull {
                polygon,
                provenance,
            }),
        }
    }
}

/// Result of [`compute_or_reuse`]: the next cache state and the hull to use.
#[derive(Debug, Clone, PartialEq)]
pub struct HullResolution {
    /// Cache state to install once the caller commits.
    pub cache: HullCache,
    /// Hull the request resolved to.
    pub hull: HullPolygon,
    /// Whether the hull was rebuilt.
    pub decision: HullDecision,
}

/// Decide whether `request` rebuilds the hull or reuses `state`.
///
/// Priority: a percentile rebuilds with the estimated tolerance; otherwise a
/// tolerance rebuilds with that tolerance; otherwise an empty cache builds with
/// the engine's default estimate; otherwise the cached hull is reused.
///
/// `state` is never modified. On error the caller keeps its current cache.
///
/// # Errors
///
/// Propagates [`HullError`] from the engine, including
/// [`HullError::InsufficientGeometry`] when `points` is empty.
pub fn compute_or_reuse<E>(
    state: &HullCache,
    request: HullRequest,
    engine: &E,
    points: &PointSet,
) -> Result<HullResolution, HullError>
where
    E: HullEngine + ?Sized,
{
    let (tolerance, policy) = match (request, &state.slot) {
        (HullRequest::Percentile(percentile), _) => (
            engine.estimate_tolerance(points, Some(percentile))?,
            TolerancePolicy::Percentile { percentile },
        ),
        (HullRequest::Tolerance(tolerance), _) => (tolerance, TolerancePolicy::Explicit),
        (HullRequest::Reuse, None) => (
            engine.estimate_tolerance(points, None)?,
            TolerancePolicy::Default,
        ),
        (HullRequest::Reuse, Some(cached)) => {
            debug!("reusing cached hull built with tolerance {}", cached.provenance.tolerance);
            return Ok(HullResolution {
                cache: state.clone(),
                hull: cached.polygon.clone(),
                decision: HullDecision::Reused(cached.provenance),
            });
        }
    };

    debug!(
        "building hull over {} points with tolerance {tolerance} ({policy:?})",
        points.len()
    );
    let hull = engine.build(points, tolerance)?;
    let provenance = HullProvenance { tolerance, policy };
    Ok(HullResolution {
        cache: HullCache::holding(hull.clone(), provenance),
        hull,
        decision: HullDecision::Computed(provenance),
    })
}
