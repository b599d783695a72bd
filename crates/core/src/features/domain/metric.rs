//! Per-frame facial measurements.
//!
//! Distances are taken in the tracker's 3D space. Angle similarities are the
//! absolute cosine between two landmark-defined vectors, so they lie in
//! `[0, 1]` rather than being an angle in degrees.

use crate::shared::landmark_frame::Point3;
use crate::shared::landmark_id::LandmarkId;

type Vec3 = [f64; 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricKind {
    /// Euclidean distance between two landmarks.
    Distance(LandmarkId, LandmarkId),
    /// `|v1·v2| / (‖v1‖·‖v2‖)` with `v1 = A - B` and `v2 = C - D`.
    AngleSimilarity {
        a: LandmarkId,
        b: LandmarkId,
        c: LandmarkId,
        d: LandmarkId,
    },
    /// `sqrt(dx² + (dy + dz²)²)`: the historical head-width arithmetic, kept
    /// so stored records stay comparable.
    SkewedDistance(LandmarkId, LandmarkId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricDefinition {
    pub name: &'static str,
    pub kind: MetricKind,
}

impl MetricDefinition {
    pub const fn new(name: &'static str, kind: MetricKind) -> Self {
        Self { name, kind }
    }

    /// Evaluates the metric on one frame, given a landmark lookup.
    pub fn evaluate<F>(&self, point: F) -> f64
    where
        F: Fn(LandmarkId) -> Point3,
    {
        match self.kind {
            MetricKind::Distance(a, b) => distance(point(a), point(b)),
            MetricKind::AngleSimilarity { a, b, c, d } => angle_similarity(
                sub(point(a), point(b)),
                sub(point(c), point(d)),
            ),
            MetricKind::SkewedDistance(a, b) => skewed_distance(point(a), point(b)),
        }
    }

    pub fn landmarks(&self) -> Vec<LandmarkId> {
        match self.kind {
            MetricKind::Distance(a, b) | MetricKind::SkewedDistance(a, b) => vec![a, b],
            MetricKind::AngleSimilarity { a, b, c, d } => vec![a, b, c, d],
        }
    }
}

pub fn distance(a: Point3, b: Point3) -> f64 {
    let [dx, dy, dz] = sub(a, b);
    (dx * dx + dy * dy + dz * dz).sqrt()
}

pub fn skewed_distance(a: Point3, b: Point3) -> f64 {
    let [dx, dy, dz] = sub(a, b);
    (dx * dx + (dy + dz * dz).powi(2)).sqrt()
}

/// Absolute cosine similarity of two vectors.
///
/// Returns 0.0 when either vector has zero length.
pub fn angle_similarity(v1: Vec3, v2: Vec3) -> f64 {
    let norms = norm(v1) * norm(v2);
    if norms == 0.0 {
        return 0.0;
    }
    let dot = v1[0] * v2[0] + v1[1] * v2[1] + v1[2] * v2[2];
    (dot.abs() / norms).min(1.0)
}

fn sub(a: Point3, b: Point3) -> Vec3 {
    [
        f64::from(a.x) - f64::from(b.x),
        f64::from(a.y) - f64::from(b.y),
        f64::from(a.z) - f64::from(b.z),
    ]
}

fn norm(v: Vec3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
