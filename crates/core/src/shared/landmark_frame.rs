use thiserror::Error;

use crate::shared::constants::LANDMARK_COUNT;
use crate::shared::landmark_id::LandmarkId;

/// A 3D point in the tracker's coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Point3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum LandmarkFrameError {
    #[error("landmark frame must hold {expected} points, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// The full set of landmark positions for one successfully tracked tick.
///
/// Always holds exactly [`LANDMARK_COUNT`] points in landmark-id order.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkFrame {
    points: Vec<Point3>,
}

impl LandmarkFrame {
    pub fn new(points: Vec<Point3>) -> Result<Self, LandmarkFrameError> {
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkFrameError::WrongLength {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Frame with every landmark at the same position.
    pub fn filled(point: Point3) -> Self {
        Self {
            points: vec![point; LANDMARK_COUNT],
        }
    }

    pub fn point(&self, id: LandmarkId) -> Point3 {
        self.points[id.index()]
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns a copy with one landmark moved.
    pub fn with_point(mut self, id: LandmarkId, point: Point3) -> Self {
        self.points[id.index()] = point;
        self
    }
}
