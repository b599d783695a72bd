use crate::shared::constants::{PLAUSIBILITY_LANDMARK, PLAUSIBILITY_MIN_Z};
use crate::shared::landmark_frame::LandmarkFrame;
use crate::shared::landmark_id::LandmarkId;

/// Per-frame acceptance check applied before a frame is committed.
///
/// Frames captured before the tracker locks on report the anchor landmark at
/// a near-zero depth; those are dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlausibilityGate {
    anchor: LandmarkId,
    min_z: f32,
}

impl PlausibilityGate {
    pub fn new(anchor: LandmarkId, min_z: f32) -> Self {
        Self { anchor, min_z }
    }

    /// Accepts only when the anchor's z is strictly above the threshold.
    pub fn accepts(&self, frame: &LandmarkFrame) -> bool {
        frame.point(self.anchor).z > self.min_z
    }

    pub fn anchor(&self) -> LandmarkId {
        self.anchor
    }

    pub fn min_z(&self) -> f32 {
        self.min_z
    }
}

impl Default for PlausibilityGate {
    fn default() -> Self {
        debug_assert_eq!(LandmarkId::PLAUSIBILITY_ANCHOR.index(), PLAUSIBILITY_LANDMARK);
        Self::new(LandmarkId::PLAUSIBILITY_ANCHOR, PLAUSIBILITY_MIN_Z)
    }
}
