use std::fmt;

use crate::shared::constants::LANDMARK_COUNT;

/// Index of one of the tracker's 121 facial landmarks.
///
/// Ids are positions in the tracker's output order and are stable across
/// frames. Only ids referenced by the metric table get names here; the rest
/// are reachable through [`LandmarkId::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LandmarkId(u8);

impl LandmarkId {
    pub const TOP_SKULL: Self = Self(0);
    pub const PLAUSIBILITY_ANCHOR: Self = Self(4);
    pub const CHIN_UPPER: Self = Self(9);
    pub const CHIN_TIP: Self = Self(10);
    pub const RIGHT_EYE_OUTER: Self = Self(20);
    pub const RIGHT_EYE_BOTTOM: Self = Self(21);
    pub const RIGHT_EYE_TOP: Self = Self(22);
    pub const RIGHT_EYE_INNER: Self = Self(23);
    pub const RIGHT_BROW_INNER: Self = Self(26);
    pub const RIGHT_JAW: Self = Self(30);
    pub const RIGHT_JAW_LOWER: Self = Self(32);
    pub const NOSE_BRIDGE: Self = Self(39);
    pub const LEFT_EYE_OUTER: Self = Self(53);
    pub const LEFT_EYE_TOP: Self = Self(54);
    pub const LEFT_EYE_BOTTOM: Self = Self(55);
    pub const LEFT_EYE_INNER: Self = Self(56);
    pub const LEFT_BROW_INNER: Self = Self(59);
    pub const LEFT_JAW: Self = Self(63);
    pub const LEFT_JAW_LOWER: Self = Self(65);
    pub const MOUTH_LEFT_CORNER: Self = Self(88);
    pub const MOUTH_RIGHT_CORNER: Self = Self(89);
    pub const RIGHT_CHEEK: Self = Self(90);
    pub const LEFT_CHEEK: Self = Self(91);
    pub const NOSE_TIP: Self = Self(94);
    pub const LEFT_TEMPLE: Self = Self(113);
    pub const RIGHT_TEMPLE: Self = Self(117);

    /// Returns `None` for indices outside `0..121`.
    pub fn new(index: usize) -> Option<Self> {
        if index < LANDMARK_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = LandmarkId> {
        (0..LANDMARK_COUNT as u8).map(Self)
    }
}

impl fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
