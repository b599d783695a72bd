use crate::shared::landmark_frame::LandmarkFrame;

/// Domain interface for whatever hands the core one landmark frame per
/// sensor tick.
///
/// `poll` is called at most once per tick. `None` means tracking failed for
/// that tick; the session simply receives nothing.
pub trait LandmarkSource: Send {
    fn poll(&mut self) -> Option<LandmarkFrame>;

    /// Live sensors never run dry. Replay sources report `true` once their
    /// recording has been fully delivered.
    fn is_exhausted(&self) -> bool {
        false
    }
}
