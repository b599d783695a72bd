//! Choosing which tracked body the face tracker should follow.
//!
//! The previously followed body wins while the sensor still sees it, even
//! if only its position is known, since it may become fully tracked again.
//! Otherwise the first fully tracked body is adopted and the face tracker is
//! told to drop whatever it tuned to the previous person.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyTrackingState {
    NotTracked,
    PositionOnly,
    Tracked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedBody {
    pub tracking_id: i32,
    pub state: BodyTrackingState,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// Body whose face should be tracked this tick; only fully tracked bodies.
    pub body: Option<TrackedBody>,
    /// A different body was adopted; the face tracker must reset its tuning.
    pub reset_tracker: bool,
}

#[derive(Debug, Default)]
pub struct BodySelector {
    tracking_id: Option<i32>,
}

impl BodySelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracking_id(&self) -> Option<i32> {
        self.tracking_id
    }

    pub fn select(&mut self, bodies: &[TrackedBody]) -> Selection {
        let mut reset_tracker = false;

        let kept = self.tracking_id.and_then(|id| {
            bodies
                .iter()
                .find(|b| b.tracking_id == id && b.state != BodyTrackingState::NotTracked)
        });

        let chosen = match kept {
            Some(body) => Some(*body),
            None => {
                let adopted = bodies
                    .iter()
                    .find(|b| b.state == BodyTrackingState::Tracked)
                    .copied();
                if let Some(body) = adopted {
                    log::debug!("Adopting tracked body {}", body.tracking_id);
                    reset_tracker = true;
                    self.tracking_id = Some(body.tracking_id);
                }
                adopted
            }
        };

        match chosen {
            Some(body) if body.state == BodyTrackingState::Tracked => Selection {
                body: Some(body),
                reset_tracker,
            },
            Some(_) => Selection {
                body: None,
                reset_tracker,
            },
            None => {
                self.tracking_id = None;
                Selection::default()
            }
        }
    }
}
