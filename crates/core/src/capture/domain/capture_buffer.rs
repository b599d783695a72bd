use ndarray::{s, Array3, ArrayView2, Axis};

use crate::capture::domain::plausibility_gate::PlausibilityGate;
use crate::shared::constants::{AXES, CAPTURE_CAPACITY, LANDMARK_COUNT};
use crate::shared::landmark_frame::{LandmarkFrame, Point3};
use crate::shared::landmark_id::LandmarkId;

/// Result of offering a frame to the buffer. None of these is an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppendOutcome {
    Committed,
    /// Dropped by the plausibility gate.
    Implausible,
    /// Buffer already holds `capacity` frames; nothing was written.
    Full,
    /// The owning session is not collecting. Never produced by the buffer.
    Ignored,
}

impl AppendOutcome {
    pub fn is_committed(self) -> bool {
        self == AppendOutcome::Committed
    }
}

/// Append-only, bounded store of landmark frames for one session.
///
/// Storage is a single `(capacity, 121, 3)` array; only the first `len()`
/// frames are meaningful. Once full, appends fail closed rather than wrap.
#[derive(Clone, Debug)]
pub struct CaptureBuffer {
    data: Array3<f32>,
    count: usize,
    gate: PlausibilityGate,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::with_capacity(CAPTURE_CAPACITY, PlausibilityGate::default())
    }

    pub fn with_capacity(capacity: usize, gate: PlausibilityGate) -> Self {
        Self {
            data: Array3::zeros((capacity, LANDMARK_COUNT, AXES)),
            count: 0,
            gate,
        }
    }

    pub fn try_append(&mut self, frame: &LandmarkFrame) -> AppendOutcome {
        if self.is_full() {
            return AppendOutcome::Full;
        }
        if !self.gate.accepts(frame) {
            return AppendOutcome::Implausible;
        }

        let mut slot = self.data.index_axis_mut(Axis(0), self.count);
        for (mut row, point) in slot.outer_iter_mut().zip(frame.points()) {
            row[0] = point.x;
            row[1] = point.y;
            row[2] = point.z;
        }
        self.count += 1;
        AppendOutcome::Committed
    }

    /// Forgets every committed frame and zeroes the storage.
    pub fn reset(&mut self) {
        self.data.slice_mut(s![..self.count, .., ..]).fill(0.0);
        self.count = 0;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.capacity()
    }

    /// `(121, 3)` view of committed frame `index`.
    pub fn frame(&self, index: usize) -> Option<ArrayView2<'_, f32>> {
        (index < self.count).then(|| self.data.index_axis(Axis(0), index))
    }

    pub fn point(&self, index: usize, id: LandmarkId) -> Option<Point3> {
        self.frame(index).map(|f| {
            let row = f.row(id.index());
            Point3::new(row[0], row[1], row[2])
        })
    }

    /// Committed frames in capture order.
    pub fn frames(&self) -> impl Iterator<Item = ArrayView2<'_, f32>> {
        (0..self.count).map(move |i| self.data.index_axis(Axis(0), i))
    }
}

impl Default for CaptureBuffer {
    fn default() -> Self {
        Self::new()
    }
}
