use crate::capture::domain::capture_buffer::{AppendOutcome, CaptureBuffer};
use crate::features::domain::feature_extractor::FeatureExtractor;
use crate::features::domain::metric_result::MetricResult;
use crate::persistence::domain::persisted_record::PersistedRecord;
use crate::persistence::domain::persistence_sink::PersistenceSink;
use crate::session::domain::session_error::SessionError;
use crate::session::domain::session_state::{Command, SessionState};
use crate::shared::landmark_frame::LandmarkFrame;

/// One capture → compute → persist cycle for a single subject.
///
/// The session exclusively owns its buffer. Frames offered outside
/// `Collecting` are ignored; commands issued from the wrong state fail with
/// [`SessionError::InvalidTransition`] and change nothing.
#[derive(Debug, Default)]
pub struct CaptureSession {
    state: SessionState,
    buffer: CaptureBuffer,
    extractor: FeatureExtractor,
    result: Option<MetricResult>,
}

impl CaptureSession {
    pub fn new(extractor: FeatureExtractor) -> Self {
        Self::with_buffer(CaptureBuffer::new(), extractor)
    }

    pub fn with_buffer(buffer: CaptureBuffer, extractor: FeatureExtractor) -> Self {
        Self {
            state: SessionState::Idle,
            buffer,
            extractor,
            result: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Committed frames in the current session.
    pub fn count(&self) -> usize {
        self.buffer.len()
    }

    pub fn buffer(&self) -> &CaptureBuffer {
        &self.buffer
    }

    /// Averages from the last successful `compute`, until the next reset.
    pub fn result(&self) -> Option<&MetricResult> {
        self.result.as_ref()
    }

    /// Frame-ingestion entry point, called at most once per sensor tick.
    pub fn offer_frame(&mut self, frame: &LandmarkFrame) -> AppendOutcome {
        if !self.state.accepts_frames() {
            return AppendOutcome::Ignored;
        }
        let outcome = self.buffer.try_append(frame);
        if outcome == AppendOutcome::Full {
            log::debug!("Capture buffer full at {} frames", self.buffer.len());
        }
        outcome
    }

    pub fn try_append(&mut self, frame: &LandmarkFrame) -> bool {
        self.offer_frame(frame).is_committed()
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        let next = self.state.apply(Command::Start)?;
        self.reset();
        self.transition(next);
        Ok(())
    }

    pub fn stop(&mut self) -> Result<(), SessionError> {
        let next = self.state.apply(Command::Stop)?;
        log::info!("Collection stopped with {} frames", self.buffer.len());
        self.transition(next);
        Ok(())
    }

    /// Averages the captured frames. On insufficient data the session stays
    /// `Collected` so the caller can discard or inspect it.
    pub fn compute(&mut self) -> Result<&MetricResult, SessionError> {
        let next = self.state.apply(Command::Compute)?;
        let result = self.extractor.extract(&self.buffer)?;
        self.transition(next);
        Ok(self.result.insert(result))
    }

    /// Writes the computed averages under `name`, then resets. If the sink
    /// fails the session stays `Calculated` so the save can be retried.
    pub fn save_and_reset(
        &mut self,
        name: &str,
        sink: &mut dyn PersistenceSink,
    ) -> Result<PersistedRecord, SessionError> {
        let next = self.state.apply(Command::SaveAndReset)?;
        let record = self
            .result
            .as_ref()
            .and_then(|result| PersistedRecord::from_result(name, result))
            .ok_or(SessionError::InvalidTransition {
                command: Command::SaveAndReset,
                state: self.state,
            })?;

        sink.append(&record)?;

        self.reset();
        self.transition(next);
        Ok(record)
    }

    /// Allowed from every state.
    pub fn discard_and_reset(&mut self) -> Result<(), SessionError> {
        let next = self.state.apply(Command::DiscardAndReset)?;
        self.reset();
        self.transition(next);
        Ok(())
    }

    fn reset(&mut self) {
        self.buffer.reset();
        self.result = None;
    }

    fn transition(&mut self, next: SessionState) {
        log::debug!("Session {} -> {next}", self.state);
        self.state = next;
    }
}
