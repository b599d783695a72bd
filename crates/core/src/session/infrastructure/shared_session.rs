use std::sync::{Arc, Mutex, MutexGuard};

use crate::capture::domain::capture_buffer::AppendOutcome;
use crate::features::domain::metric_result::MetricResult;
use crate::persistence::domain::persisted_record::PersistedRecord;
use crate::persistence::domain::persistence_sink::PersistenceSink;
use crate::session::domain::capture_session::CaptureSession;
use crate::session::domain::session_error::SessionError;
use crate::session::domain::session_state::SessionState;
use crate::shared::landmark_frame::LandmarkFrame;

/// Thread-safe handle to one [`CaptureSession`].
///
/// Frame ingestion and control commands go through the same mutex, so an
/// append can never interleave with a state transition.
#[derive(Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<CaptureSession>>,
}

impl SharedSession {
    pub fn new(session: CaptureSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Every operation leaves the session consistent, so a panic while the
    /// lock was held does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, CaptureSession> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn offer_frame(&self, frame: &LandmarkFrame) -> (AppendOutcome, usize) {
        let mut session = self.lock();
        let outcome = session.offer_frame(frame);
        (outcome, session.count())
    }

    pub fn state(&self) -> SessionState {
        self.lock().state()
    }

    pub fn count(&self) -> usize {
        self.lock().count()
    }

    pub fn capacity(&self) -> usize {
        self.lock().buffer().capacity()
    }

    pub fn result(&self) -> Option<MetricResult> {
        self.lock().result().cloned()
    }

    pub fn start(&self) -> Result<(), SessionError> {
        self.lock().start()
    }

    pub fn stop(&self) -> Result<(), SessionError> {
        self.lock().stop()
    }

    pub fn compute(&self) -> Result<MetricResult, SessionError> {
        self.lock().compute().cloned()
    }

    /// The sink write happens under the lock. Ingestion may wait for it, but
    /// every frame offered meanwhile is ignored since the session is
    /// `Calculated`.
    pub fn save_and_reset(
        &self,
        name: &str,
        sink: &mut dyn PersistenceSink,
    ) -> Result<PersistedRecord, SessionError> {
        self.lock().save_and_reset(name, sink)
    }

    pub fn discard_and_reset(&self) -> Result<(), SessionError> {
        self.lock().discard_and_reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::domain::persistence_sink::PersistenceError;
    use crate::shared::landmark_frame::Point3;
    use std::time::Duration;

    fn frame() -> LandmarkFrame {
        LandmarkFrame::filled(Point3::new(0.5, 0.5, 2.0))
    }

    #[test]
    fn test_clones_share_one_session() {
        let control = SharedSession::default();
        let ingest = control.clone();

        control.start().unwrap();
        assert_eq!(ingest.offer_frame(&frame()), (AppendOutcome::Committed, 1));
        assert_eq!(control.count(), 1);

        control.stop().unwrap();
        assert_eq!(ingest.offer_frame(&frame()), (AppendOutcome::Ignored, 1));
    }

    struct SlowSink {
        saved: Vec<PersistedRecord>,
    }

    impl PersistenceSink for SlowSink {
        fn append(&mut self, record: &PersistedRecord) -> Result<(), PersistenceError> {
            std::thread::sleep(Duration::from_millis(30));
            self.saved.push(record.clone());
            Ok(())
        }
    }

    #[test]
    fn test_frames_offered_during_save_are_ignored() {
        let session = SharedSession::default();
        session.start().unwrap();
        for _ in 0..3 {
            session.offer_frame(&frame());
        }
        session.stop().unwrap();
        let expected = session.compute().unwrap();

        let ingest = session.clone();
        let offer = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(5));
            ingest.offer_frame(&frame())
        });

        let mut sink = SlowSink { saved: Vec::new() };
        let record = session.save_and_reset("Alice", &mut sink).unwrap();

        assert_eq!(offer.join().unwrap().0, AppendOutcome::Ignored);
        assert_eq!(sink.saved, vec![record.clone()]);
        assert_eq!(record.values.to_vec(), expected.values());
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.count(), 0);
    }

    #[test]
    fn test_concurrent_appends_and_stop_stay_consistent() {
        let session = SharedSession::default();
        session.start().unwrap();

        let writers: Vec<_> = (0..4)
            .map(|_| {
                let s = session.clone();
                std::thread::spawn(move || {
                    let mut committed = 0;
                    for _ in 0..400 {
                        if s.offer_frame(&frame()).0.is_committed() {
                            committed += 1;
                        }
                    }
                    committed
                })
            })
            .collect();

        std::thread::sleep(std::time::Duration::from_millis(1));
        session.stop().unwrap();
        let after_stop = session.count();

        let committed: usize = writers.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(session.count(), after_stop);
        assert_eq!(committed, after_stop);
        assert!(after_stop <= session.capacity());
        assert_eq!(session.state(), SessionState::Collected);
    }
}
