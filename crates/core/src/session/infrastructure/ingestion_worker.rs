use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::capture::domain::capture_buffer::AppendOutcome;
use crate::capture::domain::landmark_source::LandmarkSource;
use crate::session::infrastructure::shared_session::SharedSession;
use crate::session::session_logger::SessionLogger;
use crate::shared::landmark_frame::LandmarkFrame;

const DEFAULT_CHANNEL_CAPACITY: usize = 4;

/// Configuration for one ingestion run.
pub struct IngestionConfig {
    /// Pause between polls; zero polls as fast as the source allows.
    pub tick: Duration,
    pub cancelled: Arc<AtomicBool>,
}

impl IngestionConfig {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Per-tick tallies for one ingestion run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestionStats {
    pub ticks: usize,
    pub track_failures: usize,
    pub committed: usize,
    pub implausible: usize,
    pub full: usize,
    pub ignored: usize,
}

impl IngestionStats {
    fn record(&mut self, outcome: AppendOutcome) {
        match outcome {
            AppendOutcome::Committed => self.committed += 1,
            AppendOutcome::Implausible => self.implausible += 1,
            AppendOutcome::Full => self.full += 1,
            AppendOutcome::Ignored => self.ignored += 1,
        }
    }
}

/// Running ingestion threads.
///
/// Layout: `poller [source.poll per tick] → committer [session.offer_frame]`
///
/// The poller owns the source and never touches the session lock, so a slow
/// tracker cannot hold up control commands.
pub struct IngestionHandle {
    poller: JoinHandle<Box<dyn LandmarkSource>>,
    committer: JoinHandle<IngestionStats>,
    cancelled: Arc<AtomicBool>,
}

impl IngestionHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Waits for both threads and returns the tallies.
    pub fn join(self) -> Result<IngestionStats, Box<dyn std::error::Error>> {
        let poller_result = self.poller.join();
        let stats = self
            .committer
            .join()
            .map_err(|_| "Committer thread panicked")?;
        poller_result.map_err(|_| "Poller thread panicked")?;
        Ok(stats)
    }
}

pub fn spawn_ingestion(
    source: Box<dyn LandmarkSource>,
    session: SharedSession,
    config: IngestionConfig,
    logger: Box<dyn SessionLogger>,
) -> IngestionHandle {
    let (tick_tx, tick_rx) =
        crossbeam_channel::bounded::<Option<LandmarkFrame>>(DEFAULT_CHANNEL_CAPACITY);

    let poller = spawn_poller(source, tick_tx, config.tick, config.cancelled.clone());
    let committer = spawn_committer(session, tick_rx, config.cancelled.clone(), logger);

    IngestionHandle {
        poller,
        committer,
        cancelled: config.cancelled,
    }
}

fn spawn_poller(
    mut source: Box<dyn LandmarkSource>,
    tick_tx: crossbeam_channel::Sender<Option<LandmarkFrame>>,
    tick: Duration,
    cancelled: Arc<AtomicBool>,
) -> JoinHandle<Box<dyn LandmarkSource>> {
    std::thread::spawn(move || {
        while !source.is_exhausted() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            if tick_tx.send(source.poll()).is_err() {
                break;
            }
            if !tick.is_zero() {
                std::thread::sleep(tick);
            }
        }
        source
    })
}

fn spawn_committer(
    session: SharedSession,
    tick_rx: crossbeam_channel::Receiver<Option<LandmarkFrame>>,
    cancelled: Arc<AtomicBool>,
    mut logger: Box<dyn SessionLogger>,
) -> JoinHandle<IngestionStats> {
    std::thread::spawn(move || {
        let mut stats = IngestionStats::default();
        let capacity = session.capacity();
        let mut full_reported = false;

        for tick in tick_rx {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            stats.ticks += 1;

            let Some(frame) = tick else {
                stats.track_failures += 1;
                logger.count("track_failed");
                continue;
            };

            let (outcome, committed) = session.offer_frame(&frame);
            stats.record(outcome);
            match outcome {
                AppendOutcome::Committed => logger.progress(committed, capacity),
                AppendOutcome::Implausible => logger.count("implausible"),
                AppendOutcome::Full => {
                    if !full_reported {
                        full_reported = true;
                        logger.info(&format!(
                            "Capture buffer full at {capacity} frames, dropping further frames"
                        ));
                    }
                    logger.count("full");
                }
                AppendOutcome::Ignored => logger.count("ignored"),
            }
        }

        logger.summary();
        stats
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::domain::capture_buffer::CaptureBuffer;
    use crate::capture::domain::plausibility_gate::PlausibilityGate;
    use crate::capture::infrastructure::recorded_landmark_source::RecordedLandmarkSource;
    use crate::features::domain::feature_extractor::FeatureExtractor;
    use crate::session::domain::capture_session::CaptureSession;
    use crate::session::domain::session_state::SessionState;
    use crate::session::session_logger::NullSessionLogger;
    use crate::shared::landmark_frame::Point3;
    use crate::shared::landmark_id::LandmarkId;

    fn good() -> Option<LandmarkFrame> {
        Some(LandmarkFrame::filled(Point3::new(0.5, 0.5, 2.0)))
    }

    fn implausible() -> Option<LandmarkFrame> {
        good().map(|f| f.with_point(LandmarkId::PLAUSIBILITY_ANCHOR, Point3::new(0.0, 0.0, 0.2)))
    }

    /// Keeps `info` messages for inspection.
    #[derive(Clone, Default)]
    struct RecordingLogger {
        messages: Arc<std::sync::Mutex<Vec<String>>>,
    }

    impl SessionLogger for RecordingLogger {
        fn progress(&mut self, _committed: usize, _capacity: usize) {}
        fn count(&mut self, _name: &str) {}
        fn info(&mut self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    /// Source that never runs dry, for cancellation tests.
    struct EndlessSource;

    impl LandmarkSource for EndlessSource {
        fn poll(&mut self) -> Option<LandmarkFrame> {
            good()
        }
    }

    #[test]
    fn test_replay_commits_while_collecting() {
        let session = SharedSession::default();
        session.start().unwrap();

        let source = RecordedLandmarkSource::from_ticks(vec![good(), None, implausible(), good()]);
        let handle = spawn_ingestion(
            Box::new(source),
            session.clone(),
            IngestionConfig::new(Duration::ZERO),
            Box::new(NullSessionLogger),
        );
        let stats = handle.join().unwrap();

        assert_eq!(
            stats,
            IngestionStats {
                ticks: 4,
                track_failures: 1,
                committed: 2,
                implausible: 1,
                full: 0,
                ignored: 0,
            }
        );
        assert_eq!(session.count(), 2);
    }

    #[test]
    fn test_full_buffer_is_reported_once() {
        let buffer = CaptureBuffer::with_capacity(2, PlausibilityGate::default());
        let session = SharedSession::new(CaptureSession::with_buffer(
            buffer,
            FeatureExtractor::default(),
        ));
        session.start().unwrap();

        let logger = RecordingLogger::default();
        let source = RecordedLandmarkSource::from_ticks(vec![good(); 5]);
        let stats = spawn_ingestion(
            Box::new(source),
            session.clone(),
            IngestionConfig::new(Duration::ZERO),
            Box::new(logger.clone()),
        )
        .join()
        .unwrap();

        assert_eq!(stats.committed, 2);
        assert_eq!(stats.full, 3);
        let messages = logger.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("full"));
    }

    #[test]
    fn test_frames_ignored_when_idle() {
        let session = SharedSession::default();
        let source = RecordedLandmarkSource::from_ticks(vec![good(), good()]);
        let stats = spawn_ingestion(
            Box::new(source),
            session.clone(),
            IngestionConfig::new(Duration::ZERO),
            Box::new(NullSessionLogger),
        )
        .join()
        .unwrap();

        assert_eq!(stats.ignored, 2);
        assert_eq!(session.count(), 0);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_cancel_stops_endless_source() {
        let session = SharedSession::default();
        session.start().unwrap();
        let handle = spawn_ingestion(
            Box::new(EndlessSource),
            session.clone(),
            IngestionConfig::new(Duration::from_millis(1)),
            Box::new(NullSessionLogger),
        );

        std::thread::sleep(Duration::from_millis(20));
        handle.cancel();
        let stats = handle.join().unwrap();

        assert!(stats.ticks > 0);
        assert!(session.count() <= session.capacity());
    }
}
