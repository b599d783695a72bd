use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::capture::domain::landmark_source::LandmarkSource;
use crate::shared::landmark_frame::{LandmarkFrame, LandmarkFrameError, Point3};

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("failed to read recording {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: {source}")]
    Frame {
        line: usize,
        #[source]
        source: LandmarkFrameError,
    },
}

/// Replays a landmark recording, one tick per line.
///
/// Format (JSON lines): `null` for a tick where tracking failed, otherwise an
/// array of 121 `[x, y, z]` triples. Blank lines are skipped.
pub struct RecordedLandmarkSource {
    ticks: VecDeque<Option<LandmarkFrame>>,
}

impl RecordedLandmarkSource {
    pub fn open(path: &Path) -> Result<Self, RecordingError> {
        let text = fs::read_to_string(path).map_err(|e| RecordingError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let source = Self::parse(&text)?;
        log::info!("Loaded {} ticks from {}", source.remaining(), path.display());
        Ok(source)
    }

    pub fn parse(text: &str) -> Result<Self, RecordingError> {
        let mut ticks = VecDeque::new();
        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let parsed: Option<Vec<[f32; 3]>> = serde_json::from_str(raw)
                .map_err(|e| RecordingError::Parse { line, source: e })?;
            let tick = match parsed {
                None => None,
                Some(points) => Some(
                    LandmarkFrame::new(points.into_iter().map(Point3::from).collect())
                        .map_err(|e| RecordingError::Frame { line, source: e })?,
                ),
            };
            ticks.push_back(tick);
        }
        Ok(Self { ticks })
    }

    pub fn from_ticks(ticks: Vec<Option<LandmarkFrame>>) -> Self {
        Self {
            ticks: ticks.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }
}

impl LandmarkSource for RecordedLandmarkSource {
    fn poll(&mut self) -> Option<LandmarkFrame> {
        self.ticks.pop_front().flatten()
    }

    fn is_exhausted(&self) -> bool {
        self.ticks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::LANDMARK_COUNT;

    fn frame(z: f32) -> LandmarkFrame {
        LandmarkFrame::filled(Point3::new(0.5, -0.25, z))
    }

    fn encode_tick(tick: Option<&LandmarkFrame>) -> String {
        match tick {
            None => "null".to_string(),
            Some(frame) => {
                let points: Vec<[f32; 3]> =
                    frame.points().iter().map(|p| [p.x, p.y, p.z]).collect();
                serde_json::to_string(&points).unwrap()
            }
        }
    }

    #[test]
    fn test_parse_frames_and_failures() {
        let text = format!(
            "{}\nnull\n\n{}\n",
            encode_tick(Some(&frame(1.5))),
            encode_tick(Some(&frame(2.0)))
        );
        let mut source = RecordedLandmarkSource::parse(&text).unwrap();
        assert_eq!(source.remaining(), 3);

        assert_eq!(source.poll(), Some(frame(1.5)));
        assert_eq!(source.poll(), None);
        assert!(!source.is_exhausted());
        assert_eq!(source.poll(), Some(frame(2.0)));
        assert!(source.is_exhausted());
        assert_eq!(source.poll(), None);
    }

    #[test]
    fn test_parse_reports_line_of_malformed_json() {
        let text = format!("null\n{}\n[[1,2", encode_tick(Some(&frame(1.5))));
        let err = RecordedLandmarkSource::parse(&text).err().unwrap();
        assert!(matches!(err, RecordingError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_parse_rejects_short_frame() {
        let err = RecordedLandmarkSource::parse("[[1.0, 2.0, 3.0]]").err().unwrap();
        match err {
            RecordingError::Frame { line, source } => {
                assert_eq!(line, 1);
                assert_eq!(
                    source,
                    LandmarkFrameError::WrongLength {
                        expected: LANDMARK_COUNT,
                        actual: 1
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_open_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rec.jsonl");
        fs::write(&path, format!("{}\nnull\n", encode_tick(Some(&frame(3.0))))).unwrap();

        let source = RecordedLandmarkSource::open(&path).unwrap();
        assert_eq!(source.remaining(), 2);
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RecordedLandmarkSource::open(&dir.path().join("absent.jsonl"))
            .err()
            .unwrap();
        assert!(matches!(err, RecordingError::Io { .. }));
    }

    #[test]
    fn test_null_coordinate_is_rejected() {
        let mut points = vec![[0.5, 0.5, 2.0]; LANDMARK_COUNT];
        points[3] = [f32::NAN, 0.0, 2.0];
        let line = serde_json::to_string(&points).unwrap();
        assert!(line.contains("null"));

        let err = RecordedLandmarkSource::parse(&line).err().unwrap();
        assert!(matches!(err, RecordingError::Parse { line: 1, .. }));
    }
}
