use thiserror::Error;

use crate::capture::domain::capture_buffer::CaptureBuffer;
use crate::features::domain::metric_result::MetricResult;
use crate::features::domain::metric_table::MetricTable;
use crate::shared::landmark_frame::Point3;
use crate::shared::landmark_id::LandmarkId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("need at least 2 committed frames to compute features, have {committed}")]
    InsufficientData { committed: usize },
}

/// Averages every metric of a [`MetricTable`] over a session's frames.
///
/// The most recently committed frame is never averaged in, so `n` committed
/// frames contribute `n - 1` samples.
#[derive(Clone, Debug, Default)]
pub struct FeatureExtractor {
    table: MetricTable,
}

impl FeatureExtractor {
    pub fn new(table: MetricTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &MetricTable {
        &self.table
    }

    pub fn extract(&self, buffer: &CaptureBuffer) -> Result<MetricResult, ExtractionError> {
        let committed = buffer.len();
        let effective = committed.saturating_sub(1);
        if effective == 0 {
            return Err(ExtractionError::InsufficientData { committed });
        }

        let metrics = self.table.metrics();
        let mut sums = vec![0.0_f64; metrics.len()];

        for frame in buffer.frames().take(effective) {
            let lookup = |id: LandmarkId| {
                let row = frame.row(id.index());
                Point3::new(row[0], row[1], row[2])
            };
            for (sum, metric) in sums.iter_mut().zip(metrics) {
                *sum += metric.evaluate(&lookup);
            }
        }

        let n = effective as f64;
        let values = metrics
            .iter()
            .zip(sums)
            .map(|(metric, sum)| (metric.name, sum / n))
            .collect();

        log::debug!("Averaged {} metrics over {effective} frames", metrics.len());
        Ok(MetricResult::new(values, effective))
    }
}
