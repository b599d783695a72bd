/// Session-averaged metric values, in metric-table order.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricResult {
    values: Vec<(&'static str, f64)>,
    frames_used: usize,
}

impl MetricResult {
    pub fn new(values: Vec<(&'static str, f64)>, frames_used: usize) -> Self {
        Self {
            values,
            frames_used,
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn entries(&self) -> &[(&'static str, f64)] {
        &self.values
    }

    /// Values only, in table order.
    pub fn values(&self) -> Vec<f64> {
        self.values.iter().map(|(_, v)| *v).collect()
    }

    /// Number of frames the averages were taken over.
    pub fn frames_used(&self) -> usize {
        self.frames_used
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
