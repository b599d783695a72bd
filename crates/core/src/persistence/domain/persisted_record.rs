use std::fmt;

use thiserror::Error;

use crate::features::domain::metric_result::MetricResult;
use crate::features::domain::metric_table::METRIC_COUNT;

const NAME_PREFIX: &str = "Name:";

#[derive(Error, Debug, PartialEq)]
pub enum RecordParseError {
    #[error("line {line}: expected 'Name:<subject>'")]
    MissingName { line: usize },
    #[error("line {line}: record for '{name}' has no values line")]
    MissingValues { line: usize, name: String },
    #[error("line {line}: expected {expected} values, got {actual}")]
    WrongValueCount {
        line: usize,
        expected: usize,
        actual: usize,
    },
    #[error("line {line}: invalid value '{value}'")]
    InvalidValue { line: usize, value: String },
}

/// One subject's session averages as stored on disk.
#[derive(Clone, Debug, PartialEq)]
pub struct PersistedRecord {
    pub name: String,
    pub values: [f64; METRIC_COUNT],
}

impl PersistedRecord {
    /// Returns `None` unless `result` holds exactly one value per metric.
    pub fn from_result(name: &str, result: &MetricResult) -> Option<Self> {
        let values: [f64; METRIC_COUNT] = result.values().try_into().ok()?;
        Some(Self {
            name: name.to_string(),
            values,
        })
    }

    /// Parses every record in a store's text, skipping blank lines.
    pub fn parse_all(text: &str) -> Result<Vec<Self>, RecordParseError> {
        let mut records = Vec::new();
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        while let Some((line, header)) = lines.next() {
            let name = header
                .strip_prefix(NAME_PREFIX)
                .ok_or(RecordParseError::MissingName { line })?
                .to_string();
            let (line, values_line) = lines
                .next()
                .ok_or_else(|| RecordParseError::MissingValues {
                    line,
                    name: name.clone(),
                })?;
            records.push(Self {
                name,
                values: parse_values(line, values_line)?,
            });
        }
        Ok(records)
    }
}

fn parse_values(line: usize, text: &str) -> Result<[f64; METRIC_COUNT], RecordParseError> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != METRIC_COUNT {
        return Err(RecordParseError::WrongValueCount {
            line,
            expected: METRIC_COUNT,
            actual: parts.len(),
        });
    }
    let mut values = [0.0; METRIC_COUNT];
    for (slot, part) in values.iter_mut().zip(parts) {
        *slot = part.parse().map_err(|_| RecordParseError::InvalidValue {
            line,
            value: part.to_string(),
        })?;
    }
    Ok(values)
}

/// Two-line block: `Name:<subject>` then the comma-separated values.
impl fmt::Display for PersistedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{NAME_PREFIX}{}", self.name)?;
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        writeln!(f, "{}", values.join(","))
    }
}
