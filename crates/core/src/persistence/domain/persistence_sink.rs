use std::path::PathBuf;

use thiserror::Error;

use crate::persistence::domain::persisted_record::PersistedRecord;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("invalid subject name '{0}'")]
    InvalidName(String),
    #[error("failed to write record to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Abstracts where finished sessions are stored so the session does not
/// depend on a particular storage medium.
pub trait PersistenceSink: Send {
    fn append(&mut self, record: &PersistedRecord) -> Result<(), PersistenceError>;
}
