use thiserror::Error;

use crate::features::domain::feature_extractor::ExtractionError;
use crate::persistence::domain::persistence_sink::PersistenceError;
use crate::session::domain::session_state::{Command, SessionState};

/// Every variant is recoverable; the session is left in a consistent state.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("cannot {command} while {state}")]
    InvalidTransition {
        command: Command,
        state: SessionState,
    },
    #[error("not enough frames to compute features ({committed} committed, need at least 2)")]
    InsufficientData { committed: usize },
    #[error("could not save record: {0}")]
    Persistence(#[from] PersistenceError),
}

impl From<ExtractionError> for SessionError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::InsufficientData { committed } => {
                SessionError::InsufficientData { committed }
            }
        }
    }
}
