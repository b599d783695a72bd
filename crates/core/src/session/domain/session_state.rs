use std::fmt;

use crate::session::domain::session_error::SessionError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    #[default]
    Idle,
    Collecting,
    Collected,
    Calculated,
}

impl SessionState {
    pub const ALL: [SessionState; 4] = [
        SessionState::Idle,
        SessionState::Collecting,
        SessionState::Collected,
        SessionState::Calculated,
    ];

    /// Only this state lets offered frames reach the buffer.
    pub fn accepts_frames(self) -> bool {
        self == SessionState::Collecting
    }

    /// Transition table. Side effects live in `CaptureSession`; this only
    /// decides whether `command` is allowed here and where it leads.
    pub fn apply(self, command: Command) -> Result<SessionState, SessionError> {
        use Command::*;
        use SessionState::*;

        match (self, command) {
            (Idle | Calculated, Start) => Ok(Collecting),
            (Collecting, Stop) => Ok(Collected),
            (Collected, Compute) => Ok(Calculated),
            (Calculated, SaveAndReset) => Ok(Idle),
            (_, DiscardAndReset) => Ok(Idle),
            (state, command) => Err(SessionError::InvalidTransition { command, state }),
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Collecting => write!(f, "collecting"),
            SessionState::Collected => write!(f, "collected"),
            SessionState::Calculated => write!(f, "calculated"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Start,
    Stop,
    Compute,
    SaveAndReset,
    DiscardAndReset,
}

impl Command {
    pub const ALL: [Command; 5] = [
        Command::Start,
        Command::Stop,
        Command::Compute,
        Command::SaveAndReset,
        Command::DiscardAndReset,
    ];
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => write!(f, "start"),
            Command::Stop => write!(f, "stop"),
            Command::Compute => write!(f, "compute"),
            Command::SaveAndReset => write!(f, "save"),
            Command::DiscardAndReset => write!(f, "discard"),
        }
    }
}
