pub mod capture_session;
pub mod session_error;
pub mod session_state;
