pub mod domain;
pub mod infrastructure;
pub mod session_logger;
