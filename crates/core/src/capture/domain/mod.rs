pub mod body_selector;
pub mod capture_buffer;
pub mod landmark_source;
pub mod plausibility_gate;
