pub mod constants;
pub mod landmark_frame;
pub mod landmark_id;
pub mod settings;
