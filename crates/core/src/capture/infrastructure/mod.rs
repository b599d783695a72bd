pub mod recorded_landmark_source;
