/// Points produced per successfully tracked tick, in tracker order.
pub const LANDMARK_COUNT: usize = 121;

/// Coordinates stored per landmark: x, y, z.
pub const AXES: usize = 3;

/// Frames a single capture session can hold before appends fail closed.
pub const CAPTURE_CAPACITY: usize = 1000;

/// Landmark whose depth decides whether a frame is plausible.
pub const PLAUSIBILITY_LANDMARK: usize = 4;

/// Frames whose gate landmark has z at or below this are dropped.
pub const PLAUSIBILITY_MIN_Z: f32 = 1.0;

/// Default interval between polls of a landmark source (~30 fps sensor).
pub const DEFAULT_TICK_MS: u64 = 33;

pub const STORE_FILE_PREFIX: &str = "Faceof";
pub const STORE_FILE_EXTENSION: &str = "txt";

pub const SETTINGS_DIR_NAME: &str = "FaceCapture";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
