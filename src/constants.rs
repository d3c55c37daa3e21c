//! Constants used throughout the application

/// Number of body landmarks reported by the BlazePose model
pub const NUM_POSE_LANDMARKS: usize = 33;

/// Landmarks in the raw model output (33 body + 6 auxiliary ROI points)
pub const NUM_MODEL_LANDMARKS: usize = 39;

/// Values per landmark in the raw model output: x, y, z, visibility, presence
pub const LANDMARK_STRIDE: usize = 5;

/// Default square input size of the landmark model
pub const DEFAULT_MODEL_INPUT_SIZE: i32 = 256;

/// Default confidence for accepting a detected pose
pub const DEFAULT_DETECTION_CONFIDENCE: f32 = 0.5;

/// Default per-landmark visibility required for a measurement
pub const DEFAULT_MIN_VISIBILITY: f32 = 0.5;

/// Offset subtracted from the raw rotation angle
pub const ROTATION_OFFSET_DEGREES: f64 = 90.0;

/// Font scale per 1000 pixels of frame width
pub const FONT_SCALE_PER_1000PX: f64 = 2.0;

/// Relative size of the live angle label compared to MAX/MIN text
pub const PRIMARY_LABEL_SCALE: f64 = 0.4;

/// Normalized position of the MAX line
pub const MAX_TEXT_POSITION: (f64, f64) = (0.05, 0.1);

/// Normalized position of the MIN line
pub const MIN_TEXT_POSITION: (f64, f64) = (0.05, 0.2);

/// Default display window title
pub const DEFAULT_WINDOW_NAME: &str = "Shoulder Goniometer";

/// Key code of the escape key as reported by `highgui::wait_key_ex`
pub const KEY_ESCAPE: i32 = 27;

/// Ends the session
pub const KEY_QUIT: i32 = b'q' as i32;

/// Clears the tracked range
pub const KEY_RESET: i32 = b'r' as i32;

/// Milliseconds `highgui::wait_key_ex` blocks per frame
pub const KEY_POLL_DELAY_MS: i32 = 1;
