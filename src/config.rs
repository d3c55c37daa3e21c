//! Configuration management for the goniometer application

use crate::{
    camera::VideoSource,
    constants::{DEFAULT_DETECTION_CONFIDENCE, DEFAULT_MIN_VISIBILITY, DEFAULT_WINDOW_NAME},
    landmarks::Side,
    measurement::MeasurementKind,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Video input configuration
    pub camera: CameraConfig,

    /// Pose model configuration
    pub model: ModelConfig,

    /// What to measure
    pub measurement: MeasurementConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Video input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Webcam index
    pub index: i32,

    /// Video file to read instead of the webcam
    pub video_path: Option<String>,

    /// Give up on a camera read after this many milliseconds (0 = wait forever)
    pub read_timeout_ms: u64,
}

/// Pose model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the BlazePose landmark ONNX model
    pub pose_landmarks: PathBuf,

    /// Pose presence score required to accept a detection (0.0-1.0)
    pub min_detection_confidence: f32,

    /// Landmark visibility required for a measurement (0.0-1.0)
    pub min_visibility: f32,
}

/// Measurement selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementConfig {
    /// Limb to measure
    pub side: Side,

    /// Motion to measure
    pub kind: MeasurementKind,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the video window
    pub enabled: bool,

    /// Window title
    pub window_name: String,

    /// Show the video flipped horizontally (selfie view)
    pub mirror_view: bool,

    /// Keep MAX/MIN on screen for frames without a measurement
    pub range_on_every_frame: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            model: ModelConfig::default(),
            measurement: MeasurementConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            video_path: None,
            read_timeout_ms: 0,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            pose_landmarks: PathBuf::from("assets/pose_landmark_full.onnx"),
            min_detection_confidence: DEFAULT_DETECTION_CONFIDENCE,
            min_visibility: DEFAULT_MIN_VISIBILITY,
        }
    }
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            side: Side::Left,
            kind: MeasurementKind::AbdAdd,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_name: DEFAULT_WINDOW_NAME.to_string(),
            mirror_view: false,
            range_on_every_frame: false,
        }
    }
}

impl CameraConfig {
    /// Video source selected by this configuration
    #[must_use]
    pub fn video_source(&self) -> VideoSource {
        match &self.video_path {
            Some(path) => VideoSource::File(path.clone()),
            None => VideoSource::Camera(self.index),
        }
    }

    /// Read timeout, if one is configured
    #[must_use]
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.model.min_detection_confidence) {
            return Err(Error::ConfigError(
                "Detection confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.model.min_visibility) {
            return Err(Error::ConfigError(
                "Minimum visibility must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.camera.index < 0 && self.camera.video_path.is_none() {
            return Err(Error::ConfigError("Camera index must not be negative".to_string()));
        }
        if self.display.window_name.is_empty() {
            return Err(Error::ConfigError("Window name must not be empty".to_string()));
        }
        if !self.model.pose_landmarks.exists() {
            return Err(Error::ConfigError(format!(
                "Pose landmark model not found: {}",
                self.model.pose_landmarks.display()
            )));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Shoulder Goniometer Configuration

# Video input
camera:
  index: 0
  # video_path: "session.mp4"
  read_timeout_ms: 0

# Pose model
model:
  pose_landmarks: "assets/pose_landmark_full.onnx"
  min_detection_confidence: 0.5
  min_visibility: 0.5

# What to measure: side is left/right, kind is abd_add/flex_ext/rotation
measurement:
  side: left
  kind: abd_add

# Display settings
display:
  enabled: true
  window_name: "Shoulder Goniometer"
  # Flip the displayed video only; sides are always the subject's own
  mirror_view: false
  # Draw MAX/MIN on frames where no angle was measured
  range_on_every_frame: false
"#;
