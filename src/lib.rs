//! Shoulder range-of-motion measurement from body landmarks.
//!
//! This library measures shoulder angles on a live video stream:
//! - ONNX Runtime runs a BlazePose landmark model on every frame
//! - Three landmarks on the selected side give a signed planar angle
//! - A session tracker keeps the running maximum and minimum
//! - `OpenCV` draws the live value, the extremes and the skeleton
//!
//! Supported measurements are abduction/adduction, flexion/extension and
//! rotation, on either the left or the right arm.
//!
//! # Examples
//!
//! ## Measuring a Single Frame
//!
//! ```
//! use shoulder_goniometer::{
//!     landmarks::{Landmark, LandmarkSet, PoseLandmark, Side},
//!     measurement::MeasurementKind,
//!     session::SessionTracker,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let landmarks = LandmarkSet::empty()
//!     .with(PoseLandmark::RightElbow, Landmark::new(0.6, 0.5, 0.9))
//!     .with(PoseLandmark::RightShoulder, Landmark::new(0.5, 0.5, 0.9))
//!     .with(PoseLandmark::RightHip, Landmark::new(0.5, 0.8, 0.9));
//!
//! let result = MeasurementKind::AbdAdd.measure(&landmarks, Side::Right, 0.5)?;
//!
//! let mut tracker = SessionTracker::new();
//! let (max, min) = tracker.update(result.angle_degrees);
//! println!("Angle: {:.2}° (max {max:.2}, min {min:.2})", result.angle_degrees);
//! # Ok(())
//! # }
//! ```
//!
//! ## Live Session
//!
//! ```no_run
//! use shoulder_goniometer::{
//!     camera::{OpenCvCapture, VideoSource},
//!     controls::HighGuiWindow,
//!     frame_loop::{FrameLoop, MeasurementSettings},
//!     landmarks::Side,
//!     measurement::MeasurementKind,
//!     overlay::OpenCvRenderer,
//!     pose_detection::OnnxPoseDetector,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = OpenCvCapture::open(VideoSource::Camera(0), None)?;
//! let detector = OnnxPoseDetector::with_defaults("assets/pose_landmark_full.onnx")?;
//! let window = HighGuiWindow::new("Shoulder Goniometer")?;
//! let settings = MeasurementSettings {
//!     side: Side::Left,
//!     kind: MeasurementKind::FlexExt,
//!     min_visibility: 0.5,
//! };
//!
//! let mut frame_loop = FrameLoop::new(source, detector, OpenCvRenderer::new(0.5), window, settings);
//! let range = frame_loop.run()?;
//! println!("Max: {:.2}°, Min: {:.2}°", range.max_angle, range.min_angle);
//! # Ok(())
//! # }
//! ```

/// Planar angle computation
pub mod geometry;

/// Body landmark types
pub mod landmarks;

/// Shoulder measurement strategies
pub mod measurement;

/// Running max/min tracking
pub mod session;

/// Per-frame measurement loop
pub mod frame_loop;

/// Pose landmark detection with ONNX Runtime
pub mod pose_detection;

/// Frame acquisition
pub mod camera;

/// Overlay rendering
pub mod overlay;

/// Operator controls
pub mod controls;

/// Utility functions for numeric conversions and frames
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
