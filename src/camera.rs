//! Frame acquisition from a webcam or video file.

use crate::{Error, Result};
use log::{info, warn};
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE, CAP_PROP_READ_TIMEOUT_MSEC},
};
use std::time::{Duration, Instant};

/// Something that yields frames in sequence
pub trait FrameSource {
    /// Read the next frame, or `None` when the stream has ended
    ///
    /// # Errors
    ///
    /// Returns [`Error::CaptureFailure`] or [`Error::CaptureTimeout`] if
    /// the stream cannot be read
    fn read_frame(&mut self) -> Result<Option<Mat>>;
}

/// Video source type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Webcam index
    Camera(i32),
    /// Video file path
    File(String),
}

/// `OpenCV` backed capture
pub struct OpenCvCapture {
    capture: VideoCapture,
    source: VideoSource,
    read_timeout: Option<Duration>,
}

impl OpenCvCapture {
    /// Open a camera or video file
    ///
    /// # Errors
    ///
    /// Returns [`Error::CaptureFailure`] if the source cannot be opened
    pub fn open(source: VideoSource, read_timeout: Option<Duration>) -> Result<Self> {
        let mut capture = match &source {
            VideoSource::Camera(index) => {
                info!("Opening camera {}", index);
                let mut cap = VideoCapture::new(*index, videoio::CAP_ANY)?;

                // Reduce buffer size for lower latency
                if !cap.set(CAP_PROP_BUFFERSIZE, 1.0)? {
                    warn!("Camera does not support setting buffer size");
                }
                cap
            }
            VideoSource::File(path) => {
                info!("Opening video file: {}", path);
                VideoCapture::from_file(path, videoio::CAP_ANY)?
            }
        };

        if !capture.is_opened()? {
            return Err(Error::CaptureFailure(format!("Failed to open {source:?}")));
        }

        if let Some(timeout) = read_timeout {
            let millis = timeout.as_secs_f64() * 1000.0;
            if !capture.set(CAP_PROP_READ_TIMEOUT_MSEC, millis)? {
                warn!("Capture backend ignores read timeout; relying on elapsed time check");
            }
        }

        Ok(Self {
            capture,
            source,
            read_timeout,
        })
    }
}

impl FrameSource for OpenCvCapture {
    fn read_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        let started = Instant::now();
        let ok = self.capture.read(&mut frame)?;

        if !ok || frame.empty() {
            if matches!(self.source, VideoSource::File(_)) {
                info!("End of video file reached");
                return Ok(None);
            }
            return Err(match self.read_timeout {
                Some(timeout) if started.elapsed() >= timeout => Error::CaptureTimeout(timeout),
                _ => Error::CaptureFailure("Camera returned no frame".to_string()),
            });
        }

        Ok(Some(frame))
    }
}
