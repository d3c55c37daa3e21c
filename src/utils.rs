//! Utility functions for numeric conversions and frame handling.

pub mod safe_cast;

use crate::Result;
use opencv::{core::Mat, prelude::*};

/// Mirror a frame horizontally in place (selfie view)
///
/// # Errors
///
/// Returns an error if the `OpenCV` flip operation fails
pub fn flip_horizontal(frame: &mut Mat) -> Result<()> {
    let source = frame.clone();
    opencv::core::flip(&source, frame, 1)?;
    Ok(())
}

/// Frame dimensions as `(width, height)`
#[must_use]
pub fn frame_size(frame: &Mat) -> (i32, i32) {
    (frame.cols(), frame.rows())
}
