//! Overlay text and skeleton drawing.

use crate::{
    constants::{
        FONT_SCALE_PER_1000PX, MAX_TEXT_POSITION, MIN_TEXT_POSITION, PRIMARY_LABEL_SCALE,
    },
    geometry::Point2D,
    landmarks::{LandmarkSet, POSE_CONNECTIONS},
    measurement::AngleResult,
    session::SessionState,
    utils::frame_size,
    Result,
};
use opencv::{
    core::{Mat, Scalar},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_AA},
};

const TEXT_THICKNESS: i32 = 2;
const SKELETON_THICKNESS: i32 = 2;
const LANDMARK_RADIUS: i32 = 2;

/// Text drawn on top of a frame
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Live angle label and where to draw it
    pub primary: Option<(String, Point2D)>,
    /// Running maximum line
    pub max: String,
    /// Running minimum line
    pub min: String,
}

impl Overlay {
    /// Build overlay text for a frame
    #[must_use]
    pub fn new(result: Option<&AngleResult>, state: SessionState) -> Self {
        Self {
            primary: result.map(|r| (format!("{:.2}", r.angle_degrees), r.anchor)),
            max: format!("MAX: {:.2}", state.max_angle),
            min: format!("MIN: {:.2}", state.min_angle),
        }
    }
}

/// Composes the overlay onto a frame
pub trait Renderer {
    /// Return a copy of `frame` with the overlay and optional skeleton drawn
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails
    fn render(&mut self, frame: &Mat, overlay: &Overlay, skeleton: Option<&LandmarkSet>) -> Result<Mat>;
}

/// Font scale for a frame, proportional to its width
#[must_use]
pub fn font_scale(frame_width: i32) -> f64 {
    FONT_SCALE_PER_1000PX * f64::from(frame_width) / 1000.0
}

/// Draws with `OpenCV` `imgproc`
#[derive(Debug, Clone)]
pub struct OpenCvRenderer {
    min_visibility: f32,
    range_on_every_frame: bool,
    text_color: Scalar,
    landmark_color: Scalar,
    connection_color: Scalar,
}

impl OpenCvRenderer {
    /// Create a renderer that skips landmarks below `min_visibility`
    ///
    /// MAX and MIN are only drawn alongside a measured angle.
    #[must_use]
    pub fn new(min_visibility: f32) -> Self {
        Self {
            min_visibility,
            range_on_every_frame: false,
            text_color: Scalar::new(255.0, 255.0, 255.0, 0.0),
            landmark_color: Scalar::new(245.0, 117.0, 66.0, 0.0),
            connection_color: Scalar::new(245.0, 66.0, 230.0, 0.0),
        }
    }

    /// Also draw MAX and MIN on frames without a measurement
    #[must_use]
    pub fn with_range_on_every_frame(mut self, enabled: bool) -> Self {
        self.range_on_every_frame = enabled;
        self
    }

    fn put_text(&self, image: &mut Mat, text: &str, at: Point2D, scale: f64) -> Result<()> {
        let (width, height) = frame_size(image);
        imgproc::put_text(
            image,
            text,
            at.to_pixel(width, height)?,
            FONT_HERSHEY_SIMPLEX,
            scale,
            self.text_color,
            TEXT_THICKNESS,
            LINE_AA,
            false,
        )?;
        Ok(())
    }

    fn draw_skeleton(&self, image: &mut Mat, landmarks: &LandmarkSet) -> Result<()> {
        let (width, height) = frame_size(image);

        for (from, to) in POSE_CONNECTIONS {
            let (from, to) = (landmarks.get(from), landmarks.get(to));
            if from.visibility < self.min_visibility || to.visibility < self.min_visibility {
                continue;
            }
            imgproc::line(
                image,
                from.point.to_pixel(width, height)?,
                to.point.to_pixel(width, height)?,
                self.connection_color,
                SKELETON_THICKNESS,
                LINE_AA,
                0,
            )?;
        }

        for (_, landmark) in landmarks.iter() {
            if landmark.visibility < self.min_visibility {
                continue;
            }
            imgproc::circle(
                image,
                landmark.point.to_pixel(width, height)?,
                LANDMARK_RADIUS,
                self.landmark_color,
                SKELETON_THICKNESS,
                LINE_AA,
                0,
            )?;
        }

        Ok(())
    }
}

impl Renderer for OpenCvRenderer {
    fn render(&mut self, frame: &Mat, overlay: &Overlay, skeleton: Option<&LandmarkSet>) -> Result<Mat> {
        let mut image = frame.clone();
        let (width, _) = frame_size(&image);
        let scale = font_scale(width);

        if let Some(landmarks) = skeleton {
            self.draw_skeleton(&mut image, landmarks)?;
        }

        if let Some((label, anchor)) = &overlay.primary {
            self.put_text(&mut image, label, *anchor, scale * PRIMARY_LABEL_SCALE)?;
        }
        if overlay.primary.is_some() || self.range_on_every_frame {
            self.put_text(&mut image, &overlay.max, MAX_TEXT_POSITION.into(), scale)?;
            self.put_text(&mut image, &overlay.min, MIN_TEXT_POSITION.into(), scale)?;
        }

        Ok(image)
    }
}
