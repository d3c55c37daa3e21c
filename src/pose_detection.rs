//! Body landmark detection using a BlazePose model on `ONNX` Runtime.

use crate::{
    constants::{
        DEFAULT_DETECTION_CONFIDENCE, DEFAULT_MODEL_INPUT_SIZE, LANDMARK_STRIDE, NUM_POSE_LANDMARKS,
    },
    landmarks::{Landmark, LandmarkSet},
    utils::safe_cast::{i32_to_usize, usize_to_i32},
    Error, Result,
};
use log::{debug, info};
use ndarray::{Array4, CowArray};
use opencv::{
    core::{Mat, Size, Vec3f, CV_32F},
    imgproc::{self, InterpolationFlags},
    prelude::*,
};
use ort::{Environment, Session, Value};
use std::path::Path;
use std::sync::Arc;

/// Produces landmarks for the person in a frame
pub trait PoseDetector {
    /// Detect the pose in `frame`, or `None` if nobody is visible
    ///
    /// # Errors
    ///
    /// Returns an error if inference itself fails
    fn detect(&mut self, frame: &Mat) -> Result<Option<LandmarkSet>>;
}

/// BlazePose full-body landmark model
pub struct OnnxPoseDetector {
    session: Session,
    input_width: i32,
    input_height: i32,
    min_detection_confidence: f32,
}

impl OnnxPoseDetector {
    /// Load a landmark model from an `ONNX` file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ONNX runtime environment cannot be created
    /// - The model file cannot be loaded
    /// - The model has no inputs
    pub fn new<P: AsRef<Path>>(model_path: P, min_detection_confidence: f32) -> Result<Self> {
        info!(
            "Initializing OnnxPoseDetector with model: {}",
            model_path.as_ref().display()
        );
        let environment = Arc::new(
            Environment::builder()
                .with_name("pose_detector")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(model_path)?;

        let input_meta = session
            .inputs
            .first()
            .ok_or_else(|| Error::ModelError("Model has no inputs".to_string()))?;

        // NHWC: [batch, height, width, channels]
        let dims = &input_meta.dimensions;
        let (input_width, input_height) = if dims.len() == 4 {
            let height = dims[1].and_then(|d| i32::try_from(d).ok()).unwrap_or(DEFAULT_MODEL_INPUT_SIZE);
            let width = dims[2].and_then(|d| i32::try_from(d).ok()).unwrap_or(DEFAULT_MODEL_INPUT_SIZE);
            (width, height)
        } else {
            (DEFAULT_MODEL_INPUT_SIZE, DEFAULT_MODEL_INPUT_SIZE)
        };
        debug!("Pose model input size {}x{}", input_width, input_height);

        Ok(Self {
            session,
            input_width,
            input_height,
            min_detection_confidence,
        })
    }

    /// Load a model with the default detection confidence
    ///
    /// # Errors
    ///
    /// See [`OnnxPoseDetector::new`]
    pub fn with_defaults<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        Self::new(model_path, DEFAULT_DETECTION_CONFIDENCE)
    }

    /// Resize, convert to RGB and scale to `[0, 1]`
    fn preprocess(&self, frame: &Mat) -> Result<Array4<f32>> {
        let width = i32_to_usize(self.input_width)?;
        let height = i32_to_usize(self.input_height)?;
        let channels = 3;

        let mut resized = Mat::default();
        imgproc::resize(
            frame,
            &mut resized,
            Size::new(self.input_width, self.input_height),
            0.0,
            0.0,
            InterpolationFlags::INTER_LINEAR as i32,
        )?;

        let mut rgb_image = Mat::default();
        imgproc::cvt_color(&resized, &mut rgb_image, imgproc::COLOR_BGR2RGB, 0)?;

        let mut float_image = Mat::default();
        rgb_image.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

        let mut data = vec![0.0f32; height * width * channels];
        for row in 0..height {
            for col in 0..width {
                let pixel = float_image.at_2d::<Vec3f>(usize_to_i32(row)?, usize_to_i32(col)?)?;
                let idx = (row * width + col) * channels;
                data[idx..idx + channels].copy_from_slice(&pixel.0);
            }
        }

        Array4::from_shape_vec((1, height, width, channels), data)
            .map_err(|e| Error::ModelDataFormatError(format!("Failed to create array: {e}")))
    }

    /// Run the model and return every output flattened
    fn forward(&self, input: Array4<f32>) -> Result<Vec<Vec<f32>>> {
        let cow_array = CowArray::from(input.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;
        if outputs.is_empty() {
            return Err(Error::ModelOutputError("No output from model".to_string()));
        }

        outputs
            .iter()
            .map(|output| -> Result<Vec<f32>> {
                let tensor = output.try_extract::<f32>()?;
                let view = tensor.view();
                Ok(view.iter().copied().collect())
            })
            .collect()
    }
}

impl PoseDetector for OnnxPoseDetector {
    fn detect(&mut self, frame: &Mat) -> Result<Option<LandmarkSet>> {
        let input = self.preprocess(frame)?;
        let outputs = self.forward(input)?;

        if let Some(score) = outputs.get(1).and_then(|flag| pose_score(flag)) {
            if score < self.min_detection_confidence {
                debug!("Pose score {:.2} below threshold", score);
                return Ok(None);
            }
        }

        let landmarks = decode_landmarks(&outputs[0], self.input_width, self.input_height)?;
        Ok(Some(landmarks))
    }
}

/// Logistic function mapping model logits to probabilities
#[must_use]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Probability that a person is present, from the pose-flag output
#[must_use]
pub fn pose_score(flag: &[f32]) -> Option<f32> {
    flag.first().map(|&logit| sigmoid(logit))
}

/// Convert raw landmark output to normalized landmarks
///
/// Each landmark occupies five values `(x, y, z, visibility, presence)`
/// in input pixel units; only the first 33 landmarks are body points.
///
/// # Errors
///
/// Returns an error if the output is too short or the input size is invalid
pub fn decode_landmarks(raw: &[f32], input_width: i32, input_height: i32) -> Result<LandmarkSet> {
    let needed = NUM_POSE_LANDMARKS * LANDMARK_STRIDE;
    if raw.len() < needed {
        return Err(Error::ModelOutputError(format!(
            "Expected at least {needed} landmark values, got {}",
            raw.len()
        )));
    }
    if input_width <= 0 || input_height <= 0 {
        return Err(Error::InvalidInput(format!(
            "Invalid model input size {input_width}x{input_height}"
        )));
    }

    let width = f64::from(input_width);
    let height = f64::from(input_height);

    let landmarks = raw
        .chunks_exact(LANDMARK_STRIDE)
        .take(NUM_POSE_LANDMARKS)
        .map(|values| {
            Landmark::new(
                f64::from(values[0]) / width,
                f64::from(values[1]) / height,
                sigmoid(values[3]),
            )
        })
        .collect();

    LandmarkSet::from_landmarks(landmarks)
}
