//! Sequential per-frame measurement loop.
//!
//! Each iteration reads a frame, detects landmarks, measures the selected
//! motion, updates the session range, renders the overlay and finally polls
//! the operator controls. A frame in flight always completes before a
//! quit or reset is honored.
//!
//! Detection always runs on the frame as captured, so landmark sides are
//! the subject's anatomical sides. A mirrored view only flips what is
//! rendered.

use crate::{
    camera::FrameSource,
    controls::{ControlSignal, ControlSource},
    landmarks::{LandmarkSet, Side},
    measurement::{AngleResult, MeasurementKind, NoDetection},
    overlay::{Overlay, Renderer},
    pose_detection::PoseDetector,
    session::{SessionState, SessionTracker},
    utils::flip_horizontal,
    Result,
};
use log::{debug, info, warn};
use opencv::core::Mat;

/// What the loop measures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementSettings {
    /// Limb being measured
    pub side: Side,
    /// Motion being measured
    pub kind: MeasurementKind,
    /// Minimum landmark visibility for a measurement
    pub min_visibility: f32,
}

/// Result of processing one frame
#[derive(Debug)]
pub struct FrameReport {
    /// Measurement, or why there was none
    pub outcome: std::result::Result<AngleResult, NoDetection>,
    /// Session range after this frame
    pub state: SessionState,
    /// Frame with the overlay drawn
    pub rendered: Mat,
}

/// Whether the loop keeps running after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Process another frame
    Continue,
    /// Stop the session
    Stop,
}

/// Measurement loop over injected collaborators
pub struct FrameLoop<S, D, R, C> {
    source: S,
    detector: D,
    renderer: R,
    controls: C,
    settings: MeasurementSettings,
    tracker: SessionTracker,
    mirror_view: bool,
    frames: u64,
}

impl<S, D, R, C> FrameLoop<S, D, R, C>
where
    S: FrameSource,
    D: PoseDetector,
    R: Renderer,
    C: ControlSource,
{
    /// Create a loop with a fresh session
    pub fn new(source: S, detector: D, renderer: R, controls: C, settings: MeasurementSettings) -> Self {
        Self {
            source,
            detector,
            renderer,
            controls,
            settings,
            tracker: SessionTracker::new(),
            mirror_view: false,
            frames: 0,
        }
    }

    /// Render frames flipped horizontally (selfie view)
    #[must_use]
    pub fn with_mirrored_view(mut self, enabled: bool) -> Self {
        self.mirror_view = enabled;
        self
    }

    /// Session tracker state
    #[must_use]
    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    /// Number of frames processed so far
    #[must_use]
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    /// Measure and render a single frame
    ///
    /// # Errors
    ///
    /// Returns an error if flipping or rendering fails
    pub fn process_frame(&mut self, frame: &Mat) -> Result<FrameReport> {
        let landmarks = match self.detector.detect(frame) {
            Ok(landmarks) => landmarks,
            Err(e) => {
                warn!("Pose detection failed: {}", e);
                None
            }
        };

        let outcome = measure(landmarks.as_ref(), self.settings);
        match &outcome {
            Ok(result) => {
                let (max, min) = self.tracker.update(result.angle_degrees);
                debug!(
                    "{} {}: {:.2} (max {:.2}, min {:.2})",
                    self.settings.kind, self.settings.side, result.angle_degrees, max, min
                );
            }
            Err(reason) => debug!("No measurement: {}", reason),
        }

        let state = self.tracker.state();
        let rendered = if self.mirror_view {
            let mut view = frame.clone();
            flip_horizontal(&mut view)?;
            let result = outcome.as_ref().ok().map(AngleResult::flipped);
            let skeleton = landmarks.as_ref().map(LandmarkSet::flipped);
            let overlay = Overlay::new(result.as_ref(), state);
            self.renderer.render(&view, &overlay, skeleton.as_ref())?
        } else {
            let overlay = Overlay::new(outcome.as_ref().ok(), state);
            self.renderer.render(frame, &overlay, landmarks.as_ref())?
        };
        self.frames += 1;

        Ok(FrameReport {
            outcome,
            state,
            rendered,
        })
    }

    /// Act on an operator signal
    pub fn handle_signal(&mut self, signal: ControlSignal) -> LoopControl {
        match signal {
            ControlSignal::Quit => {
                info!("Exit requested by user");
                LoopControl::Stop
            }
            ControlSignal::Reset => {
                self.tracker.reset();
                LoopControl::Continue
            }
        }
    }

    /// Run one full iteration: read, process, present, poll
    ///
    /// Returns `None` once the stream has ended.
    ///
    /// # Errors
    ///
    /// Returns capture, rendering or display errors
    pub fn step(&mut self) -> Result<Option<(FrameReport, LoopControl)>> {
        let Some(frame) = self.source.read_frame()? else {
            return Ok(None);
        };

        let report = self.process_frame(&frame)?;
        self.controls.show(&report.rendered)?;

        let control = match self.controls.poll()? {
            Some(signal) => self.handle_signal(signal),
            None => LoopControl::Continue,
        };

        Ok(Some((report, control)))
    }

    /// Run until the operator quits or the stream ends
    ///
    /// Returns the final session range.
    ///
    /// # Errors
    ///
    /// Returns the first capture, rendering or display error; the loop
    /// stops at that point.
    pub fn run(&mut self) -> Result<SessionState> {
        info!(
            "Measuring {} on the {} side",
            self.settings.kind, self.settings.side
        );

        while let Some((_, control)) = self.step()? {
            if control == LoopControl::Stop {
                break;
            }
        }

        let state = self.tracker.state();
        info!(
            "Session finished after {} frames: max {:.2}, min {:.2}",
            self.frames, state.max_angle, state.min_angle
        );
        Ok(state)
    }
}

/// Measure a frame's landmarks, treating a missing pose as no detection
///
/// # Errors
///
/// Returns [`NoDetection`] if there are no landmarks or a required
/// landmark is not visible
pub fn measure(
    landmarks: Option<&LandmarkSet>,
    settings: MeasurementSettings,
) -> std::result::Result<AngleResult, NoDetection> {
    let landmarks = landmarks.ok_or(NoDetection::NoPose)?;
    settings
        .kind
        .measure(landmarks, settings.side, settings.min_visibility)
}
