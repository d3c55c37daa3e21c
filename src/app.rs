//! Main application module wiring the camera, model and window together.

use crate::{
    camera::OpenCvCapture,
    config::Config,
    controls::{ControlSource, HighGuiWindow, NoControls},
    error::Result,
    frame_loop::{FrameLoop, MeasurementSettings},
    overlay::OpenCvRenderer,
    pose_detection::OnnxPoseDetector,
    session::SessionState,
};
use log::info;

/// Loop type used by the application
pub type AppLoop = FrameLoop<OpenCvCapture, OnnxPoseDetector, OpenCvRenderer, Box<dyn ControlSource>>;

/// Live goniometer session
pub struct GoniometerApp {
    frame_loop: AppLoop,
}

impl GoniometerApp {
    /// Open the video source, load the model and create the window
    ///
    /// # Errors
    ///
    /// Returns an error if any collaborator fails to initialize
    pub fn new(config: &Config) -> Result<Self> {
        info!("Initializing shoulder goniometer");

        let source = OpenCvCapture::open(config.camera.video_source(), config.camera.read_timeout())?;

        let detector = OnnxPoseDetector::new(
            &config.model.pose_landmarks,
            config.model.min_detection_confidence,
        )?;

        let renderer = OpenCvRenderer::new(config.model.min_visibility)
            .with_range_on_every_frame(config.display.range_on_every_frame);

        let controls: Box<dyn ControlSource> = if config.display.enabled {
            Box::new(HighGuiWindow::new(&config.display.window_name)?)
        } else {
            info!("Running headless; stop with Ctrl-C or at end of video");
            Box::new(NoControls)
        };

        let settings = MeasurementSettings {
            side: config.measurement.side,
            kind: config.measurement.kind,
            min_visibility: config.model.min_visibility,
        };

        Ok(Self {
            frame_loop: FrameLoop::new(source, detector, renderer, controls, settings)
                .with_mirrored_view(config.display.mirror_view),
        })
    }

    /// Run the session and return the final range
    ///
    /// # Errors
    ///
    /// Returns the error that stopped the loop
    pub fn run(&mut self) -> Result<SessionState> {
        self.frame_loop.run()
    }
}
