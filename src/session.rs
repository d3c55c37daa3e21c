//! Running range-of-motion tracking for a measurement session.
//!
//! Both extrema start at `0.0` rather than at the first observed angle, so
//! a session whose angles are all negative keeps `max_angle == 0.0`.

/// Extremes observed since the session started or was last reset
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionState {
    /// Largest angle seen
    pub max_angle: f64,
    /// Smallest angle seen
    pub min_angle: f64,
}

/// Tracks the maximum and minimum angle across frames
#[derive(Debug, Default)]
pub struct SessionTracker {
    state: SessionState,
}

impl SessionTracker {
    /// Create a tracker at the `(0.0, 0.0)` baseline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Widen the tracked range with a new angle and return `(max, min)`
    ///
    /// NaN angles are ignored so they cannot poison the extrema.
    pub fn update(&mut self, angle: f64) -> (f64, f64) {
        if angle.is_nan() {
            log::debug!("Ignoring NaN angle");
            return self.current();
        }

        self.state.max_angle = self.state.max_angle.max(angle);
        self.state.min_angle = self.state.min_angle.min(angle);
        self.current()
    }

    /// Return both extrema to `0.0`
    pub fn reset(&mut self) {
        log::info!(
            "Resetting session range (max {:.2}, min {:.2})",
            self.state.max_angle,
            self.state.min_angle
        );
        self.state = SessionState::default();
    }

    /// Current `(max, min)`
    #[must_use]
    pub fn current(&self) -> (f64, f64) {
        (self.state.max_angle, self.state.min_angle)
    }

    /// Snapshot of the session state
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }
}
