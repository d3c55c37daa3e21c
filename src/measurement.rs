//! Shoulder measurement strategies.
//!
//! Each [`MeasurementKind`] reads three landmarks on the selected side,
//! picks a mirroring rule and returns the angle together with the point
//! where its label is drawn.
//!
//! | Kind     | Points (a, b, c)       | Mirror          | Anchor   | Adjustment |
//! |----------|------------------------|-----------------|----------|------------|
//! | ABD/ADD  | elbow, shoulder, hip   | right side      | shoulder | none       |
//! | FLEX/EXT | elbow, shoulder, hip   | left side       | shoulder | none       |
//! | ROTATION | wrist, elbow, hip      | left side       | elbow    | −90°       |
//!
//! Image x grows to the right, so the same anatomical motion has opposite
//! signs on the two limbs. Mirroring one side makes the reported sign
//! comparable between limbs.

use crate::{
    constants::ROTATION_OFFSET_DEGREES,
    geometry::{calculate_angle, Point2D},
    landmarks::{Joint, LandmarkSet, PoseLandmark, Side},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A frame that produced no usable measurement
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum NoDetection {
    /// The detector found no person in the frame
    #[error("no person detected")]
    NoPose,

    /// A required landmark is below the visibility threshold
    #[error("landmark {landmark:?} visibility {visibility:.2} below threshold")]
    LowVisibility {
        /// Landmark that failed the check
        landmark: PoseLandmark,
        /// Its reported visibility
        visibility: f32,
    },
}

/// Angle measured on a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleResult {
    /// Signed angle in degrees
    pub angle_degrees: f64,
    /// Where the angle label is drawn (the angle's vertex)
    pub anchor: Point2D,
}

impl AngleResult {
    /// Same angle with its anchor moved into a horizontally flipped frame
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            angle_degrees: self.angle_degrees,
            anchor: self.anchor.flipped(),
        }
    }
}

/// Shoulder motion being measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    /// Abduction / adduction
    AbdAdd,
    /// Flexion / extension
    FlexExt,
    /// Internal / external rotation
    Rotation,
}

impl MeasurementKind {
    /// All measurement kinds
    pub const ALL: [Self; 3] = [Self::AbdAdd, Self::FlexExt, Self::Rotation];

    /// Label shown to the operator
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AbdAdd => "ABD/ADD",
            Self::FlexExt => "FLEX/EXT",
            Self::Rotation => "ROTATION",
        }
    }

    /// Whether points are mirrored before the angle is computed
    #[must_use]
    pub const fn mirror_for(self, side: Side) -> bool {
        match self {
            Self::AbdAdd => matches!(side, Side::Right),
            Self::FlexExt | Self::Rotation => matches!(side, Side::Left),
        }
    }

    /// Joints used as `(a, b, c)`; `b` is the vertex and the label anchor
    #[must_use]
    pub const fn joints(self) -> (Joint, Joint, Joint) {
        match self {
            Self::AbdAdd | Self::FlexExt => (Joint::Elbow, Joint::Shoulder, Joint::Hip),
            Self::Rotation => (Joint::Wrist, Joint::Elbow, Joint::Hip),
        }
    }

    /// Constant subtracted from the raw angle
    #[must_use]
    pub const fn offset_degrees(self) -> f64 {
        match self {
            Self::AbdAdd | Self::FlexExt => 0.0,
            Self::Rotation => ROTATION_OFFSET_DEGREES,
        }
    }

    /// Measure this motion on `side`
    ///
    /// # Errors
    ///
    /// Returns [`NoDetection`] if any of the three landmarks has a
    /// visibility below `min_visibility`
    pub fn measure(
        self,
        landmarks: &LandmarkSet,
        side: Side,
        min_visibility: f32,
    ) -> std::result::Result<AngleResult, NoDetection> {
        let (a, b, c) = self.joints();
        let a = landmarks.require(side.landmark(a), min_visibility)?;
        let b = landmarks.require(side.landmark(b), min_visibility)?;
        let c = landmarks.require(side.landmark(c), min_visibility)?;

        let angle = calculate_angle(a, b, c, self.mirror_for(side)) - self.offset_degrees();

        Ok(AngleResult {
            angle_degrees: angle,
            anchor: b,
        })
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for MeasurementKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "abd/add" | "abd_add" | "abduction" => Ok(Self::AbdAdd),
            "flex/ext" | "flex_ext" | "flexion" => Ok(Self::FlexExt),
            "rotation" | "rot" => Ok(Self::Rotation),
            _ => Err(Error::InvalidInput(format!("Unknown measurement: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;

    fn arm(side: Side) -> LandmarkSet {
        LandmarkSet::empty()
            .with(side.landmark(Joint::Shoulder), Landmark::new(0.5, 0.5, 1.0))
            .with(side.landmark(Joint::Elbow), Landmark::new(0.6, 0.5, 1.0))
            .with(side.landmark(Joint::Wrist), Landmark::new(0.6, 0.3, 1.0))
            .with(side.landmark(Joint::Hip), Landmark::new(0.5, 0.8, 1.0))
    }

    #[test]
    fn test_mirror_table() {
        assert!(MeasurementKind::AbdAdd.mirror_for(Side::Right));
        assert!(!MeasurementKind::AbdAdd.mirror_for(Side::Left));
        assert!(MeasurementKind::FlexExt.mirror_for(Side::Left));
        assert!(!MeasurementKind::FlexExt.mirror_for(Side::Right));
        assert!(MeasurementKind::Rotation.mirror_for(Side::Left));
        assert!(!MeasurementKind::Rotation.mirror_for(Side::Right));
    }

    #[test]
    fn test_abd_add_anchor_is_shoulder() {
        let result = MeasurementKind::AbdAdd.measure(&arm(Side::Left), Side::Left, 0.5).unwrap();
        assert_eq!(result.anchor, Point2D::new(0.5, 0.5));
        // Hip straight down (90°), elbow straight right (0°)
        assert!((result.angle_degrees - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_subtracts_offset() {
        let landmarks = arm(Side::Right);
        let result = MeasurementKind::Rotation.measure(&landmarks, Side::Right, 0.5).unwrap();

        let raw = calculate_angle(
            Point2D::new(0.6, 0.3),
            Point2D::new(0.6, 0.5),
            Point2D::new(0.5, 0.8),
            false,
        );
        assert_eq!(result.angle_degrees, raw - 90.0);
        assert_eq!(result.anchor, Point2D::new(0.6, 0.5));
    }

    #[test]
    fn test_invisible_landmark_is_no_detection() {
        let landmarks = arm(Side::Left).with(PoseLandmark::LeftHip, Landmark::new(0.5, 0.8, 0.1));
        let result = MeasurementKind::FlexExt.measure(&landmarks, Side::Left, 0.5);
        assert!(matches!(
            result,
            Err(NoDetection::LowVisibility { landmark: PoseLandmark::LeftHip, .. })
        ));
    }

    #[test]
    fn test_nan_visibility_is_no_detection() {
        let landmarks = arm(Side::Right).with(PoseLandmark::RightElbow, Landmark::new(0.6, 0.5, f32::NAN));
        let result = MeasurementKind::AbdAdd.measure(&landmarks, Side::Right, 0.5);
        assert!(matches!(
            result,
            Err(NoDetection::LowVisibility { landmark: PoseLandmark::RightElbow, visibility }) if visibility.is_nan()
        ));
    }

    #[test]
    fn test_parse_display_names() {
        for kind in MeasurementKind::ALL {
            assert_eq!(kind.display_name().parse::<MeasurementKind>().unwrap(), kind);
        }
        assert_eq!("flex_ext".parse::<MeasurementKind>().unwrap(), MeasurementKind::FlexExt);
        assert!("EXT/ROT".parse::<MeasurementKind>().is_err());
    }
}
