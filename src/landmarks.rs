//! Body landmark types produced by the pose detector.
//!
//! Landmarks follow the 33-point BlazePose topology in model output order.
//! A [`LandmarkSet`] always holds exactly one entry per [`PoseLandmark`].

use crate::{
    constants::NUM_POSE_LANDMARKS,
    geometry::Point2D,
    measurement::NoDetection,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Named body landmarks in BlazePose output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PoseLandmark {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl PoseLandmark {
    /// All landmarks in output order
    pub const ALL: [Self; NUM_POSE_LANDMARKS] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    /// Position in the model output
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Landmark at a model output position
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Skeleton edges drawn between landmarks
pub const POSE_CONNECTIONS: [(PoseLandmark, PoseLandmark); 35] = {
    use PoseLandmark::*;
    [
        (Nose, LeftEyeInner),
        (LeftEyeInner, LeftEye),
        (LeftEye, LeftEyeOuter),
        (LeftEyeOuter, LeftEar),
        (Nose, RightEyeInner),
        (RightEyeInner, RightEye),
        (RightEye, RightEyeOuter),
        (RightEyeOuter, RightEar),
        (MouthLeft, MouthRight),
        (LeftShoulder, RightShoulder),
        (LeftShoulder, LeftElbow),
        (LeftElbow, LeftWrist),
        (LeftWrist, LeftPinky),
        (LeftWrist, LeftIndex),
        (LeftWrist, LeftThumb),
        (LeftPinky, LeftIndex),
        (RightShoulder, RightElbow),
        (RightElbow, RightWrist),
        (RightWrist, RightPinky),
        (RightWrist, RightIndex),
        (RightWrist, RightThumb),
        (RightPinky, RightIndex),
        (LeftShoulder, LeftHip),
        (RightShoulder, RightHip),
        (LeftHip, RightHip),
        (LeftHip, LeftKnee),
        (LeftKnee, LeftAnkle),
        (LeftAnkle, LeftHeel),
        (LeftHeel, LeftFootIndex),
        (LeftAnkle, LeftFootIndex),
        (RightHip, RightKnee),
        (RightKnee, RightAnkle),
        (RightAnkle, RightHeel),
        (RightHeel, RightFootIndex),
        (RightAnkle, RightFootIndex),
    ]
};

/// Body side of the measured limb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Subject's left limb
    Left,
    /// Subject's right limb
    Right,
}

/// Arm joints that have a left and a right landmark
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    /// Shoulder
    Shoulder,
    /// Elbow
    Elbow,
    /// Wrist
    Wrist,
    /// Hip
    Hip,
}

impl Side {
    /// Landmark for `joint` on this side
    #[must_use]
    pub const fn landmark(self, joint: Joint) -> PoseLandmark {
        match (self, joint) {
            (Self::Left, Joint::Shoulder) => PoseLandmark::LeftShoulder,
            (Self::Left, Joint::Elbow) => PoseLandmark::LeftElbow,
            (Self::Left, Joint::Wrist) => PoseLandmark::LeftWrist,
            (Self::Left, Joint::Hip) => PoseLandmark::LeftHip,
            (Self::Right, Joint::Shoulder) => PoseLandmark::RightShoulder,
            (Self::Right, Joint::Elbow) => PoseLandmark::RightElbow,
            (Self::Right, Joint::Wrist) => PoseLandmark::RightWrist,
            (Self::Right, Joint::Hip) => PoseLandmark::RightHip,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(Error::InvalidInput(format!("Unknown side: {s}"))),
        }
    }
}

/// A single landmark with its detector confidence
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    /// Normalized position
    pub point: Point2D,
    /// Probability that the landmark is visible, in `[0, 1]`
    pub visibility: f32,
}

impl Landmark {
    /// Create a new landmark
    #[must_use]
    pub const fn new(x: f64, y: f64, visibility: f32) -> Self {
        Self {
            point: Point2D::new(x, y),
            visibility,
        }
    }
}

/// Landmarks of one detected person for a single frame
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    landmarks: [Landmark; NUM_POSE_LANDMARKS],
}

impl LandmarkSet {
    /// Build a set from landmarks in output order
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly 33 landmarks are given
    pub fn from_landmarks(landmarks: Vec<Landmark>) -> Result<Self> {
        let count = landmarks.len();
        let landmarks = landmarks.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "Expected {NUM_POSE_LANDMARKS} landmarks, got {count}"
            ))
        })?;
        Ok(Self { landmarks })
    }

    /// Set with every landmark at the origin and zero visibility
    #[must_use]
    pub fn empty() -> Self {
        Self {
            landmarks: [Landmark::default(); NUM_POSE_LANDMARKS],
        }
    }

    /// Replace a single landmark, returning the updated set
    #[must_use]
    pub fn with(mut self, name: PoseLandmark, landmark: Landmark) -> Self {
        self.landmarks[name.index()] = landmark;
        self
    }

    /// Landmark by name
    #[must_use]
    pub fn get(&self, name: PoseLandmark) -> &Landmark {
        &self.landmarks[name.index()]
    }

    /// Position of a landmark whose visibility reaches `min_visibility`
    ///
    /// # Errors
    ///
    /// Returns [`NoDetection`] if the landmark is not visible enough
    pub fn require(&self, name: PoseLandmark, min_visibility: f32) -> std::result::Result<Point2D, NoDetection> {
        let landmark = self.get(name);
        if landmark.visibility >= min_visibility {
            Ok(landmark.point)
        } else {
            Err(NoDetection::LowVisibility {
                landmark: name,
                visibility: landmark.visibility,
            })
        }
    }

    /// Same landmarks positioned for a horizontally flipped frame
    ///
    /// Names are kept, so `LeftElbow` still refers to the subject's left
    /// elbow.
    #[must_use]
    pub fn flipped(&self) -> Self {
        let mut landmarks = self.landmarks;
        for landmark in &mut landmarks {
            landmark.point = landmark.point.flipped();
        }
        Self { landmarks }
    }

    /// Iterate landmarks with their names
    pub fn iter(&self) -> impl Iterator<Item = (PoseLandmark, &Landmark)> {
        PoseLandmark::ALL.iter().copied().zip(self.landmarks.iter())
    }
}
