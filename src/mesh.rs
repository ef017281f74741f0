//! Face-mesh topology.
//!
//! Maps semantic landmark roles and symmetry regions onto the 468-point
//! MediaPipe face mesh. This is the only place raw mesh indices appear.
//!
//! "Left" and "right" follow image space: the left landmarks sit on the
//! image-left half of a frontal face (the subject's right side).

use serde::{Deserialize, Serialize};

/// Number of points in the face-mesh topology.
pub const FACE_MESH_POINTS: usize = 468;

/// A single named point on the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    ForeheadTop,
    ChinBottom,
    CheekLeft,
    CheekRight,
    JawLeft,
    JawRight,
    ForeheadLeft,
    ForeheadRight,
    LeftEyeOuter,
    LeftEyeInner,
    RightEyeInner,
    RightEyeOuter,
    NoseTip,
    NoseAlaLeft,
    NoseAlaRight,
    MouthLeft,
    MouthRight,
}

impl Landmark {
    pub const ALL: [Landmark; 17] = [
        Landmark::ForeheadTop,
        Landmark::ChinBottom,
        Landmark::CheekLeft,
        Landmark::CheekRight,
        Landmark::JawLeft,
        Landmark::JawRight,
        Landmark::ForeheadLeft,
        Landmark::ForeheadRight,
        Landmark::LeftEyeOuter,
        Landmark::LeftEyeInner,
        Landmark::RightEyeInner,
        Landmark::RightEyeOuter,
        Landmark::NoseTip,
        Landmark::NoseAlaLeft,
        Landmark::NoseAlaRight,
        Landmark::MouthLeft,
        Landmark::MouthRight,
    ];

    /// Index of this role in the face mesh.
    pub const fn index(self) -> usize {
        match self {
            Landmark::ForeheadTop => 10,
            Landmark::ChinBottom => 152,
            Landmark::CheekLeft => 234,
            Landmark::CheekRight => 454,
            Landmark::JawLeft => 58,
            Landmark::JawRight => 288,
            Landmark::ForeheadLeft => 103,
            Landmark::ForeheadRight => 332,
            Landmark::LeftEyeOuter => 33,
            Landmark::LeftEyeInner => 133,
            Landmark::RightEyeInner => 362,
            Landmark::RightEyeOuter => 263,
            Landmark::NoseTip => 1,
            Landmark::NoseAlaLeft => 49,
            Landmark::NoseAlaRight => 279,
            Landmark::MouthLeft => 61,
            Landmark::MouthRight => 291,
        }
    }
}

// Contours are ordered so that element i on the left mirrors element i on
// the right.
const LEFT_EYE: [usize; 6] = [33, 160, 158, 133, 153, 144];
const RIGHT_EYE: [usize; 6] = [263, 387, 385, 362, 380, 373];
const LEFT_EYEBROW: [usize; 5] = [70, 63, 105, 66, 107];
const RIGHT_EYEBROW: [usize; 5] = [300, 293, 334, 296, 336];
const JAW_LEFT: [usize; 8] = [58, 172, 136, 150, 149, 176, 148, 152];
const JAW_RIGHT: [usize; 8] = [288, 397, 365, 379, 378, 400, 377, 152];
const LIPS_LEFT: [usize; 6] = [61, 185, 146, 91, 181, 84];
const LIPS_RIGHT: [usize; 6] = [291, 409, 375, 321, 405, 314];

/// A facial region compared left against right for symmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Eyes,
    Jawline,
    Eyebrows,
    Lips,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Eyes, Region::Jawline, Region::Eyebrows, Region::Lips];

    /// Left and right contour indices, pairwise mirrored.
    pub fn contours(self) -> (&'static [usize], &'static [usize]) {
        match self {
            Region::Eyes => (&LEFT_EYE, &RIGHT_EYE),
            Region::Jawline => (&JAW_LEFT, &JAW_RIGHT),
            Region::Eyebrows => (&LEFT_EYEBROW, &RIGHT_EYEBROW),
            Region::Lips => (&LIPS_LEFT, &LIPS_RIGHT),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Eyes => "Eyes",
            Region::Jawline => "Jawline",
            Region::Eyebrows => "Eyebrows",
            Region::Lips => "Lips",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
