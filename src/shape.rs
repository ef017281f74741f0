//! Face-shape classification from outline proportions.
//!
//! Three ratios are measured from the outline landmarks and matched
//! against a rule table. Each rule that fires adds its points to one
//! shape; the three best shapes are returned, best first.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::geometry::round_to;
use crate::mesh::Landmark;
use crate::types::LandmarkSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceShape {
    Square,
    Rectangle,
    Round,
    Diamond,
    Oval,
    Oblong,
    Heart,
    Triangle,
}

impl FaceShape {
    /// Catalog order. Ties in the ranking keep this order.
    pub const ALL: [FaceShape; 8] = [
        FaceShape::Square,
        FaceShape::Rectangle,
        FaceShape::Round,
        FaceShape::Diamond,
        FaceShape::Oval,
        FaceShape::Oblong,
        FaceShape::Heart,
        FaceShape::Triangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FaceShape::Square => "Square",
            FaceShape::Rectangle => "Rectangle",
            FaceShape::Round => "Round",
            FaceShape::Diamond => "Diamond",
            FaceShape::Oval => "Oval",
            FaceShape::Oblong => "Oblong",
            FaceShape::Heart => "Heart",
            FaceShape::Triangle => "Triangle",
        }
    }

    /// Inverse of [`FaceShape::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|shape| shape.name() == name)
    }

    /// Slot in catalog order; variants are declared in that order.
    fn position(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for FaceShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Outline proportions behind a classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeRatios {
    /// Cheek-to-cheek width over forehead-to-chin height.
    pub width_height: f64,
    /// Jaw width over cheek width.
    pub jaw_cheek: f64,
    /// Forehead width over cheek width.
    pub forehead_cheek: f64,
}

impl ShapeRatios {
    fn rounded(self) -> Self {
        Self {
            width_height: round_to(self.width_height, 2),
            jaw_cheek: round_to(self.jaw_cheek, 2),
            forehead_cheek: round_to(self.forehead_cheek, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeResult {
    pub primary: FaceShape,
    /// Top three shapes, best first; `shapes[0] == primary`.
    pub shapes: [FaceShape; 3],
    /// Ratios rounded to two decimals.
    pub ratios: ShapeRatios,
}

impl ShapeResult {
    /// Result used when the face has no measurable width or height.
    pub fn fallback() -> Self {
        Self {
            primary: FaceShape::Oval,
            shapes: [FaceShape::Oval, FaceShape::Round, FaceShape::Square],
            ratios: ShapeRatios {
                width_height: 0.85,
                jaw_cheek: 0.75,
                forehead_cheek: 0.75,
            },
        }
    }
}

struct ShapeRule {
    shape: FaceShape,
    points: u32,
    applies: fn(&ShapeRatios) -> bool,
}

fn compact(r: &ShapeRatios) -> bool {
    (0.88..=1.05).contains(&r.width_height)
}

fn diamond_strong(r: &ShapeRatios) -> bool {
    r.jaw_cheek < 0.75 && r.forehead_cheek < 0.75
}

const RULES: &[ShapeRule] = &[
    // Compact face with a strong jaw.
    ShapeRule {
        shape: FaceShape::Square,
        points: 95,
        applies: |r| compact(r) && r.jaw_cheek >= 0.9,
    },
    ShapeRule {
        shape: FaceShape::Square,
        points: 70,
        applies: |r| compact(r) && (0.8..0.9).contains(&r.jaw_cheek),
    },
    // Long face with a strong jaw.
    ShapeRule {
        shape: FaceShape::Rectangle,
        points: 95,
        applies: |r| r.width_height < 0.88 && r.jaw_cheek >= 0.9,
    },
    ShapeRule {
        shape: FaceShape::Rectangle,
        points: 75,
        applies: |r| r.width_height < 0.88 && (0.8..0.9).contains(&r.jaw_cheek),
    },
    // Compact face with a soft jaw.
    ShapeRule {
        shape: FaceShape::Round,
        points: 90,
        applies: |r| compact(r) && r.jaw_cheek < 0.8,
    },
    // Narrow jaw and forehead under wide cheekbones.
    ShapeRule {
        shape: FaceShape::Diamond,
        points: 95,
        applies: diamond_strong,
    },
    ShapeRule {
        shape: FaceShape::Diamond,
        points: 70,
        applies: |r| !diamond_strong(r) && r.jaw_cheek < 0.8 && r.forehead_cheek < 0.8,
    },
    // Slightly long with a tapered jaw.
    ShapeRule {
        shape: FaceShape::Oval,
        points: 95,
        applies: |r| {
            r.width_height > 0.75
                && r.width_height < 0.9
                && r.jaw_cheek > 0.7
                && r.jaw_cheek < 0.85
        },
    },
    // Very long face.
    ShapeRule {
        shape: FaceShape::Oblong,
        points: 95,
        applies: |r| r.width_height <= 0.75,
    },
    ShapeRule {
        shape: FaceShape::Oblong,
        points: 70,
        applies: |r| r.width_height > 0.75 && r.width_height <= 0.78,
    },
    // Wide forehead, narrow chin.
    ShapeRule {
        shape: FaceShape::Heart,
        points: 90,
        applies: |r| r.forehead_cheek > 0.9 && r.jaw_cheek < 0.75,
    },
    // Jaw wider than the cheeks or clearly wider than the forehead.
    ShapeRule {
        shape: FaceShape::Triangle,
        points: 85,
        applies: |r| r.jaw_cheek > 1.0 || r.jaw_cheek > r.forehead_cheek * 1.1,
    },
];

/// Below this best score the ranking is considered degenerate.
const MIN_CONFIDENT_SCORE: u32 = 50;

const FALLBACK_WEIGHTS: [(FaceShape, u32); 3] = [
    (FaceShape::Oval, 30),
    (FaceShape::Round, 20),
    (FaceShape::Square, 10),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeEngine;

impl ShapeEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, landmarks: &LandmarkSet) -> ShapeResult {
        let face_width = landmarks.span(Landmark::CheekLeft, Landmark::CheekRight);
        let jaw_width = landmarks.span(Landmark::JawLeft, Landmark::JawRight);
        let face_height = landmarks.span(Landmark::ForeheadTop, Landmark::ChinBottom);
        let forehead_width = landmarks.span(Landmark::ForeheadLeft, Landmark::ForeheadRight);

        if face_width == 0.0 || face_height == 0.0 {
            warn!(face_width, face_height, "face outline has no extent, using fallback shape");
            return ShapeResult::fallback();
        }

        let ratios = ShapeRatios {
            width_height: face_width / face_height,
            jaw_cheek: jaw_width / face_width,
            forehead_cheek: forehead_width / face_width,
        };
        let shapes = classify(&ratios);

        debug!(?ratios, ?shapes, "face shape classified");
        ShapeResult {
            primary: shapes[0],
            shapes,
            ratios: ratios.rounded(),
        }
    }
}

/// Rank all shapes for the given ratios and keep the top three.
pub fn classify(ratios: &ShapeRatios) -> [FaceShape; 3] {
    let mut scores = [0u32; FaceShape::ALL.len()];
    for rule in RULES.iter().filter(|rule| (rule.applies)(ratios)) {
        scores[rule.shape.position()] += rule.points;
    }

    if scores.iter().copied().max().unwrap_or(0) < MIN_CONFIDENT_SCORE {
        for (shape, weight) in FALLBACK_WEIGHTS {
            scores[shape.position()] += weight;
        }
    }

    let mut ranked: Vec<(FaceShape, u32)> = FaceShape::ALL.into_iter().zip(scores).collect();
    // Stable sort keeps catalog order among equal scores.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    [ranked[0].0, ranked[1].0, ranked[2].0]
}
