//! Weighted composite harmony score.
//!
//! Every measured proportion goes through the same [`ratio_score`] curve;
//! the six component scores are then blended with fixed weights.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::round_to;
use crate::mesh::Landmark;
use crate::shape::{FaceShape, ShapeResult};
use crate::symmetry::SymmetryResult;
use crate::types::LandmarkSet;

/// Score given to a proportion that cannot be measured.
pub const NEUTRAL_SCORE: f64 = 50.0;

const JAW_IDEAL: f64 = 0.90;
const JAW_TOLERANCE: f64 = 0.15;
const EYE_IDEAL: f64 = 1.0;
const EYE_TOLERANCE: f64 = 0.2;
const NOSE_IDEAL: f64 = 1.0;
const NOSE_TOLERANCE: f64 = 0.25;
const LIPS_IDEAL: f64 = 0.40;
const LIPS_TOLERANCE: f64 = 0.10;

/// Map a measured ratio onto a 0-100 score by its distance from `ideal`.
///
/// Within half the tolerance the score falls from 100 to 90, within the
/// full tolerance from 90 to 60, and beyond it keeps falling towards a
/// floor of 40. The result is rounded to one decimal.
pub fn ratio_score(value: f64, ideal: f64, tolerance: f64) -> f64 {
    let diff = (value - ideal).abs();
    if diff == 0.0 {
        return 100.0;
    }
    let half = tolerance / 2.0;

    let score = if diff <= half {
        100.0 - (diff / half) * 10.0
    } else if diff <= tolerance {
        90.0 - ((diff - half) / half) * 30.0
    } else {
        (60.0 - ((diff - tolerance) / tolerance) * 40.0).max(40.0)
    };
    round_to(score, 1)
}

/// Fixed preference score for the primary face shape.
pub fn structure_score(shape: FaceShape) -> f64 {
    match shape {
        FaceShape::Square => 98.0,
        FaceShape::Rectangle => 95.0,
        FaceShape::Diamond => 92.0,
        FaceShape::Oval => 88.0,
        FaceShape::Oblong => 78.0,
        FaceShape::Round => 75.0,
        _ => 75.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Model / Elite Harmony")]
    EliteHarmony,
    #[serde(rename = "Very Attractive")]
    VeryAttractive,
    #[serde(rename = "Above Average")]
    AboveAverage,
    #[serde(rename = "Average")]
    Average,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl Category {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Category::EliteHarmony
        } else if score >= 75.0 {
            Category::VeryAttractive
        } else if score >= 60.0 {
            Category::AboveAverage
        } else if score >= 40.0 {
            Category::Average
        } else {
            Category::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::EliteHarmony => "Model / Elite Harmony",
            Category::VeryAttractive => "Very Attractive",
            Category::AboveAverage => "Above Average",
            Category::Average => "Average",
            Category::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Component sub-scores, each in [0, 100] and rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub symmetry: f64,
    pub jawline: f64,
    pub structure: f64,
    pub eyes: f64,
    pub nose: f64,
    pub lips: f64,
}

impl ComponentScores {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("symmetry", self.symmetry),
            ("jawline", self.jawline),
            ("structure", self.structure),
            ("eyes", self.eyes),
            ("nose", self.nose),
            ("lips", self.lips),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub symmetry: f64,
    pub jawline: f64,
    pub structure: f64,
    pub eyes: f64,
    pub nose: f64,
    pub lips: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            symmetry: 0.30,
            jawline: 0.25,
            structure: 0.15,
            eyes: 0.15,
            nose: 0.10,
            lips: 0.05,
        }
    }
}

impl ScoreWeights {
    pub fn weighted_total(&self, c: &ComponentScores) -> f64 {
        c.symmetry * self.symmetry
            + c.jawline * self.jawline
            + c.structure * self.structure
            + c.eyes * self.eyes
            + c.nose * self.nose
            + c.lips * self.lips
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Weighted total in [0, 100], rounded to one decimal.
    pub total_score: f64,
    pub category: Category,
    pub components: ComponentScores,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: ScoreWeights,
}

impl ScoringEngine {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn calculate_score(
        &self,
        symmetry: &SymmetryResult,
        shape: &ShapeResult,
        landmarks: &LandmarkSet,
    ) -> ScoreResult {
        let components = ComponentScores {
            symmetry: round_to(symmetry.score, 1),
            jawline: ratio_score(shape.ratios.jaw_cheek, JAW_IDEAL, JAW_TOLERANCE),
            structure: structure_score(shape.primary),
            eyes: eye_score(landmarks),
            nose: nose_score(landmarks),
            lips: lips_score(landmarks),
        };

        let total = self.weights.weighted_total(&components).clamp(0.0, 100.0);
        let result = ScoreResult {
            total_score: round_to(total, 1),
            category: Category::from_score(total),
            components,
        };
        debug!(total = result.total_score, category = %result.category, "score calculated");
        result
    }
}

/// Inter-ocular distance against the average single-eye width.
fn eye_score(landmarks: &LandmarkSet) -> f64 {
    let left_width = landmarks.span(Landmark::LeftEyeOuter, Landmark::LeftEyeInner);
    let right_width = landmarks.span(Landmark::RightEyeInner, Landmark::RightEyeOuter);
    let avg_width = (left_width + right_width) / 2.0;
    if avg_width == 0.0 {
        return NEUTRAL_SCORE;
    }
    let inter_ocular = landmarks.span(Landmark::LeftEyeInner, Landmark::RightEyeInner);
    ratio_score(inter_ocular / avg_width, EYE_IDEAL, EYE_TOLERANCE)
}

/// Nose width (ala to ala) against the inner-eye distance.
fn nose_score(landmarks: &LandmarkSet) -> f64 {
    let eye_distance = landmarks.span(Landmark::LeftEyeInner, Landmark::RightEyeInner);
    if eye_distance == 0.0 {
        return NEUTRAL_SCORE;
    }
    let nose_width = landmarks.span(Landmark::NoseAlaLeft, Landmark::NoseAlaRight);
    ratio_score(nose_width / eye_distance, NOSE_IDEAL, NOSE_TOLERANCE)
}

/// Mouth width against cheek-to-cheek face width.
fn lips_score(landmarks: &LandmarkSet) -> f64 {
    let face_width = landmarks.span(Landmark::CheekLeft, Landmark::CheekRight);
    if face_width == 0.0 {
        return NEUTRAL_SCORE;
    }
    let mouth_width = landmarks.span(Landmark::MouthLeft, Landmark::MouthRight);
    ratio_score(mouth_width / face_width, LIPS_IDEAL, LIPS_TOLERANCE)
}
