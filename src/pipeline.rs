//! End-to-end analysis: landmarks in, report out.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::de::value::SeqAccessDeserializer;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::matching::{CelebrityCatalog, MatchEngine, MatchResult};
use crate::scoring::{ScoreResult, ScoringEngine};
use crate::shape::{ShapeEngine, ShapeResult};
use crate::symmetry::{SymmetryEngine, SymmetryResult};
use crate::tips::{Tip, TipCatalog, TipsEngine, UserProfile};
use crate::types::LandmarkSet;

pub const ANALYSIS_VERSION: &str = "beauty_v1";

/// One detected face: its landmarks and, when available, an identity embedding.
///
/// Deserializes from either `{"landmarks": [...], "embedding": [...]}` or a
/// bare array of points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceInput {
    pub landmarks: LandmarkSet,
    pub embedding: Option<Vec<f32>>,
}

// Landmark validation errors surface unchanged for both input forms.
impl<'de> Deserialize<'de> for FaceInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(FaceInputVisitor)
    }
}

struct FaceInputVisitor;

impl<'de> Visitor<'de> for FaceInputVisitor {
    type Value = FaceInput;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a landmark document or an array of points")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> std::result::Result<FaceInput, A::Error> {
        let landmarks = LandmarkSet::deserialize(SeqAccessDeserializer::new(seq))?;
        Ok(FaceInput::new(landmarks))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<FaceInput, A::Error> {
        let mut landmarks = None;
        let mut embedding = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "landmarks" => {
                    if landmarks.is_some() {
                        return Err(de::Error::duplicate_field("landmarks"));
                    }
                    landmarks = Some(map.next_value::<LandmarkSet>()?);
                }
                "embedding" => embedding = map.next_value::<Option<Vec<f32>>>()?,
                _ => {
                    map.next_value::<de::IgnoredAny>()?;
                }
            }
        }
        let landmarks = landmarks.ok_or_else(|| de::Error::missing_field("landmarks"))?;
        Ok(FaceInput {
            landmarks,
            embedding,
        })
    }
}

impl FaceInput {
    pub fn new(landmarks: LandmarkSet) -> Self {
        Self {
            landmarks,
            embedding: None,
        }
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonyReport {
    pub symmetry: SymmetryResult,
    pub shape: ShapeResult,
    pub score: ScoreResult,
    pub tips: Vec<Tip>,
    pub celebrity_matches: Vec<MatchResult>,
    pub frontal_ratio: f64,
    pub roll_degrees: f64,
    pub analysis_version: String,
}

/// Runs symmetry, shape, scoring, tips and matching over one face.
#[derive(Debug)]
pub struct HarmonyAnalyzer {
    config: AnalyzerConfig,
    symmetry: SymmetryEngine,
    shape: ShapeEngine,
    scoring: ScoringEngine,
    tips: TipsEngine,
    matching: MatchEngine,
}

impl HarmonyAnalyzer {
    pub fn new(
        config: AnalyzerConfig,
        tips: Arc<TipCatalog>,
        celebrities: Arc<CelebrityCatalog>,
    ) -> Self {
        Self {
            symmetry: SymmetryEngine::new(config.symmetry),
            shape: ShapeEngine::new(),
            scoring: ScoringEngine::new(config.weights),
            tips: TipsEngine::new(tips, config.tips),
            matching: MatchEngine::new(celebrities, config.matching.max_matches),
            config,
        }
    }

    /// Build an analyzer, loading the configured catalogs.
    ///
    /// Missing or unreadable catalogs are logged and treated as empty.
    pub fn from_config(config: AnalyzerConfig) -> Self {
        let tips = config
            .tips_catalog
            .as_ref()
            .map(TipCatalog::load_or_empty)
            .unwrap_or_default();
        let celebrities = config
            .celebrity_catalog
            .as_ref()
            .map(CelebrityCatalog::load_or_empty)
            .unwrap_or_default();
        info!(
            tips = tips.len(),
            celebrities = celebrities.len(),
            "analyzer ready"
        );
        Self::new(config, Arc::new(tips), Arc::new(celebrities))
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn tips(&self) -> &TipsEngine {
        &self.tips
    }

    pub fn matching(&self) -> &MatchEngine {
        &self.matching
    }

    pub fn analyze(&self, input: &FaceInput, profile: &UserProfile) -> Result<HarmonyReport> {
        let mut rng = StdRng::from_os_rng();
        self.analyze_with_rng(input, profile, &mut rng)
    }

    pub fn analyze_with_rng<R: Rng + ?Sized>(
        &self,
        input: &FaceInput,
        profile: &UserProfile,
        rng: &mut R,
    ) -> Result<HarmonyReport> {
        let landmarks = &input.landmarks;

        let frontal_ratio = landmarks.frontal_ratio();
        if self.config.require_frontal && !self.config.is_frontal(frontal_ratio) {
            return Err(Error::NonFrontalFace {
                ratio: frontal_ratio,
            });
        }

        let symmetry = self.symmetry.analyze(landmarks)?;
        let shape = self.shape.analyze(landmarks);
        let score = self.scoring.calculate_score(&symmetry, &shape, landmarks);

        let tips = self.tips.generate_tips(
            &score.components,
            shape.primary,
            &symmetry.asymmetry_zones,
            profile,
            rng,
        );
        let celebrity_matches = self.matching.find_matches(
            input.embedding.as_deref(),
            &shape.shapes,
            score.components.jawline,
            symmetry.score,
        );

        debug!(
            total = score.total_score,
            shape = %shape.primary,
            tips = tips.len(),
            matches = celebrity_matches.len(),
            "analysis complete"
        );

        Ok(HarmonyReport {
            symmetry,
            shape,
            score,
            tips,
            celebrity_matches,
            frontal_ratio,
            roll_degrees: landmarks.roll_degrees(),
            analysis_version: ANALYSIS_VERSION.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::FACE_MESH_POINTS;
    use crate::types::Point;

    fn points_json(n: usize) -> String {
        let points: Vec<Point> = (0..n).map(|i| Point::new(i as f64, 1.0)).collect();
        serde_json::to_string(&points).unwrap()
    }

    #[test]
    fn input_accepts_document_form() {
        let json = format!(
            r#"{{"landmarks": {}, "embedding": [0.5, 0.25]}}"#,
            points_json(FACE_MESH_POINTS)
        );
        let input: FaceInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input.landmarks.num_landmarks(), FACE_MESH_POINTS);
        assert_eq!(input.embedding, Some(vec![0.5, 0.25]));
    }

    #[test]
    fn input_accepts_null_or_missing_embedding() {
        let json = format!(
            r#"{{"landmarks": {}, "embedding": null}}"#,
            points_json(FACE_MESH_POINTS)
        );
        let input: FaceInput = serde_json::from_str(&json).unwrap();
        assert!(input.embedding.is_none());

        let json = format!(r#"{{"landmarks": {}}}"#, points_json(FACE_MESH_POINTS));
        let input: FaceInput = serde_json::from_str(&json).unwrap();
        assert!(input.embedding.is_none());
    }

    #[test]
    fn input_accepts_bare_points() {
        let input: FaceInput = serde_json::from_str(&points_json(FACE_MESH_POINTS)).unwrap();
        assert!(input.embedding.is_none());
        assert_eq!(input.landmarks.points()[7].x, 7.0);
    }

    #[test]
    fn input_reports_landmark_count() {
        let err = serde_json::from_str::<FaceInput>(&points_json(10)).unwrap_err();
        assert!(err.to_string().contains("Expected 468 landmarks, got 10"), "{err}");

        let json = format!(r#"{{"landmarks": {}}}"#, points_json(10));
        let err = serde_json::from_str::<FaceInput>(&json).unwrap_err();
        assert!(err.to_string().contains("Expected 468 landmarks, got 10"), "{err}");
    }

    #[test]
    fn input_requires_landmarks_field() {
        let err = serde_json::from_str::<FaceInput>(r#"{"embedding": [1.0]}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `landmarks`"), "{err}");
    }

    #[test]
    fn degenerate_midline_propagates() {
        // Every point identical: forehead top and chin coincide.
        let landmarks =
            LandmarkSet::new(vec![Point::new(3.0, 3.0); FACE_MESH_POINTS]).unwrap();
        let analyzer = HarmonyAnalyzer::from_config(AnalyzerConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        let result =
            analyzer.analyze_with_rng(&FaceInput::new(landmarks), &UserProfile::default(), &mut rng);
        assert!(matches!(result, Err(Error::DegenerateMidline)));
    }
}
