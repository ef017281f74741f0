//! Celebrity resemblance ranking.
//!
//! Candidates must share at least one face shape with the user. Each is
//! then scored by embedding similarity (or a score-based proxy when no
//! embedding is available) blended with jaw/symmetry alignment.

use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::catalog;
use crate::error::Result;
use crate::shape::FaceShape;

/// Most celebrity matches returned per analysis.
pub const MAX_MATCHES: usize = 3;

const SIMILARITY_WEIGHT: f64 = 0.7;
const ALIGNMENT_WEIGHT: f64 = 0.3;

/// Scores closer than this count as a shared feature.
const FEATURE_MATCH_DISTANCE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelebrityCatalogEntry {
    pub name: String,
    /// Unrecognized shape labels are dropped; they could never match.
    #[serde(deserialize_with = "known_shapes")]
    pub face_shapes: Vec<FaceShape>,
    pub jaw_score: f64,
    pub symmetry_score: f64,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
}

fn known_shapes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<FaceShape>, D::Error> {
    let labels = Vec::<String>::deserialize(deserializer)?;
    Ok(labels
        .iter()
        .filter_map(|label| {
            let shape = FaceShape::from_name(label);
            if shape.is_none() {
                warn!(label = %label, "ignoring unknown face shape label");
            }
            shape
        })
        .collect())
}

impl CelebrityCatalogEntry {
    fn shares_shape(&self, shapes: &[FaceShape]) -> bool {
        shapes.iter().any(|shape| self.face_shapes.contains(shape))
    }

    fn usable_embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref().filter(|e| !e.is_empty())
    }
}

/// Read-only celebrity reference data.
#[derive(Debug, Clone, Default)]
pub struct CelebrityCatalog {
    entries: Vec<CelebrityCatalogEntry>,
}

impl CelebrityCatalog {
    pub fn new(entries: Vec<CelebrityCatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(catalog::load_entries(path)?))
    }

    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        Self::new(catalog::load_or_empty("celebrities", path))
    }

    pub fn entries(&self) -> &[CelebrityCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimilarFeature {
    #[serde(rename = "Face Shape")]
    FaceShape,
    #[serde(rename = "Jawline Structure")]
    JawlineStructure,
    #[serde(rename = "Facial Symmetry")]
    FacialSymmetry,
    #[serde(rename = "Overall Facial Proportions")]
    OverallProportions,
}

impl SimilarFeature {
    pub fn label(self) -> &'static str {
        match self {
            SimilarFeature::FaceShape => "Face Shape",
            SimilarFeature::JawlineStructure => "Jawline Structure",
            SimilarFeature::FacialSymmetry => "Facial Symmetry",
            SimilarFeature::OverallProportions => "Overall Facial Proportions",
        }
    }
}

impl std::fmt::Display for SimilarFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub name: String,
    /// Resemblance percentage in [0, 100].
    pub resemblance_score: u8,
    pub similar_features: Vec<SimilarFeature>,
}

/// Cosine similarity of two vectors, or `None` when the lengths differ or
/// either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
    let norm_a = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    Some(dot / (norm_a * norm_b))
}

#[derive(Debug)]
pub struct MatchEngine {
    catalog: RwLock<Arc<CelebrityCatalog>>,
    max_matches: usize,
}

impl MatchEngine {
    pub fn new(catalog: Arc<CelebrityCatalog>, max_matches: usize) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            max_matches,
        }
    }

    pub fn catalog(&self) -> Arc<CelebrityCatalog> {
        self.catalog
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn reload(&self, catalog: Arc<CelebrityCatalog>) {
        info!(entries = catalog.len(), "celebrity catalog reloaded");
        *self
            .catalog
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = catalog;
    }

    /// Rank catalog entries sharing a shape with the user, best first.
    ///
    /// Returns nothing when the user has no embedding or no shapes.
    pub fn find_matches(
        &self,
        user_embedding: Option<&[f32]>,
        user_shapes: &[FaceShape],
        user_jaw: f64,
        user_symmetry: f64,
    ) -> Vec<MatchResult> {
        let Some(user_embedding) = user_embedding.filter(|e| !e.is_empty()) else {
            return Vec::new();
        };
        if user_shapes.is_empty() {
            return Vec::new();
        }

        let catalog = self.catalog();
        let mut matches: Vec<MatchResult> = catalog
            .entries()
            .iter()
            .filter(|celeb| celeb.shares_shape(user_shapes))
            .map(|celeb| {
                let alignment = feature_alignment(celeb, user_jaw, user_symmetry);
                let similarity = celeb
                    .usable_embedding()
                    .and_then(|e| cosine_similarity(user_embedding, e))
                    .map(|cos| (cos + 1.0) / 2.0)
                    .unwrap_or(alignment);

                let resemblance = SIMILARITY_WEIGHT * similarity + ALIGNMENT_WEIGHT * alignment;
                MatchResult {
                    name: celeb.name.clone(),
                    resemblance_score: (resemblance * 100.0).clamp(0.0, 100.0) as u8,
                    similar_features: similar_features(celeb, user_shapes, user_jaw, user_symmetry),
                }
            })
            .collect();

        matches.sort_by(|a, b| b.resemblance_score.cmp(&a.resemblance_score));
        matches.truncate(self.max_matches);

        debug!(count = matches.len(), "celebrity matches ranked");
        matches
    }
}

/// Mean closeness of jaw and symmetry scores, in [0, 1] for scores in [0, 100].
fn feature_alignment(celeb: &CelebrityCatalogEntry, user_jaw: f64, user_symmetry: f64) -> f64 {
    let jaw = 1.0 - (user_jaw - celeb.jaw_score).abs() / 100.0;
    let symmetry = 1.0 - (user_symmetry - celeb.symmetry_score).abs() / 100.0;
    (jaw + symmetry) / 2.0
}

fn similar_features(
    celeb: &CelebrityCatalogEntry,
    user_shapes: &[FaceShape],
    user_jaw: f64,
    user_symmetry: f64,
) -> Vec<SimilarFeature> {
    let mut features = Vec::new();
    if celeb.shares_shape(user_shapes) {
        features.push(SimilarFeature::FaceShape);
    }
    if (user_jaw - celeb.jaw_score).abs() < FEATURE_MATCH_DISTANCE {
        features.push(SimilarFeature::JawlineStructure);
    }
    if (user_symmetry - celeb.symmetry_score).abs() < FEATURE_MATCH_DISTANCE {
        features.push(SimilarFeature::FacialSymmetry);
    }
    if features.is_empty() {
        features.push(SimilarFeature::OverallProportions);
    }
    features
}
