//! # facial-harmony
//!
//! Facial harmony analysis from 468-point face-mesh landmarks.
//!
//! This crate provides:
//! - **Symmetry**: mirrored-region comparison across the facial midline
//! - **Face Shape**: ratio-based classification into eight shape classes
//! - **Scoring**: a weighted 0-100 harmony score with a category label
//! - **Tips**: catalog-driven improvement suggestions for free and premium users
//! - **Matching**: celebrity resemblance ranking by embedding and score proximity
//!
//! Landmark detection itself is out of scope; bring landmarks from any
//! face-mesh detector (MediaPipe topology).
//!
//! ## Pipeline
//!
//! 1. Validate the landmark set (468 finite points)
//! 2. Score symmetry per region and flag asymmetric zones
//! 3. Classify the face shape from width/height, jaw and forehead ratios
//! 4. Blend six component scores into the total
//! 5. Select tips from the catalog and rank celebrity matches
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use facial_harmony::{AnalyzerConfig, FaceInput, HarmonyAnalyzer, UserProfile};
//!
//! let config = AnalyzerConfig::load("harmony.toml")?;
//! let analyzer = HarmonyAnalyzer::from_config(config);
//!
//! let input: FaceInput = serde_json::from_str(&std::fs::read_to_string("face.json")?)?;
//! let report = analyzer.analyze(&input, &UserProfile::default())?;
//!
//! println!("{} ({})", report.score.total_score, report.score.category);
//! for tip in &report.tips {
//!     println!("- {}", tip.text);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Using the engines directly
//!
//! Every stage is usable on its own:
//!
//! ```rust
//! use facial_harmony::{
//!     Landmark, LandmarkSet, Point, ScoringEngine, ShapeEngine, SymmetryEngine,
//!     FACE_MESH_POINTS,
//! };
//!
//! // A flat outline: midline from forehead to chin, cheeks either side.
//! let mut points = vec![Point::new(0.0, 100.0); FACE_MESH_POINTS];
//! points[Landmark::ForeheadTop.index()] = Point::new(0.0, 0.0);
//! points[Landmark::ChinBottom.index()] = Point::new(0.0, 200.0);
//! points[Landmark::CheekLeft.index()] = Point::new(-95.0, 90.0);
//! points[Landmark::CheekRight.index()] = Point::new(95.0, 90.0);
//! let landmarks = LandmarkSet::new(points)?;
//!
//! let symmetry = SymmetryEngine::default().analyze(&landmarks)?;
//! let shape = ShapeEngine::new().analyze(&landmarks);
//! let score = ScoringEngine::default().calculate_score(&symmetry, &shape, &landmarks);
//!
//! assert_eq!(symmetry.score, 100.0);
//! assert_eq!(shape.ratios.width_height, 0.95);
//! println!("{} ({}), {}", score.total_score, score.category, shape.primary);
//! # Ok::<(), facial_harmony::Error>(())
//! ```

mod catalog;
mod config;
mod error;
pub mod geometry;
mod matching;
pub mod mesh;
mod pipeline;
mod scoring;
mod shape;
mod symmetry;
mod tips;
mod types;

pub use catalog::{load_entries, load_or_empty};
pub use config::{AnalyzerConfig, MatchingConfig};
pub use error::{Error, Result};
pub use matching::{
    cosine_similarity, CelebrityCatalog, CelebrityCatalogEntry, MatchEngine, MatchResult,
    SimilarFeature, MAX_MATCHES,
};
pub use mesh::{Landmark, Region, FACE_MESH_POINTS};
pub use pipeline::{FaceInput, HarmonyAnalyzer, HarmonyReport, ANALYSIS_VERSION};
pub use scoring::{
    ratio_score, structure_score, Category, ComponentScores, ScoreResult, ScoreWeights,
    ScoringEngine, NEUTRAL_SCORE,
};
pub use shape::{classify, FaceShape, ShapeEngine, ShapeRatios, ShapeResult};
pub use symmetry::{RegionScores, SymmetryConfig, SymmetryEngine, SymmetryResult};
pub use tips::{
    Tip, TipCatalog, TipCatalogEntry, TipLimits, TipTier, TipsEngine, UserProfile, FREE_TIP_LIMIT,
    PREMIUM_TIP_LIMIT,
};
pub use types::{LandmarkSet, Point};
