//! Left/right facial symmetry relative to the vertical midline.
//!
//! The midline runs from the forehead top to the chin bottom. For every
//! mirrored landmark pair in a region, the perpendicular distances of the
//! two points to that line are compared; the mean relative difference is
//! mapped onto a 0-100 region score.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{point_line_distance, round_to};
use crate::mesh::{Landmark, Region};
use crate::types::{LandmarkSet, Point};

/// Score points lost per unit of mean relative difference.
/// A mean difference of 0.25 or more gives a region score of 0.
pub const DIFF_TOLERANCE_MULTIPLIER: f64 = 400.0;

/// Regions scoring below this are reported as asymmetry zones.
pub const ASYMMETRY_THRESHOLD: f64 = 85.0;

const EYES_WEIGHT: f64 = 0.30;
const JAW_WEIGHT: f64 = 0.30;
const BROWS_WEIGHT: f64 = 0.20;
const LIPS_WEIGHT: f64 = 0.20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymmetryConfig {
    pub tolerance_multiplier: f64,
    pub asymmetry_threshold: f64,
}

impl Default for SymmetryConfig {
    fn default() -> Self {
        Self {
            tolerance_multiplier: DIFF_TOLERANCE_MULTIPLIER,
            asymmetry_threshold: ASYMMETRY_THRESHOLD,
        }
    }
}

/// Per-region symmetry scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionScores {
    pub eyes: f64,
    pub jaw: f64,
    pub brows: f64,
    pub lips: f64,
}

impl RegionScores {
    pub fn get(&self, region: Region) -> f64 {
        match region {
            Region::Eyes => self.eyes,
            Region::Jawline => self.jaw,
            Region::Eyebrows => self.brows,
            Region::Lips => self.lips,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetryResult {
    /// Weighted composite in [0, 100], rounded to one decimal.
    pub score: f64,
    /// Regions below the asymmetry threshold, in eyes/jaw/brows/lips order.
    pub asymmetry_zones: Vec<Region>,
    pub details: RegionScores,
}

impl SymmetryResult {
    pub fn has_asymmetry(&self) -> bool {
        !self.asymmetry_zones.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymmetryEngine {
    config: SymmetryConfig,
}

impl SymmetryEngine {
    pub fn new(config: SymmetryConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, landmarks: &LandmarkSet) -> Result<SymmetryResult> {
        let top = landmarks.point(Landmark::ForeheadTop);
        let bottom = landmarks.point(Landmark::ChinBottom);
        if top.distance(&bottom) == 0.0 {
            return Err(Error::DegenerateMidline);
        }

        let mut scores = [0.0; 4];
        for (slot, region) in scores.iter_mut().zip(Region::ALL) {
            let (left, right) = region.contours();
            *slot = self.region_score(landmarks, region, left, right, (&top, &bottom))?;
        }
        let [eyes, jaw, brows, lips] = scores;

        let total =
            eyes * EYES_WEIGHT + jaw * JAW_WEIGHT + brows * BROWS_WEIGHT + lips * LIPS_WEIGHT;

        let asymmetry_zones: Vec<Region> = Region::ALL
            .iter()
            .zip(scores)
            .filter(|(_, score)| *score < self.config.asymmetry_threshold)
            .map(|(region, _)| *region)
            .collect();

        let result = SymmetryResult {
            score: round_to(total.clamp(0.0, 100.0), 1),
            asymmetry_zones,
            details: RegionScores {
                eyes: round_to(eyes, 1),
                jaw: round_to(jaw, 1),
                brows: round_to(brows, 1),
                lips: round_to(lips, 1),
            },
        };
        debug!(score = result.score, zones = ?result.asymmetry_zones, "symmetry analyzed");
        Ok(result)
    }

    /// Score one region from its mirrored contour indices.
    pub(crate) fn region_score(
        &self,
        landmarks: &LandmarkSet,
        region: Region,
        left: &[usize],
        right: &[usize],
        midline: (&Point, &Point),
    ) -> Result<f64> {
        if left.len() != right.len() || left.is_empty() {
            return Err(Error::RegionMismatch {
                region: region.name(),
                left: left.len(),
                right: right.len(),
            });
        }

        let points = landmarks.points();
        let (top, bottom) = midline;
        let mut total_diff = 0.0;
        for (&l, &r) in left.iter().zip(right) {
            let d_left = point_line_distance(&points[l], top, bottom).ok_or(Error::DegenerateMidline)?;
            let d_right =
                point_line_distance(&points[r], top, bottom).ok_or(Error::DegenerateMidline)?;

            let avg = (d_left + d_right) / 2.0;
            if avg > 0.0 {
                total_diff += (d_left - d_right).abs() / avg;
            }
        }
        let avg_diff = total_diff / left.len() as f64;

        Ok((100.0 - avg_diff * self.config.tolerance_multiplier).clamp(0.0, 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::FACE_MESH_POINTS;

    /// Every point mirrored across x = 100, with the midline along it.
    fn mirrored_face() -> Vec<Point> {
        let mut points = vec![Point::new(100.0, 100.0); FACE_MESH_POINTS];
        points[Landmark::ForeheadTop.index()] = Point::new(100.0, 0.0);
        points[Landmark::ChinBottom.index()] = Point::new(100.0, 200.0);
        for region in Region::ALL {
            let (left, right) = region.contours();
            for (k, (&l, &r)) in left.iter().zip(right).enumerate() {
                if l == r {
                    continue;
                }
                let dx = 10.0 + 7.0 * k as f64;
                let y = 40.0 + 15.0 * k as f64;
                points[l] = Point::new(100.0 - dx, y);
                points[r] = Point::new(100.0 + dx, y);
            }
        }
        points
    }

    #[test]
    fn mirrored_face_is_perfectly_symmetric() {
        let set = LandmarkSet::new(mirrored_face()).unwrap();
        let result = SymmetryEngine::default().analyze(&set).unwrap();
        assert_eq!(result.score, 100.0);
        assert!(result.asymmetry_zones.is_empty());
        for region in Region::ALL {
            assert_eq!(result.details.get(region), 100.0);
        }
    }

    #[test]
    fn doubled_distances_zero_the_region() {
        let mut points = mirrored_face();
        let (left, _) = Region::Lips.contours();
        for &l in left {
            points[l].x = 100.0 - 2.0 * (100.0 - points[l].x);
        }
        let set = LandmarkSet::new(points).unwrap();
        let result = SymmetryEngine::default().analyze(&set).unwrap();

        assert_eq!(result.details.lips, 0.0);
        assert_eq!(result.asymmetry_zones, vec![Region::Lips]);
        assert_eq!(result.score, 80.0);
    }

    #[test]
    fn small_offsets_score_linearly() {
        let mut points = mirrored_face();
        let (left, right) = Region::Eyebrows.contours();
        // d_left = 1.05 * d, d_right = 0.95 * d  =>  relative diff 0.1
        for (&l, &r) in left.iter().zip(right) {
            let d = 100.0 - points[l].x;
            points[l].x = 100.0 - 1.05 * d;
            points[r].x = 100.0 + 0.95 * d;
        }
        let set = LandmarkSet::new(points).unwrap();
        let result = SymmetryEngine::default().analyze(&set).unwrap();
        assert!((result.details.brows - 60.0).abs() < 1e-6);
        assert_eq!(result.asymmetry_zones, vec![Region::Eyebrows]);
    }

    #[test]
    fn custom_threshold() {
        let mut points = mirrored_face();
        let (left, right) = Region::Eyes.contours();
        for (&l, &r) in left.iter().zip(right) {
            let d = 100.0 - points[l].x;
            points[l].x = 100.0 - 1.01 * d;
            points[r].x = 100.0 + 0.99 * d;
        }
        let set = LandmarkSet::new(points).unwrap();

        let default = SymmetryEngine::default().analyze(&set).unwrap();
        assert!(default.asymmetry_zones.is_empty());

        let strict = SymmetryEngine::new(SymmetryConfig {
            asymmetry_threshold: 99.0,
            ..SymmetryConfig::default()
        })
        .analyze(&set)
        .unwrap();
        assert_eq!(strict.asymmetry_zones, vec![Region::Eyes]);
    }

    #[test]
    fn degenerate_midline_is_an_error() {
        let mut points = mirrored_face();
        points[Landmark::ChinBottom.index()] = points[Landmark::ForeheadTop.index()];
        let set = LandmarkSet::new(points).unwrap();
        let err = SymmetryEngine::default().analyze(&set).unwrap_err();
        assert!(matches!(err, Error::DegenerateMidline));
    }

    #[test]
    fn mismatched_contours_are_rejected() {
        let set = LandmarkSet::new(mirrored_face()).unwrap();
        let top = set.point(Landmark::ForeheadTop);
        let bottom = set.point(Landmark::ChinBottom);
        let err = SymmetryEngine::default()
            .region_score(&set, Region::Eyes, &[33, 160], &[263], (&top, &bottom))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::RegionMismatch {
                region: "Eyes",
                left: 2,
                right: 1
            }
        ));
    }
}
