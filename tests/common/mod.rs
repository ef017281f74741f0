//! Synthetic face-mesh landmarks for integration tests.
//!
//! Faces are built mirror-symmetric about x = 0, forehead top at the origin
//! and chin straight below it. Widths are half-widths from the midline.

#![allow(dead_code)]

use facial_harmony::{Landmark, LandmarkSet, Point, Region, FACE_MESH_POINTS};

#[derive(Debug, Clone)]
pub struct FaceBuilder {
    pub height: f64,
    pub cheek: f64,
    pub jaw: f64,
    pub forehead: f64,
    pub eye_outer: f64,
    pub eye_inner: f64,
    pub nose: f64,
    pub mouth: f64,
    pub nose_tip_x: f64,
    pub skews: Vec<(Region, f64)>,
}

impl Default for FaceBuilder {
    /// Compact face with a strong jaw and ideal feature proportions.
    fn default() -> Self {
        Self {
            height: 200.0,
            cheek: 95.0,
            jaw: 90.0,
            forehead: 85.0,
            eye_outer: 75.0,
            eye_inner: 25.0,
            nose: 25.0,
            mouth: 38.0,
            nose_tip_x: 0.0,
            skews: Vec::new(),
        }
    }
}

impl FaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scale the right-hand side of a region's contour away from the midline.
    pub fn skew(mut self, region: Region, factor: f64) -> Self {
        self.skews.push((region, factor));
        self
    }

    /// Shift the nose tip sideways, as in a turned head.
    pub fn turned(mut self, nose_tip_x: f64) -> Self {
        self.nose_tip_x = nose_tip_x;
        self
    }

    pub fn points(&self) -> Vec<Point> {
        let mut points = vec![Point::new(0.0, self.height / 2.0); FACE_MESH_POINTS];

        for (r, region) in Region::ALL.into_iter().enumerate() {
            let (left, right) = region.contours();
            for (k, (&l, &rt)) in left.iter().zip(right).enumerate() {
                if l == rt {
                    continue;
                }
                let dx = 20.0 + 6.0 * k as f64;
                let y = 40.0 + 30.0 * r as f64 + 4.0 * k as f64;
                points[l] = Point::new(-dx, y);
                points[rt] = Point::new(dx, y);
            }
        }

        let mut pair = |left: Landmark, right: Landmark, half_width: f64, y: f64| {
            points[left.index()] = Point::new(-half_width, y);
            points[right.index()] = Point::new(half_width, y);
        };
        pair(Landmark::CheekLeft, Landmark::CheekRight, self.cheek, 90.0);
        pair(Landmark::JawLeft, Landmark::JawRight, self.jaw, 150.0);
        pair(Landmark::ForeheadLeft, Landmark::ForeheadRight, self.forehead, 20.0);
        pair(Landmark::LeftEyeOuter, Landmark::RightEyeOuter, self.eye_outer, 70.0);
        pair(Landmark::LeftEyeInner, Landmark::RightEyeInner, self.eye_inner, 70.0);
        pair(Landmark::NoseAlaLeft, Landmark::NoseAlaRight, self.nose, 115.0);
        pair(Landmark::MouthLeft, Landmark::MouthRight, self.mouth, 140.0);

        points[Landmark::ForeheadTop.index()] = Point::new(0.0, 0.0);
        points[Landmark::ChinBottom.index()] = Point::new(0.0, self.height);
        points[Landmark::NoseTip.index()] = Point::new(self.nose_tip_x, 110.0);

        for &(region, factor) in &self.skews {
            let (left, right) = region.contours();
            for (&l, &rt) in left.iter().zip(right) {
                if l != rt {
                    points[rt].x *= factor;
                }
            }
        }

        points
    }

    pub fn build(&self) -> LandmarkSet {
        LandmarkSet::new(self.points()).expect("synthetic face is valid")
    }
}

pub fn data_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(name)
}
