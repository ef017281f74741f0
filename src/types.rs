use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mesh::{Landmark, FACE_MESH_POINTS};

/// A landmark position in pixel coordinates.
///
/// `z` carries the relative depth some extractors report; the analysis
/// engines only use `x` and `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub const fn with_depth(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Z component of the 2-D cross product `self x other`.
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::with_depth(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::with_depth(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::with_depth(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// The full set of face-mesh landmarks for one face.
///
/// Construction validates the point count and that every coordinate is
/// finite, so the engines can address any [`Landmark`] without bounds checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point>", into = "Vec<Point>")]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if points.len() != FACE_MESH_POINTS {
            return Err(Error::LandmarkCount {
                expected: FACE_MESH_POINTS,
                actual: points.len(),
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::NonFinitePoint { index });
        }
        Ok(Self { points })
    }

    pub fn num_landmarks(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, landmark: Landmark) -> Point {
        self.points[landmark.index()]
    }

    /// Distance between two named landmarks.
    pub fn span(&self, a: Landmark, b: Landmark) -> f64 {
        self.point(a).distance(&self.point(b))
    }

    /// Ratio of the horizontal nose-to-cheek distances (image-left over
    /// image-right). Values near 1.0 indicate a frontal pose.
    pub fn frontal_ratio(&self) -> f64 {
        let nose = self.point(Landmark::NoseTip);
        let left = (nose.x - self.point(Landmark::CheekLeft).x).abs();
        let right = (self.point(Landmark::CheekRight).x - nose.x).abs();
        left / (right + 1e-6)
    }

    /// In-plane head roll: angle of the outer-eye-corner line in degrees.
    pub fn roll_degrees(&self) -> f64 {
        let left = self.point(Landmark::LeftEyeOuter);
        let right = self.point(Landmark::RightEyeOuter);
        (right.y - left.y).atan2(right.x - left.x).to_degrees()
    }
}

impl TryFrom<Vec<Point>> for LandmarkSet {
    type Error = Error;

    fn try_from(points: Vec<Point>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<LandmarkSet> for Vec<Point> {
    fn from(set: LandmarkSet) -> Self {
        set.points
    }
}

impl std::ops::Index<Landmark> for LandmarkSet {
    type Output = Point;

    fn index(&self, landmark: Landmark) -> &Self::Output {
        &self.points[landmark.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_set() -> Vec<Point> {
        vec![Point::new(1.0, 1.0); FACE_MESH_POINTS]
    }

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 4.0);

        let sum = a + b;
        assert_eq!(sum.x, 4.0);
        assert_eq!(sum.y, 6.0);

        let diff = b - a;
        assert_eq!(diff.x, 2.0);
        assert_eq!(diff.y, 2.0);

        let scaled = a * 2.0;
        assert_eq!(scaled.x, 2.0);
        assert_eq!(scaled.y, 4.0);

        assert!((Point::new(3.0, 4.0).norm() - 5.0).abs() < 1e-12);
        assert_eq!(Point::new(1.0, 0.0).cross(&Point::new(0.0, 1.0)), 1.0);
    }

    #[test]
    fn rejects_wrong_count() {
        let err = LandmarkSet::new(vec![Point::zero(); 68]).unwrap_err();
        assert!(matches!(
            err,
            Error::LandmarkCount {
                expected: 468,
                actual: 68
            }
        ));
    }

    #[test]
    fn rejects_non_finite() {
        let mut points = flat_set();
        points[152].y = f64::NAN;
        let err = LandmarkSet::new(points).unwrap_err();
        assert!(matches!(err, Error::NonFinitePoint { index: 152 }));
    }

    #[test]
    fn deserializes_with_validation() {
        let json = serde_json::to_string(&flat_set()).unwrap();
        let set: LandmarkSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set.num_landmarks(), FACE_MESH_POINTS);

        let short = r#"[{"x": 1.0, "y": 2.0}]"#;
        assert!(serde_json::from_str::<LandmarkSet>(short).is_err());
    }

    #[test]
    fn pose_measurements() {
        let mut points = flat_set();
        points[Landmark::NoseTip.index()] = Point::new(100.0, 100.0);
        points[Landmark::CheekLeft.index()] = Point::new(40.0, 100.0);
        points[Landmark::CheekRight.index()] = Point::new(160.0, 100.0);
        points[Landmark::LeftEyeOuter.index()] = Point::new(50.0, 80.0);
        points[Landmark::RightEyeOuter.index()] = Point::new(150.0, 180.0);
        let set = LandmarkSet::new(points).unwrap();

        assert!((set.frontal_ratio() - 1.0).abs() < 1e-6);
        assert!((set.roll_degrees() - 45.0).abs() < 1e-9);
        assert_eq!(set[Landmark::NoseTip], Point::new(100.0, 100.0));
    }
}
