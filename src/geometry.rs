//! Planar geometry helpers shared by the analysis engines.

use crate::types::Point;

/// Euclidean distance between two points.
pub fn distance(a: &Point, b: &Point) -> f64 {
    a.distance(b)
}

/// Perpendicular distance from `p` to the infinite line through
/// `line_start` and `line_end`.
///
/// Returns `None` when the two line points coincide.
pub fn point_line_distance(p: &Point, line_start: &Point, line_end: &Point) -> Option<f64> {
    let direction = *line_end - *line_start;
    let length = direction.norm();
    if length == 0.0 {
        return None;
    }
    let offset = *line_start - *p;
    Some(direction.cross(&offset).abs() / length)
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-12);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_point_line_distance_vertical() {
        let top = Point::new(50.0, 0.0);
        let bottom = Point::new(50.0, 100.0);
        let d = point_line_distance(&Point::new(20.0, 30.0), &top, &bottom).unwrap();
        assert!((d - 30.0).abs() < 1e-12);

        // The line is infinite, so points past the segment still project.
        let d = point_line_distance(&Point::new(80.0, 250.0), &top, &bottom).unwrap();
        assert!((d - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_line_distance_diagonal() {
        let d = point_line_distance(
            &Point::new(0.0, 2.0),
            &Point::new(0.0, 0.0),
            &Point::new(2.0, 2.0),
        )
        .unwrap();
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_line() {
        let p = Point::new(1.0, 1.0);
        assert!(point_line_distance(&p, &p, &p).is_none());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(93.333_33, 1), 93.3);
        assert_eq!(round_to(0.946, 2), 0.95);
        assert_eq!(round_to(100.0, 1), 100.0);
    }
}
