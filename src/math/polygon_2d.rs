use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed 2D polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The polygon is
/// treated as cyclic: the last vertex connects back to the first.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the unsigned area of a closed 2D polygon.
#[must_use]
pub fn area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Returns `true` if every point sits at the origin.
#[must_use]
pub fn is_all_zero(points: &[Point2]) -> bool {
    points
        .iter()
        .all(|p| p.x.abs() < TOLERANCE && p.y.abs() < TOLERANCE)
}
