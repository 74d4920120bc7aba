use crate::math::Point3;
use crate::scan::ScanPose;

use super::{EquirectProjector, Uv};

/// Moves `u` onto the same winding branch as `centroid_u`.
///
/// Tries the offsets `-1`, `0`, `1` in order and keeps the first one that
/// lands within `tolerance` of the centroid. If none does, `u` is returned
/// unchanged.
#[must_use]
pub fn rewrap_u(u: f64, centroid_u: f64, tolerance: f64) -> f64 {
    [-1.0, 0.0, 1.0]
        .into_iter()
        .map(|offset| u + offset)
        .find(|shifted| (shifted - centroid_u).abs() < tolerance)
        .unwrap_or(u)
}

/// Snaps a `u` lying within `threshold` of the seam to the centroid's side.
///
/// A centroid in the lower half of the image pulls the vertex to `0`,
/// otherwise to `1`.
#[must_use]
pub fn snap_u(u: f64, centroid_u: f64, threshold: f64) -> f64 {
    if u.abs() < threshold || (u - 1.0).abs() < threshold {
        if (0.0..1.0).contains(&(centroid_u + 0.5)) {
            0.0
        } else {
            1.0
        }
    } else {
        u
    }
}

/// Projects a face's corners for texturing, seam-corrected against the
/// face centroid.
///
/// The centroid itself is projected rather than averaging corner UVs, so
/// uneven vertex spacing does not bias the reference branch. The result is
/// in corner order.
#[must_use]
pub fn unwrap_face_uvs(
    projector: &EquirectProjector,
    scan: &ScanPose,
    centroid: &Point3,
    corners: &[Point3],
) -> Vec<Uv> {
    let tolerance = projector.params().seam_tolerance;
    let centroid_uv = projector.project(centroid, scan);
    corners
        .iter()
        .map(|corner| {
            let uv = projector.project(corner, scan);
            Uv::new(rewrap_u(uv.u, centroid_uv.u, tolerance), uv.v)
        })
        .collect()
}

/// Projects a face's corners for area measurement.
///
/// Keeps `u` inside `[0, 1]` and snaps corners sitting on the seam to the
/// centroid's side, so a face touching the seam does not collapse into a
/// sliver or stretch across the whole image.
#[must_use]
pub fn scoring_face_uvs(
    projector: &EquirectProjector,
    scan: &ScanPose,
    centroid: &Point3,
    corners: &[Point3],
) -> Vec<Uv> {
    let threshold = projector.params().seam_snap;
    let centroid_uv = projector.project(centroid, scan);
    corners
        .iter()
        .map(|corner| {
            let uv = projector.project(corner, scan);
            Uv::new(snap_u(uv.u, centroid_uv.u, threshold), uv.v)
        })
        .collect()
}
