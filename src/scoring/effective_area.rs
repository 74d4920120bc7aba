use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};
use crate::projection::ProjectionParams;
use crate::scan::ScanPose;

use super::visibility::plane_vector;

/// Scores how squarely a face confronts the scanner.
///
/// Returns `|n . d| / |d|^2` where `d` runs from the scan origin to the
/// face centroid. Back-facing faces score `0`, as do faces below the
/// scanner within `nadir_exclusion_deg` of straight down, which usually
/// belong to the floor under the tripod.
///
/// Not normalised by face size: compare scores of one face across scans,
/// never across faces.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if the centroid coincides with the
/// scan origin.
pub fn effective_area(
    normal: &Vector3,
    centroid: &Point3,
    scan: &ScanPose,
    params: &ProjectionParams,
) -> Result<f64> {
    let d = plane_vector(centroid, scan);
    let dot = normal.dot(&d);

    let r = d.x.hypot(d.y);
    let from_nadir = r.atan2(-d.z);
    if dot > 0.0 || (from_nadir < params.nadir_exclusion_deg.to_radians() && d.z < 0.0) {
        return Ok(0.0);
    }

    let len_sq = d.norm_squared();
    if len_sq <= 0.0 {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(dot.abs() / len_sq)
}
