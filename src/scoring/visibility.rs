use crate::math::{Point3, Vector3};
use crate::scan::ScanPose;

/// Returns the vector from the scan origin to `centroid`.
#[must_use]
pub fn plane_vector(centroid: &Point3, scan: &ScanPose) -> Vector3 {
    centroid - scan.origin()
}

/// Returns `true` if a face points away from the scanner.
///
/// A face is rejected when its normal has a positive component along the
/// direction from the scanner to the face centroid. A face seen exactly
/// edge-on is kept.
#[must_use]
pub fn is_back_facing(normal: &Vector3, centroid: &Point3, scan: &ScanPose) -> bool {
    normal.dot(&plane_vector(centroid, scan)) > 0.0
}
