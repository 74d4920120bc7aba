use crate::math::{polygon_2d, Point2, Point3, Vector3};
use crate::projection::{scoring_face_uvs, EquirectProjector, Uv};
use crate::scan::ScanPose;

use super::visibility::is_back_facing;

/// A face's footprint in one scan's texture.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceFootprint {
    /// Polygon area in UV space, a proxy for the texels covering the face.
    pub area: f64,
    /// Per-corner UVs in corner order, seam-snapped.
    pub uvs: Vec<Uv>,
}

/// Measures a face's area in a scan's UV space.
///
/// Back-facing faces get all-zero UVs and zero area. The area ignores
/// occlusion and texture alpha.
#[must_use]
pub fn uv_footprint(
    projector: &EquirectProjector,
    scan: &ScanPose,
    normal: &Vector3,
    centroid: &Point3,
    corners: &[Point3],
) -> FaceFootprint {
    if is_back_facing(normal, centroid, scan) {
        return FaceFootprint {
            area: 0.0,
            uvs: vec![Uv::new(0.0, 0.0); corners.len()],
        };
    }

    let uvs = scoring_face_uvs(projector, scan, centroid, corners);
    let points: Vec<Point2> = uvs.iter().copied().map(Uv::to_point).collect();
    let area = if polygon_2d::is_all_zero(&points) {
        0.0
    } else {
        polygon_2d::area(&points)
    };
    FaceFootprint { area, uvs }
}
