mod effective_area;
mod uv_area;
mod visibility;

pub use effective_area::effective_area;
pub use uv_area::{uv_footprint, FaceFootprint};
pub use visibility::{is_back_facing, plane_vector};

use crate::error::Result;
use crate::host::{FaceGeometry, MeshHost};
use crate::projection::EquirectProjector;
use crate::scan::ScanPose;

/// How a face's ownership by a scan is measured.
///
/// Scores are only comparable between scans for the same face, and only
/// within one metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreMetric {
    /// View-angle weighted magnitude, see [`effective_area`].
    #[default]
    DotMagnitude,
    /// Polygon area in the scan's UV space, see [`uv_footprint`].
    UvPolygonArea,
}

impl ScoreMetric {
    /// Scores a face against a scan. Rejected faces score `0`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the dot-magnitude metric is used
    /// and the face centroid coincides with the scan origin.
    pub fn score<H: MeshHost + ?Sized>(
        self,
        projector: &EquirectProjector,
        face: &FaceGeometry<H>,
        scan: &ScanPose,
    ) -> Result<f64> {
        match self {
            Self::DotMagnitude => effective_area(&face.normal, &face.centroid, scan, projector.params()),
            Self::UvPolygonArea => Ok(uv_footprint(
                projector,
                scan,
                &face.normal,
                &face.centroid,
                &face.positions,
            )
            .area),
        }
    }
}
