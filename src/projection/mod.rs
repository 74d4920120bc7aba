mod equirect;
mod seam;

pub use equirect::EquirectProjector;
pub use seam::{rewrap_u, scoring_face_uvs, snap_u, unwrap_face_uvs};

use crate::math::Point2;

/// A texture coordinate in a scan's equirectangular image.
///
/// Both components are nominally in `[0, 1]`; a seam-corrected `u` may
/// leave that range by up to one full turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uv {
    pub u: f64,
    pub v: f64,
}

impl Uv {
    /// Creates a new UV coordinate.
    #[must_use]
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Converts to a 2D point for polygon measurements.
    #[must_use]
    pub fn to_point(self) -> Point2 {
        Point2::new(self.u, self.v)
    }
}

impl From<Uv> for Point2 {
    fn from(uv: Uv) -> Self {
        uv.to_point()
    }
}

/// Tuned constants controlling projection, seam handling and scoring.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionParams {
    /// Horizontal distance from the scan axis below which a point is
    /// treated as sitting on a pole.
    pub pole_radius: f64,
    /// Maximum `u` distance (in turns) between a vertex and its face
    /// centroid after seam correction. Must stay well below `0.5`.
    pub seam_tolerance: f64,
    /// Distance from the `0`/`1` boundary within which the scoring variant
    /// snaps a vertex to the centroid's side of the seam.
    pub seam_snap: f64,
    /// Faces below the scanner whose centroid lies within this angle of
    /// straight down are excluded from the dot-magnitude score.
    pub nadir_exclusion_deg: f64,
    /// Base coordinate of the placeholder UV written for rejected faces.
    pub placeholder: Uv,
    /// Upper bound of the random offset added to each placeholder axis.
    pub placeholder_spread: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            pole_radius: 0.01,
            seam_tolerance: 0.25,
            seam_snap: 0.0001,
            nadir_exclusion_deg: 30.0,
            placeholder: Uv::new(0.5, 0.0),
            placeholder_spread: 0.01,
        }
    }
}
