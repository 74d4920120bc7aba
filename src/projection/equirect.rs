use std::f64::consts::{PI, TAU};

use crate::math::Point3;
use crate::scan::ScanPose;

use super::{ProjectionParams, Uv};

/// Maps 3D points into a scan's equirectangular texture space.
///
/// `u` is the horizontal angle measured from the seam behind the scanner,
/// `v` runs from `0` (straight down) to `1` (straight up).
#[derive(Debug, Clone, Copy, Default)]
pub struct EquirectProjector {
    params: ProjectionParams,
}

impl EquirectProjector {
    /// Creates a projector with the given parameters.
    #[must_use]
    pub fn new(params: ProjectionParams) -> Self {
        Self { params }
    }

    /// Returns the projection parameters.
    #[must_use]
    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Projects a point as seen from `scan`.
    ///
    /// Points within `pole_radius` of the scan's vertical axis get `u = 0.5`
    /// and `v` pinned to the nearer pole. Otherwise `u` is wrapped once into
    /// `[0, 1]`; a point exactly on the seam keeps `u = 1`.
    #[must_use]
    pub fn project(&self, point: &Point3, scan: &ScanPose) -> Uv {
        let d = point - scan.origin();
        let r = d.x.hypot(d.y);

        if r < self.params.pole_radius {
            let v = if d.z > 0.0 { 1.0 } else { 0.0 };
            return Uv::new(0.5, v);
        }

        let mut u = (d.y.atan2(-d.x) - scan.heading_rad() + PI) / TAU;
        if u < 0.0 {
            u += 1.0;
        }
        let v = r.atan2(-d.z) / PI;
        Uv::new(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn origin_scan(heading_deg: f64) -> ScanPose {
        ScanPose::new("s", Point3::origin(), heading_deg)
    }

    #[test]
    fn point_on_seam_stays_at_one() {
        let uv = EquirectProjector::default().project(&Point3::new(1.0, 0.0, 0.0), &origin_scan(0.0));
        assert_abs_diff_eq!(uv.u, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(uv.v, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn quarter_turn() {
        let uv = EquirectProjector::default().project(&Point3::new(0.0, 1.0, 0.0), &origin_scan(0.0));
        assert_abs_diff_eq!(uv.u, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn facing_direction_maps_to_centre() {
        let uv = EquirectProjector::default().project(&Point3::new(-2.0, 0.0, 0.0), &origin_scan(0.0));
        assert_abs_diff_eq!(uv.u, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn poles() {
        let p = EquirectProjector::default();
        let scan = origin_scan(0.0);
        assert_eq!(p.project(&Point3::new(0.0, 0.0, 1.0), &scan), Uv::new(0.5, 1.0));
        assert_eq!(p.project(&Point3::new(0.0, 0.0, -1.0), &scan), Uv::new(0.5, 0.0));
        assert_eq!(p.project(&Point3::new(0.005, 0.0, 0.0), &scan), Uv::new(0.5, 0.0));
    }

    #[test]
    fn elevation_maps_to_v() {
        let p = EquirectProjector::default();
        let scan = origin_scan(0.0);
        let up = p.project(&Point3::new(-1.0, 0.0, 1.0), &scan);
        let down = p.project(&Point3::new(-1.0, 0.0, -1.0), &scan);
        assert_abs_diff_eq!(up.v, 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(down.v, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn heading_rotates_u_and_wraps() {
        let p = EquirectProjector::default();
        // (0, 1, 0) sits at 0.75 with heading 0; a 180 degree heading shifts it by half a turn.
        let uv = p.project(&Point3::new(0.0, 1.0, 0.0), &origin_scan(180.0));
        assert_abs_diff_eq!(uv.u, 0.25, epsilon = 1e-12);
        let uv = p.project(&Point3::new(0.0, -1.0, 0.0), &origin_scan(180.0));
        assert_abs_diff_eq!(uv.u, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn offset_origin() {
        let p = EquirectProjector::default();
        let scan = ScanPose::new("s", Point3::new(10.0, 10.0, 5.0), 0.0);
        let uv = p.project(&Point3::new(10.0, 11.0, 5.0), &scan);
        assert_abs_diff_eq!(uv.u, 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(uv.v, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn v_stays_in_unit_range() {
        let p = EquirectProjector::default();
        let scan = ScanPose::new("s", Point3::new(0.3, -0.2, 1.1), 37.0);
        for i in 0..24 {
            for j in 0..13 {
                let a = f64::from(i) * TAU / 24.0;
                let z = f64::from(j) - 6.0;
                let pt = Point3::new(0.3 + 2.0 * a.cos(), -0.2 + 2.0 * a.sin(), z);
                let uv = p.project(&pt, &scan);
                assert!((0.0..=1.0).contains(&uv.v), "v out of range: {}", uv.v);
                assert!((0.0..=1.0).contains(&uv.u), "u out of range: {}", uv.u);
            }
        }
    }

    #[test]
    fn custom_pole_radius() {
        let p = EquirectProjector::new(ProjectionParams {
            pole_radius: 0.5,
            ..ProjectionParams::default()
        });
        let uv = p.project(&Point3::new(0.3, 0.0, 2.0), &origin_scan(0.0));
        assert_eq!(uv, Uv::new(0.5, 1.0));
    }
}
