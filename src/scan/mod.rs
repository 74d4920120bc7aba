mod registry;

pub use registry::{reference_survey, ScanRecord, ScanRegistry, REFERENCE_SURVEY};

use crate::math::Point3;

/// A panoramic scanner position.
///
/// The scanner is assumed to stand upright: `heading_deg` is a rotation
/// about the vertical (Z) axis and places the texture seam directly behind
/// the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPose {
    name: String,
    origin: Point3,
    heading_deg: f64,
}

impl ScanPose {
    /// Creates a new scan pose.
    #[must_use]
    pub fn new(name: impl Into<String>, origin: Point3, heading_deg: f64) -> Self {
        Self {
            name: name.into(),
            origin,
            heading_deg,
        }
    }

    /// Returns the scan name, also used as its vertex group and UV channel name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sensor origin.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the heading in degrees.
    #[must_use]
    pub fn heading_deg(&self) -> f64 {
        self.heading_deg
    }

    /// Returns the heading in radians.
    #[must_use]
    pub fn heading_rad(&self) -> f64 {
        self.heading_deg.to_radians()
    }
}
