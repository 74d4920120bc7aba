use std::collections::HashSet;

use crate::error::{Result, ScanError};
use crate::math::Point3;

use super::ScanPose;

/// A literal scan table row: `(name, x, y, z, heading_deg)`.
pub type ScanRecord<'a> = (&'a str, f64, f64, f64, f64);

/// Scanner positions of the reference survey, exported from the registration
/// software by hand.
pub const REFERENCE_SURVEY: [ScanRecord<'static>; 10] = [
    ("scan1", -3.679_692, 3.942_834, 1.393_807, 58.353_693),
    ("scan2", -0.846_34, 7.649_932, 1.213_567, 72.287_435),
    ("scan3", 1.856_701, 6.924_198, 0.391_366, 36.992_808),
    ("scan4", 5.289_296, 2.512_209, -0.695_059, 36.801_182),
    ("scan5", 6.022_316, -1.458_117, -1.520_517, 103.643_01),
    ("scan6", 1.602_67, -1.844_52, -0.842_9, 165.616_499),
    ("scan7", -0.815_092, -1.530_523, -0.203_589, 117.531_972),
    ("scan8", -3.134_09, 1.856_42, 0.871_17, 144.713_466),
    ("scan9", 4.366_643, 5.562_8, -0.289_433, 142.801_249),
    ("scan10", 3.679_19, -3.942_931, -1.396_275, 126.174_026),
];

/// An ordered, read-only list of scan poses with unique names.
///
/// Registry order is significant: when two scans score a face equally,
/// the earlier one wins.
#[derive(Debug, Clone, Default)]
pub struct ScanRegistry {
    scans: Vec<ScanPose>,
}

impl ScanRegistry {
    /// Creates a registry from a list of poses.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::EmptyName` or `ScanError::DuplicateName` if a pose
    /// name is empty or repeated.
    pub fn new(scans: Vec<ScanPose>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(scans.len());
        for scan in &scans {
            if scan.name().is_empty() {
                return Err(ScanError::EmptyName.into());
            }
            if !seen.insert(scan.name()) {
                return Err(ScanError::DuplicateName(scan.name().to_owned()).into());
            }
        }
        Ok(Self { scans })
    }

    /// Builds a registry from a literal `(name, x, y, z, heading_deg)` table.
    ///
    /// # Errors
    ///
    /// Same as [`ScanRegistry::new`].
    pub fn from_table(table: &[ScanRecord<'_>]) -> Result<Self> {
        Self::new(
            table
                .iter()
                .map(|&(name, x, y, z, heading)| ScanPose::new(name, Point3::new(x, y, z), heading))
                .collect(),
        )
    }

    /// Returns the poses in registry order.
    #[must_use]
    pub fn scans(&self) -> &[ScanPose] {
        &self.scans
    }

    /// Iterates over the poses in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScanPose> {
        self.scans.iter()
    }

    /// Returns the number of scans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scans.len()
    }

    /// Returns `true` if the registry holds no scans.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    /// Looks up a scan by name.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::NotFound` if no scan has this name.
    pub fn get(&self, name: &str) -> Result<&ScanPose> {
        self.scans
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| ScanError::NotFound(name.to_owned()).into())
    }
}

impl<'a> IntoIterator for &'a ScanRegistry {
    type Item = &'a ScanPose;
    type IntoIter = std::slice::Iter<'a, ScanPose>;

    fn into_iter(self) -> Self::IntoIter {
        self.scans.iter()
    }
}

/// Returns the registry of the reference survey.
#[must_use]
pub fn reference_survey() -> ScanRegistry {
    ScanRegistry {
        scans: REFERENCE_SURVEY
            .iter()
            .map(|&(name, x, y, z, heading)| ScanPose::new(name, Point3::new(x, y, z), heading))
            .collect(),
    }
}
