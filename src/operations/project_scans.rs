use tracing::info;

use crate::error::Result;
use crate::host::MeshHost;
use crate::jitter::PlaceholderJitter;
use crate::projection::ProjectionParams;
use crate::scan::{ScanPose, ScanRegistry};

use super::{DeselectAll, SelectScanGroup, UvWriteReport, WriteScanUvs};

/// Authors one UV channel per scan from the scan vertex groups.
///
/// For each scan, in registry order: clear the selection, select the
/// scan's group, write the scan's UV channel, clear the selection again.
/// Expects the groups produced by [`AssignScans`](super::AssignScans).
pub struct ProjectScans<'a> {
    registry: &'a ScanRegistry,
    only: Option<Vec<String>>,
    params: ProjectionParams,
    seed: Option<u64>,
}

impl<'a> ProjectScans<'a> {
    /// Creates a new `ProjectScans` operation covering every scan.
    #[must_use]
    pub fn new(registry: &'a ScanRegistry) -> Self {
        Self {
            registry,
            only: None,
            params: ProjectionParams::default(),
            seed: None,
        }
    }

    /// Restricts the run to the named scans. Registry order still applies.
    #[must_use]
    pub fn with_scans<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets custom projection parameters.
    #[must_use]
    pub fn with_params(mut self, params: ProjectionParams) -> Self {
        self.params = params;
        self
    }

    /// Seeds the placeholder jitter for reproducible output.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Executes the operation, returning a report per scan written.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::NotFound` for an unknown scan name, before any
    /// mesh data is touched. Propagates host errors.
    pub fn execute<H: MeshHost>(&self, host: &mut H) -> Result<Vec<(String, UvWriteReport)>> {
        let scans = self.scans()?;
        let mut jitter = match self.seed {
            Some(seed) => PlaceholderJitter::seeded(seed, &self.params),
            None => PlaceholderJitter::from_entropy(&self.params),
        };

        let mut reports = Vec::with_capacity(scans.len());
        for scan in scans {
            DeselectAll::new().execute(host)?;
            SelectScanGroup::new(scan.name()).execute(host)?;
            let report = WriteScanUvs::new(scan)
                .with_params(self.params)
                .write(host, &mut jitter)?;
            DeselectAll::new().execute(host)?;
            host.commit()?;
            reports.push((scan.name().to_owned(), report));
        }

        info!(scans = reports.len(), "scan UV channels written");
        Ok(reports)
    }

    fn scans(&self) -> Result<Vec<&'a ScanPose>> {
        match &self.only {
            None => Ok(self.registry.iter().collect()),
            Some(names) => {
                for name in names {
                    self.registry.get(name)?;
                }
                Ok(self
                    .registry
                    .iter()
                    .filter(|s| names.iter().any(|n| n == s.name()))
                    .collect())
            }
        }
    }
}
