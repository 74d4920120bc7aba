use tracing::{debug, info, trace};

use crate::error::Result;
use crate::host::{FaceGeometry, MeshHost};
use crate::jitter::PlaceholderJitter;
use crate::projection::{unwrap_face_uvs, EquirectProjector, ProjectionParams};
use crate::scan::ScanPose;
use crate::scoring::is_back_facing;

/// Face counts from one UV authoring pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UvWriteReport {
    /// Selected faces given projected, seam-corrected UVs.
    pub projected: usize,
    /// Selected faces facing away from the scan, given placeholder UVs.
    pub rejected: usize,
    /// Unselected faces, given placeholder UVs.
    pub unselected: usize,
}

/// Writes a scan's equirectangular UVs into a UV channel named after it.
///
/// Only selected faces are projected. Every other face, and every selected
/// face pointing away from the scanner, receives a jittered placeholder near
/// the bottom centre of the image so that no loop is left undefined.
pub struct WriteScanUvs<'a> {
    scan: &'a ScanPose,
    params: ProjectionParams,
    seed: Option<u64>,
}

impl<'a> WriteScanUvs<'a> {
    /// Creates a new `WriteScanUvs` operation with default parameters.
    #[must_use]
    pub fn new(scan: &'a ScanPose) -> Self {
        Self {
            scan,
            params: ProjectionParams::default(),
            seed: None,
        }
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

    /// Executes the operation and commits the host.
    ///
    /// # Errors
    ///
    /// Propagates host errors.
    pub fn execute<H: MeshHost>(&self, host: &mut H) -> Result<UvWriteReport> {
        let mut jitter = match self.seed {
            Some(seed) => PlaceholderJitter::seeded(seed, &self.params),
            None => PlaceholderJitter::from_entropy(&self.params),
        };
        let report = self.write(host, &mut jitter)?;
        host.commit()?;
        Ok(report)
    }

    pub(crate) fn write<H: MeshHost>(
        &self,
        host: &mut H,
        jitter: &mut PlaceholderJitter,
    ) -> Result<UvWriteReport> {
        let projector = EquirectProjector::new(self.params);
        let channel = host.get_or_create_uv_channel(self.scan.name())?;
        let faces = host.faces();
        debug!(scan = self.scan.name(), faces = faces.len(), "writing scan UVs");

        let mut report = UvWriteReport::default();
        for face in faces {
            if !host.is_selected(face)? {
                for corner in host.face_loops(face)? {
                    host.set_loop_uv(channel, corner, jitter.next_uv())?;
                }
                report.unselected += 1;
                continue;
            }

            let geometry = FaceGeometry::fetch(host, face)?;
            if is_back_facing(&geometry.normal, &geometry.centroid, self.scan) {
                trace!(?face, "face points away from scanner");
                for &corner in &geometry.loops {
                    host.set_loop_uv(channel, corner, jitter.next_uv())?;
                }
                report.rejected += 1;
                continue;
            }

            let uvs = unwrap_face_uvs(&projector, self.scan, &geometry.centroid, &geometry.positions);
            for (&corner, uv) in geometry.loops.iter().zip(uvs) {
                host.set_loop_uv(channel, corner, uv)?;
            }
            report.projected += 1;
        }

        info!(
            scan = self.scan.name(),
            projected = report.projected,
            rejected = report.rejected,
            unselected = report.unselected,
            "scan UVs written"
        );
        Ok(report)
    }
}
