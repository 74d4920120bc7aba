use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::host::MeshHost;

/// Selects every face whose vertices all belong to a vertex group.
///
/// Selection is additive: faces that are already selected stay selected.
pub struct SelectScanGroup<'a> {
    group: &'a str,
}

impl<'a> SelectScanGroup<'a> {
    /// Creates a new `SelectScanGroup` operation.
    #[must_use]
    pub fn new(group: &'a str) -> Self {
        Self { group }
    }

    /// Executes the selection, returning how many faces the group covers.
    ///
    /// # Errors
    ///
    /// Returns `HostError::GroupNotFound` if the group does not exist.
    pub fn execute<H: MeshHost>(&self, host: &mut H) -> Result<usize> {
        let members: HashSet<H::Vertex> = host.vertex_group_members(self.group)?.into_iter().collect();
        let mut covered = 0;
        for face in host.faces() {
            let mut inside = true;
            for corner in host.face_loops(face)? {
                if !members.contains(&host.loop_vertex(corner)?) {
                    inside = false;
                    break;
                }
            }
            if inside {
                host.set_selected(face, true)?;
                covered += 1;
            }
        }
        debug!(group = self.group, faces = covered, "group selected");
        Ok(covered)
    }
}

/// Clears the selection flag of every face.
#[derive(Debug, Default)]
pub struct DeselectAll;

impl DeselectAll {
    /// Creates a new `DeselectAll` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Propagates host errors.
    pub fn execute<H: MeshHost>(&self, host: &mut H) -> Result<()> {
        for face in host.faces() {
            host.set_selected(face, false)?;
        }
        Ok(())
    }
}
