use std::collections::BTreeSet;

use tracing::{debug, info, trace};

use crate::error::Result;
use crate::host::{FaceGeometry, MeshHost};
use crate::projection::{EquirectProjector, ProjectionParams};
use crate::scan::ScanRegistry;
use crate::scoring::ScoreMetric;

/// Name of the vertex group collecting faces no scan can see.
pub const NO_SCAN_GROUP: &str = "No Scan";

/// The vertices routed to one vertex group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexBucket<V> {
    pub name: String,
    pub vertices: BTreeSet<V>,
}

/// Result of assigning every face to its best scan.
///
/// Buckets follow registry order, with [`NO_SCAN_GROUP`] last. A vertex
/// shared by faces with different owners appears in several buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanAssignment<F, V> {
    pub buckets: Vec<VertexBucket<V>>,
    /// Each face with the index of its owning bucket.
    pub owners: Vec<(F, usize)>,
}

impl<F: PartialEq, V> ScanAssignment<F, V> {
    /// Looks up a bucket by group name.
    #[must_use]
    pub fn bucket(&self, name: &str) -> Option<&VertexBucket<V>> {
        self.buckets.iter().find(|b| b.name == name)
    }

    /// Returns the group name owning `face`.
    #[must_use]
    pub fn owner(&self, face: F) -> Option<&str> {
        self.owners
            .iter()
            .find(|(f, _)| *f == face)
            .map(|&(_, i)| self.buckets[i].name.as_str())
    }

    /// Returns how many faces each bucket owns, in bucket order.
    #[must_use]
    pub fn face_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.buckets.len()];
        for &(_, i) in &self.owners {
            counts[i] += 1;
        }
        counts
    }
}

/// Assigns every face to the scan that scores it highest.
///
/// Only a strictly greater score displaces the current best, so ties go to
/// the scan listed first. Faces no scan scores above zero go to
/// [`NO_SCAN_GROUP`].
pub struct AssignScans<'a> {
    registry: &'a ScanRegistry,
    params: ProjectionParams,
    metric: ScoreMetric,
}

impl<'a> AssignScans<'a> {
    /// Creates a new `AssignScans` operation with default parameters.
    #[must_use]
    pub fn new(registry: &'a ScanRegistry) -> Self {
        Self {
            registry,
            params: ProjectionParams::default(),
            metric: ScoreMetric::default(),
        }
    }

    /// Sets custom projection parameters.
    #[must_use]
    pub fn with_params(mut self, params: ProjectionParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the scoring metric.
    #[must_use]
    pub fn with_metric(mut self, metric: ScoreMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Computes the assignment without touching the host.
    ///
    /// # Errors
    ///
    /// Propagates host errors and scoring errors.
    pub fn plan<H: MeshHost>(&self, host: &H) -> Result<ScanAssignment<H::Face, H::Vertex>> {
        let projector = EquirectProjector::new(self.params);
        let mut buckets: Vec<VertexBucket<H::Vertex>> = self
            .registry
            .iter()
            .map(|scan| scan.name())
            .chain(std::iter::once(NO_SCAN_GROUP))
            .map(|name| VertexBucket {
                name: name.to_owned(),
                vertices: BTreeSet::new(),
            })
            .collect();
        let no_scan = self.registry.len();

        let faces = host.faces();
        debug!(
            faces = faces.len(),
            scans = self.registry.len(),
            metric = ?self.metric,
            "assigning faces to scans"
        );

        let mut owners = Vec::with_capacity(faces.len());
        for face in faces {
            let geometry = FaceGeometry::fetch(host, face)?;
            let mut best: Option<(usize, f64)> = None;
            for (i, scan) in self.registry.iter().enumerate() {
                let score = self.metric.score(&projector, &geometry, scan)?;
                if score > best.map_or(0.0, |(_, b)| b) {
                    best = Some((i, score));
                }
            }
            let owner = best.map_or(no_scan, |(i, _)| i);
            trace!(?face, owner = %buckets[owner].name, "face assigned");
            buckets[owner].vertices.extend(geometry.vertices.iter().copied());
            owners.push((face, owner));
        }

        Ok(ScanAssignment { buckets, owners })
    }

    /// Computes the assignment and rebuilds the host's vertex groups from it.
    ///
    /// Existing groups are cleared first; the host is committed afterwards.
    ///
    /// # Errors
    ///
    /// Propagates host errors and scoring errors.
    pub fn execute<H: MeshHost>(&self, host: &mut H) -> Result<ScanAssignment<H::Face, H::Vertex>> {
        let assignment = self.plan(host)?;

        host.clear_vertex_groups()?;
        for bucket in &assignment.buckets {
            host.create_vertex_group(&bucket.name)?;
        }
        for bucket in &assignment.buckets {
            let members: Vec<H::Vertex> = bucket.vertices.iter().copied().collect();
            host.assign_vertices_to_group(&bucket.name, &members)?;
        }
        host.commit()?;

        let counts = assignment.face_counts();
        info!(
            faces = assignment.owners.len(),
            unassigned = counts.last().copied().unwrap_or(0),
            "vertex groups rebuilt"
        );
        for (bucket, count) in assignment.buckets.iter().zip(counts) {
            debug!(group = %bucket.name, faces = count, vertices = bucket.vertices.len());
        }
        Ok(assignment)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, PanoprojError};
    use crate::host::{FaceId, MemoryMesh};
    use crate::math::Point3;

    /// A 2x2 wall in the plane `x = 0` facing +X.
    fn wall(mesh: &mut MemoryMesh) -> FaceId {
        let v: Vec<_> = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
            .iter()
            .map(|&(y, z)| mesh.add_vertex(Point3::new(0.0, y, z)))
            .collect();
        mesh.add_face(&v).unwrap()
    }

    fn registry(table: &[(&str, f64, f64, f64, f64)]) -> ScanRegistry {
        ScanRegistry::from_table(table).unwrap()
    }

    #[test]
    fn face_goes_to_scan_in_front() {
        let mut mesh = MemoryMesh::new();
        let f = wall(&mut mesh);
        let scans = registry(&[("behind", -3.0, 0.0, 0.0, 0.0), ("front", 3.0, 0.0, 0.0, 0.0)]);
        let result = AssignScans::new(&scans).execute(&mut mesh).unwrap();
        assert_eq!(result.owner(f), Some("front"));
        assert_eq!(result.bucket("front").unwrap().vertices.len(), 4);
        assert!(result.bucket("behind").unwrap().vertices.is_empty());
    }

    #[test]
    fn nearer_scan_wins() {
        let mut mesh = MemoryMesh::new();
        let f = wall(&mut mesh);
        let scans = registry(&[("far", 6.0, 0.0, 0.0, 0.0), ("near", 2.0, 0.0, 0.0, 0.0)]);
        let result = AssignScans::new(&scans).plan(&mesh).unwrap();
        assert_eq!(result.owner(f), Some("near"));
    }

    #[test]
    fn tie_goes_to_first_registered() {
        let mut mesh = MemoryMesh::new();
        let f = wall(&mut mesh);
        let scans = registry(&[("left", 2.0, -1.0, 0.0, 0.0), ("right", 2.0, 1.0, 0.0, 0.0)]);
        assert_eq!(AssignScans::new(&scans).plan(&mesh).unwrap().owner(f), Some("left"));

        let swapped = registry(&[("right", 2.0, 1.0, 0.0, 0.0), ("left", 2.0, -1.0, 0.0, 0.0)]);
        assert_eq!(AssignScans::new(&swapped).plan(&mesh).unwrap().owner(f), Some("right"));
    }

    #[test]
    fn invisible_face_goes_to_no_scan() {
        let mut mesh = MemoryMesh::new();
        let f = wall(&mut mesh);
        let scans = registry(&[("a", -2.0, 0.0, 0.0, 0.0), ("b", -5.0, 3.0, 1.0, 90.0)]);
        let result = AssignScans::new(&scans).execute(&mut mesh).unwrap();
        assert_eq!(result.owner(f), Some(NO_SCAN_GROUP));
        assert_eq!(mesh.vertex_group_members(NO_SCAN_GROUP).unwrap().len(), 4);
        assert_eq!(result.face_counts(), vec![0, 0, 1]);
    }

    #[test]
    fn groups_are_rebuilt_from_scratch() {
        let mut mesh = MemoryMesh::new();
        let f = wall(&mut mesh);
        mesh.create_vertex_group("stale").unwrap();
        let scans = registry(&[("a", 2.0, 0.0, 0.0, 0.0)]);
        AssignScans::new(&scans).execute(&mut mesh).unwrap();

        assert_eq!(mesh.vertex_group_names(), vec!["a", NO_SCAN_GROUP]);
        let mut members = mesh.vertex_group_members("a").unwrap();
        members.sort();
        let mut expected = mesh.face_vertices(f).unwrap();
        expected.sort();
        assert_eq!(members, expected);
        assert!(mesh.vertex_group_members(NO_SCAN_GROUP).unwrap().is_empty());
        assert_eq!(mesh.commit_count(), 1);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut mesh = MemoryMesh::new();
        wall(&mut mesh);
        let scans = crate::scan::reference_survey();
        let op = AssignScans::new(&scans);
        let first = op.execute(&mut mesh).unwrap();
        let groups_first: Vec<_> = mesh
            .vertex_group_names()
            .iter()
            .map(|n| mesh.vertex_group_members(n).unwrap())
            .collect();
        let second = op.execute(&mut mesh).unwrap();
        let groups_second: Vec<_> = mesh
            .vertex_group_names()
            .iter()
            .map(|n| mesh.vertex_group_members(n).unwrap())
            .collect();
        assert_eq!(first, second);
        assert_eq!(groups_first, groups_second);
    }

    #[test]
    fn uv_area_metric() {
        let mut mesh = MemoryMesh::new();
        let f = wall(&mut mesh);
        let scans = registry(&[("far", 6.0, 0.0, 0.0, 0.0), ("near", 2.0, 0.5, 0.0, 0.0)]);
        let result = AssignScans::new(&scans)
            .with_metric(ScoreMetric::UvPolygonArea)
            .plan(&mesh)
            .unwrap();
        assert_eq!(result.owner(f), Some("near"));
    }

    #[test]
    fn scan_on_face_centroid_is_an_error() {
        let mut mesh = MemoryMesh::new();
        wall(&mut mesh);
        let scans = registry(&[("inside", 0.0, 0.0, 0.0, 0.0)]);
        let err = AssignScans::new(&scans).execute(&mut mesh).unwrap_err();
        assert!(matches!(err, PanoprojError::Geometry(GeometryError::ZeroVector)));
        assert_eq!(mesh.commit_count(), 0);
    }
}
