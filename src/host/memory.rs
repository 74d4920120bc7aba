use std::collections::BTreeSet;

use slotmap::{SecondaryMap, SlotMap};

use crate::error::HostError;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::projection::Uv;

use super::MeshHost;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in a [`MemoryMesh`].
    pub struct VertexId;
}

slotmap::new_key_type! {
    /// Unique identifier for a face in a [`MemoryMesh`].
    pub struct FaceId;
}

slotmap::new_key_type! {
    /// Unique identifier for a face corner in a [`MemoryMesh`].
    pub struct LoopId;
}

/// Index of a UV channel in a [`MemoryMesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UvChannelId(usize);

#[derive(Debug, Clone)]
struct FaceData {
    loops: Vec<LoopId>,
    selected: bool,
}

#[derive(Debug, Clone)]
struct LoopData {
    vertex: VertexId,
}

#[derive(Debug, Clone)]
struct UvChannel {
    name: String,
    uvs: SecondaryMap<LoopId, Uv>,
}

/// A self-contained polygon mesh implementing [`MeshHost`].
///
/// Entities live in generational arenas, so handles stay valid and face
/// iteration order is stable for the life of the mesh.
#[derive(Debug, Clone, Default)]
pub struct MemoryMesh {
    vertices: SlotMap<VertexId, Point3>,
    faces: SlotMap<FaceId, FaceData>,
    loops: SlotMap<LoopId, LoopData>,
    uv_channels: Vec<UvChannel>,
    vertex_groups: Vec<(String, BTreeSet<VertexId>)>,
    commits: usize,
}

impl MemoryMesh {
    /// Creates a new, empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, point: Point3) -> VertexId {
        self.vertices.insert(point)
    }

    /// Inserts a polygon through the given vertices, in winding order.
    ///
    /// # Errors
    ///
    /// Returns `HostError::InvalidFace` for fewer than three or repeated
    /// vertices, and `HostError::EntityNotFound` for unknown vertices.
    pub fn add_face(&mut self, vertices: &[VertexId]) -> Result<FaceId, HostError> {
        if vertices.len() < 3 {
            return Err(HostError::InvalidFace(format!(
                "a face needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        let distinct: BTreeSet<_> = vertices.iter().collect();
        if distinct.len() != vertices.len() {
            return Err(HostError::InvalidFace("repeated vertex".into()));
        }
        if let Some(missing) = vertices.iter().find(|v| !self.vertices.contains_key(**v)) {
            return Err(HostError::EntityNotFound(format!("vertex {missing:?}")));
        }

        let loops = vertices
            .iter()
            .map(|&vertex| self.loops.insert(LoopData { vertex }))
            .collect();
        Ok(self.faces.insert(FaceData {
            loops,
            selected: false,
        }))
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the vertices of a face in winding order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist.
    pub fn face_vertices(&self, face: FaceId) -> Result<Vec<VertexId>, HostError> {
        self.face(face)?
            .loops
            .iter()
            .map(|&l| self.loop_vertex(l))
            .collect()
    }

    /// Looks up a UV channel by name.
    #[must_use]
    pub fn uv_channel(&self, name: &str) -> Option<UvChannelId> {
        self.uv_channels
            .iter()
            .position(|c| c.name == name)
            .map(UvChannelId)
    }

    /// Returns the names of all UV channels in creation order.
    #[must_use]
    pub fn uv_channel_names(&self) -> Vec<&str> {
        self.uv_channels.iter().map(|c| c.name.as_str()).collect()
    }

    /// Returns the UV stored for a loop, if any.
    #[must_use]
    pub fn loop_uv(&self, channel: UvChannelId, corner: LoopId) -> Option<Uv> {
        self.uv_channels
            .get(channel.0)
            .and_then(|c| c.uvs.get(corner))
            .copied()
    }

    /// Returns the names of all vertex groups in creation order.
    #[must_use]
    pub fn vertex_group_names(&self) -> Vec<&str> {
        self.vertex_groups.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns how many times the mesh has been committed.
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    fn face(&self, id: FaceId) -> Result<&FaceData, HostError> {
        self.faces
            .get(id)
            .ok_or_else(|| HostError::EntityNotFound("face".into()))
    }

    fn positions(&self, face: FaceId) -> Result<Vec<Point3>, HostError> {
        self.face_vertices(face)?
            .into_iter()
            .map(|v| self.vertex_position(v))
            .collect()
    }

    fn group_mut(&mut self, name: &str) -> Result<&mut BTreeSet<VertexId>, HostError> {
        self.vertex_groups
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, members)| members)
            .ok_or_else(|| HostError::GroupNotFound(name.to_owned()))
    }
}

impl MeshHost for MemoryMesh {
    type Face = FaceId;
    type Vertex = VertexId;
    type Loop = LoopId;
    type UvChannel = UvChannelId;

    fn faces(&self) -> Vec<FaceId> {
        self.faces.keys().collect()
    }

    fn face_loops(&self, face: FaceId) -> Result<Vec<LoopId>, HostError> {
        Ok(self.face(face)?.loops.clone())
    }

    fn loop_vertex(&self, corner: LoopId) -> Result<VertexId, HostError> {
        self.loops
            .get(corner)
            .map(|l| l.vertex)
            .ok_or_else(|| HostError::EntityNotFound("loop".into()))
    }

    fn vertex_position(&self, vertex: VertexId) -> Result<Point3, HostError> {
        self.vertices
            .get(vertex)
            .copied()
            .ok_or_else(|| HostError::EntityNotFound("vertex".into()))
    }

    fn face_centroid(&self, face: FaceId) -> Result<Point3, HostError> {
        let points = self.positions(face)?;
        #[allow(clippy::cast_precision_loss)]
        let n = points.len() as f64;
        let sum = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Ok(Point3::from(sum / n))
    }

    /// Newell normal of the polygon; zero for degenerate faces.
    fn face_normal(&self, face: FaceId) -> Result<Vector3, HostError> {
        let points = self.positions(face)?;
        let n = points.len();
        let mut normal = Vector3::zeros();
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        let len = normal.norm();
        if len < TOLERANCE {
            return Ok(Vector3::zeros());
        }
        Ok(normal / len)
    }

    fn is_selected(&self, face: FaceId) -> Result<bool, HostError> {
        Ok(self.face(face)?.selected)
    }

    fn set_selected(&mut self, face: FaceId, selected: bool) -> Result<(), HostError> {
        self.faces
            .get_mut(face)
            .ok_or_else(|| HostError::EntityNotFound("face".into()))?
            .selected = selected;
        Ok(())
    }

    fn get_or_create_uv_channel(&mut self, name: &str) -> Result<UvChannelId, HostError> {
        if let Some(id) = self.uv_channel(name) {
            return Ok(id);
        }
        self.uv_channels.push(UvChannel {
            name: name.to_owned(),
            uvs: SecondaryMap::new(),
        });
        Ok(UvChannelId(self.uv_channels.len() - 1))
    }

    fn set_loop_uv(&mut self, channel: UvChannelId, corner: LoopId, uv: Uv) -> Result<(), HostError> {
        if !self.loops.contains_key(corner) {
            return Err(HostError::EntityNotFound("loop".into()));
        }
        let channel = self
            .uv_channels
            .get_mut(channel.0)
            .ok_or_else(|| HostError::EntityNotFound("uv channel".into()))?;
        channel.uvs.insert(corner, uv);
        Ok(())
    }

    fn clear_vertex_groups(&mut self) -> Result<(), HostError> {
        self.vertex_groups.clear();
        Ok(())
    }

    fn create_vertex_group(&mut self, name: &str) -> Result<(), HostError> {
        if self.vertex_groups.iter().all(|(n, _)| n != name) {
            self.vertex_groups.push((name.to_owned(), BTreeSet::new()));
        }
        Ok(())
    }

    fn assign_vertices_to_group(&mut self, name: &str, vertices: &[VertexId]) -> Result<(), HostError> {
        if let Some(missing) = vertices.iter().find(|v| !self.vertices.contains_key(**v)) {
            return Err(HostError::EntityNotFound(format!("vertex {missing:?}")));
        }
        self.group_mut(name)?.extend(vertices.iter().copied());
        Ok(())
    }

    fn vertex_group_members(&self, name: &str) -> Result<Vec<VertexId>, HostError> {
        self.vertex_groups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, members)| members.iter().copied().collect())
            .ok_or_else(|| HostError::GroupNotFound(name.to_owned()))
    }

    fn commit(&mut self) -> Result<(), HostError> {
        self.commits += 1;
        Ok(())
    }
}
