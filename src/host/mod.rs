mod memory;

pub use memory::{FaceId, LoopId, MemoryMesh, UvChannelId, VertexId};

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::HostError;
use crate::math::{Point3, Vector3};
use crate::projection::Uv;

/// The mesh-editing environment the projection core reads from and writes to.
///
/// Handles are opaque and only meaningful to the host that issued them.
/// Loops are face corners: a vertex shared by several faces has one loop
/// per face, each with its own UV.
pub trait MeshHost {
    type Face: Copy + Eq + Hash + Debug;
    type Vertex: Copy + Ord + Hash + Debug;
    type Loop: Copy + Debug;
    type UvChannel: Copy + Debug;

    /// Returns every face. The order must stay stable within a pass.
    fn faces(&self) -> Vec<Self::Face>;

    /// Returns the loops of a face in winding order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist.
    fn face_loops(&self, face: Self::Face) -> Result<Vec<Self::Loop>, HostError>;

    /// Returns the vertex a loop belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop does not exist.
    fn loop_vertex(&self, corner: Self::Loop) -> Result<Self::Vertex, HostError>;

    /// Returns a vertex position.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex does not exist.
    fn vertex_position(&self, vertex: Self::Vertex) -> Result<Point3, HostError>;

    /// Returns the median centre of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist.
    fn face_centroid(&self, face: Self::Face) -> Result<Point3, HostError>;

    /// Returns the outward unit normal of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist.
    fn face_normal(&self, face: Self::Face) -> Result<Vector3, HostError>;

    /// Returns whether a face is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist.
    fn is_selected(&self, face: Self::Face) -> Result<bool, HostError>;

    /// Sets the selection flag of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face does not exist.
    fn set_selected(&mut self, face: Self::Face, selected: bool) -> Result<(), HostError>;

    /// Returns the UV channel with this name, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the channel.
    fn get_or_create_uv_channel(&mut self, name: &str) -> Result<Self::UvChannel, HostError>;

    /// Writes the UV of one loop in one channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel or loop does not exist.
    fn set_loop_uv(
        &mut self,
        channel: Self::UvChannel,
        corner: Self::Loop,
        uv: Uv,
    ) -> Result<(), HostError>;

    /// Removes every vertex group.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the change.
    fn clear_vertex_groups(&mut self) -> Result<(), HostError>;

    /// Creates an empty vertex group.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the change.
    fn create_vertex_group(&mut self, name: &str) -> Result<(), HostError>;

    /// Adds vertices to an existing vertex group.
    ///
    /// # Errors
    ///
    /// Returns `HostError::GroupNotFound` if the group does not exist.
    fn assign_vertices_to_group(
        &mut self,
        name: &str,
        vertices: &[Self::Vertex],
    ) -> Result<(), HostError>;

    /// Returns the members of a vertex group.
    ///
    /// # Errors
    ///
    /// Returns `HostError::GroupNotFound` if the group does not exist.
    fn vertex_group_members(&self, name: &str) -> Result<Vec<Self::Vertex>, HostError>;

    /// Flushes pending mutations to the host's persistent mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the host fails to store the mesh.
    fn commit(&mut self) -> Result<(), HostError>;
}

/// A snapshot of one face's geometry, gathered from a host.
pub struct FaceGeometry<H: MeshHost + ?Sized> {
    pub loops: Vec<H::Loop>,
    pub vertices: Vec<H::Vertex>,
    pub positions: Vec<Point3>,
    pub centroid: Point3,
    pub normal: Vector3,
}

impl<H: MeshHost + ?Sized> FaceGeometry<H> {
    /// Reads the loops, vertices, positions, centroid and normal of `face`.
    ///
    /// # Errors
    ///
    /// Propagates any host error.
    pub fn fetch(host: &H, face: H::Face) -> Result<Self, HostError> {
        let loops = host.face_loops(face)?;
        let vertices = loops
            .iter()
            .map(|&l| host.loop_vertex(l))
            .collect::<Result<Vec<_>, _>>()?;
        let positions = vertices
            .iter()
            .map(|&v| host.vertex_position(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            loops,
            vertices,
            positions,
            centroid: host.face_centroid(face)?,
            normal: host.face_normal(face)?,
        })
    }
}
