//! Equirectangular texture projection for meshes captured from several
//! panoramic scan positions.
//!
//! [`operations::AssignScans`] gives every face to the scan that sees it
//! best and records the result as vertex groups. [`operations::ProjectScans`]
//! (or [`operations::WriteScanUvs`] for one scan) then writes a UV channel per
//! scan, seam-corrected per face. Mesh storage is abstracted behind
//! [`host::MeshHost`]; [`host::MemoryMesh`] is a ready in-memory backend.

pub mod error;
pub mod host;
pub mod jitter;
pub mod math;
pub mod operations;
pub mod projection;
pub mod scan;
pub mod scoring;

pub use error::{PanoprojError, Result};
