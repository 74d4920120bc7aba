use thiserror::Error;

/// Top-level error type for scan projection.
#[derive(Debug, Error)]
pub enum PanoprojError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the scan pose registry.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("duplicate scan name: {0}")]
    DuplicateName(String),

    #[error("scan name must not be empty")]
    EmptyName,

    #[error("scan not found: {0}")]
    NotFound(String),
}

/// Errors reported by a [`MeshHost`](crate::host::MeshHost).
///
/// The core never recovers from these; they are propagated unchanged.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("vertex group not found: {0}")]
    GroupNotFound(String),

    #[error("invalid face: {0}")]
    InvalidFace(String),

    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

/// Convenience type alias for results using [`PanoprojError`].
pub type Result<T> = std::result::Result<T, PanoprojError>;
