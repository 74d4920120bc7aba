mod assign;
mod project_scans;
mod select;
mod write_uv;

pub use assign::{AssignScans, ScanAssignment, VertexBucket, NO_SCAN_GROUP};
pub use project_scans::ProjectScans;
pub use select::{DeselectAll, SelectScanGroup};
pub use write_uv::{UvWriteReport, WriteScanUvs};
