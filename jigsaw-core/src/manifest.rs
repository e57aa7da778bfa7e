use serde::{Deserialize, Serialize};

/// One cut piece: its row-major id plus the top-left pixel of its nominal
/// (un-bled) rectangle in the source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: u32,
    pub x: u32,
    pub y: u32,
}

/// Complete description of one cut, ordered by piece id. This is the
/// contract any downstream assembly UI consumes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub width: u32,
    pub height: u32,
    /// Rows, then columns.
    pub grid: [u32; 2],
    pub pieces: Vec<ManifestEntry>,
}
