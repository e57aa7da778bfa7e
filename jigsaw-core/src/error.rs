use thiserror::Error;

/// Recoverable failures surfaced before any piece is produced.
///
/// Out-of-range cell coordinates and degenerate silhouettes are programming
/// errors and panic instead of returning a variant.
#[derive(Debug, Error)]
pub enum CutError {
    #[error("invalid grid dimensions {rows}x{cols}: need at least one row and one column")]
    InvalidGridDimensions { rows: u32, cols: u32 },

    #[error(
        "source image is {actual_width}x{actual_height}, expected exactly \
         {expected_width}x{expected_height}; resize before cutting"
    )]
    InvalidSourceDimensions {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },
}
