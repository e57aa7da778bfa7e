use crate::error::CutError;

/// Immutable puzzle grid: piece counts plus the derived per-piece pixel size.
///
/// Piece dimensions truncate; any remainder pixels past the footprint carry
/// no cells and must be resized away before cutting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    pub rows: u32,
    pub cols: u32,
    pub piece_width: u32,
    pub piece_height: u32,
}

impl Grid {
    pub fn new(width: u32, height: u32, rows: u32, cols: u32) -> Result<Grid, CutError> {
        if rows < 1 || cols < 1 {
            return Err(CutError::InvalidGridDimensions { rows, cols });
        }
        let piece_width = width / cols;
        let piece_height = height / rows;
        if piece_width == 0 || piece_height == 0 {
            // Source smaller than the grid itself; no piece has any pixels.
            return Err(CutError::InvalidSourceDimensions {
                expected_width: cols,
                expected_height: rows,
                actual_width: width,
                actual_height: height,
            });
        }
        Ok(Grid {
            rows,
            cols,
            piece_width,
            piece_height,
        })
    }

    pub fn piece_count(&self) -> u32 {
        self.rows * self.cols
    }

    /// Exact source dimensions the cutter accepts.
    pub fn footprint(&self) -> (u32, u32) {
        (self.cols * self.piece_width, self.rows * self.piece_height)
    }
}
