use rand::Rng;

use crate::grid::Grid;

/// How one side of a piece meets its neighbor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeType {
    Straight,
    Tab,
    Blank,
}

/// Edge types for the four sides of one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceEdges {
    pub top: EdgeType,
    pub right: EdgeType,
    pub bottom: EdgeType,
    pub left: EdgeType,
}

/// Tab orientations for every interior edge of a grid, fixed at generation
/// time and read-only afterwards.
///
/// Horizontal entries sit between row `r` and `r + 1` at column `c`, indexed
/// `r * cols + c`; `true` means the tab points down. Vertical entries sit
/// between column `c` and `c + 1` at row `r`, indexed `r * (cols - 1) + c`;
/// `true` means the tab points right. Two neighbors reading the same entry
/// from opposite sides is what makes their edges complementary.
#[derive(Clone, Debug)]
pub struct EdgePattern {
    rows: u32,
    cols: u32,
    horizontal: Vec<bool>,
    vertical: Vec<bool>,
}

impl EdgePattern {
    /// One independent fair coin flip per interior edge.
    pub fn generate(grid: &Grid, rng: &mut impl Rng) -> EdgePattern {
        let horizontal = (0..(grid.rows - 1) * grid.cols)
            .map(|_| rng.gen_bool(0.5))
            .collect();
        let vertical = (0..grid.rows * (grid.cols - 1))
            .map(|_| rng.gen_bool(0.5))
            .collect();
        EdgePattern {
            rows: grid.rows,
            cols: grid.cols,
            horizontal,
            vertical,
        }
    }

    /// Build a pattern from explicit flips, e.g. to repeat a known layout.
    pub fn from_flips(grid: &Grid, horizontal: Vec<bool>, vertical: Vec<bool>) -> EdgePattern {
        assert_eq!(
            horizontal.len(),
            ((grid.rows - 1) * grid.cols) as usize,
            "horizontal flips do not match a {}x{} grid",
            grid.rows,
            grid.cols
        );
        assert_eq!(
            vertical.len(),
            (grid.rows * (grid.cols - 1)) as usize,
            "vertical flips do not match a {}x{} grid",
            grid.rows,
            grid.cols
        );
        EdgePattern {
            rows: grid.rows,
            cols: grid.cols,
            horizontal,
            vertical,
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn edge_count(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    fn tab_points_down(&self, row: u32, col: u32) -> bool {
        self.horizontal[(row * self.cols + col) as usize]
    }

    fn tab_points_right(&self, row: u32, col: u32) -> bool {
        self.vertical[(row * (self.cols - 1) + col) as usize]
    }

    /// Derive the four edge types of the piece at (row, col).
    pub fn piece_edges(&self, row: u32, col: u32) -> PieceEdges {
        assert!(
            row < self.rows && col < self.cols,
            "piece ({row}, {col}) is outside the {}x{} grid",
            self.rows,
            self.cols
        );
        let top = if row == 0 {
            EdgeType::Straight
        } else if self.tab_points_down(row - 1, col) {
            // The piece above carries the tab into this cell.
            EdgeType::Blank
        } else {
            EdgeType::Tab
        };
        let bottom = if row == self.rows - 1 {
            EdgeType::Straight
        } else if self.tab_points_down(row, col) {
            EdgeType::Tab
        } else {
            EdgeType::Blank
        };
        let left = if col == 0 {
            EdgeType::Straight
        } else if self.tab_points_right(row, col - 1) {
            EdgeType::Blank
        } else {
            EdgeType::Tab
        };
        let right = if col == self.cols - 1 {
            EdgeType::Straight
        } else if self.tab_points_right(row, col) {
            EdgeType::Tab
        } else {
            EdgeType::Blank
        };
        PieceEdges {
            top,
            right,
            bottom,
            left,
        }
    }
}
