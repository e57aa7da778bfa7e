use image::RgbaImage;
use log::info;
use rand::Rng;

use crate::edge::EdgePattern;
use crate::error::CutError;
use crate::grid::Grid;
use crate::manifest::{Manifest, ManifestEntry};
use crate::raster;
use crate::silhouette::{CuttingStyle, SilhouetteBuilder};

/// Drives a full cut: edge pattern once, then silhouette and extraction per
/// cell in row-major order, assembling the manifest as it goes.
pub struct PuzzleCutter {
    grid: Grid,
    builder: SilhouetteBuilder,
}

impl PuzzleCutter {
    pub fn new(grid: Grid, style: CuttingStyle) -> PuzzleCutter {
        PuzzleCutter {
            grid,
            builder: SilhouetteBuilder::new(grid, style),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Bleed margin around every piece; equals the tab size.
    pub fn bleed(&self) -> u32 {
        self.builder.tab_size()
    }

    /// The silhouette builder, e.g. to retune jitter before cutting.
    pub fn builder_mut(&mut self) -> &mut SilhouetteBuilder {
        &mut self.builder
    }

    /// Cut with a freshly generated edge pattern.
    pub fn cut(
        &self,
        source: &RgbaImage,
        rng: &mut impl Rng,
    ) -> Result<(Manifest, Vec<RgbaImage>), CutError> {
        self.check_source(source)?;
        let pattern = EdgePattern::generate(&self.grid, rng);
        self.cut_with_pattern(source, &pattern, rng)
    }

    /// Cut with a caller-supplied pattern, keeping a known tab layout across
    /// runs. A cell failure aborts the whole cut; a manifest never describes
    /// a partial puzzle.
    pub fn cut_with_pattern(
        &self,
        source: &RgbaImage,
        pattern: &EdgePattern,
        rng: &mut impl Rng,
    ) -> Result<(Manifest, Vec<RgbaImage>), CutError> {
        self.check_source(source)?;
        assert!(
            pattern.rows() == self.grid.rows && pattern.cols() == self.grid.cols,
            "edge pattern is for a {}x{} grid, cutter has {}x{}",
            pattern.rows(),
            pattern.cols(),
            self.grid.rows,
            self.grid.cols
        );

        let bleed = self.bleed();
        let count = self.grid.piece_count() as usize;
        let mut entries = Vec::with_capacity(count);
        let mut pieces = Vec::with_capacity(count);
        for row in 0..self.grid.rows {
            for col in 0..self.grid.cols {
                let silhouette = self.builder.build(row, col, pattern, rng);
                let piece = raster::extract_piece(source, &self.grid, row, col, &silhouette, bleed);
                entries.push(ManifestEntry {
                    id: row * self.grid.cols + col,
                    x: col * self.grid.piece_width,
                    y: row * self.grid.piece_height,
                });
                pieces.push(piece);
            }
        }
        info!(
            "cut {} pieces ({}x{} grid, {:?} style) from {}x{} source",
            entries.len(),
            self.grid.rows,
            self.grid.cols,
            self.builder.style(),
            source.width(),
            source.height()
        );
        Ok((
            Manifest {
                width: source.width(),
                height: source.height(),
                grid: [self.grid.rows, self.grid.cols],
                pieces: entries,
            },
            pieces,
        ))
    }

    fn check_source(&self, source: &RgbaImage) -> Result<(), CutError> {
        let (expected_width, expected_height) = self.grid.footprint();
        if source.dimensions() != (expected_width, expected_height) {
            return Err(CutError::InvalidSourceDimensions {
                expected_width,
                expected_height,
                actual_width: source.width(),
                actual_height: source.height(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn flat_source(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([90, 120, 150, 255]))
    }

    #[test]
    fn manifest_ids_and_positions_follow_row_major_order() {
        let grid = Grid::new(96, 64, 2, 3).unwrap();
        let cutter = PuzzleCutter::new(grid, CuttingStyle::Classic);
        let mut rng = SmallRng::seed_from_u64(12);
        let (manifest, pieces) = cutter.cut(&flat_source(96, 64), &mut rng).unwrap();
        assert_eq!(manifest.grid, [2, 3]);
        assert_eq!(manifest.pieces.len(), 6);
        assert_eq!(pieces.len(), 6);
        for (i, entry) in manifest.pieces.iter().enumerate() {
            assert_eq!(entry.id, i as u32);
            assert_eq!(entry.x, (entry.id % 3) * grid.piece_width);
            assert_eq!(entry.y, (entry.id / 3) * grid.piece_height);
        }
    }

    #[test]
    fn rejects_mismatched_source_dimensions() {
        let grid = Grid::new(96, 64, 2, 3).unwrap();
        let cutter = PuzzleCutter::new(grid, CuttingStyle::Classic);
        let mut rng = SmallRng::seed_from_u64(0);
        let err = cutter.cut(&flat_source(100, 64), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            CutError::InvalidSourceDimensions {
                expected_width: 96,
                expected_height: 64,
                actual_width: 100,
                actual_height: 64,
            }
        ));
    }

    #[test]
    #[should_panic(expected = "edge pattern is for a")]
    fn mismatched_pattern_grid_is_a_programming_error() {
        let grid = Grid::new(96, 64, 2, 3).unwrap();
        let other = Grid::new(96, 96, 3, 3).unwrap();
        let cutter = PuzzleCutter::new(grid, CuttingStyle::Classic);
        let mut rng = SmallRng::seed_from_u64(0);
        let pattern = EdgePattern::generate(&other, &mut rng);
        let _ = cutter.cut_with_pattern(&flat_source(96, 64), &pattern, &mut rng);
    }
}
