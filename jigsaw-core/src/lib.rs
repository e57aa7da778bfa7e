//! Cuts a source image into an interlocking jigsaw puzzle.
//!
//! The pipeline is: [`EdgePattern`] assigns every interior grid edge a tab
//! direction, [`SilhouetteBuilder`] turns a cell's four edge types into a
//! closed outline, [`raster`] fills that outline into a mask and composites
//! the matching source region with transparency outside it, and
//! [`PuzzleCutter`] runs the whole grid and assembles the [`Manifest`].
//!
//! All randomness (edge flips, tab jitter) comes from rng handles passed by
//! the caller, so seeded runs reproduce exactly.

pub mod cutter;
pub mod edge;
pub mod error;
pub mod grid;
pub mod manifest;
pub mod raster;
pub mod silhouette;

pub use cutter::PuzzleCutter;
pub use edge::{EdgePattern, EdgeType, PieceEdges};
pub use error::CutError;
pub use grid::Grid;
pub use manifest::{Manifest, ManifestEntry};
pub use silhouette::{CuttingStyle, Point, Silhouette, SilhouetteBuilder};
