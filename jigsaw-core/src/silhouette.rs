use std::str::FromStr;

use rand::Rng;

use crate::edge::{EdgePattern, EdgeType};
use crate::grid::Grid;

/// Two dimensional point in a piece's local frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Per-edge curve family used when outlining pieces.
///
/// Every style derives the same straight/tab/blank classification from the
/// edge pattern; only the curve drawn between the corners changes.
/// `Rectangular` skips curves entirely and outlines the nominal rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CuttingStyle {
    #[default]
    Classic,
    Geometric,
    Organic,
    Rectangular,
}

impl FromStr for CuttingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<CuttingStyle, String> {
        match s {
            "classic" => Ok(CuttingStyle::Classic),
            "geometric" => Ok(CuttingStyle::Geometric),
            "organic" => Ok(CuttingStyle::Organic),
            "rectangular" => Ok(CuttingStyle::Rectangular),
            other => Err(format!("unknown cutting style: {other}")),
        }
    }
}

/// Closed outline of one piece in a local frame padded by the bleed on every
/// side, so tab bulges stay inside the frame.
#[derive(Clone, Debug)]
pub struct Silhouette {
    pub points: Vec<Point>,
    pub frame_width: u32,
    pub frame_height: u32,
}

impl Silhouette {
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let mut minx = f32::INFINITY;
        let mut miny = f32::INFINITY;
        let mut maxx = f32::NEG_INFINITY;
        let mut maxy = f32::NEG_INFINITY;
        for p in &self.points {
            minx = minx.min(p.x);
            miny = miny.min(p.y);
            maxx = maxx.max(p.x);
            maxy = maxy.max(p.y);
        }
        (minx, miny, maxx, maxy)
    }
}

/// Which axis an edge runs along; the bulge grows on the other one.
#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn place(axis: Axis, along: f32, across: f32) -> Point {
    match axis {
        Axis::Horizontal => Point { x: along, y: across },
        Axis::Vertical => Point { x: across, y: along },
    }
}

const DEFAULT_TAB_VARIATION: f32 = 0.2;
const ORGANIC_STEPS: usize = 24;

/// Builds piece outlines for one grid.
///
/// `tab_size` doubles as the bleed: the local frame is the nominal piece
/// rectangle padded by `tab_size` on every side. Midpoint jitter is drawn
/// from the passed rng once per curved edge, so repeated builds of the same
/// cell differ cosmetically while the tab/blank layout stays fixed.
pub struct SilhouetteBuilder {
    grid: Grid,
    style: CuttingStyle,
    tab_size: u32,
    tab_variation: f32,
}

impl SilhouetteBuilder {
    pub fn new(grid: Grid, style: CuttingStyle) -> SilhouetteBuilder {
        let tab_size = (grid.piece_width.min(grid.piece_height) / 4).max(1);
        SilhouetteBuilder {
            grid,
            style,
            tab_size,
            tab_variation: DEFAULT_TAB_VARIATION,
        }
    }

    pub fn tab_size(&self) -> u32 {
        self.tab_size
    }

    pub fn style(&self) -> CuttingStyle {
        self.style
    }

    /// Retune the midpoint jitter; 0.0 gives reproducible outlines.
    pub fn set_tab_variation(&mut self, variation: f32) {
        self.tab_variation = variation;
    }

    pub fn frame_size(&self) -> (u32, u32) {
        (
            self.grid.piece_width + 2 * self.tab_size,
            self.grid.piece_height + 2 * self.tab_size,
        )
    }

    /// Outline the piece at (row, col) as a closed polygon.
    ///
    /// Edges are walked top left-to-right, right top-to-bottom, then bottom
    /// and left reversed, so consecutive edges share their corner points.
    pub fn build(
        &self,
        row: u32,
        col: u32,
        pattern: &EdgePattern,
        rng: &mut impl Rng,
    ) -> Silhouette {
        let edges = pattern.piece_edges(row, col);
        let (frame_width, frame_height) = self.frame_size();
        let b = self.tab_size as f32;
        let (x0, y0) = (b, b);
        let x1 = b + self.grid.piece_width as f32;
        let y1 = b + self.grid.piece_height as f32;

        if self.style == CuttingStyle::Rectangular {
            return Silhouette {
                points: vec![
                    Point { x: x0, y: y0 },
                    Point { x: x1, y: y0 },
                    Point { x: x1, y: y1 },
                    Point { x: x0, y: y1 },
                ],
                frame_width,
                frame_height,
            };
        }

        let mut points = Vec::new();
        // Top, walked left to right; outward is negative y.
        points.extend(self.edge(x0, x1, y0, Axis::Horizontal, -1.0, edges.top, rng));
        // Right, walked top to bottom; outward is positive x.
        points.extend(self.edge(y0, y1, x1, Axis::Vertical, 1.0, edges.right, rng));
        // Bottom and left are built in increasing-coordinate direction and
        // walked backwards to keep the polygon closed.
        let mut bottom = self.edge(x0, x1, y1, Axis::Horizontal, 1.0, edges.bottom, rng);
        bottom.reverse();
        points.extend(bottom);
        let mut left = self.edge(y0, y1, x0, Axis::Vertical, -1.0, edges.left, rng);
        left.reverse();
        points.extend(left);

        Silhouette {
            points,
            frame_width,
            frame_height,
        }
    }

    /// One edge from `a0` to `a1` along `axis`, at constant cross-coordinate
    /// `c`. `outward` is the sign of the direction that leaves the piece.
    fn edge(
        &self,
        a0: f32,
        a1: f32,
        c: f32,
        axis: Axis,
        outward: f32,
        edge_type: EdgeType,
        rng: &mut impl Rng,
    ) -> Vec<Point> {
        if edge_type == EdgeType::Straight {
            return vec![place(axis, a0, c), place(axis, a1, c)];
        }
        // Tabs bulge out of the piece, blanks recess into it. The neighbor
        // derives the opposite type and bulges toward the same side of the
        // shared line, which is what lets the two outlines interlock.
        let dir = if edge_type == EdgeType::Tab {
            outward
        } else {
            -outward
        };
        match self.style {
            CuttingStyle::Classic => self.classic_edge(a0, a1, c, dir, axis, rng),
            CuttingStyle::Geometric => self.geometric_edge(a0, a1, c, dir, axis, rng),
            CuttingStyle::Organic => self.organic_edge(a0, a1, c, dir, axis, rng),
            CuttingStyle::Rectangular => unreachable!("rectangular outlines have no curved edges"),
        }
    }

    fn jittered_mid(&self, a0: f32, a1: f32, rng: &mut impl Rng) -> f32 {
        let jitter = rng.gen_range(-0.5f32..0.5) * self.tab_variation * (a1 - a0);
        (a0 + a1) / 2.0 + jitter
    }

    /// Straight lead-in, ramping neck, rounded bulge peaking at `tab_size`
    /// over the jittered midpoint, then the mirror image back to the corner.
    fn classic_edge(
        &self,
        a0: f32,
        a1: f32,
        c: f32,
        dir: f32,
        axis: Axis,
        rng: &mut impl Rng,
    ) -> Vec<Point> {
        let t = self.tab_size as f32;
        let mid = self.jittered_mid(a0, a1, rng);
        let d = dir * t;
        let lead = (mid - a0) * 0.35;
        let profile = [
            (a0, 0.0),
            (a0 + lead, 0.0),
            (a0 + lead + 0.21 * t, 0.09),
            (a0 + lead + 0.31 * t, 0.26),
            (a0 + lead + 0.42 * t, 0.52),
            (mid - 0.7 * t, 0.78),
            (mid - 0.5 * t, 0.87),
            (mid - 0.3 * t, 0.96),
            (mid, 1.0),
            (mid + 0.3 * t, 0.96),
            (mid + 0.5 * t, 0.87),
            (mid + 0.7 * t, 0.78),
            (a1 - lead - 0.42 * t, 0.52),
            (a1 - lead - 0.31 * t, 0.26),
            (a1 - lead - 0.21 * t, 0.09),
            (a1 - lead, 0.0),
            (a1, 0.0),
        ];
        profile
            .iter()
            .map(|&(along, rise)| place(axis, along, c + rise * d))
            .collect()
    }

    /// Angular trapezoid tab: straight segments only.
    fn geometric_edge(
        &self,
        a0: f32,
        a1: f32,
        c: f32,
        dir: f32,
        axis: Axis,
        rng: &mut impl Rng,
    ) -> Vec<Point> {
        let t = self.tab_size as f32;
        let mid = self.jittered_mid(a0, a1, rng);
        let d = dir * t;
        let profile = [
            (a0, 0.0),
            (mid - 0.75 * t, 0.0),
            (mid - 0.45 * t, 1.0),
            (mid + 0.45 * t, 1.0),
            (mid + 0.75 * t, 0.0),
            (a1, 0.0),
        ];
        profile
            .iter()
            .map(|&(along, rise)| place(axis, along, c + rise * d))
            .collect()
    }

    /// Sampled smooth bump with a gentle ripple riding along the edge. The
    /// jitter warps the sample parameter so the bump drifts off-center while
    /// the endpoints stay pinned to the corners.
    fn organic_edge(
        &self,
        a0: f32,
        a1: f32,
        c: f32,
        dir: f32,
        axis: Axis,
        rng: &mut impl Rng,
    ) -> Vec<Point> {
        let t = self.tab_size as f32;
        let shift = rng.gen_range(-0.5f32..0.5) * self.tab_variation;
        let d = dir * t;
        let mut points = Vec::with_capacity(ORGANIC_STEPS + 1);
        for i in 0..=ORGANIC_STEPS {
            let s = i as f32 / ORGANIC_STEPS as f32;
            let along = a0 + (a1 - a0) * s;
            if i == 0 || i == ORGANIC_STEPS {
                points.push(place(axis, along, c));
                continue;
            }
            let w = s + shift * 4.0 * s * (1.0 - s);
            let bump = (4.0 * w * (1.0 - w)).max(0.0).powf(2.5);
            let ripple = (s * std::f32::consts::TAU).sin() * 0.08;
            // Bump and ripple together never exceed the bleed.
            points.push(place(axis, along, c + bump * 0.92 * d + ripple * t));
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn grid_4x4() -> Grid {
        Grid::new(512, 512, 4, 4).unwrap()
    }

    fn any_pattern(grid: &Grid, seed: u64) -> EdgePattern {
        let mut rng = SmallRng::seed_from_u64(seed);
        EdgePattern::generate(grid, &mut rng)
    }

    #[test]
    fn frame_is_piece_size_plus_double_bleed() {
        let builder = SilhouetteBuilder::new(grid_4x4(), CuttingStyle::Classic);
        assert_eq!(builder.tab_size(), 32);
        assert_eq!(builder.frame_size(), (192, 192));
    }

    #[test]
    fn all_points_stay_inside_the_frame() {
        let grid = grid_4x4();
        let pattern = any_pattern(&grid, 11);
        for style in [
            CuttingStyle::Classic,
            CuttingStyle::Geometric,
            CuttingStyle::Organic,
            CuttingStyle::Rectangular,
        ] {
            let builder = SilhouetteBuilder::new(grid, style);
            let mut rng = SmallRng::seed_from_u64(42);
            for row in 0..grid.rows {
                for col in 0..grid.cols {
                    let s = builder.build(row, col, &pattern, &mut rng);
                    let (minx, miny, maxx, maxy) = s.bounds();
                    assert!(minx >= -0.01 && miny >= -0.01, "{style:?} ({row},{col})");
                    assert!(
                        maxx <= s.frame_width as f32 + 0.01
                            && maxy <= s.frame_height as f32 + 0.01,
                        "{style:?} ({row},{col})"
                    );
                }
            }
        }
    }

    #[test]
    fn outline_passes_through_all_four_corners() {
        let grid = grid_4x4();
        let pattern = any_pattern(&grid, 5);
        let builder = SilhouetteBuilder::new(grid, CuttingStyle::Classic);
        let mut rng = SmallRng::seed_from_u64(0);
        let s = builder.build(1, 1, &pattern, &mut rng);
        let b = builder.tab_size() as f32;
        let far = b + 128.0;
        for corner in [
            Point { x: b, y: b },
            Point { x: far, y: b },
            Point { x: far, y: far },
            Point { x: b, y: far },
        ] {
            assert!(
                s.points.iter().any(|p| *p == corner),
                "missing corner {corner:?}"
            );
        }
    }

    #[test]
    fn tab_bulges_outward_and_blank_recesses() {
        let grid = Grid::new(256, 256, 2, 2).unwrap();
        let pattern = EdgePattern::from_flips(&grid, vec![true, true], vec![true, true]);
        let mut builder = SilhouetteBuilder::new(grid, CuttingStyle::Classic);
        builder.set_tab_variation(0.0);
        let b = builder.tab_size() as f32;
        let shared_y = b + 128.0;
        let mut rng = SmallRng::seed_from_u64(1);

        // (0,0) has a bottom tab: the outline dips below the shared line.
        let top_piece = builder.build(0, 0, &pattern, &mut rng);
        let max_y = top_piece.points.iter().fold(f32::MIN, |m, p| m.max(p.y));
        assert!((max_y - (shared_y + b)).abs() < 0.01);

        // (1,0) has a top blank: the outline also dips below its top line,
        // tracing the same physical curve from the other side.
        let bottom_piece = builder.build(1, 0, &pattern, &mut rng);
        let top_line = b;
        assert!(
            bottom_piece
                .points
                .iter()
                .any(|p| (p.y - (top_line + b)).abs() < 0.01),
            "blank apex should recess a full tab into the piece"
        );
    }

    #[test]
    fn straight_edges_are_two_point_segments() {
        let grid = Grid::new(512, 128, 1, 4).unwrap();
        let pattern = any_pattern(&grid, 2);
        let builder = SilhouetteBuilder::new(grid, CuttingStyle::Classic);
        let mut rng = SmallRng::seed_from_u64(9);
        let s = builder.build(0, 1, &pattern, &mut rng);
        let b = builder.tab_size() as f32;
        // Top and bottom are straight on a single-row grid: nothing on the
        // top line except the shared corner points.
        let top_points: Vec<&Point> = s.points.iter().filter(|p| p.y == b).collect();
        assert!(top_points.len() >= 2);
        assert!(top_points.iter().all(|p| p.x == b || p.x == b + 128.0));
    }

    #[test]
    fn zero_variation_builds_are_reproducible() {
        let grid = grid_4x4();
        let pattern = any_pattern(&grid, 8);
        let mut builder = SilhouetteBuilder::new(grid, CuttingStyle::Classic);
        builder.set_tab_variation(0.0);
        let mut rng_a = SmallRng::seed_from_u64(100);
        let mut rng_b = SmallRng::seed_from_u64(200);
        let a = builder.build(2, 1, &pattern, &mut rng_a);
        let b = builder.build(2, 1, &pattern, &mut rng_b);
        assert_eq!(a.points, b.points);
    }

    #[test]
    fn rectangular_outline_is_the_nominal_rectangle() {
        let grid = grid_4x4();
        let pattern = any_pattern(&grid, 4);
        let builder = SilhouetteBuilder::new(grid, CuttingStyle::Rectangular);
        let mut rng = SmallRng::seed_from_u64(0);
        let s = builder.build(0, 0, &pattern, &mut rng);
        assert_eq!(s.points.len(), 4);
        assert_eq!(s.bounds(), (32.0, 32.0, 160.0, 160.0));
    }

    #[test]
    fn style_names_parse() {
        assert_eq!("classic".parse(), Ok(CuttingStyle::Classic));
        assert_eq!("geometric".parse(), Ok(CuttingStyle::Geometric));
        assert_eq!("organic".parse(), Ok(CuttingStyle::Organic));
        assert_eq!("rectangular".parse(), Ok(CuttingStyle::Rectangular));
        assert!("cubist".parse::<CuttingStyle>().is_err());
    }
}
