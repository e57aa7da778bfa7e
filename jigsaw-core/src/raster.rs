use image::{Rgba, RgbaImage};
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::grid::Grid;
use crate::silhouette::Silhouette;

/// Rasterize a silhouette into its frame; the pixmap's alpha channel is the
/// piece mask (opaque inside the outline, transparent outside).
pub fn rasterize_mask(silhouette: &Silhouette) -> Pixmap {
    let (minx, miny, maxx, maxy) = silhouette.bounds();
    assert!(
        maxx > minx && maxy > miny,
        "silhouette has an empty bounding box"
    );
    let mut pixmap = Pixmap::new(silhouette.frame_width, silhouette.frame_height)
        .expect("silhouette frame has zero area");

    let mut pb = PathBuilder::new();
    let first = silhouette.points[0];
    pb.move_to(first.x, first.y);
    let mut prev = first;
    for p in &silhouette.points[1..] {
        // Shared corner points repeat where edges meet; skip the no-op segments.
        if *p == prev {
            continue;
        }
        pb.line_to(p.x, p.y);
        prev = *p;
    }
    pb.close();
    let path = pb.finish().expect("silhouette outline is degenerate");

    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba8(255, 255, 255, 255));
    paint.anti_alias = true;
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    pixmap
}

/// Cut one piece out of the source image.
///
/// The output canvas always has the silhouette's frame dimensions. The frame
/// origin in source coordinates is the nominal piece corner minus the bleed,
/// so border pieces start in the negative region where the source has no
/// pixels; those frame pixels simply stay transparent, which is how boundary
/// clipping keeps mask and pixels aligned without stretching.
pub fn extract_piece(
    source: &RgbaImage,
    grid: &Grid,
    row: u32,
    col: u32,
    silhouette: &Silhouette,
    bleed: u32,
) -> RgbaImage {
    assert!(
        row < grid.rows && col < grid.cols,
        "piece ({row}, {col}) is outside the {}x{} grid",
        grid.rows,
        grid.cols
    );
    let mask = rasterize_mask(silhouette);
    let fw = silhouette.frame_width;
    let fh = silhouette.frame_height;
    let origin_x = i64::from(col * grid.piece_width) - i64::from(bleed);
    let origin_y = i64::from(row * grid.piece_height) - i64::from(bleed);

    let mut piece = RgbaImage::new(fw, fh);
    let mask_data = mask.data();
    for fy in 0..fh {
        let sy = origin_y + i64::from(fy);
        if sy < 0 || sy >= i64::from(source.height()) {
            continue;
        }
        for fx in 0..fw {
            let sx = origin_x + i64::from(fx);
            if sx < 0 || sx >= i64::from(source.width()) {
                continue;
            }
            let coverage = mask_data[((fy * fw + fx) * 4 + 3) as usize];
            if coverage == 0 {
                continue;
            }
            let src = source.get_pixel(sx as u32, sy as u32);
            let alpha = (u16::from(src[3]) * u16::from(coverage) / 255) as u8;
            piece.put_pixel(fx, fy, Rgba([src[0], src[1], src[2], alpha]));
        }
    }
    piece
}

/// RGBA to PNG bytes with fixed encoder settings, so identical pixels always
/// produce identical files.
pub fn encode_rgba_png(image: &RgbaImage) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, image.width(), image.height());
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        enc.set_filter(FilterType::NoFilter);
        enc.set_compression(Compression::Default);
        let mut writer = enc.write_header()?;
        writer.write_image_data(image.as_raw())?;
    }
    Ok(buf)
}
