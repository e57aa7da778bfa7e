use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use env_logger::{Builder, Env};
use image::imageops::FilterType;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use jigsaw_core::raster::encode_rgba_png;
use jigsaw_core::{CuttingStyle, Grid, PuzzleCutter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: cutter <image> <output_dir> [rows] [cols] \
             [classic|geometric|organic|rectangular] [seed]"
        );
        std::process::exit(2);
    }
    let input = &args[1];
    let out_dir = PathBuf::from(&args[2]);
    let rows: u32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(5);
    let cols: u32 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(9);
    let style: CuttingStyle = match args.get(5) {
        Some(s) => s.parse()?,
        None => CuttingStyle::Classic,
    };
    let seed: u64 = match args.get(6) {
        Some(s) => s.parse()?,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64,
    };

    info!("loading {input}");
    let mut source = image::open(input)?.to_rgba8();
    let grid = Grid::new(source.width(), source.height(), rows, cols)?;
    let (want_w, want_h) = grid.footprint();
    if source.dimensions() != (want_w, want_h) {
        warn!(
            "resizing source from {}x{} to {}x{}",
            source.width(),
            source.height(),
            want_w,
            want_h
        );
        source = image::imageops::resize(&source, want_w, want_h, FilterType::Lanczos3);
    }

    let cutter = PuzzleCutter::new(grid, style);
    let mut rng = SmallRng::seed_from_u64(seed);
    let (manifest, pieces) = cutter.cut(&source, &mut rng)?;

    fs::create_dir_all(&out_dir)?;
    for (entry, piece) in manifest.pieces.iter().zip(&pieces) {
        let bytes = encode_rgba_png(piece)?;
        fs::write(out_dir.join(format!("piece_{:03}.png", entry.id)), bytes)?;
    }
    fs::write(
        out_dir.join("manifest.json"),
        serde_json::to_string_pretty(&manifest)?,
    )?;
    info!(
        "wrote {} pieces and manifest.json to {}",
        pieces.len(),
        out_dir.display()
    );
    Ok(())
}
