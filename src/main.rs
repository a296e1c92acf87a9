//! rangechart CLI binary

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

mod cli;
use cli::Cli;

use rangechart::{instrument_to_json, load_instruments, render_chart, ChartConfig, Tile};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ChartConfig::from_json_file(path)?,
        None => ChartConfig::default(),
    };
    if let Some(title) = cli.title {
        config.title = title;
    }

    let instruments = load_instruments(&cli.instruments)?;
    if cli.json {
        for instrument in &instruments {
            println!("{}", instrument_to_json(instrument)?);
        }
    }

    let chart = render_chart(&config.title, &instruments)?;
    fs::write(&cli.output, chart.to_svg())
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    info!("Wrote {}", cli.output.display());

    if let Some(dir) = &cli.tiles {
        let tiles = chart.tiles(&config.tiling)?;
        write_tiles(dir, &cli.output, &tiles)?;
        info!("Wrote {} pages to {}", tiles.len(), dir.display());
    }
    Ok(())
}

/// Write each page as `<stem>_<column>_<row>.svg`.
fn write_tiles(dir: &Path, output: &Path, tiles: &[Tile]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("chart");
    for tile in tiles {
        let path = dir.join(format!("{}_{}_{}.svg", stem, tile.column, tile.row));
        fs::write(&path, tile.drawing.to_svg())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}
