//! Command line interface for the range chart renderer.

use clap::Parser;
use std::path::PathBuf;

/// Render instrument range charts as SVG
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Instrument description files, drawn left to right
    #[arg(required = true)]
    pub instruments: Vec<PathBuf>,

    /// Chart title (overrides the config file)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Output path for the whole chart
    #[arg(short, long, default_value = "chart.svg")]
    pub output: PathBuf,

    /// Also split the chart into printable pages in this directory
    #[arg(long)]
    pub tiles: Option<PathBuf>,

    /// JSON file with chart and tiling settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the parsed instruments as JSON
    #[arg(long)]
    pub json: bool,
}
