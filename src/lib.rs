//! rangechart — instrument pitch-range charts rendered as SVG.
//!
//! Instruments are described in a small plain-text format (see [`parser`]),
//! laid out side by side on one shared staff, and written either as a single
//! SVG or split into printable, overlapping pages.
//!
//! # Example
//! ```no_run
//! use rangechart::{load_instrument, render_chart_to_svg};
//!
//! let clarinet = load_instrument("instruments/clarinet.txt").unwrap();
//! let svg = render_chart_to_svg("Woodwinds", &[clarinet]).unwrap();
//! std::fs::write("woodwinds.svg", svg).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod renderer;
pub mod theory;

use std::path::Path;

pub use config::{ChartConfig, TilingConfig};
pub use error::{ChartError, LayoutError, ParseError, ValidationError};
pub use model::*;
pub use parser::{parse_instrument, parse_instrument_text};
pub use renderer::{render_chart, render_chart_tiles, render_chart_to_svg, Chart, Tile};
pub use theory::{Accidental, Direction, Interval, Letter, Pitch, Quality, Transposed};

/// Read and parse one instrument description file.
pub fn load_instrument<P: AsRef<Path>>(path: P) -> Result<Instrument, ChartError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let instrument = parse_instrument(&text).map_err(|source| ChartError::Instrument {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} from {}", instrument.name(), path.display());
    Ok(instrument)
}

/// Load several instrument files, in order. The first failure aborts.
pub fn load_instruments<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Instrument>, ChartError> {
    paths.iter().map(load_instrument).collect()
}

/// Convert a parsed instrument to a JSON string.
pub fn instrument_to_json(instrument: &Instrument) -> Result<String, ChartError> {
    Ok(serde_json::to_string_pretty(instrument)?)
}

/// Load instrument files and render them directly to one SVG.
pub fn render_files_to_svg<P: AsRef<Path>>(title: &str, paths: &[P]) -> Result<String, ChartError> {
    let instruments = load_instruments(paths)?;
    Ok(render_chart_to_svg(title, &instruments)?)
}
