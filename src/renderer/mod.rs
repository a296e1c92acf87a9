//! Chart renderer — turns instruments into a range chart drawing.
//!
//! Layout happens in staff units (one unit per staff position, middle C on
//! y = 0). The finished staff is scaled to page pixels, titled, and either
//! written as one SVG or split into printable pages.

pub(crate) mod constants;
mod glyphs;
mod notes;
mod staff;
pub mod svg_builder;
mod tiles;

use crate::config::TilingConfig;
use crate::error::LayoutError;
use crate::model::Instrument;
use constants::*;
use svg_builder::{Anchor, TextStyle, Transform};

pub use notes::{
    calc_note_heads, calc_positions, find_accidentals, find_string_accidentals, layout_fixed, layout_stringed,
    NoteHead, NoteLayout, PlacedNote, Segment,
};
pub use staff::{calc_highest_line, calc_lowest_line, compose_staff, Staff, StaffExtent};
pub use svg_builder::{Drawing, Element, Group};
pub use tiles::{calc_tiles, split_into_tiles, Tile, TileGrid};

/// A titled chart in page pixels with its top-left corner at (0, 0).
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub content: Group,
    pub width: f64,
    pub height: f64,
}

impl Chart {
    /// The chart as a single document on a white background.
    pub fn to_drawing(&self) -> Drawing {
        let mut drawing = Drawing::new(self.width, self.height);
        glyphs::define_symbols(&mut drawing);
        let mut background = Group::new();
        background.rect(0.0, 0.0, self.width, self.height, "white");
        drawing.push(Element::Group(background));
        drawing.push(Element::Group(self.content.clone()));
        drawing
    }

    pub fn to_svg(&self) -> String {
        self.to_drawing().to_svg()
    }

    /// Split the chart onto pages of the configured format.
    pub fn tiles(&self, tiling: &TilingConfig) -> Result<Vec<Tile>, LayoutError> {
        split_into_tiles(
            &self.content,
            (self.width, self.height),
            tiling.page(),
            tiling.margin,
            tiling.min_overlap,
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Compose every instrument on one staff, scale it to page size and put
/// `title` above it.
pub fn render_chart(title: &str, instruments: &[Instrument]) -> Result<Chart, LayoutError> {
    let staff = compose_staff(instruments)?;

    let width = staff.width * STAFF_SCALE + 2.0 * CHART_MARGIN;
    let height = staff.height * STAFF_SCALE + 2.0 * CHART_MARGIN + TITLE_FONT_SIZE + TITLE_MARGIN;

    let mut content = Group::new();
    content.text(
        width / 2.0,
        CHART_MARGIN,
        title,
        TextStyle::new(TITLE_FONT_SIZE).bold().anchor(Anchor::Middle).hanging(),
    );
    let mut scaled = Group::translated(CHART_MARGIN, CHART_MARGIN + TITLE_FONT_SIZE + TITLE_MARGIN)
        .with_transform(Transform::Scale(STAFF_SCALE));
    scaled.group(staff.content);
    content.group(scaled);

    log::info!(
        "rendered '{}' with {} instruments: {:.0}x{:.0} px",
        title,
        instruments.len(),
        width,
        height
    );
    Ok(Chart { content, width, height })
}

/// Render a complete chart into one SVG document.
pub fn render_chart_to_svg(title: &str, instruments: &[Instrument]) -> Result<String, LayoutError> {
    Ok(render_chart(title, instruments)?.to_svg())
}

/// Render a chart and split it onto printable pages.
pub fn render_chart_tiles(
    title: &str,
    instruments: &[Instrument],
    tiling: &TilingConfig,
) -> Result<Vec<Tile>, LayoutError> {
    render_chart(title, instruments)?.tiles(tiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_instrument;

    fn flute() -> Instrument {
        parse_instrument("Flute\nranges:\nC4 C7 normal\n!C7 D7 very high").unwrap()
    }

    #[test]
    fn chart_size_follows_staff_size() {
        let insts = vec![flute()];
        let staff = compose_staff(&insts).unwrap();
        let chart = render_chart("Winds", &insts).unwrap();
        assert!((chart.width - (staff.width * STAFF_SCALE + 2.0 * CHART_MARGIN)).abs() < 1e-9);
        assert!(chart.height > staff.height * STAFF_SCALE + TITLE_FONT_SIZE);
    }

    #[test]
    fn svg_contains_title_and_names() {
        let svg = render_chart_to_svg("Winds & Brass", &[flute()]).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Winds &amp; Brass"));
        assert!(svg.contains(">Flute</text>"));
        assert!(svg.contains(">very high</text>"));
        assert!(svg.contains("<defs>"));
    }

    #[test]
    fn empty_chart_is_an_error() {
        assert_eq!(render_chart("Nothing", &[]).unwrap_err(), LayoutError::NoInstruments);
    }

    #[test]
    fn default_tiling_of_a_small_chart() {
        let tiles = render_chart_tiles("Winds", &[flute()], &TilingConfig::default()).unwrap();
        assert!(!tiles.is_empty());
        assert_eq!((tiles[0].column, tiles[0].row), (0, 0));
    }
}
