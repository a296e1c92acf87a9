//! Shared constants for the chart renderer.
//!
//! Staff content is laid out in staff units: one unit is one staff position,
//! so adjacent staff lines are 2 units apart and y = -staff_position.
//! Page-level values are in pixels at 96 px per inch.

use crate::theory::Accidental;

// ── Page ────────────────────────────────────────────────────────────
pub const PX_PER_CM: f64 = 96.0 / 2.54;
pub const A4: (f64, f64) = (21.0 * PX_PER_CM, 29.7 * PX_PER_CM);
pub(super) const LINE_SPACE: f64 = 0.2 * PX_PER_CM; // distance between staff lines on paper
pub(super) const STAFF_SCALE: f64 = LINE_SPACE / 2.0; // px per staff unit
pub(super) const CHART_MARGIN: f64 = PX_PER_CM;
pub(super) const TITLE_FONT_SIZE: f64 = 50.0;
pub(super) const TEXT_MARGIN_FACTOR: f64 = 0.5;
pub(super) const TITLE_MARGIN: f64 = TITLE_FONT_SIZE * TEXT_MARGIN_FACTOR;

// ── Staff ───────────────────────────────────────────────────────────
pub(super) const STAFF_STROKE_WIDTH: f64 = 0.16;
pub(super) const BAR_LINE_WIDTH: f64 = 0.2;
pub(super) const DOUBLE_BARLINE_WIDTH: f64 = 5.0 * BAR_LINE_WIDTH;
pub(super) const CLEF_OFFSET: f64 = 1.0;
pub(super) const CLEF_WIDTH: f64 = 7.0;
pub(super) const CLEF_OCTAVE_MARK_SIZE: f64 = 2.2;

// ── Instrument columns ──────────────────────────────────────────────
pub(super) const INST_WIDTH: f64 = 60.0;
pub(super) const INST_MARGIN: f64 = 4.0;
pub(super) const INST_TITLE_SIZE: f64 = 6.0;
pub(super) const INST_TITLE_MARGIN: f64 = INST_TITLE_SIZE * TEXT_MARGIN_FACTOR;
pub(super) const TEXT_SIZE: f64 = 3.2;
pub(super) const LINE_HEIGHT: f64 = TEXT_SIZE * 1.6;
pub(super) const TEXT_MARGIN: f64 = TEXT_SIZE * TEXT_MARGIN_FACTOR;
pub(super) const DESCR_START_X: f64 = TEXT_SIZE * 1.5;
pub(super) const DESCR_END_X: f64 = TEXT_SIZE * 4.5;
pub(super) const DESCR_TEXT_X: f64 = TEXT_SIZE * 7.5;

// ── Notes ───────────────────────────────────────────────────────────
pub(super) const NOTE_WIDTH: f64 = 2.6;
pub(super) const NOTE_HEIGHT: f64 = 1.9;
pub(super) const EMPTY_NOTE_STROKE: f64 = 0.35;
pub(super) const ACC_MARGIN: f64 = 0.6;
pub(super) const SMALL_STROKE_WIDTH: f64 = 0.2;
pub(super) const RANGE_LINE_INSET: f64 = 2.0; // gap between a range line and its note heads
pub(super) const MIN_RANGE_LINE: f64 = 1.0;

/// Room an accidental takes to the left of its note head (glyph plus gap).
pub(super) fn accidental_offset(accidental: Option<Accidental>) -> f64 {
    match accidental {
        None => 0.0,
        Some(Accidental::Flat) => 1.8,
        Some(Accidental::Natural) => 1.5,
        Some(Accidental::Sharp) => 2.1,
        Some(Accidental::DoubleSharp) => 2.0,
        Some(Accidental::DoubleFlat) => 3.0,
    }
}

// ── Tiles ───────────────────────────────────────────────────────────
pub(super) const CUT_OFFSET: f64 = 8.0;
pub(super) const MARK_STROKE_WIDTH: f64 = 1.0;
pub(super) const OVERLAP_LINE_WIDTH: f64 = 0.3;

// ── Colors & fonts ──────────────────────────────────────────────────
pub(super) const NOTE_COLOR: &str = "#000000";
pub(super) const SECONDARY_COLOR: &str = "#666666";
pub(super) const FONT_FAMILY: &str = "Georgia, 'Times New Roman', serif";
