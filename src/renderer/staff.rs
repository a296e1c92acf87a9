//! Staff composition: the shared staff lines, clefs, bar lines and the
//! instrument columns placed left to right.

use crate::error::LayoutError;
use crate::model::Instrument;
use crate::theory::consts::{F_RANGE, G_RANGE, LOWER_F_RANGE, UPPER_G_RANGE};

use super::constants::*;
use super::glyphs::{F_CLEF, G_CLEF, LOWER_F_CLEF, UPPER_G_CLEF};
use super::notes::draw_instrument;
use super::svg_builder::Group;

/// Distance from an outer clef's far line within which it gets switched on.
const EXTRA_CLEF_THRESHOLD: i32 = 4;
/// Horizontal anchor of the clef glyphs.
const CLEF_X: f64 = CLEF_OFFSET + 3.0;

/// Vertical extent shared by every column of one chart, in staff positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffExtent {
    pub lowest: i32,
    pub highest: i32,
    pub lower_f: bool,
    pub upper_g: bool,
}

/// Lowest staff position to draw, and whether the lower F clef is needed.
pub fn calc_lowest_line(min_spos: i32) -> (i32, bool) {
    let min_spos = min_spos.min(F_RANGE.0);
    if min_spos < LOWER_F_RANGE.0 + EXTRA_CLEF_THRESHOLD {
        (min_spos.min(LOWER_F_RANGE.0), true)
    } else {
        (min_spos, false)
    }
}

/// Highest staff position to draw, and whether the upper G clef is needed.
pub fn calc_highest_line(max_spos: i32) -> (i32, bool) {
    let max_spos = max_spos.max(G_RANGE.1);
    if max_spos > UPPER_G_RANGE.1 - EXTRA_CLEF_THRESHOLD {
        (max_spos.max(UPPER_G_RANGE.1), true)
    } else {
        (max_spos, false)
    }
}

impl StaffExtent {
    pub fn new(min_spos: i32, max_spos: i32) -> Self {
        let (lowest, lower_f) = calc_lowest_line(min_spos);
        let (highest, upper_g) = calc_highest_line(max_spos);
        Self {
            lowest,
            highest,
            lower_f,
            upper_g,
        }
    }

    /// Extent covering the sounding compass of every instrument.
    pub fn for_instruments(instruments: &[Instrument]) -> Result<Self, LayoutError> {
        let mut bounds: Option<(i32, i32)> = None;
        for inst in instruments {
            let (Some(min), Some(max)) = (inst.min_sounding_pitch(), inst.max_sounding_pitch()) else {
                return Err(match inst.range_count() {
                    0 => LayoutError::NoRanges(inst.name().to_string()),
                    _ => LayoutError::NoOpenStrings(inst.name().to_string()),
                });
            };
            let (lo, hi) = (min.staff_position(), max.staff_position());
            bounds = Some(match bounds {
                Some((l, h)) => (l.min(lo), h.max(hi)),
                None => (lo, hi),
            });
        }
        let (min, max) = bounds.ok_or(LayoutError::NoInstruments)?;
        Ok(Self::new(min, max))
    }

    /// Top of the solid staff (bar lines end here).
    pub fn highest_full(&self) -> i32 {
        if self.upper_g {
            UPPER_G_RANGE.1
        } else {
            G_RANGE.1
        }
    }

    pub fn lowest_full(&self) -> i32 {
        if self.lower_f {
            LOWER_F_RANGE.0
        } else {
            F_RANGE.0
        }
    }

    /// Color and stroke width of the staff line at `staff_pos`.
    fn line_style(&self, staff_pos: i32) -> (&'static str, f64) {
        let within = |range: (i32, i32)| range.0 <= staff_pos && staff_pos <= range.1;
        let reactivated = (self.upper_g && within(UPPER_G_RANGE)) || (self.lower_f && within(LOWER_F_RANGE));
        let secondary = staff_pos > G_RANGE.1 || staff_pos < F_RANGE.0 || staff_pos == 0;
        if secondary && !reactivated {
            (SECONDARY_COLOR, STAFF_STROKE_WIDTH / 2.0)
        } else {
            (NOTE_COLOR, STAFF_STROKE_WIDTH)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Staff elements
// ═══════════════════════════════════════════════════════════════════════

fn render_staff_lines(g: &mut Group, extent: &StaffExtent, x_min: f64, x_max: f64) {
    let mut lines = Group::new();
    for staff_pos in (extent.lowest..=extent.highest).filter(|p| p % 2 == 0) {
        let (color, width) = extent.line_style(staff_pos);
        let y = -f64::from(staff_pos);
        lines.line(x_min, y, x_max, y, color, width);
    }
    g.group(lines);
}

fn render_clefs(g: &mut Group, extent: &StaffExtent) {
    let mut clefs = Group::new();
    if extent.upper_g {
        clefs.use_symbol(UPPER_G_CLEF, CLEF_X, -f64::from(UPPER_G_RANGE.0 + 2));
    }
    clefs.use_symbol(G_CLEF, CLEF_X, -f64::from(G_RANGE.0 + 2));
    clefs.use_symbol(F_CLEF, CLEF_X, -f64::from(F_RANGE.1 - 2));
    if extent.lower_f {
        clefs.use_symbol(LOWER_F_CLEF, CLEF_X, -f64::from(LOWER_F_RANGE.1 - 2));
    }
    g.group(clefs);
}

/// Thin and thick stroke ending the staff at `x`.
fn render_double_barline(g: &mut Group, x: f64, highest: i32, lowest: i32) {
    let (top, bottom) = (-f64::from(highest), -f64::from(lowest));
    let thick_x = x - BAR_LINE_WIDTH * 3.0 / 2.0;
    let thin_x = x - 5.0 * BAR_LINE_WIDTH;
    g.line(thick_x, bottom, thick_x, top, NOTE_COLOR, BAR_LINE_WIDTH * 3.0);
    g.line(thin_x, bottom, thin_x, top, NOTE_COLOR, BAR_LINE_WIDTH);
}

// ═══════════════════════════════════════════════════════════════════════
// Composition
// ═══════════════════════════════════════════════════════════════════════

/// The composed staff in staff units, with its top-left corner at (0, 0).
#[derive(Debug, Clone, PartialEq)]
pub struct Staff {
    pub content: Group,
    pub width: f64,
    pub height: f64,
    pub extent: StaffExtent,
}

pub(super) fn staff_width(instrument_count: usize) -> f64 {
    CLEF_OFFSET + CLEF_WIDTH + instrument_count as f64 * INST_WIDTH + DOUBLE_BARLINE_WIDTH
}

/// Lay out every instrument on one shared staff.
pub fn compose_staff(instruments: &[Instrument]) -> Result<Staff, LayoutError> {
    let extent = StaffExtent::for_instruments(instruments)?;
    log::debug!(
        "staff extent {}..{} (lower F: {}, upper G: {})",
        extent.lowest,
        extent.highest,
        extent.lower_f,
        extent.upper_g
    );
    let highest_full = extent.highest_full();
    let lowest_full = extent.lowest_full();
    let total_length = staff_width(instruments.len());

    let longest_descr = instruments.iter().map(Instrument::range_count).max().unwrap_or(0);
    let y_min = -f64::from(extent.highest) - INST_TITLE_SIZE - INST_TITLE_MARGIN;
    let y_max = -f64::from(extent.lowest) + longest_descr as f64 * LINE_HEIGHT + TEXT_MARGIN;

    let mut content = Group::translated(0.0, -y_min);
    render_staff_lines(&mut content, &extent, 0.0, total_length);
    render_double_barline(&mut content, total_length, highest_full, lowest_full);
    render_clefs(&mut content, &extent);

    for (i, inst) in instruments.iter().enumerate() {
        let x = CLEF_OFFSET + CLEF_WIDTH + i as f64 * INST_WIDTH;
        let mut column = Group::translated(x, 0.0);
        column.group(draw_instrument(inst, -f64::from(extent.highest), -f64::from(extent.lowest))?);
        content.group(column);
        if i + 1 < instruments.len() {
            content.line(
                x + INST_WIDTH,
                -f64::from(highest_full),
                x + INST_WIDTH,
                -f64::from(lowest_full),
                NOTE_COLOR,
                BAR_LINE_WIDTH,
            );
        }
    }

    Ok(Staff {
        content,
        width: total_length,
        height: y_max - y_min,
        extent,
    })
}
