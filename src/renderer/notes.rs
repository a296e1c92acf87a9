//! Note-head, accidental, range-line and description rendering for one
//! instrument column.
//!
//! A column spans x = 0..INST_WIDTH in staff units with middle C at y = 0
//! and one unit per staff position upwards (y = -staff_position).

use crate::error::LayoutError;
use crate::model::{Endpoint, FixedInstrument, Instrument, Range, StringedInstrument};
use crate::theory::{Accidental, Pitch};

use super::constants::*;
use super::glyphs::{accidental_symbol, EMPTY_NOTE, FULL_NOTE};
use super::svg_builder::{Group, TextStyle};

/// A boundary note head produced from a list of ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteHead<E> {
    pub value: E,
    /// Drawn solid when a preferred range touches it.
    pub full: bool,
    /// Index of the range this head opens, if any.
    pub starts: Option<usize>,
    /// Index of the range this head closes, if any.
    pub ends: Option<usize>,
}

/// A note head placed in its column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedNote {
    /// Left edge of the note head.
    pub x: f64,
    pub staff_position: i32,
    pub full: bool,
    pub accidental: Option<Accidental>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

/// Everything drawn between the title and the description rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteLayout {
    pub notes: Vec<PlacedNote>,
    pub lines: Vec<Segment>,
}

// ═══════════════════════════════════════════════════════════════════════
// Note heads and accidentals
// ═══════════════════════════════════════════════════════════════════════

/// Two heads per range, except that a range ending where the next one
/// starts shares a single head with it.
pub fn calc_note_heads<E: Endpoint>(ranges: &[Range<E>]) -> Vec<NoteHead<E>> {
    let mut heads: Vec<NoteHead<E>> = Vec::with_capacity(ranges.len() * 2);
    let last = ranges.len().saturating_sub(1);
    for (i, range) in ranges.iter().enumerate() {
        let prev_preferred = i > 0 && ranges[i - 1].preferred;
        let merged_with_prev = i > 0 && ranges[i - 1].end == range.start;
        heads.push(NoteHead {
            value: range.start,
            full: range.preferred || prev_preferred,
            starts: Some(i),
            ends: if merged_with_prev { Some(i - 1) } else { None },
        });

        if i < last && range.end == ranges[i + 1].start {
            continue;
        }
        let next_preferred = i < last && ranges[i + 1].preferred;
        heads.push(NoteHead {
            value: range.end,
            full: range.preferred || next_preferred,
            starts: None,
            ends: Some(i),
        });
    }
    heads
}

/// For each gap between consecutive heads, whether both belong to one range.
fn range_joins<E>(heads: &[NoteHead<E>]) -> Vec<bool> {
    heads
        .windows(2)
        .map(|pair| pair[0].starts.is_some() && pair[0].starts == pair[1].ends)
        .collect()
}

fn shown_unless_natural(pitch: &Pitch) -> Option<Accidental> {
    Some(pitch.accidental()).filter(|acc| !acc.is_natural())
}

/// Accidental glyph to draw for each pitch of a sequence.
///
/// A pitch on the same staff position as its predecessor shows its
/// accidental only when it differs; otherwise naturals are left implicit.
pub fn find_accidentals(pitches: &[Pitch]) -> Vec<Option<Accidental>> {
    pitches
        .iter()
        .enumerate()
        .map(|(i, pitch)| match i.checked_sub(1).map(|p| &pitches[p]) {
            Some(prev) if prev.staff_position() == pitch.staff_position() => {
                Some(pitch.accidental()).filter(|acc| *acc != prev.accidental())
            }
            _ => shown_unless_natural(pitch),
        })
        .collect()
}

/// Accidentals for the note columns of a stringed instrument, one list per
/// string, lowest string first.
///
/// A note is compared with the last note at the same staff position on any
/// lower string and only repeats what that note already shows when needed.
pub fn find_string_accidentals(strings: &[Vec<Pitch>]) -> Vec<Vec<Option<Accidental>>> {
    let mut result: Vec<Vec<Option<Accidental>>> = Vec::with_capacity(strings.len());
    for (s, pitches) in strings.iter().enumerate() {
        let column = pitches
            .iter()
            .map(|pitch| {
                let spos = pitch.staff_position();
                let conflict = (0..s)
                    .flat_map(|i| (0..strings[i].len()).map(move |j| (i, j)))
                    .filter(|&(i, j)| strings[i][j].staff_position() == spos)
                    .last();
                let Some((i, j)) = conflict else {
                    return shown_unless_natural(pitch);
                };
                let acc = pitch.accidental();
                let shown = result[i][j];
                match shown {
                    None | Some(Accidental::Natural) if acc.is_natural() => None,
                    Some(prev) if prev == acc => None,
                    _ => Some(acc),
                }
            })
            .collect();
        result.push(column);
    }
    result
}

// ═══════════════════════════════════════════════════════════════════════
// Horizontal spacing
// ═══════════════════════════════════════════════════════════════════════

fn glyph_width(accidental: Option<Accidental>) -> f64 {
    ACC_MARGIN + accidental_offset(accidental) + NOTE_WIDTH
}

/// Note-head x positions between `x_0` and `x_max`. The free width is shared
/// between the gaps in proportion to the staff distance each gap spans.
pub fn calc_positions(pitches: &[Pitch], accidentals: &[Option<Accidental>], x_0: f64, x_max: f64) -> Vec<f64> {
    let widths: Vec<f64> = accidentals.iter().map(|acc| glyph_width(*acc)).collect();
    let distances: Vec<f64> = pitches
        .windows(2)
        .map(|pair| f64::from(pair[1].staff_position() - pair[0].staff_position()))
        .collect();

    let total: f64 = distances.iter().sum();
    let available = x_max - x_0 - widths.iter().sum::<f64>();
    let gaps: Vec<f64> = if total > 0.0 {
        distances.iter().map(|d| d / total * available).collect()
    } else {
        vec![available / distances.len().max(1) as f64; distances.len()]
    };

    let mut positions = Vec::with_capacity(widths.len());
    let mut current = x_0;
    for (i, width) in widths.iter().enumerate() {
        positions.push(current + accidental_offset(accidentals[i]));
        current += width;
        if let Some(gap) = gaps.get(i) {
            current += gap;
        }
    }
    positions
}

fn range_lines(notes: &[PlacedNote], joins: &[bool]) -> Vec<Segment> {
    notes
        .windows(2)
        .zip(joins)
        .filter(|(_, joined)| **joined)
        .filter_map(|(pair, _)| {
            let (x1, y1) = (pair[0].x + NOTE_WIDTH / 2.0, -f64::from(pair[0].staff_position));
            let (x2, y2) = (pair[1].x + NOTE_WIDTH / 2.0, -f64::from(pair[1].staff_position));
            let (dx, dy) = (x2 - x1, y2 - y1);
            let len = dx.hypot(dy);
            if len - 2.0 * RANGE_LINE_INSET <= MIN_RANGE_LINE {
                return None;
            }
            let k = RANGE_LINE_INSET / len;
            Some(Segment {
                x1: x1 + k * dx,
                y1: y1 + k * dy,
                x2: x2 - k * dx,
                y2: y2 - k * dy,
            })
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Instrument layouts
// ═══════════════════════════════════════════════════════════════════════

/// Note heads spread across the column at sounding pitch.
pub fn layout_fixed(inst: &FixedInstrument) -> Result<NoteLayout, LayoutError> {
    if inst.ranges().is_empty() {
        return Err(LayoutError::NoRanges(inst.name().to_string()));
    }
    let heads = calc_note_heads(&inst.sounding_ranges());
    let pitches: Vec<Pitch> = heads.iter().map(|h| h.value).collect();
    let accidentals = find_accidentals(&pitches);
    let positions = calc_positions(&pitches, &accidentals, INST_MARGIN, INST_WIDTH - INST_MARGIN);

    let notes: Vec<PlacedNote> = heads
        .iter()
        .zip(positions)
        .zip(accidentals)
        .map(|((head, x), accidental)| PlacedNote {
            x,
            staff_position: head.value.staff_position(),
            full: head.full,
            accidental,
        })
        .collect();
    let lines = range_lines(&notes, &range_joins(&heads));
    Ok(NoteLayout { notes, lines })
}

/// One vertical column of note heads per open string.
pub fn layout_stringed(inst: &StringedInstrument) -> Result<NoteLayout, LayoutError> {
    if inst.ranges().is_empty() {
        return Err(LayoutError::NoRanges(inst.name().to_string()));
    }
    if inst.open_strings().is_empty() {
        return Err(LayoutError::NoOpenStrings(inst.name().to_string()));
    }
    let heads = calc_note_heads(inst.ranges());
    let joins = range_joins(&heads);
    let strings: Vec<Vec<Pitch>> = inst
        .open_strings()
        .iter()
        .map(|open| heads.iter().map(|h| inst.sounding_pitch(open, &h.value)).collect())
        .collect();
    let accidentals = find_string_accidentals(&strings);

    let widths: Vec<f64> = accidentals
        .iter()
        .map(|accs| accs.iter().map(|a| glyph_width(*a)).fold(0.0, f64::max))
        .collect();
    let used: f64 = widths.iter().sum();
    let (mut current, x_step) = match strings.len() {
        1 => ((INST_WIDTH - used) / 2.0, 0.0),
        n => (INST_MARGIN, (INST_WIDTH - 2.0 * INST_MARGIN - used) / (n - 1) as f64),
    };

    let mut layout = NoteLayout::default();
    for ((pitches, accs), width) in strings.iter().zip(&accidentals).zip(&widths) {
        let column: Vec<PlacedNote> = pitches
            .iter()
            .zip(accs)
            .zip(&heads)
            .map(|((pitch, acc), head)| PlacedNote {
                x: current + accidental_offset(*acc),
                staff_position: pitch.staff_position(),
                full: head.full,
                accidental: *acc,
            })
            .collect();
        layout.lines.extend(range_lines(&column, &joins));
        layout.notes.extend(column);
        current += width + x_step;
    }
    Ok(layout)
}

// ═══════════════════════════════════════════════════════════════════════
// Drawing
// ═══════════════════════════════════════════════════════════════════════

/// Draw one instrument column: title above `y_min`, notes, range lines and
/// one description row per range below `y_max`.
pub(super) fn draw_instrument(inst: &Instrument, y_min: f64, y_max: f64) -> Result<Group, LayoutError> {
    let mut group = Group::new();
    let layout = match inst {
        Instrument::Fixed(fixed) => {
            let layout = layout_fixed(fixed)?;
            draw_descriptions(&mut group, &fixed.sounding_ranges(), y_max);
            layout
        }
        Instrument::Stringed(stringed) => {
            let layout = layout_stringed(stringed)?;
            draw_descriptions(&mut group, stringed.ranges(), y_max);
            layout
        }
    };
    log::debug!(
        "{}: {} note heads, {} range lines",
        inst.name(),
        layout.notes.len(),
        layout.lines.len()
    );

    group.text(
        INST_MARGIN,
        y_min - INST_TITLE_MARGIN,
        inst.name(),
        TextStyle::new(INST_TITLE_SIZE).bold(),
    );
    group.group(draw_notes(&layout.notes));

    let mut lines = Group::new();
    for seg in &layout.lines {
        lines.line(seg.x1, seg.y1, seg.x2, seg.y2, NOTE_COLOR, SMALL_STROKE_WIDTH);
    }
    group.group(lines);
    Ok(group)
}

fn draw_notes(notes: &[PlacedNote]) -> Group {
    let mut g = Group::new();
    for note in notes {
        let y = -f64::from(note.staff_position);
        let head = if note.full { FULL_NOTE } else { EMPTY_NOTE };
        g.use_symbol(head, note.x, y);
        if let Some(acc) = note.accidental {
            g.use_symbol(accidental_symbol(acc), note.x - accidental_offset(Some(acc)), y);
        }
    }
    g
}

fn draw_descriptions<E: Endpoint>(group: &mut Group, ranges: &[Range<E>], y_max: f64) {
    let mut rows = Group::new();
    let style = TextStyle::new(TEXT_SIZE).hanging();
    for (i, range) in ranges.iter().rev().enumerate() {
        let y = y_max + TEXT_MARGIN + i as f64 * LINE_HEIGHT;
        rows.text(DESCR_START_X, y, range.start.display_name(), style.clone().bold());
        rows.text(DESCR_END_X, y, range.end.display_name(), style.clone().bold());
        rows.text(
            DESCR_TEXT_X,
            y,
            range.description.clone(),
            style.clone().italic(!range.preferred),
        );
    }
    group.group(rows);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::svg_builder::Element;
    use crate::theory::Interval;
    use pretty_assertions::assert_eq;

    fn pitches(names: &[&str]) -> Vec<Pitch> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    fn ranges(lines: &[&str]) -> Vec<Range<Pitch>> {
        lines.iter().map(|l| Range::from_text(l).unwrap()).collect()
    }

    fn fixed(lines: &[&str]) -> FixedInstrument {
        FixedInstrument::new("Test", ranges(lines), Interval::unison(), "").unwrap()
    }

    #[test]
    fn touching_ranges_share_a_head() {
        let heads = calc_note_heads(&ranges(&["C4 D4 a", "D4 E4 b", "G4 A4 c"]));
        let values: Vec<String> = heads.iter().map(|h| h.value.to_string()).collect();
        assert_eq!(values, vec!["C4", "D4", "E4", "G4", "A4"]);
        assert_eq!(range_joins(&heads), vec![true, true, false, true]);
    }

    #[test]
    fn preferred_neighbour_fills_shared_heads() {
        let heads = calc_note_heads(&ranges(&["C4 D4 a", "!D4 E4 b", "E4 F4 c"]));
        let fills: Vec<bool> = heads.iter().map(|h| h.full).collect();
        assert_eq!(fills, vec![true, true, true, true]);

        let heads = calc_note_heads(&ranges(&["C4 D4 a", "!D4 E4 b", "!E4 F4 c"]));
        let fills: Vec<bool> = heads.iter().map(|h| h.full).collect();
        assert_eq!(fills, vec![true, true, false, false]);
    }

    #[test]
    fn repeated_accidentals_are_suppressed() {
        use Accidental::*;
        assert_eq!(find_accidentals(&pitches(&["C#4", "C#4"])), vec![Some(Sharp), None]);
        assert_eq!(find_accidentals(&pitches(&["C4", "C#4"])), vec![None, Some(Sharp)]);
        assert_eq!(find_accidentals(&pitches(&["C#4", "C4"])), vec![Some(Sharp), Some(Natural)]);
        assert_eq!(find_accidentals(&pitches(&["Bb3", "C4", "Eb4"])), vec![Some(Flat), None, Some(Flat)]);
    }

    #[test]
    fn string_accidentals_look_at_lower_strings() {
        use Accidental::*;
        let strings = vec![pitches(&["C4", "F#4"]), pitches(&["F4", "B4"]), pitches(&["F#4", "D5"])];
        assert_eq!(
            find_string_accidentals(&strings),
            vec![
                vec![None, Some(Sharp)],
                vec![Some(Natural), None],
                vec![Some(Sharp), None],
            ]
        );

        let strings = vec![pitches(&["F#4", "C5"]), pitches(&["F#4", "E5"])];
        assert_eq!(find_string_accidentals(&strings)[1], vec![None, None]);
    }

    #[test]
    fn spacing_follows_staff_distance() {
        let ps = pitches(&["C4", "E4", "C5"]);
        let accs = find_accidentals(&ps);
        let xs = calc_positions(&ps, &accs, 4.0, 56.0);
        let w = ACC_MARGIN + NOTE_WIDTH;
        let free = 52.0 - 3.0 * w;
        assert!((xs[0] - 4.0).abs() < 1e-9);
        assert!((xs[1] - (4.0 + w + free * 2.0 / 7.0)).abs() < 1e-9);
        assert!((xs[2] + w - 56.0).abs() < 1e-9);
    }

    #[test]
    fn accidental_shifts_its_head() {
        let ps = pitches(&["Bb3", "D4"]);
        let accs = find_accidentals(&ps);
        let xs = calc_positions(&ps, &accs, 0.0, 40.0);
        assert!((xs[0] - accidental_offset(Some(Accidental::Flat))).abs() < 1e-9);
    }

    #[test]
    fn zero_staff_distance_splits_evenly() {
        let ps = pitches(&["C4", "C#4", "C4"]);
        let accs = find_accidentals(&ps);
        let xs = calc_positions(&ps, &accs, 0.0, 60.0);
        let first_gap = xs[1] - accidental_offset(accs[1]) - (xs[0] + glyph_width(accs[0]));
        let second_gap = xs[2] - accidental_offset(accs[2]) - (xs[1] - accidental_offset(accs[1]) + glyph_width(accs[1]));
        assert!((first_gap - second_gap).abs() < 1e-9);
    }

    #[test]
    fn range_lines_stop_short_of_heads() {
        let layout = layout_fixed(&fixed(&["C4 C6 all"])).unwrap();
        assert_eq!(layout.notes.len(), 2);
        assert_eq!(layout.lines.len(), 1);
        let a = layout.notes[0];
        let b = layout.notes[1];
        let full = (b.x - a.x).hypot(f64::from(b.staff_position - a.staff_position));
        assert!((layout.lines[0].length() - (full - 2.0 * RANGE_LINE_INSET)).abs() < 1e-9);
    }

    #[test]
    fn no_line_across_a_gap_between_ranges() {
        let layout = layout_fixed(&fixed(&["C4 E4 low", "C5 E5 high"])).unwrap();
        assert_eq!(layout.notes.len(), 4);
        assert_eq!(layout.lines.len(), 2);
    }

    #[test]
    fn fixed_layout_uses_sounding_pitch() {
        let clarinet = FixedInstrument::new(
            "Clarinet",
            ranges(&["E3 C6 all"]),
            "-j2".parse().unwrap(),
            "",
        )
        .unwrap();
        let layout = layout_fixed(&clarinet).unwrap();
        let d3: Pitch = "D3".parse().unwrap();
        assert_eq!(layout.notes[0].staff_position, d3.staff_position());
    }

    #[test]
    fn empty_instruments_cannot_be_laid_out() {
        assert_eq!(layout_fixed(&fixed(&[])), Err(LayoutError::NoRanges("Test".to_string())));
        let strings = StringedInstrument::new(
            "Harp",
            vec![Range::from_text("1 8 all").unwrap()],
            vec![],
            Interval::unison(),
            "",
        )
        .unwrap();
        assert_eq!(layout_stringed(&strings), Err(LayoutError::NoOpenStrings("Harp".to_string())));
    }

    #[test]
    fn strings_spread_across_the_column() {
        let violin = StringedInstrument::new(
            "Violin",
            vec![Range::from_text("1 8 first").unwrap()],
            pitches(&["G3", "D4", "A4", "E5"]),
            Interval::unison(),
            "",
        )
        .unwrap();
        let layout = layout_stringed(&violin).unwrap();
        assert_eq!(layout.notes.len(), 8);
        assert_eq!(layout.lines.len(), 4);
        // both heads of a string share a column
        assert!((layout.notes[0].x - layout.notes[1].x).abs() < 1e-9);
        assert!((layout.notes[0].x - INST_MARGIN).abs() < 1e-9);
        let last = layout.notes[7];
        assert!((last.x + glyph_width(None) - (INST_WIDTH - INST_MARGIN)).abs() < 1e-9);
    }

    #[test]
    fn single_string_is_centered() {
        let mono = StringedInstrument::new(
            "Monochord",
            vec![Range::from_text("1 8 all").unwrap()],
            pitches(&["C3"]),
            Interval::unison(),
            "",
        )
        .unwrap();
        let layout = layout_stringed(&mono).unwrap();
        let left = layout.notes[0].x;
        let right = INST_WIDTH - (left + glyph_width(None));
        assert!((left - right).abs() < 1e-9);
    }

    #[test]
    fn descriptions_are_listed_top_down_from_the_highest_range() {
        let inst: Instrument = fixed(&["C4 E4 low", "!C5 E5 high"]).into();
        let group = draw_instrument(&inst, -20.0, 20.0).unwrap();
        let texts: Vec<(String, bool)> = group
            .walk()
            .into_iter()
            .filter_map(|e| match e {
                Element::Text { content, style, .. } if style.size == TEXT_SIZE && !style.bold => {
                    Some((content.clone(), style.italic))
                }
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec![("high".to_string(), true), ("low".to_string(), false)]);
    }
}
