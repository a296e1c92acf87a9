//! Reusable glyphs, defined once per drawing as symbols.
//!
//! Coordinates are staff units (2 units between staff lines). Note heads
//! have their origin at the left edge, vertically centered. Accidentals have
//! their origin at their own left edge on the note's line. Clefs are anchored
//! on the line they name (G or F) at their horizontal center.

use crate::theory::Accidental;

use super::constants::*;
use super::svg_builder::{Anchor, Drawing, Group, Paint, TextStyle, Transform};

pub(super) const FULL_NOTE: &str = "note-full";
pub(super) const EMPTY_NOTE: &str = "note-empty";
pub(super) const G_CLEF: &str = "clef-g";
pub(super) const F_CLEF: &str = "clef-f";
pub(super) const UPPER_G_CLEF: &str = "clef-g15";
pub(super) const LOWER_F_CLEF: &str = "clef-f15";

const SHARP: &str = "acc-sharp";
const FLAT: &str = "acc-flat";
const NATURAL: &str = "acc-natural";
const DOUBLE_SHARP: &str = "acc-double-sharp";
const DOUBLE_FLAT: &str = "acc-double-flat";

const NOTE_HEAD_TILT: f64 = -15.0;
const ACC_STEM_WIDTH: f64 = 0.18;
const ACC_BAR_WIDTH: f64 = 0.4;

pub(super) fn accidental_symbol(accidental: Accidental) -> &'static str {
    match accidental {
        Accidental::DoubleFlat => DOUBLE_FLAT,
        Accidental::Flat => FLAT,
        Accidental::Natural => NATURAL,
        Accidental::Sharp => SHARP,
        Accidental::DoubleSharp => DOUBLE_SHARP,
    }
}

/// Register every glyph the chart uses on `drawing`.
pub(super) fn define_symbols(drawing: &mut Drawing) {
    drawing.define_symbol(FULL_NOTE, note_head(true));
    drawing.define_symbol(EMPTY_NOTE, note_head(false));
    drawing.define_symbol(SHARP, sharp());
    drawing.define_symbol(FLAT, flat(0.0));
    drawing.define_symbol(NATURAL, natural());
    drawing.define_symbol(DOUBLE_SHARP, double_sharp());
    let mut double_flat = flat(0.0);
    double_flat.children.extend(flat(1.2).children);
    drawing.define_symbol(DOUBLE_FLAT, double_flat);
    drawing.define_symbol(G_CLEF, g_clef());
    drawing.define_symbol(F_CLEF, f_clef());
    drawing.define_symbol(UPPER_G_CLEF, with_octave_mark(g_clef(), -8.6, false));
    drawing.define_symbol(LOWER_F_CLEF, with_octave_mark(f_clef(), 4.6, true));
}

// ═══════════════════════════════════════════════════════════════════════
// Note heads
// ═══════════════════════════════════════════════════════════════════════

fn note_head(filled: bool) -> Group {
    let mut g = Group::new();
    let cx = NOTE_WIDTH / 2.0;
    let rx = NOTE_WIDTH / 2.0 - 0.1;
    let ry = NOTE_HEIGHT / 2.0;
    if filled {
        g.ellipse(cx, 0.0, rx, ry, NOTE_HEAD_TILT, Paint::Fill(NOTE_COLOR));
    } else {
        let sw = EMPTY_NOTE_STROKE;
        g.ellipse(
            cx,
            0.0,
            rx - sw / 2.0,
            ry - sw / 2.0,
            NOTE_HEAD_TILT,
            Paint::Stroke(NOTE_COLOR, sw),
        );
    }
    g
}

// ═══════════════════════════════════════════════════════════════════════
// Accidentals
// ═══════════════════════════════════════════════════════════════════════

fn sharp() -> Group {
    let mut g = Group::new();
    g.line(0.45, -2.0, 0.45, 2.3, NOTE_COLOR, ACC_STEM_WIDTH);
    g.line(1.1, -2.3, 1.1, 2.0, NOTE_COLOR, ACC_STEM_WIDTH);
    g.line(0.0, -0.4, 1.5, -0.9, NOTE_COLOR, ACC_BAR_WIDTH);
    g.line(0.0, 0.9, 1.5, 0.4, NOTE_COLOR, ACC_BAR_WIDTH);
    g
}

fn flat(x: f64) -> Group {
    let mut g = Group::new();
    g.line(x + 0.15, -3.2, x + 0.15, 0.9, NOTE_COLOR, ACC_STEM_WIDTH);
    g.path(
        format!(
            "M{:.2},0.9 C{:.2},0.1 {:.2},-1.3 {:.2},-0.3",
            x + 0.15,
            x + 1.6,
            x + 1.3,
            x + 0.15
        ),
        Paint::Stroke(NOTE_COLOR, 0.3),
    );
    g
}

fn natural() -> Group {
    let mut g = Group::new();
    g.line(0.1, -2.3, 0.1, 0.9, NOTE_COLOR, ACC_STEM_WIDTH);
    g.line(0.95, -0.9, 0.95, 2.3, NOTE_COLOR, ACC_STEM_WIDTH);
    g.line(0.1, -0.4, 0.95, -0.8, NOTE_COLOR, ACC_BAR_WIDTH);
    g.line(0.1, 0.8, 0.95, 0.4, NOTE_COLOR, ACC_BAR_WIDTH);
    g
}

fn double_sharp() -> Group {
    let mut g = Group::new();
    g.line(0.1, -0.65, 1.4, 0.65, NOTE_COLOR, 0.35);
    g.line(0.1, 0.65, 1.4, -0.65, NOTE_COLOR, 0.35);
    g
}

// ═══════════════════════════════════════════════════════════════════════
// Clefs
// ═══════════════════════════════════════════════════════════════════════

const TREBLE_CLEF_UPPER: &str = "M156.716,61.478c-4.111,6.276-8.881,11.511-14.212,15.609\
l-8.728,6.962c-13.339,11.855-22.937,21.433-28.542,28.464\
c-10.209,12.788-15.806,25.779-16.65,38.611c-0.942,14.473,3.187,28.21,12.275,40.84\
c9.636,13.458,21.8,20.754,36.164,21.69c3.291,0.218,6.897,0.182,9.896-0.015\
l-1.121-10.104c-2.09,0.192-4.306,0.223-6.628,0.068\
c-9.437-0.617-17.864-4.511-25.064-11.573c-7.524-7.333-10.895-15.415-10.287-24.7\
c1.149-17.59,12.562-35.004,33.925-51.792l9.543-7.599\
c8.394-7.174,15.192-16.191,20.216-26.825c4.971-10.556,7.886-21.983,8.673-33.96\
c0.466-7.037-0.513-15.775-2.874-25.965c-3.241-13.839-7.854-20.765-14.136-21.179\
c-2.232-0.138-4.676,0.986-7.658,3.617c-7.252,6.548-12.523,14.481-15.683,23.542\
c-2.438,6.926-4.057,16.189-4.805,27.529c-0.313,4.72,0.313,13.438,1.805,23.962\
l8.844-8.192c-0.028-1.183,0.005-2.413,0.096-3.703\
c0.466-7.221,2.289-15.062,5.394-23.293c3.956-10.296,7.689-13.409,10.133-14.204\
c0.668-0.218,1.32-0.298,2.015-0.254c3.185,0.212,6.358,1.559,5.815,9.979\
C164.664,46.132,161.831,53.693,156.716,61.478z";

const TREBLE_CLEF_LOWER: &str = "M164.55,209.161c5.728-2.568,10.621-6.478,14.576-11.651\
c5.055-6.561,7.897-14.316,8.467-23.047c0.72-10.719-1.854-20.438-7.617-28.895\
c-6.322-9.264-14.98-14.317-25.745-15.026c-1.232-0.081-2.543-0.075-3.895,0.025\
l-2.304-17.191l-9.668,7.112l1.483,12.194\
c-5.789,2.393-10.827,6.17-15.017,11.255c-4.823,5.924-7.508,12.443-7.964,19.382\
c-0.466,7.208,1.142,13.81,4.782,19.583c1.895,3.081,4.507,5.82,7.498,8.058\
c4.906,3.65,10.563,3.376,11.459,1.393c0.906-1.983-2.455-5.095-5.09-9.248\
c-1.502-2.351-2.242-5.173-2.242-8.497c0-7.053,4.256-13.116,10.317-15.799\
l5.673,44.211l1.325,10.258c0.864,4.873,1.719,9.725,2.537,14.52\
c1,6.488,1.352,12.112,1.041,16.715c-0.419,6.375-2.408,11.584-5.919,15.493\
c-2.234,2.485-4.844,4.055-7.795,4.925c3.961-3.962,6.414-9.43,6.414-15.478\
c0-12.075-9.792-21.872-21.87-21.872c-3.353,0-6.491,0.812-9.329,2.159\
c-0.36,0.155-0.699,0.388-1.054,0.574c-0.779,0.425-1.559,0.85-2.286,1.362\
c-0.249,0.187-0.487,0.403-0.732,0.605c-4.888,3.816-8.091,9.616-8.375,16.229\
c0,0.01-0.011,0.021-0.011,0.031c0,0.005,0,0.01,0,0.016\
c-0.013,0.311-0.09,0.59-0.09,0.896c0,0.259,0.067,0.492,0.078,0.74\
c-0.011,7.084,2.933,13.179,8.839,18.118c5.584,4.666,12.277,7.28,19.892,7.777\
c4.327,0.28,8.505-0.217,12.407-1.485c3.189-1.041,6.275-2.62,9.149-4.687\
c6.96-5.022,10.75-11.584,11.272-19.532c0.399-6.063,0.094-13.235-0.937-21.411\
l-2.838-18.429l-7.156-52.899c7.984,1.532,14.027,8.543,14.027,16.968\
c0,5.986-1.937,15.431-5.551,20.376L164.55,209.161z";

const BASS_CLEF_BODY: &str = "M176.014,0l-2.823,0.01\
C89.091,1.164,20.78,63.557,15.904,118.564\
c-3.125,35.072,4.693,63.941,22.568,83.494\
c16.307,17.803,39.765,26.836,69.727,26.836\
c31.095,0,61.603-29.77,61.603-60.106\
c0-30.803-25.076-55.869-55.888-55.869\
c-16.569,0-27.575,7.323-34.858,12.179\
c-2.853,1.892-5.796,3.854-7.121,3.854\
c-0.446,0-1.477-1.184-2.458-5.635\
c-3.399-15.335,1.902-33.644,14.212-48.98\
c10.399-12.978,34.858-34.726,81.876-34.726\
c65.67,0,101.833,52.894,101.833,148.952\
c0,192.852-165.703,271.845-216.483,291.459\
c-10.398,4.016-13.778,12.716-12.492,19.553\
C39.828,507.002,45.947,512,53.686,512\
c2.448,0,5.037-0.496,7.657-1.477l5.807-2.165\
C262.916,435.82,362.19,326.247,362.19,182.648\
C362.19,57.164,265.688,0,176.014,0z";

const BASS_CLEF_UPPER_DOT: &str = "M455.486,126.84\
c22.771,0,41.282-18.522,41.282-41.292\
c0-22.76-18.512-41.271-41.282-41.271\
c-22.759,0-41.281,18.511-41.281,41.271\
C414.205,108.318,432.726,126.84,455.486,126.84z";

const BASS_CLEF_LOWER_DOT: &str = "M455.486,211.365\
c-22.759,0-41.281,18.522-41.281,41.282\
c0,22.77,18.522,41.281,41.281,41.281\
c22.771,0,41.282-18.511,41.282-41.281\
C496.768,229.887,478.256,211.365,455.486,211.365z";

fn g_clef() -> Group {
    let scale = 0.0486;
    let mut inner = Group::translated(-138.0 * scale, -148.0 * scale - 0.8)
        .with_transform(Transform::Scale(scale));
    inner.path(TREBLE_CLEF_UPPER, Paint::Fill(NOTE_COLOR));
    inner.path(TREBLE_CLEF_LOWER, Paint::Fill(NOTE_COLOR));
    let mut g = Group::new();
    g.group(inner);
    g
}

fn f_clef() -> Group {
    let scale = 0.012;
    let mut inner = Group::translated(-176.0 * scale - 0.4, -169.0 * scale)
        .with_transform(Transform::Scale(scale));
    inner.path(BASS_CLEF_BODY, Paint::Fill(NOTE_COLOR));
    inner.path(BASS_CLEF_UPPER_DOT, Paint::Fill(NOTE_COLOR));
    inner.path(BASS_CLEF_LOWER_DOT, Paint::Fill(NOTE_COLOR));
    let mut g = Group::new();
    g.group(inner);
    g
}

/// Clef sounding two octaves away, marked with a small "15".
fn with_octave_mark(mut clef: Group, y: f64, below: bool) -> Group {
    let mut style = TextStyle::new(CLEF_OCTAVE_MARK_SIZE).anchor(Anchor::Middle);
    if below {
        style = style.hanging();
    }
    clef.text(0.0, y, "15", style);
    clef
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::svg_builder::Element;

    #[test]
    fn every_accidental_has_a_defined_symbol() {
        let mut drawing = Drawing::new(10.0, 10.0);
        define_symbols(&mut drawing);
        let svg = drawing.to_svg();
        for acc in [
            Accidental::DoubleFlat,
            Accidental::Flat,
            Accidental::Natural,
            Accidental::Sharp,
            Accidental::DoubleSharp,
        ] {
            let id = accidental_symbol(acc);
            assert!(svg.contains(&format!(r#"<g id="{}">"#, id)), "missing {}", id);
        }
        for id in [FULL_NOTE, EMPTY_NOTE, G_CLEF, F_CLEF, UPPER_G_CLEF, LOWER_F_CLEF] {
            assert!(svg.contains(&format!(r#"<g id="{}">"#, id)), "missing {}", id);
        }
    }

    #[test]
    fn octave_clefs_carry_their_mark() {
        let clef = with_octave_mark(g_clef(), -8.6, false);
        let marks = clef
            .walk()
            .into_iter()
            .filter(|e| matches!(e, Element::Text { content, .. } if content == "15"))
            .count();
        assert_eq!(marks, 1);
    }
}
