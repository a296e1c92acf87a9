//! Fixed lookup tables shared by the pitch and interval types.

use super::interval::Quality;
use super::pitch::{Accidental, Letter};

/// Letters in staff order, starting at C (staff position 0 is C4).
pub(crate) const STAFF_LETTERS: [Letter; 7] = [
    Letter::C,
    Letter::D,
    Letter::E,
    Letter::F,
    Letter::G,
    Letter::A,
    Letter::B,
];

/// Semitones above C for each letter, indexed by staff order.
pub(crate) const LETTER_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Accidentals ordered by rank; index + `ACCIDENTAL_BASE` is the semitone offset.
pub(crate) const ACCIDENTALS: [Accidental; 5] = [
    Accidental::DoubleFlat,
    Accidental::Flat,
    Accidental::Natural,
    Accidental::Sharp,
    Accidental::DoubleSharp,
];
pub(crate) const ACCIDENTAL_BASE: i32 = -2;

/// Canonical spelling of each pitch class when reading a chromatic pitch.
pub(crate) const CHROMATIC_SPELLING: [(Letter, Accidental); 12] = [
    (Letter::C, Accidental::Natural),
    (Letter::C, Accidental::Sharp),
    (Letter::D, Accidental::Natural),
    (Letter::E, Accidental::Flat),
    (Letter::E, Accidental::Natural),
    (Letter::F, Accidental::Natural),
    (Letter::F, Accidental::Sharp),
    (Letter::G, Accidental::Natural),
    (Letter::A, Accidental::Flat),
    (Letter::A, Accidental::Natural),
    (Letter::B, Accidental::Flat),
    (Letter::B, Accidental::Natural),
];

/// Canonical interval (simple number, quality) for each semitone class.
pub(crate) const SEMITONE_INTERVALS: [(u32, Quality); 12] = [
    (1, Quality::Perfect),
    (2, Quality::Minor),
    (2, Quality::Major),
    (3, Quality::Minor),
    (3, Quality::Major),
    (4, Quality::Perfect),
    (4, Quality::Augmented),
    (5, Quality::Perfect),
    (6, Quality::Minor),
    (6, Quality::Major),
    (7, Quality::Minor),
    (7, Quality::Major),
];

// Staff-position spans of the four clefs, (lowest line, highest line).
pub const UPPER_G_RANGE: (i32, i32) = (16, 24);
pub const G_RANGE: (i32, i32) = (2, 10);
pub const F_RANGE: (i32, i32) = (-10, -2);
pub const LOWER_F_RANGE: (i32, i32) = (-24, -16);

pub(crate) const A4_FREQUENCY: f64 = 440.0;
pub(crate) const A4_CHROMATIC: i32 = 69;

/// Octaves accepted when reading a pitch.
pub(crate) const OCTAVE_RANGE: std::ops::RangeInclusive<i32> = -10..=20;
/// Largest interval number accepted (ten octaves and a bit).
pub(crate) const MAX_INTERVAL_NUMBER: u32 = 100;
