//! Absolute pitches: letter, octave and accidental.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::consts::*;
use super::interval::Interval;
use crate::error::ValidationError;

/// Note letter. Declared in staff order so the discriminant is the index
/// within an octave (C = 0 .. B = 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub fn from_char(c: char) -> Result<Self, ValidationError> {
        match c {
            'C' => Ok(Letter::C),
            'D' => Ok(Letter::D),
            'E' => Ok(Letter::E),
            'F' => Ok(Letter::F),
            'G' => Ok(Letter::G),
            'A' => Ok(Letter::A),
            'B' => Ok(Letter::B),
            other => Err(ValidationError::InvalidLetter(other)),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }

    /// Position within the octave on the staff, C = 0.
    pub fn staff_index(self) -> i32 {
        self as i32
    }

    /// Semitones above C.
    pub fn semitones(self) -> i32 {
        LETTER_SEMITONES[self as usize]
    }
}

/// Accidental, ordered from double flat to double sharp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// Parse the one-character form used in instrument files: `& b n # +`.
    pub fn from_char(c: char) -> Result<Self, ValidationError> {
        match c {
            '&' => Ok(Accidental::DoubleFlat),
            'b' => Ok(Accidental::Flat),
            'n' => Ok(Accidental::Natural),
            '#' => Ok(Accidental::Sharp),
            '+' => Ok(Accidental::DoubleSharp),
            other => Err(ValidationError::InvalidAccidental(other)),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Accidental::DoubleFlat => '&',
            Accidental::Flat => 'b',
            Accidental::Natural => 'n',
            Accidental::Sharp => '#',
            Accidental::DoubleSharp => '+',
        }
    }

    /// Chromatic offset in semitones, -2 ..= 2.
    pub fn offset(self) -> i32 {
        self as i32 + ACCIDENTAL_BASE
    }

    /// Inverse of [`Accidental::offset`]; `None` beyond a double flat/sharp.
    pub fn from_offset(offset: i32) -> Option<Self> {
        usize::try_from(offset - ACCIDENTAL_BASE)
            .ok()
            .and_then(|i| ACCIDENTALS.get(i).copied())
    }

    /// Unicode sign for display text.
    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "𝄫",
            Accidental::Flat => "♭",
            Accidental::Natural => "♮",
            Accidental::Sharp => "♯",
            Accidental::DoubleSharp => "𝄪",
        }
    }

    pub fn is_natural(self) -> bool {
        self == Accidental::Natural
    }
}

/// An absolute, spelled pitch. `E♭4` and `D♯4` are different values even
/// though they sound the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pitch {
    letter: Letter,
    octave: i32,
    accidental: Accidental,
}

/// Outcome of [`Pitch::transpose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transposed {
    /// Spelled on the staff position the interval number asks for.
    Exact(Pitch),
    /// The needed accidental was beyond a double flat/sharp, so the pitch was
    /// respelled from its chromatic value and sits on a different staff position.
    Respelled(Pitch),
}

impl Transposed {
    pub fn pitch(self) -> Pitch {
        match self {
            Transposed::Exact(p) | Transposed::Respelled(p) => p,
        }
    }

    pub fn is_respelled(&self) -> bool {
        matches!(self, Transposed::Respelled(_))
    }
}

impl Pitch {
    pub fn new(letter: Letter, octave: i32, accidental: Accidental) -> Self {
        Self { letter, octave, accidental }
    }

    pub fn natural(letter: Letter, octave: i32) -> Self {
        Self::new(letter, octave, Accidental::Natural)
    }

    /// Pitch on a staff position (middle C = 0) with the given accidental.
    pub fn from_staff_position(position: i32, accidental: Accidental) -> Self {
        let octave = position.div_euclid(7) + 4;
        let letter = STAFF_LETTERS[position.rem_euclid(7) as usize];
        Self::new(letter, octave, accidental)
    }

    /// Canonically spelled pitch for a chromatic pitch number (C4 = 60).
    pub fn from_chromatic(chromatic: i32) -> Self {
        let octave = chromatic.div_euclid(12) - 1;
        let (letter, accidental) = CHROMATIC_SPELLING[chromatic.rem_euclid(12) as usize];
        Self::new(letter, octave, accidental)
    }

    /// Nearest equal-tempered pitch for a frequency in Hz.
    pub fn from_frequency(frequency: f64) -> Self {
        let chromatic = (12.0 * (frequency / A4_FREQUENCY).log2()).round() as i32 + A4_CHROMATIC;
        Self::from_chromatic(chromatic)
    }

    pub fn letter(&self) -> Letter {
        self.letter
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    /// Vertical coordinate: C4 = 0, D4 = 1, B3 = -1.
    pub fn staff_position(&self) -> i32 {
        (self.octave - 4) * 7 + self.letter.staff_index()
    }

    /// Absolute semitone number: C0 = 12, C4 = 60.
    pub fn chromatic(&self) -> i32 {
        self.letter.semitones() + self.accidental.offset() + self.octave * 12 + 12
    }

    pub fn frequency(&self) -> f64 {
        A4_FREQUENCY * 2f64.powf(f64::from(self.chromatic() - A4_CHROMATIC) / 12.0)
    }

    /// Same sounding pitch, canonically respelled.
    pub fn normalized(&self) -> Self {
        Self::from_chromatic(self.chromatic())
    }

    /// Transpose by an interval, keeping the spelling the interval implies
    /// whenever a double flat/sharp or less is enough.
    pub fn transpose(&self, interval: &Interval) -> Transposed {
        let position = self.staff_position() + interval.staff_steps();
        let naive = Self::from_staff_position(position, Accidental::Natural).chromatic();
        let correct = self.chromatic() + interval.semitones();
        match Accidental::from_offset(correct - naive) {
            Some(accidental) => Transposed::Exact(Self::from_staff_position(position, accidental)),
            None => Transposed::Respelled(Self::from_chromatic(correct)),
        }
    }

    /// Like [`Pitch::transpose`], but only the pitch. A respelled result is
    /// logged as a warning because it changes how the chart reads.
    pub fn transposed(&self, interval: &Interval) -> Self {
        let result = self.transpose(interval);
        if result.is_respelled() {
            log::warn!(
                "{} transposed by {} needs more than a double accidental; respelled as {}",
                self,
                interval,
                result.pitch()
            );
        }
        result.pitch()
    }

    /// Human readable name with Unicode accidentals, e.g. `E♭4`.
    pub fn display_name(&self) -> String {
        match self.accidental {
            Accidental::Natural => format!("{}{}", self.letter.as_char(), self.octave),
            Accidental::DoubleFlat | Accidental::DoubleSharp => self.normalized().display_name(),
            acc => format!("{}{}{}", self.letter.as_char(), acc.symbol(), self.octave),
        }
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.staff_position()
            .cmp(&other.staff_position())
            .then(self.accidental.cmp(&other.accidental))
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        if !self.accidental.is_natural() {
            write!(f, "{}", self.accidental.as_char())?;
        }
        write!(f, "{}", self.octave)
    }
}

impl FromStr for Pitch {
    type Err = ValidationError;

    /// `<A-G>[& b n # +]<octave>`, e.g. `C4`, `Bb3`, `F#5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = Letter::from_char(chars.next().ok_or(ValidationError::Empty)?)?;
        let rest = chars.as_str();

        let (accidental, octave) = match rest.chars().next() {
            Some(c) if c.is_ascii_digit() || c == '-' => (Accidental::Natural, rest),
            Some(c) => (Accidental::from_char(c)?, &rest[c.len_utf8()..]),
            None => return Err(ValidationError::InvalidOctave(s.to_string())),
        };
        let octave = octave
            .parse::<i32>()
            .ok()
            .filter(|o| OCTAVE_RANGE.contains(o))
            .ok_or_else(|| ValidationError::InvalidOctave(s.to_string()))?;
        Ok(Self::new(letter, octave, accidental))
    }
}
