//! Musical intervals: number, direction and quality.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::consts::{MAX_INTERVAL_NUMBER, SEMITONE_INTERVALS};
use crate::error::ValidationError;

/// Semitones of the perfect (1, 4, 5) or minor (2, 3, 6, 7) simple interval.
const SIMPLE_BASE: [i32; 7] = [0, 1, 3, 5, 7, 8, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quality {
    Diminished,
    Minor,
    Perfect,
    Major,
    Augmented,
}

impl Quality {
    /// `j` major, `m` minor, `a` augmented, `d` diminished. Perfect has no letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'j' => Some(Quality::Major),
            'm' => Some(Quality::Minor),
            'a' => Some(Quality::Augmented),
            'd' => Some(Quality::Diminished),
            _ => None,
        }
    }

    pub fn as_char(self) -> Option<char> {
        match self {
            Quality::Major => Some('j'),
            Quality::Minor => Some('m'),
            Quality::Augmented => Some('a'),
            Quality::Diminished => Some('d'),
            Quality::Perfect => None,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quality::Diminished => "diminished",
            Quality::Minor => "minor",
            Quality::Perfect => "perfect",
            Quality::Major => "major",
            Quality::Augmented => "augmented",
        };
        f.write_str(name)
    }
}

/// A directed interval such as a major third up or a minor sixth down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    number: u32,
    direction: Direction,
    quality: Quality,
}

fn simple_number(number: u32) -> u32 {
    (number - 1) % 7 + 1
}

fn is_perfect_family(simple: u32) -> bool {
    matches!(simple, 1 | 4 | 5)
}

impl Interval {
    pub fn new(number: u32, direction: Direction, quality: Quality) -> Result<Self, ValidationError> {
        if number < 1 {
            return Err(ValidationError::IntervalNumberTooSmall(number));
        }
        if number > MAX_INTERVAL_NUMBER {
            return Err(ValidationError::IntervalNumberTooLarge(number));
        }
        let simple = simple_number(number);
        let allowed = if is_perfect_family(simple) {
            matches!(quality, Quality::Perfect | Quality::Augmented | Quality::Diminished)
        } else {
            !matches!(quality, Quality::Perfect)
        };
        if !allowed {
            return Err(ValidationError::QualityMismatch {
                number,
                normalized: simple,
                quality,
            });
        }

        // A perfect unison has no direction.
        let direction = if number == 1 && quality == Quality::Perfect {
            Direction::Up
        } else {
            direction
        };

        let interval = Self { number, direction, quality };
        let semitones = interval.semitones();
        if semitones != 0 && (direction == Direction::Down) != (semitones < 0) {
            return Err(ValidationError::DirectionMismatch {
                interval: interval.to_string(),
                direction: direction.as_str(),
                semitones,
            });
        }
        Ok(interval)
    }

    pub fn up(number: u32, quality: Quality) -> Result<Self, ValidationError> {
        Self::new(number, Direction::Up, quality)
    }

    pub fn unison() -> Self {
        Self {
            number: 1,
            direction: Direction::Up,
            quality: Quality::Perfect,
        }
    }

    /// Canonical interval spanning `semitones`; spelled minor/major/perfect,
    /// with the tritone as an augmented fourth.
    pub fn from_semitones(semitones: i32) -> Self {
        let direction = if semitones < 0 { Direction::Down } else { Direction::Up };
        let magnitude = semitones.unsigned_abs();
        let (simple, quality) = SEMITONE_INTERVALS[(magnitude % 12) as usize];
        Self {
            number: magnitude / 12 * 7 + simple,
            direction,
            quality,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn is_unison(&self) -> bool {
        *self == Self::unison()
    }

    /// Signed semitone distance.
    pub fn semitones(&self) -> i32 {
        let simple = simple_number(self.number);
        let octaves = ((self.number - 1) / 7) as i32;
        let shift = if is_perfect_family(simple) {
            match self.quality {
                Quality::Augmented => 1,
                Quality::Diminished => -1,
                _ => 0,
            }
        } else {
            match self.quality {
                Quality::Diminished => -1,
                Quality::Major => 1,
                Quality::Augmented => 2,
                _ => 0,
            }
        };
        self.direction.sign() * (SIMPLE_BASE[(simple - 1) as usize] + shift + octaves * 12)
    }

    /// Signed distance in staff positions.
    pub fn staff_steps(&self) -> i32 {
        self.direction.sign() * (self.number as i32 - 1)
    }

    /// Same distance, canonically spelled.
    pub fn normalized(&self) -> Self {
        Self::from_semitones(self.semitones())
    }

    pub fn display_name(&self) -> String {
        self.to_string()
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::unison()
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.staff_steps()
            .cmp(&other.staff_steps())
            .then(self.semitones().cmp(&other.semitones()))
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == Direction::Down {
            f.write_str("-")?;
        }
        if let Some(c) = self.quality.as_char() {
            write!(f, "{c}")?;
        }
        write!(f, "{}", self.number)
    }
}

impl FromStr for Interval {
    type Err = ValidationError;

    /// `[-][j m a d]<number>`, e.g. `m3`, `-a4`, `5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (direction, rest) = match s.strip_prefix('-') {
            Some(rest) => (Direction::Down, rest),
            None => (Direction::Up, s),
        };
        let first = rest.chars().next().ok_or(ValidationError::Empty)?;
        let (quality, digits) = match Quality::from_char(first) {
            Some(q) => (q, &rest[first.len_utf8()..]),
            None => (Quality::Perfect, rest),
        };
        let number = digits
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidIntervalNumber(s.to_string()))?;
        Self::new(number, direction, quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn i(s: &str) -> Interval {
        s.parse().unwrap()
    }

    #[test]
    fn semitone_table() {
        let expected = [
            ("1", 0),
            ("m2", 1),
            ("j2", 2),
            ("m3", 3),
            ("j3", 4),
            ("4", 5),
            ("a4", 6),
            ("d5", 6),
            ("5", 7),
            ("m6", 8),
            ("j6", 9),
            ("m7", 10),
            ("j7", 11),
            ("8", 12),
            ("m13", 20),
        ];
        for (name, semitones) in expected {
            assert_eq!(i(name).semitones(), semitones, "{name}");
        }
    }

    #[test]
    fn altered_imperfect_intervals() {
        assert_eq!(i("d2").semitones(), 0);
        assert_eq!(i("a2").semitones(), 3);
        assert_eq!(i("d3").semitones(), 2);
        assert_eq!(i("a3").semitones(), 5);
        assert_eq!(i("-m6").semitones(), -8);
        assert_eq!(i("-1").semitones(), 0);
    }

    #[test]
    fn unison_has_no_direction() {
        assert_eq!(i("-1"), Interval::unison());
        assert_eq!(i("-1").to_string(), "1");
    }

    #[test]
    fn quality_must_fit_family() {
        assert!(matches!("m5".parse::<Interval>(), Err(ValidationError::QualityMismatch { .. })));
        assert!(matches!("j4".parse::<Interval>(), Err(ValidationError::QualityMismatch { .. })));
        assert!(matches!("3".parse::<Interval>(), Err(ValidationError::QualityMismatch { .. })));
        assert!(matches!("j11".parse::<Interval>(), Err(ValidationError::QualityMismatch { .. })));
        assert!("j10".parse::<Interval>().is_ok());
    }

    #[test]
    fn rejects_nonsensical_direction() {
        assert!(matches!("d1".parse::<Interval>(), Err(ValidationError::DirectionMismatch { .. })));
        assert!(matches!("-d1".parse::<Interval>(), Err(ValidationError::DirectionMismatch { .. })));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert_eq!("0".parse::<Interval>(), Err(ValidationError::IntervalNumberTooSmall(0)));
        assert!(matches!("mx".parse::<Interval>(), Err(ValidationError::InvalidIntervalNumber(_))));
        assert!(matches!("q3".parse::<Interval>(), Err(ValidationError::InvalidIntervalNumber(_))));
        assert_eq!("-".parse::<Interval>(), Err(ValidationError::Empty));
        assert_eq!(
            "j4000000000".parse::<Interval>(),
            Err(ValidationError::IntervalNumberTooLarge(4_000_000_000))
        );
        assert_eq!(Interval::up(101, Quality::Major), Err(ValidationError::IntervalNumberTooLarge(101)));
    }

    #[test]
    fn upward_constructor() {
        assert_eq!(Interval::up(3, Quality::Minor), Ok(i("m3")));
        assert_eq!(Interval::up(8, Quality::Perfect).unwrap().semitones(), 12);
        assert!(matches!(Interval::up(5, Quality::Major), Err(ValidationError::QualityMismatch { .. })));
    }

    #[test]
    fn normalization() {
        assert_eq!(i("d2").normalized(), i("1"));
        assert_eq!(i("-d2").normalized(), i("1"));
        assert_eq!(i("d5").normalized(), i("a4"));
        assert_eq!(i("-d5").normalized(), i("-a4"));
        assert_eq!(i("a3").normalized(), i("4"));
        assert_eq!(i("-a3").normalized(), i("-4"));
        assert_eq!(Interval::from_semitones(-20), i("-m13"));
    }

    #[test]
    fn semitone_round_trip() {
        for number in 1..=22 {
            for direction in [Direction::Up, Direction::Down] {
                for quality in [
                    Quality::Diminished,
                    Quality::Minor,
                    Quality::Perfect,
                    Quality::Major,
                    Quality::Augmented,
                ] {
                    if let Ok(interval) = Interval::new(number, direction, quality) {
                        let back = Interval::from_semitones(interval.semitones());
                        assert_eq!(back.semitones(), interval.semitones(), "{interval}");
                    }
                }
            }
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        for s in ["1", "m3", "-a4", "j10", "-8", "d5"] {
            assert_eq!(i(s).to_string(), s);
        }
    }

    #[test]
    fn ordering_follows_height() {
        assert!(i("-5") < i("1"));
        assert!(i("1") < i("m2"));
        assert!(i("m2") < i("j2"));
        assert!(i("j2") < i("m3"));
        assert!(i("-j3") < i("-m3"));
        assert!(i("8") < i("m9"));
    }
}
