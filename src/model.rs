//! Data model for instrument ranges.
//!
//! A range is a span between two endpoints: absolute pitches for instruments
//! that are written at a fixed pitch, or intervals above an open string for
//! stringed instruments. An instrument keeps its ranges sorted and never
//! lets two of them overlap (touching is fine).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ParseError, ValidationError};
use crate::theory::{Interval, Pitch};

/// Something a range can start and end on.
pub trait Endpoint:
    Copy + Ord + fmt::Display + FromStr<Err = ValidationError> + Serialize
{
    /// Name shown in the range description rows.
    fn display_name(&self) -> String;
}

impl Endpoint for Pitch {
    fn display_name(&self) -> String {
        Pitch::display_name(self)
    }
}

impl Endpoint for Interval {
    fn display_name(&self) -> String {
        Interval::display_name(self)
    }
}

/// A playable span with a description. `preferred` marks the comfortable
/// part of an instrument's compass, as opposed to its extremes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Range<E> {
    pub start: E,
    pub end: E,
    pub description: String,
    pub preferred: bool,
}

pub type AbsoluteRange = Range<Pitch>;
pub type RelativeRange = Range<Interval>;

impl<E: Endpoint> Range<E> {
    pub fn new(start: E, end: E, description: impl Into<String>, preferred: bool) -> Result<Self, ParseError> {
        if start > end {
            return Err(ParseError::ReversedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start,
            end,
            description: description.into(),
            preferred,
        })
    }

    /// Parse `[!]<start> <end> <description...>`; a leading `!` marks the
    /// range as not preferred.
    pub fn from_text(line: &str) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();
        let (Some(start), Some(end)) = (tokens.next(), tokens.next()) else {
            return Err(ParseError::MalformedRange(line.to_string()));
        };
        let (start, preferred) = match start.strip_prefix('!') {
            Some(rest) => (rest, false),
            None => (start, true),
        };
        let description = tokens.collect::<Vec<_>>().join(" ");
        Self::new(parse_endpoint(start)?, parse_endpoint(end)?, description, preferred)
    }
}

fn parse_endpoint<E: Endpoint>(token: &str) -> Result<E, ParseError> {
    token.parse().map_err(|source| ParseError::InvalidEndpoint {
        token: token.to_string(),
        source,
    })
}

impl Range<Pitch> {
    pub fn transposed(&self, interval: &Interval) -> Self {
        Self {
            start: self.start.transposed(interval),
            end: self.end.transposed(interval),
            description: self.description.clone(),
            preferred: self.preferred,
        }
    }
}

impl<E: fmt::Display> fmt::Display for Range<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.preferred { "" } else { "!" };
        write!(f, "{}{} {} {}", mark, self.start, self.end, self.description)
    }
}

/// Sort ranges by start and reject any pair that overlaps.
pub(crate) fn sorted_ranges<E: Endpoint>(instrument: &str, mut ranges: Vec<Range<E>>) -> Result<Vec<Range<E>>, ParseError> {
    ranges.sort_by(|a, b| a.start.cmp(&b.start));
    if let Some(pair) = ranges.windows(2).find(|pair| pair[0].end > pair[1].start) {
        return Err(ParseError::OverlappingRanges {
            instrument: instrument.to_string(),
            first: pair[0].to_string(),
            second: pair[1].to_string(),
        });
    }
    Ok(ranges)
}

/// An instrument whose ranges are written as absolute pitches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedInstrument {
    name: String,
    ranges: Vec<AbsoluteRange>,
    transposition: Interval,
    notes: String,
}

impl FixedInstrument {
    pub fn new(
        name: impl Into<String>,
        ranges: Vec<AbsoluteRange>,
        transposition: Interval,
        notes: impl Into<String>,
    ) -> Result<Self, ParseError> {
        let name = name.into();
        let ranges = sorted_ranges(&name, ranges)?;
        Ok(Self {
            name,
            ranges,
            transposition,
            notes: notes.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Written ranges, sorted.
    pub fn ranges(&self) -> &[AbsoluteRange] {
        &self.ranges
    }

    pub fn transposition(&self) -> Interval {
        self.transposition
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Ranges shifted from written to sounding pitch.
    pub fn sounding_ranges(&self) -> Vec<AbsoluteRange> {
        self.ranges.iter().map(|r| r.transposed(&self.transposition)).collect()
    }

    pub fn min_sounding_pitch(&self) -> Option<Pitch> {
        self.ranges.first().map(|r| r.start.transposed(&self.transposition))
    }

    pub fn max_sounding_pitch(&self) -> Option<Pitch> {
        self.ranges.last().map(|r| r.end.transposed(&self.transposition))
    }
}

/// An instrument whose ranges are intervals above each open string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringedInstrument {
    name: String,
    ranges: Vec<RelativeRange>,
    open_strings: Vec<Pitch>,
    transposition: Interval,
    notes: String,
}

impl StringedInstrument {
    pub fn new(
        name: impl Into<String>,
        ranges: Vec<RelativeRange>,
        mut open_strings: Vec<Pitch>,
        transposition: Interval,
        notes: impl Into<String>,
    ) -> Result<Self, ParseError> {
        let name = name.into();
        let ranges = sorted_ranges(&name, ranges)?;
        open_strings.sort();
        Ok(Self {
            name,
            ranges,
            open_strings,
            transposition,
            notes: notes.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ranges(&self) -> &[RelativeRange] {
        &self.ranges
    }

    /// Open strings, lowest first.
    pub fn open_strings(&self) -> &[Pitch] {
        &self.open_strings
    }

    pub fn transposition(&self) -> Interval {
        self.transposition
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Sounding pitch of `offset` above (or below) an open string.
    pub fn sounding_pitch(&self, open_string: &Pitch, offset: &Interval) -> Pitch {
        open_string.transposed(offset).transposed(&self.transposition)
    }

    pub fn min_sounding_pitch(&self) -> Option<Pitch> {
        let lowest = self.open_strings.first()?;
        let range = self.ranges.first()?;
        Some(self.sounding_pitch(lowest, &range.start))
    }

    pub fn max_sounding_pitch(&self) -> Option<Pitch> {
        let highest = self.open_strings.last()?;
        let range = self.ranges.last()?;
        Some(self.sounding_pitch(highest, &range.end))
    }
}

/// Either kind of instrument; decided once when the description is parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instrument {
    Fixed(FixedInstrument),
    Stringed(StringedInstrument),
}

impl Instrument {
    pub fn name(&self) -> &str {
        match self {
            Instrument::Fixed(i) => i.name(),
            Instrument::Stringed(i) => i.name(),
        }
    }

    pub fn notes(&self) -> &str {
        match self {
            Instrument::Fixed(i) => i.notes(),
            Instrument::Stringed(i) => i.notes(),
        }
    }

    pub fn transposition(&self) -> Interval {
        match self {
            Instrument::Fixed(i) => i.transposition(),
            Instrument::Stringed(i) => i.transposition(),
        }
    }

    pub fn range_count(&self) -> usize {
        match self {
            Instrument::Fixed(i) => i.ranges().len(),
            Instrument::Stringed(i) => i.ranges().len(),
        }
    }

    pub fn min_sounding_pitch(&self) -> Option<Pitch> {
        match self {
            Instrument::Fixed(i) => i.min_sounding_pitch(),
            Instrument::Stringed(i) => i.min_sounding_pitch(),
        }
    }

    pub fn max_sounding_pitch(&self) -> Option<Pitch> {
        match self {
            Instrument::Fixed(i) => i.max_sounding_pitch(),
            Instrument::Stringed(i) => i.max_sounding_pitch(),
        }
    }
}

impl From<FixedInstrument> for Instrument {
    fn from(inst: FixedInstrument) -> Self {
        Instrument::Fixed(inst)
    }
}

impl From<StringedInstrument> for Instrument {
    fn from(inst: StringedInstrument) -> Self {
        Instrument::Stringed(inst)
    }
}
