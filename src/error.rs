//! Error types for chart construction and rendering.
//!
//! Validation errors come from the music-theory value types, parse errors from
//! instrument descriptions, and layout errors from the rendering pipeline.
//! Nothing is recovered locally: every error propagates to the caller.

use std::path::PathBuf;

use thiserror::Error;

use crate::theory::Quality;

/// A pitch, accidental or interval value that cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid note name '{0}'")]
    InvalidLetter(char),

    #[error("invalid accidental '{0}'")]
    InvalidAccidental(char),

    #[error("invalid octave in '{0}'")]
    InvalidOctave(String),

    #[error("invalid interval number in '{0}'")]
    InvalidIntervalNumber(String),

    #[error("interval number must be at least 1, got {0}")]
    IntervalNumberTooSmall(u32),

    #[error("interval number {0} is too large")]
    IntervalNumberTooLarge(u32),

    #[error("interval with number {number} (normalized: {normalized}) cannot be {quality}")]
    QualityMismatch {
        number: u32,
        normalized: u32,
        quality: Quality,
    },

    /// Declared direction disagrees with the sign of the semitone distance,
    /// e.g. a diminished unison written upwards.
    #[error("interval '{interval}' points {direction} but spans {semitones} semitones")]
    DirectionMismatch {
        interval: String,
        direction: &'static str,
        semitones: i32,
    },

    #[error("empty value")]
    Empty,
}

/// A malformed instrument description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("instrument description is empty")]
    Empty,

    #[error("invalid section header: '{0}'")]
    InvalidHeader(String),

    #[error("found value before any section title: '{0}'")]
    ValueBeforeSection(String),

    #[error("missing '{0}' section")]
    MissingSection(&'static str),

    #[error("range line needs a start and an end: '{0}'")]
    MalformedRange(String),

    #[error("cannot parse '{token}': {source}")]
    InvalidEndpoint {
        token: String,
        #[source]
        source: ValidationError,
    },

    #[error("range start {start} lies above its end {end}")]
    ReversedRange { start: String, end: String },

    #[error("{instrument} has overlapping ranges: '{first}' and '{second}'")]
    OverlappingRanges {
        instrument: String,
        first: String,
        second: String,
    },

    #[error("transposition must be a single interval, got {0} values")]
    MultiTokenTransposition(usize),
}

/// A rendering precondition that does not hold.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("no instruments to render")]
    NoInstruments,

    #[error("{0} has no ranges")]
    NoRanges(String),

    #[error("{0} has no open strings")]
    NoOpenStrings(String),

    #[error("overlap {overlap} leaves no room on a {fill} wide tile")]
    InvalidTiling { fill: f64, overlap: f64 },
}

/// Umbrella error for the file-level entry points.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Instrument {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("invalid chart config: {0}")]
    Config(#[from] serde_json::Error),
}
