//! Instrument description parser — converts the plain-text instrument format
//! into the Instrument model.
//!
//! ```text
//! Clarinet in Bb            // name on the first line
//! transposition: -j2        // inline single-value section
//! ranges:
//! !E3 E4 chalumeau
//! E4 C6 clarion
//! notes:
//! free text, one line per entry
//! ```
//!
//! A file with an `open strings` section describes a stringed instrument and
//! its ranges are intervals above each string.

use std::collections::BTreeMap;

use crate::error::ParseError;
use crate::model::*;
use crate::theory::{Interval, Pitch};

/// Section title → lines (or whitespace-separated values for inline sections).
pub type Fields = BTreeMap<String, Vec<String>>;

const RANGES: &str = "ranges";
const TRANSPOSITION: &str = "transposition";
const OPEN_STRINGS: &str = "open strings";
const NOTES: &str = "notes";

/// Split an instrument description into its name and sections.
pub fn parse_instrument_text(text: &str) -> Result<(String, Fields), ParseError> {
    let mut lines = text
        .lines()
        .map(|line| line.split("//").next().unwrap_or("").trim())
        .filter(|line| !line.is_empty());

    let name = lines.next().ok_or(ParseError::Empty)?.to_string();
    let mut fields = Fields::new();
    let mut active: Option<(String, Vec<String>)> = None;

    for line in lines {
        let Some((title, rest)) = line.split_once(':') else {
            match active.as_mut() {
                Some((_, values)) => values.push(line.to_string()),
                None => return Err(ParseError::ValueBeforeSection(line.to_string())),
            }
            continue;
        };

        if let Some((title, values)) = active.take() {
            fields.insert(title, values);
        }
        let title = title.trim().to_lowercase();
        let parts: Vec<&str> = rest.split(':').map(str::trim).filter(|p| !p.is_empty()).collect();
        match parts.as_slice() {
            [] => active = Some((title, Vec::new())),
            [value] => {
                fields.insert(title, value.split_whitespace().map(String::from).collect());
            }
            _ => return Err(ParseError::InvalidHeader(line.to_string())),
        }
    }
    if let Some((title, values)) = active {
        fields.insert(title, values);
    }

    Ok((name, fields))
}

impl Instrument {
    /// Build an instrument from parsed sections. The presence of an
    /// `open strings` section selects the stringed variant.
    pub fn from_fields(name: &str, fields: &Fields) -> Result<Self, ParseError> {
        let transposition = parse_transposition(fields)?;
        let notes = fields.get(NOTES).map(|lines| lines.join("\n")).unwrap_or_default();
        let range_lines = fields.get(RANGES).ok_or(ParseError::MissingSection(RANGES))?;

        match fields.get(OPEN_STRINGS) {
            Some(strings) => {
                let ranges = parse_ranges::<Interval>(range_lines)?;
                let open_strings = strings
                    .iter()
                    .flat_map(|line| line.split_whitespace())
                    .map(|token| {
                        token.parse::<Pitch>().map_err(|source| ParseError::InvalidEndpoint {
                            token: token.to_string(),
                            source,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let inst = StringedInstrument::new(name, ranges, open_strings, transposition, notes)?;
                Ok(Instrument::Stringed(inst))
            }
            None => {
                let ranges = parse_ranges::<Pitch>(range_lines)?;
                let inst = FixedInstrument::new(name, ranges, transposition, notes)?;
                Ok(Instrument::Fixed(inst))
            }
        }
    }
}

fn parse_transposition(fields: &Fields) -> Result<Interval, ParseError> {
    match fields.get(TRANSPOSITION).map(Vec::as_slice) {
        None => Ok(Interval::unison()),
        Some([token]) => token.parse().map_err(|source| ParseError::InvalidEndpoint {
            token: token.clone(),
            source,
        }),
        Some(values) => Err(ParseError::MultiTokenTransposition(values.len())),
    }
}

fn parse_ranges<E: Endpoint>(lines: &[String]) -> Result<Vec<Range<E>>, ParseError> {
    lines.iter().map(|line| Range::from_text(line)).collect()
}

/// Parse a complete instrument description.
pub fn parse_instrument(text: &str) -> Result<Instrument, ParseError> {
    let (name, fields) = parse_instrument_text(text)?;
    log::debug!("parsed '{}' with sections {:?}", name, fields.keys().collect::<Vec<_>>());
    Instrument::from_fields(&name, &fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use pretty_assertions::assert_eq;

    const CLARINET: &str = "\
Clarinet in Bb
transposition: -j2   // sounds a major second lower

ranges:
!E3 E4 chalumeau
E4 C6 clarion
!C6 G6 altissimo
Notes:
Fingerings differ
between systems
";

    #[test]
    fn sections_and_comments() {
        let (name, fields) = parse_instrument_text(CLARINET).unwrap();
        assert_eq!(name, "Clarinet in Bb");
        assert_eq!(fields["transposition"], vec!["-j2"]);
        assert_eq!(fields["ranges"].len(), 3);
        assert_eq!(fields["ranges"][0], "!E3 E4 chalumeau");
        assert_eq!(fields["notes"], vec!["Fingerings differ", "between systems"]);
    }

    #[test]
    fn builds_fixed_instrument() {
        let inst = parse_instrument(CLARINET).unwrap();
        let Instrument::Fixed(clarinet) = &inst else {
            panic!("expected a fixed instrument");
        };
        assert_eq!(clarinet.name(), "Clarinet in Bb");
        assert_eq!(clarinet.transposition().to_string(), "-j2");
        assert_eq!(clarinet.ranges().len(), 3);
        assert_eq!(clarinet.notes(), "Fingerings differ\nbetween systems");
    }

    #[test]
    fn open_strings_select_stringed_variant() {
        let text = "Violin\nopen strings: G3 D4 A4 E5\nranges:\n1 j6 first position\n!j6 m13 high positions\n";
        let inst = parse_instrument(text).unwrap();
        let Instrument::Stringed(violin) = &inst else {
            panic!("expected a stringed instrument");
        };
        assert_eq!(violin.open_strings().len(), 4);
        assert_eq!(violin.ranges().len(), 2);
        assert!(violin.transposition().is_unison());
    }

    #[test]
    fn open_strings_may_span_lines() {
        let text = "Bass\nopen strings:\nE1 A1\nD2\nG2\nranges:\n1 8 all\n";
        let Instrument::Stringed(bass) = parse_instrument(text).unwrap() else {
            panic!("expected a stringed instrument");
        };
        assert_eq!(bass.open_strings().len(), 4);
    }

    #[test]
    fn value_before_section() {
        assert_eq!(
            parse_instrument_text("Flute\nC4 C7 all"),
            Err(ParseError::ValueBeforeSection("C4 C7 all".to_string()))
        );
    }

    #[test]
    fn value_after_inline_section() {
        let err = parse_instrument_text("Flute\ntransposition: 8\nC4 C7 all").unwrap_err();
        assert_eq!(err, ParseError::ValueBeforeSection("C4 C7 all".to_string()));
    }

    #[test]
    fn header_with_two_values() {
        assert!(matches!(
            parse_instrument_text("Flute\nranges: a: b"),
            Err(ParseError::InvalidHeader(_))
        ));
    }

    #[test]
    fn multi_token_transposition() {
        let err = parse_instrument("Horn\ntransposition: -5 -8\nranges:\nC3 C5 x").unwrap_err();
        assert_eq!(err, ParseError::MultiTokenTransposition(2));
    }

    #[test]
    fn missing_ranges() {
        let err = parse_instrument("Horn\ntransposition: -5").unwrap_err();
        assert_eq!(err, ParseError::MissingSection("ranges"));
    }

    #[test]
    fn overlapping_ranges_fail() {
        let err = parse_instrument("Voice\nranges:\nC4 E4 x\nD4 F4 y").unwrap_err();
        assert!(matches!(err, ParseError::OverlappingRanges { .. }));
    }

    #[test]
    fn out_of_range_values_are_errors() {
        let err = parse_instrument("X\nranges:\nC400000000 D400000000 x").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidEndpoint {
                source: ValidationError::InvalidOctave(_),
                ..
            }
        ));

        let err = parse_instrument("X\ntransposition: -j4000000000\nranges:\nC4 C5 x").unwrap_err();
        assert!(
            matches!(
                err,
                ParseError::InvalidEndpoint {
                    source: ValidationError::IntervalNumberTooLarge(_),
                    ..
                }
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn empty_text() {
        assert_eq!(parse_instrument_text("  \n// only a comment\n"), Err(ParseError::Empty));
    }
}
