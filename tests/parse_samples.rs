//! Integration tests — load the sample descriptions in the instruments/ directory.

use pretty_assertions::assert_eq;
use rangechart::{instrument_to_json, load_instrument, load_instruments, ChartError, Instrument, ParseError, Pitch};
use std::path::PathBuf;

fn instruments_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("instruments")
}

fn pitch(name: &str) -> Pitch {
    name.parse().unwrap()
}

#[test]
fn every_sample_parses() {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(instruments_dir())
        .expect("instruments/ should exist")
        .map(|entry| entry.unwrap().path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("txt"))
        .collect();
    paths.sort();
    assert!(paths.len() >= 10, "expected the full sample set, got {}", paths.len());

    for path in &paths {
        let inst = load_instrument(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        assert!(inst.range_count() > 0, "{} has no ranges", inst.name());
        assert!(inst.min_sounding_pitch() <= inst.max_sounding_pitch());
    }
}

#[test]
fn clarinet_sounds_a_tone_lower() {
    let inst = load_instrument(instruments_dir().join("clarinet.txt")).unwrap();
    let Instrument::Fixed(clarinet) = &inst else {
        panic!("clarinet should be a fixed instrument");
    };
    assert_eq!(clarinet.name(), "Clarinet in Bb");
    assert_eq!(clarinet.transposition().to_string(), "-j2");
    assert_eq!(clarinet.ranges().len(), 3);
    assert_eq!(inst.min_sounding_pitch(), Some(pitch("D3")));
    assert_eq!(inst.max_sounding_pitch(), Some(pitch("F6")));
    assert!(!clarinet.ranges()[2].preferred);
    assert!(clarinet.notes().starts_with("Crossing the break"));
}

#[test]
fn guitar_is_stringed() {
    let inst = load_instrument(instruments_dir().join("guitar.txt")).unwrap();
    let Instrument::Stringed(guitar) = &inst else {
        panic!("guitar should be a stringed instrument");
    };
    let strings: Vec<String> = guitar.open_strings().iter().map(|p| p.to_string()).collect();
    assert_eq!(strings, vec!["E3", "A3", "D4", "G4", "B4", "E5"]);
    assert_eq!(inst.min_sounding_pitch(), Some(pitch("E2")));
    assert_eq!(inst.max_sounding_pitch(), Some(pitch("E6")));
    assert_eq!(guitar.notes(), "Standard tuning.");
}

#[test]
fn load_several_in_order() {
    let dir = instruments_dir();
    let insts = load_instruments(&[dir.join("violin.txt"), dir.join("tuba.txt")]).unwrap();
    let names: Vec<&str> = insts.iter().map(|i| i.name()).collect();
    assert_eq!(names, vec!["Violin", "Tuba"]);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_instrument(instruments_dir().join("kazoo.txt")).unwrap_err();
    assert!(matches!(err, ChartError::Io { .. }), "got {err:?}");
}

#[test]
fn broken_file_names_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.txt");
    std::fs::write(&path, "Horn\ntransposition: -5\nranges:\nC3 X4 nope\n").unwrap();

    let err = load_instrument(&path).unwrap_err();
    let ChartError::Instrument { path: reported, source } = &err else {
        panic!("expected an instrument error, got {err:?}");
    };
    assert_eq!(reported, &path);
    assert!(matches!(source, ParseError::InvalidEndpoint { .. }));
    assert!(err.to_string().contains("broken.txt"));
}

#[test]
fn json_export_tags_the_variant() {
    let violin = load_instrument(instruments_dir().join("violin.txt")).unwrap();
    let json = instrument_to_json(&violin).unwrap();
    assert!(json.contains("\"kind\": \"stringed\""));
    assert!(json.contains("\"open_strings\""));

    let flute = load_instrument(instruments_dir().join("flute.txt")).unwrap();
    assert!(instrument_to_json(&flute).unwrap().contains("\"kind\": \"fixed\""));
}
