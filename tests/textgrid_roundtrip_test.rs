use textgrid_processor::{
    PraatReader, TextEncoding, TextGrid, TextGridError, Tier, parse_textgrid,
};

const LONG_FIXTURE: &str = include_str!("test_data/intervals_long.TextGrid");
const SHORT_FIXTURE: &str = include_str!("test_data/intervals_short.TextGrid");
const PRAAT_NATIVE_FIXTURE: &str = include_str!("test_data/praat_native_long.TextGrid");

#[test]
fn test_end_to_end_long_format() {
    let grid = parse_textgrid(LONG_FIXTURE).unwrap();

    assert_eq!(grid.xmin, 0.0);
    assert_eq!(grid.xmax, 2.5);
    assert_eq!(grid.len(), 2);

    let pat = grid[0].as_interval_tier().unwrap();
    assert_eq!(pat.name, "Pat");
    assert_eq!(pat.len(), 2);
    assert_eq!(pat[0].text, "hello");
    assert_eq!(pat[0].xmax, 0.65);
    assert_eq!(pat[1].text, "");
    assert_eq!(pat[1].xmax, 2.5);

    let metronome = grid[1].as_text_tier().unwrap();
    assert_eq!(metronome.name, "Metronome");
    assert_eq!(metronome.len(), 3);
    let numbers: Vec<f64> = metronome.iter().map(|p| p.number).collect();
    assert_eq!(numbers, [0.75, 1.5, 2.25]);
    assert!(metronome.iter().all(|p| p.mark == "click"));
}

#[test]
fn test_short_and_long_formats_yield_identical_value_sequences() {
    let long_values: Vec<_> = PraatReader::new(LONG_FIXTURE).collect();
    let short_values: Vec<_> = PraatReader::new(SHORT_FIXTURE).collect();
    let native_values: Vec<_> = PraatReader::new(PRAAT_NATIVE_FIXTURE).collect();

    assert_eq!(long_values, short_values);
    assert_eq!(long_values, native_values);
}

#[test]
fn test_all_layouts_parse_to_the_same_grid() {
    let from_long = parse_textgrid(LONG_FIXTURE).unwrap();
    let from_short = parse_textgrid(SHORT_FIXTURE).unwrap();
    let from_native = parse_textgrid(PRAAT_NATIVE_FIXTURE).unwrap();

    assert_eq!(from_long, from_short);
    assert_eq!(from_long, from_native);
}

#[test]
fn test_round_trip_is_byte_identical() {
    let grid = parse_textgrid(LONG_FIXTURE).unwrap();
    assert_eq!(grid.to_praat().unwrap(), LONG_FIXTURE);
}

#[test]
fn test_short_input_canonicalizes_to_long_output() {
    let grid = parse_textgrid(SHORT_FIXTURE).unwrap();
    assert_eq!(grid.to_praat().unwrap(), LONG_FIXTURE);
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.TextGrid");

    let grid = parse_textgrid(LONG_FIXTURE).unwrap();
    grid.to_praat_file(&path).unwrap();

    let reloaded = TextGrid::from_file(&path).unwrap();
    assert_eq!(reloaded, grid);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), LONG_FIXTURE);
}

#[test]
fn test_utf16_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("utf16.TextGrid");

    let grid = parse_textgrid(LONG_FIXTURE).unwrap();
    grid.to_praat_file_with_encoding(&path, TextEncoding::Utf16)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xFE]);

    let reloaded = TextGrid::from_file_with_encoding(&path, TextEncoding::Utf16).unwrap();
    assert_eq!(reloaded, grid);
}

#[test]
fn test_utf8_bom_is_tolerated() {
    let mut content = String::from("\u{feff}");
    content.push_str(LONG_FIXTURE);
    let grid = parse_textgrid(&content).unwrap();
    assert_eq!(grid.len(), 2);
}

#[test]
fn test_quoted_names_round_trip() {
    let grid = TextGrid::new(
        0.0,
        1.0,
        vec![Tier::Text(textgrid_processor::TextTier::new(
            "the \"best\" tier",
            0.0,
            1.0,
            vec![textgrid_processor::Point::new(0.5, "a \"quoted\" mark")],
        ))],
    );

    let rendered = grid.to_praat().unwrap();
    assert!(rendered.contains("named \"the \"\"best\"\" tier\""));

    let reparsed = parse_textgrid(&rendered).unwrap();
    let tier = reparsed[0].as_text_tier().unwrap();
    assert_eq!(tier.name, "the \"best\" tier");
    assert_eq!(tier[0].mark, "a \"quoted\" mark");
}

#[test]
fn test_validation_failures_surface_from_grid_serialization() {
    let mut grid = parse_textgrid(LONG_FIXTURE).unwrap();

    if let Tier::Interval(tier) = &mut grid[0] {
        tier.insert(textgrid_processor::Interval::new(0.9, 0.7, "reversed"));
    }
    assert!(matches!(
        grid.to_praat(),
        Err(TextGridError::ReversedInterval { .. })
    ));
}
