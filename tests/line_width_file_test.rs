//! File output of the line width exporter.

use std::fs;

use tempfile::TempDir;

use _core::{write_line_widths, FigureError, PairCounts, PopulationPair};

fn pair(target: &str, source: &str) -> PopulationPair {
    PopulationPair::parse(target, source).expect("valid population labels")
}

#[test]
fn writes_flag_and_value_per_pair() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("lw.tex");

    let counts = PairCounts::Plain(vec![(pair("23E", "4E"), 1.0), (pair("4I", "23E"), 2.0)]);
    write_line_widths(&path, &counts).expect("write line widths");

    let text = fs::read_to_string(&path).expect("read output");
    assert_eq!(
        text,
        "\\setboolean{DRAWtwothreeEfourE}{true}\n\
         \\def\\twothreeEfourE{0.15}\n\
         \\setboolean{DRAWfourItwothreeE}{true}\n\
         \\def\\fourItwothreeE{0.3}\n"
    );
}

#[test]
fn overwrites_existing_file() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("lw.tex");
    fs::write(&path, "stale content that is much longer than the new output\n").unwrap();

    let counts = PairCounts::Plain(vec![(pair("5E", "5I"), 0.3)]);
    write_line_widths(&path, &counts).expect("write line widths");

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "\\setboolean{DRAWfiveEfiveI}{true}\n\\def\\fiveEfiveI{0.3}\n");
}

#[test]
fn statistical_file_has_sigma_statements_last() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("lw_std.tex");

    let counts = PairCounts::Statistical {
        mean: vec![(pair("6E", "6I"), 0.6), (pair("23E", "5E"), 0.3)],
        sigma: vec![(pair("23E", "5E"), 0.6), (pair("6E", "6I"), 0.3)],
    };
    write_line_widths(&path, &counts).expect("write line widths");

    let lines: Vec<String> = fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(
        lines,
        vec![
            r"\setboolean{DRAWsixEsixI}{true}",
            r"\def\sixEsixI{0.3}",
            r"\setboolean{DRAWtwothreeEfiveE}{true}",
            r"\def\twothreeEfiveE{0.15}",
            r"\def\twothreeEfiveEsigma{0.3}",
            r"\def\sixEsixIsigma{0.15}",
        ]
    );
}

#[test]
fn failed_render_leaves_existing_file_untouched() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("lw.tex");
    fs::write(&path, "previous\n").unwrap();

    let zeros = PairCounts::Plain(vec![(pair("4E", "4I"), 0.0)]);
    assert!(matches!(
        write_line_widths(&path, &zeros),
        Err(FigureError::DegenerateScale(_))
    ));

    let unknown = PairCounts::Plain(vec![(pair("1E", "4I"), 1.0)]);
    assert!(matches!(
        write_line_widths(&path, &unknown),
        Err(FigureError::Lookup { .. })
    ));

    assert_eq!(fs::read_to_string(&path).unwrap(), "previous\n");
}

#[test]
fn unwritable_destination_is_an_io_error() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("missing-dir").join("lw.tex");

    let counts = PairCounts::Plain(vec![(pair("4E", "4I"), 1.0)]);
    assert!(matches!(
        write_line_widths(&path, &counts),
        Err(FigureError::Io(_))
    ));
}
