use std::path::Path;

use pretty_assertions::assert_eq;
use stree_diagnostic::ErrorCode;

use super::check::{check_source, FileSummary};
use super::debug::dump_events;

#[test]
fn test_check_counts_nodes_and_comments() {
    let summary = check_source(Path::new("demo.rb"), "x = 1 # one", false).unwrap();
    assert_eq!(
        summary,
        FileSummary {
            nodes: 6,
            comments: 1
        }
    );
}

#[test]
fn test_check_renders_the_error() {
    let report = check_source(Path::new("demo.rb"), "def foo", false).unwrap_err();
    let mut lines = report.lines();
    assert!(lines.next().unwrap().starts_with("error[E1004]"));
    assert!(lines.next().unwrap().contains("demo.rb:1:"));
}

#[test]
fn test_dump_events_lists_tokens_and_comments() {
    let dump = dump_events("x = 1 # one\n").unwrap();
    let lines: Vec<_> = dump.lines().collect();
    assert_eq!(lines[0], r#"ident "x" @ 1:0-1:1"#);
    assert_eq!(lines[1], r#"op "=" @ 1:2-1:3"#);
    assert!(lines.contains(&r##"comment "# one" @ 1:6-1:11"##));
}

#[test]
fn test_dump_events_reports_lex_errors() {
    let error = dump_events("\"open").unwrap_err();
    assert_eq!(error.code, ErrorCode::E0001);
}
