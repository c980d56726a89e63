use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_plain_opener() {
    let opener = Opener::parse("<<EOS\n").unwrap();
    assert_eq!(opener.len, 5);
    assert_eq!(opener.id, "EOS");
    assert!(!opener.indented);
}

#[test]
fn test_squiggly_opener() {
    let opener = Opener::parse("<<~SQL, 1)").unwrap();
    assert_eq!(opener.len, 6);
    assert_eq!(opener.id, "SQL");
    assert!(opener.indented);
}

#[test]
fn test_quoted_opener() {
    let opener = Opener::parse("<<-'RAW'.strip").unwrap();
    assert_eq!(opener.len, 8);
    assert_eq!(opener.id, "RAW");
    assert!(opener.indented);
}

#[test]
fn test_not_an_opener() {
    assert_eq!(Opener::parse("<< self"), None);
    assert_eq!(Opener::parse("<<1"), None);
    assert_eq!(Opener::parse("<<''"), None);
    assert_eq!(Opener::parse("<"), None);
}

#[test]
fn test_terminates() {
    let indented = Opener::parse("<<~EOS").unwrap();
    assert!(indented.terminates("  EOS"));
    assert!(!indented.terminates("  EOS2"));

    let plain = Opener::parse("<<EOS").unwrap();
    assert!(plain.terminates("EOS"));
    assert!(!plain.terminates("  EOS"));
}
